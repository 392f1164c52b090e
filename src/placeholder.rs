//! Views that can be registered as placeholders.
use cursive_core::view::{Margins, View, ViewWrapper};
use cursive_core::views::{
    BoxedView, Dialog, DummyView, Layer, LinearLayout, PaddedView, Panel, ResizedView, TextView,
};
use cursive_core::With;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// A view that can be shown in place of the content.
///
/// Both methods have defaults, so most views only need an empty `impl`.
pub trait PlaceholderView: View {
    /// Insets to apply when presented, relative to the edges of the parent.
    ///
    /// The placeholder is stretched to fill the remaining space.
    fn placeholder_insets(&self) -> Margins {
        Margins::zeroes()
    }

    /// Should this view receive mouse and keyboard input?
    ///
    /// Points outside of any placeholder accepting input go through to the
    /// content below.
    fn accepts_input(&self) -> bool {
        true
    }
}

/// Shared handle to a placeholder view.
///
/// The registry and the container both refer to placeholders through this
/// handle, so a view can stay attached after being unregistered.
#[derive(Clone)]
pub struct PlaceholderHandle {
    view: Arc<Mutex<Box<dyn PlaceholderView>>>,
}

impl PlaceholderHandle {
    /// Wraps `view` in a new handle.
    pub fn new<V: PlaceholderView>(view: V) -> Self {
        Self::from_boxed(Box::new(view))
    }

    /// Wraps an already boxed view in a new handle.
    pub fn from_boxed(view: Box<dyn PlaceholderView>) -> Self {
        PlaceholderHandle {
            view: Arc::new(Mutex::new(view)),
        }
    }

    /// Gets access to the inner view.
    ///
    /// Blocks if the view is already locked.
    pub fn lock(&self) -> MutexGuard<'_, Box<dyn PlaceholderView>> {
        self.view.lock()
    }

    /// Returns `true` if both handles point to the same view.
    pub fn ptr_eq(&self, other: &PlaceholderHandle) -> bool {
        Arc::ptr_eq(&self.view, &other.view)
    }
}

impl std::fmt::Debug for PlaceholderHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceholderHandle")
            .field("view", &Arc::as_ptr(&self.view))
            .finish()
    }
}

/// Wraps any view to give it placeholder insets.
///
/// # Examples
///
/// ```rust
/// # use cursive_stateful::Inset;
/// # use cursive_core::views::TextView;
/// # use cursive_core::view::Margins;
/// // 2 columns on each side, 1 line at the top.
/// let view = Inset::new(Margins::lrtb(2, 2, 1, 0), TextView::new("Nothing here"));
/// ```
pub struct Inset<V> {
    view: V,
    insets: Margins,
    accepts_input: bool,
}

impl<V> Inset<V> {
    /// Wraps `view` with the given insets.
    pub fn new(insets: Margins, view: V) -> Self {
        Inset {
            view,
            insets,
            accepts_input: true,
        }
    }

    /// Sets the insets for this view.
    pub fn set_insets(&mut self, insets: Margins) {
        self.insets = insets;
    }

    /// Lets input through to the content below.
    #[must_use]
    pub fn passive(self) -> Self {
        self.with(|s| s.accepts_input = false)
    }

    cursive_core::inner_getters!(self.view: V);
}

impl<V: View> ViewWrapper for Inset<V> {
    cursive_core::wrap_impl!(self.view: V);
}

impl<V: View> PlaceholderView for Inset<V> {
    fn placeholder_insets(&self) -> Margins {
        self.insets
    }

    fn accepts_input(&self) -> bool {
        self.accepts_input
    }
}

impl PlaceholderView for TextView {
    fn accepts_input(&self) -> bool {
        false
    }
}

impl PlaceholderView for DummyView {
    fn accepts_input(&self) -> bool {
        false
    }
}

impl PlaceholderView for BoxedView {}
impl PlaceholderView for Dialog {}
impl PlaceholderView for LinearLayout {}
impl<V: View> PlaceholderView for Panel<V> {}
impl<V: View> PlaceholderView for PaddedView<V> {}
impl<V: View> PlaceholderView for Layer<V> {}
impl<V: View> PlaceholderView for ResizedView<V> {}
