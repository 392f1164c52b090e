use super::BasicPlaceholderView;
use crate::placeholder::PlaceholderView;
use cursive_core::view::{Margins, ViewWrapper};
use cursive_core::With;

/// Placeholder shown when there is nothing to show.
pub struct EmptyView {
    view: BasicPlaceholderView,
}

new_default!(EmptyView);

impl EmptyView {
    /// Creates a new empty view with the default label.
    pub fn new() -> Self {
        Self::with_label("No Content.")
    }

    /// Creates a new empty view with the given label.
    pub fn with_label<S: Into<String>>(label: S) -> Self {
        EmptyView {
            view: BasicPlaceholderView::new().line(label),
        }
    }

    /// Sets the label.
    pub fn set_label<S: Into<String>>(&mut self, label: S) {
        self.view.set_line(0, label);
    }

    /// Sets the distance to keep from each edge of the parent.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn insets(self, insets: Margins) -> Self {
        self.with(|s| s.view.set_insets(insets))
    }

    cursive_core::inner_getters!(self.view: BasicPlaceholderView);
}

impl ViewWrapper for EmptyView {
    cursive_core::wrap_impl!(self.view: BasicPlaceholderView);
}

impl PlaceholderView for EmptyView {
    fn placeholder_insets(&self) -> Margins {
        self.view.placeholder_insets()
    }

    fn accepts_input(&self) -> bool {
        self.view.accepts_input()
    }
}
