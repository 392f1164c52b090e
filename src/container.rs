//! Invisible view hosting the active placeholder.
use crate::placeholder::PlaceholderHandle;
use cursive_core::event::{AnyCb, Event, EventResult};
use cursive_core::style::Effect;
use cursive_core::view::{Selector, View};
use cursive_core::{Printer, Rect, Vec2};

/// A placeholder currently attached to the container.
struct Attachment {
    key: String,
    view: PlaceholderHandle,
    opacity: f32,
    offset: Vec2,
    size: Vec2,
}

impl Attachment {
    fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    fn contains(&self, point: Vec2) -> bool {
        point.fits(self.offset)
            && point.x < self.offset.x + self.size.x
            && point.y < self.offset.y + self.size.y
    }

    fn layout(&mut self, size: Vec2) {
        let mut view = self.view.lock();
        let insets = view.placeholder_insets();

        self.offset = insets.top_left();
        self.size = size.saturating_sub(insets.combined());
        view.layout(self.size);
    }
}

/// Pass-through container for placeholder views.
///
/// It always takes the full size of its parent, and lays out each attached
/// placeholder with the insets it asks for.
///
/// It is transparent to input: a point is only inside the container if a
/// visible placeholder accepting input covers it. Everything else should go
/// to whatever is below.
///
/// Placeholders are stored from back to front.
pub struct ContainerView {
    children: Vec<Attachment>,
    size: Vec2,
}

new_default!(ContainerView);

impl ContainerView {
    /// Creates a new empty container.
    pub fn new() -> Self {
        ContainerView {
            children: Vec::new(),
            size: Vec2::zero(),
        }
    }

    /// Attaches `view` at the front, under the given key.
    ///
    /// If the view was already attached, it is moved to the front.
    pub fn attach<S: Into<String>>(&mut self, key: S, view: PlaceholderHandle, opacity: f32) {
        self.detach_handle(&view);

        let mut child = Attachment {
            key: key.into(),
            view,
            opacity,
            offset: Vec2::zero(),
            size: Vec2::zero(),
        };
        child.layout(self.size);
        self.children.push(child);
    }

    /// Swaps `old` for `new`, keeping its key, position and opacity.
    ///
    /// Returns `false` if `old` was not attached.
    pub fn replace(&mut self, old: &PlaceholderHandle, new: PlaceholderHandle) -> bool {
        let size = self.size;
        match self.children.iter_mut().find(|c| c.view.ptr_eq(old)) {
            Some(child) => {
                child.view = new;
                child.layout(size);
                true
            }
            None => false,
        }
    }

    /// Swaps the view attached under `key` for `new`, keeping its position
    /// and opacity.
    ///
    /// Other views attached under the same key are detached. Returns `false`
    /// if nothing is attached under `key`, or if `new` already is.
    pub fn replace_key(&mut self, key: &str, new: PlaceholderHandle) -> bool {
        let i = match self.children.iter().rposition(|c| c.key == key) {
            Some(i) if !self.children[i].view.ptr_eq(&new) => i,
            _ => return false,
        };

        let size = self.size;
        let child = &mut self.children[i];
        child.view = new;
        child.layout(size);

        let view = child.view.clone();
        self.children
            .retain(|c| c.key != key || c.view.ptr_eq(&view));
        true
    }

    /// Detaches every view attached under `key`.
    ///
    /// Returns `true` if something was detached.
    pub fn detach(&mut self, key: &str) -> bool {
        let before = self.children.len();
        self.children.retain(|c| c.key != key);
        before != self.children.len()
    }

    /// Detaches the given view, whatever its key.
    ///
    /// Returns `true` if it was attached.
    pub fn detach_handle(&mut self, view: &PlaceholderHandle) -> bool {
        let before = self.children.len();
        self.children.retain(|c| !c.view.ptr_eq(view));
        before != self.children.len()
    }

    /// Detaches every view not attached under `key`.
    pub fn detach_except(&mut self, key: &str) {
        self.children.retain(|c| c.key == key);
    }

    /// Detaches all views.
    pub fn detach_all(&mut self) {
        self.children.clear();
    }

    /// Returns `true` if a view is attached under `key`.
    pub fn is_attached(&self, key: &str) -> bool {
        self.children.iter().any(|c| c.key == key)
    }

    /// Returns `true` if the given view is attached.
    pub fn contains(&self, view: &PlaceholderHandle) -> bool {
        self.children.iter().any(|c| c.view.ptr_eq(view))
    }

    /// Returns `true` if no view is attached.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Iterates on the keys of attached views, from back to front.
    pub fn attached_keys(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|c| c.key.as_str())
    }

    /// Iterates on attached views, from back to front.
    pub fn attached_views(&self) -> impl Iterator<Item = &PlaceholderHandle> {
        self.children.iter().map(|c| &c.view)
    }

    /// Sets the opacity of the views attached under `key`.
    pub fn set_opacity(&mut self, key: &str, opacity: f32) {
        for child in self.children.iter_mut().filter(|c| c.key == key) {
            child.opacity = opacity;
        }
    }

    /// Sets the opacity of every attached view.
    pub fn set_all_opacity(&mut self, opacity: f32) {
        for child in &mut self.children {
            child.opacity = opacity;
        }
    }

    /// Returns the opacity of the front-most view attached under `key`.
    pub fn opacity(&self, key: &str) -> Option<f32> {
        self.find(key).map(|c| c.opacity)
    }

    /// Returns the area given to the view attached under `key`.
    ///
    /// Relative to the container.
    pub fn frame(&self, key: &str) -> Option<Rect> {
        self.find(key).map(|c| Rect::from_size(c.offset, c.size))
    }

    /// Returns `true` if a visible placeholder accepting input covers `point`.
    ///
    /// `point` is relative to the container.
    pub fn point_inside(&self, point: Vec2) -> bool {
        self.hit(point).is_some()
    }

    /// Returns `true` if a visible placeholder accepts keyboard input.
    pub fn takes_input(&self) -> bool {
        self.focused().is_some()
    }

    fn find(&self, key: &str) -> Option<&Attachment> {
        self.children.iter().rev().find(|c| c.key == key)
    }

    // Index of the front-most child taking input at this point.
    fn hit(&self, point: Vec2) -> Option<usize> {
        self.children
            .iter()
            .rposition(|c| c.is_visible() && c.contains(point) && c.view.lock().accepts_input())
    }

    fn focused(&self) -> Option<usize> {
        self.children
            .iter()
            .rposition(|c| c.is_visible() && c.view.lock().accepts_input())
    }
}

impl View for ContainerView {
    fn draw(&self, printer: &Printer) {
        for child in self.children.iter().filter(|c| c.is_visible()) {
            let printer = printer.offset(child.offset).cropped(child.size);
            let view = child.view.lock();

            if child.opacity < 1.0 {
                printer.with_effect(Effect::Dim, |printer| view.draw(printer));
            } else {
                view.draw(&printer);
            }
        }
    }

    fn layout(&mut self, size: Vec2) {
        self.size = size;
        for child in &mut self.children {
            child.layout(size);
        }
    }

    fn required_size(&mut self, constraint: Vec2) -> Vec2 {
        constraint
    }

    fn needs_relayout(&self) -> bool {
        self.children.iter().any(|c| c.view.lock().needs_relayout())
    }

    fn on_event(&mut self, event: Event) -> EventResult {
        let target = match event {
            Event::Mouse {
                offset, position, ..
            } => position.checked_sub(offset).and_then(|p| self.hit(p)),
            _ => self.focused(),
        };

        match target {
            Some(i) => {
                let child = &self.children[i];
                child.view.lock().on_event(event.relativized(child.offset))
            }
            None => EventResult::Ignored,
        }
    }

    fn call_on_any(&mut self, selector: &Selector, callback: AnyCb) {
        for child in &mut self.children {
            child.view.lock().call_on_any(selector, callback);
        }
    }
}
