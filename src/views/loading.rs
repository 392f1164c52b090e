use super::BasicPlaceholderView;
use crate::placeholder::PlaceholderView;
use cursive_core::view::{Margins, View, ViewWrapper};
use cursive_core::{Vec2, With};
use std::time::{Duration, Instant};

const FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
const FRAME_DURATION: Duration = Duration::from_millis(120);

/// Placeholder shown while loading: a spinner and a label.
///
/// The spinner only moves when the screen is refreshed, so the event loop
/// needs a refresh rate (see `Cursive::set_fps`) for it to spin.
pub struct LoadingView {
    view: BasicPlaceholderView,
    label: String,
    started: Instant,
}

new_default!(LoadingView);

impl LoadingView {
    /// Creates a new loading view with the default label.
    pub fn new() -> Self {
        Self::with_label("Loading...")
    }

    /// Creates a new loading view with the given label.
    pub fn with_label<S: Into<String>>(label: S) -> Self {
        let started = Instant::now();
        LoadingView {
            view: BasicPlaceholderView::new().line(""),
            label: label.into(),
            started,
        }
        .with(|s| s.refresh(started))
    }

    /// Sets the label shown next to the spinner.
    pub fn set_label<S: Into<String>>(&mut self, label: S) {
        self.label = label.into();
        self.refresh(Instant::now());
    }

    /// Returns the label shown next to the spinner.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Sets the distance to keep from each edge of the parent.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn insets(self, insets: Margins) -> Self {
        self.with(|s| s.view.set_insets(insets))
    }

    cursive_core::inner_getters!(self.view: BasicPlaceholderView);

    fn frame_at(&self, now: Instant) -> &'static str {
        let elapsed = now.saturating_duration_since(self.started);
        let i = elapsed.as_millis() / FRAME_DURATION.as_millis();
        FRAMES[i as usize % FRAMES.len()]
    }

    fn refresh(&mut self, now: Instant) {
        let text = format!("{} {}", self.frame_at(now), self.label);
        self.view.set_line(0, text);
    }
}

impl ViewWrapper for LoadingView {
    cursive_core::wrap_impl!(self.view: BasicPlaceholderView);

    fn wrap_layout(&mut self, size: Vec2) {
        self.refresh(Instant::now());
        self.view.layout(size);
    }

    fn wrap_needs_relayout(&self) -> bool {
        true
    }
}

impl PlaceholderView for LoadingView {
    fn placeholder_insets(&self) -> Margins {
        self.view.placeholder_insets()
    }

    fn accepts_input(&self) -> bool {
        self.view.accepts_input()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_turns() {
        let mut view = LoadingView::new();
        let start = view.started;

        assert_eq!(view.frame_at(start), "|");
        assert_eq!(view.frame_at(start + FRAME_DURATION), "/");
        assert_eq!(view.frame_at(start + FRAME_DURATION * 5), "/");

        view.refresh(start + FRAME_DURATION * 2);
        assert_eq!(view.get_inner().get_line(0), Some("- Loading..."));
    }

    #[test]
    fn custom_label() {
        let mut view = LoadingView::with_label("Fetching wines")
            .insets(Margins::lrtb(0, 0, 3, 0));
        view.set_label("Almost there");

        assert_eq!(view.label(), "Almost there");
        assert!(view.get_inner().get_line(0).unwrap().ends_with(" Almost there"));
        assert_eq!(view.placeholder_insets(), Margins::lrtb(0, 0, 3, 0));
    }
}
