use super::BasicPlaceholderView;
use crate::placeholder::PlaceholderView;
use cursive_core::direction::Direction;
use cursive_core::event::{Callback, Event, EventResult, Key, MouseButton, MouseEvent};
use cursive_core::style::PaletteStyle;
use cursive_core::view::{CannotFocus, Margins, ViewWrapper};
use cursive_core::{Cursive, With};

/// Placeholder shown after a failed load.
///
/// Shows a message, and a hint to reload. Clicking anywhere on the view or
/// pressing `<Enter>` runs the retry callback.
///
/// # Examples
///
/// ```rust
/// # use cursive_stateful::views::ErrorView;
/// let view = ErrorView::new().on_retry(|s| {
///     s.add_layer(cursive_core::views::Dialog::info("Reloading..."));
/// });
/// ```
pub struct ErrorView {
    view: BasicPlaceholderView,
    on_retry: Option<Callback>,
}

new_default!(ErrorView);

impl ErrorView {
    /// Creates a new error view with the default messages.
    pub fn new() -> Self {
        Self::with_message("Something went wrong.")
    }

    /// Creates a new error view with the given message.
    pub fn with_message<S: Into<String>>(message: S) -> Self {
        ErrorView {
            view: BasicPlaceholderView::new()
                .line(message)
                .line("")
                .styled_line("Click or press <Enter> to reload", PaletteStyle::Secondary),
            on_retry: None,
        }
    }

    /// Sets the main message.
    pub fn set_message<S: Into<String>>(&mut self, message: S) {
        self.view.set_line(0, message);
    }

    /// Sets the hint shown below the message.
    pub fn set_detail<S: Into<String>>(&mut self, detail: S) {
        self.view.set_line(2, detail);
    }

    /// Sets the callback to run when the user asks to reload.
    pub fn set_on_retry<F>(&mut self, f: F)
    where
        F: Fn(&mut Cursive) + 'static + Send + Sync,
    {
        self.on_retry = Some(Callback::from_fn(f));
    }

    /// Sets the callback to run when the user asks to reload.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn on_retry<F>(self, f: F) -> Self
    where
        F: Fn(&mut Cursive) + 'static + Send + Sync,
    {
        self.with(|s| s.set_on_retry(f))
    }

    /// Sets the distance to keep from each edge of the parent.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn insets(self, insets: Margins) -> Self {
        self.with(|s| s.view.set_insets(insets))
    }

    cursive_core::inner_getters!(self.view: BasicPlaceholderView);

    fn retry(&self) -> EventResult {
        match self.on_retry {
            Some(ref cb) => EventResult::Consumed(Some(cb.clone())),
            None => EventResult::Ignored,
        }
    }
}

impl ViewWrapper for ErrorView {
    cursive_core::wrap_impl!(self.view: BasicPlaceholderView);

    fn wrap_on_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(Key::Enter) => self.retry(),
            Event::Mouse {
                event: MouseEvent::Press(MouseButton::Left),
                ..
            } => EventResult::Consumed(None),
            Event::Mouse {
                event: MouseEvent::Release(MouseButton::Left),
                position,
                offset,
            } if position.fits_in_rect(offset, self.view.last_size()) => self.retry(),
            _ => EventResult::Ignored,
        }
    }

    fn wrap_take_focus(&mut self, _: Direction) -> Result<EventResult, CannotFocus> {
        Ok(EventResult::Consumed(None))
    }
}

impl PlaceholderView for ErrorView {
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
    use cursive_core::view::View;
    use cursive_core::Vec2;

    fn release(x: usize, y: usize) -> Event {
        Event::Mouse {
            offset: Vec2::new(2, 1),
            position: Vec2::new(x, y),
            event: MouseEvent::Release(MouseButton::Left),
        }
    }

    #[test]
    fn retries_on_enter_and_click() {
        let mut view = ErrorView::new().on_retry(|_| ());
        view.layout(Vec2::new(20, 5));

        assert!(matches!(
            view.on_event(Event::Key(Key::Enter)),
            EventResult::Consumed(Some(_))
        ));
        assert!(matches!(
            view.on_event(release(5, 3)),
            EventResult::Consumed(Some(_))
        ));

        // Outside of the view.
        assert!(matches!(view.on_event(release(30, 3)), EventResult::Ignored));
        assert!(matches!(view.on_event(release(1, 0)), EventResult::Ignored));
    }

    #[test]
    fn no_callback_no_retry() {
        let mut view = ErrorView::with_message("Offline.");
        view.layout(Vec2::new(20, 5));

        assert!(matches!(view.on_event(Event::Key(Key::Enter)), EventResult::Ignored));
        assert_eq!(view.get_inner().get_line(0), Some("Offline."));
        assert!(view.take_focus(Direction::none()).is_ok());
    }

    #[test]
    fn detail_line() {
        let mut view = ErrorView::new();
        view.set_detail("Press r to reload");

        assert_eq!(view.get_inner().get_line(2), Some("Press r to reload"));
        assert!(view.accepts_input());
    }
}
