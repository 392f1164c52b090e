use crate::machine::{StateHandle, ViewStateMachine};
use crate::placeholder::PlaceholderView;
use crate::settings::Settings;
use crate::state::ViewState;
use cursive_core::direction::Direction;
use cursive_core::event::{AnyCb, Event, EventResult};
use cursive_core::view::{CannotFocus, Selector, View, ViewWrapper};
use cursive_core::{CbSink, Printer, Vec2, With};
use std::time::Instant;

/// Wraps the content of a screen with placeholder views.
///
/// Placeholders are drawn on top of the content when shown. Input goes to
/// the placeholder under the cursor, or to the content if there is none.
///
/// Transitions requested through [`handle()`](Self::handle) run during the
/// layout phase. Use [`set_cb_sink`](Self::set_cb_sink) to have requests
/// from other threads picked up right away.
///
/// # Examples
///
/// ```rust
/// # use cursive_stateful::{DisplayState, StatefulView};
/// # use cursive_stateful::views::LoadingView;
/// # use cursive_core::views::TextView;
/// let view = StatefulView::new(TextView::new("Hello"))
///     .with_placeholder("loading", LoadingView::new());
///
/// let handle = view.handle();
/// handle.request_transition(DisplayState::showing("loading"), true);
/// ```
pub struct StatefulView<V> {
    content: V,
    machine: ViewStateMachine,
}

impl<V> StatefulView<V> {
    /// Wraps `content`, with no placeholder registered.
    pub fn new(content: V) -> Self {
        StatefulView {
            content,
            machine: ViewStateMachine::new(),
        }
    }

    /// Sets the settings used for transitions.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn with_settings(self, settings: Settings) -> Self {
        self.with(|s| s.machine.set_settings(settings))
    }

    /// Sets the sink used to wake up the event loop.
    ///
    /// Handles should be taken after this call.
    pub fn set_cb_sink(&mut self, sink: CbSink) {
        self.machine.set_cb_sink(sink);
    }

    /// Sets the sink used to wake up the event loop.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn with_cb_sink(self, sink: CbSink) -> Self {
        self.with(|s| s.set_cb_sink(sink))
    }

    /// Returns the state machine.
    pub fn machine(&self) -> &ViewStateMachine {
        &self.machine
    }

    /// Returns a mutable reference to the state machine.
    pub fn machine_mut(&mut self) -> &mut ViewStateMachine {
        &mut self.machine
    }

    /// Returns a handle to request transitions.
    pub fn handle(&self) -> StateHandle {
        self.machine.handle()
    }

    /// Registers a placeholder under `key`.
    pub fn set_placeholder<S, P>(&mut self, key: S, view: P)
    where
        S: Into<String>,
        P: PlaceholderView,
    {
        self.machine.add_placeholder(key, view);
    }

    /// Registers a placeholder under `key`.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn with_placeholder<S, P>(self, key: S, view: P) -> Self
    where
        S: Into<String>,
        P: PlaceholderView,
    {
        self.with(|s| s.set_placeholder(key, view))
    }

    /// Unregisters the placeholder for `key`.
    ///
    /// If shown, it stays on screen until the next transition.
    pub fn remove_placeholder(&mut self, key: &str) {
        self.machine.remove_view(key);
    }

    /// Sets the view shown while loading.
    pub fn set_loading_view<P: PlaceholderView>(&mut self, view: P) {
        self.set_placeholder(ViewState::Loading.key(), view);
    }

    /// Sets the view shown while loading.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn with_loading_view<P: PlaceholderView>(self, view: P) -> Self {
        self.with(|s| s.set_loading_view(view))
    }

    /// Sets the view shown after an error.
    pub fn set_error_view<P: PlaceholderView>(&mut self, view: P) {
        self.set_placeholder(ViewState::Error.key(), view);
    }

    /// Sets the view shown after an error.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn with_error_view<P: PlaceholderView>(self, view: P) -> Self {
        self.with(|s| s.set_error_view(view))
    }

    /// Sets the view shown when there is no content.
    pub fn set_empty_view<P: PlaceholderView>(&mut self, view: P) {
        self.set_placeholder(ViewState::Empty.key(), view);
    }

    /// Sets the view shown when there is no content.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn with_empty_view<P: PlaceholderView>(self, view: P) -> Self {
        self.with(|s| s.set_empty_view(view))
    }

    cursive_core::inner_getters!(self.content: V);
}

impl<V: View> ViewWrapper for StatefulView<V> {
    cursive_core::wrap_impl!(self.content: V);

    fn wrap_draw(&self, printer: &Printer) {
        self.content.draw(printer);
        self.machine.draw(printer);
    }

    fn wrap_layout(&mut self, size: Vec2) {
        self.content.layout(size);
        self.machine.layout(size);
        self.machine.advance(Instant::now());
    }

    fn wrap_needs_relayout(&self) -> bool {
        self.content.needs_relayout() || self.machine.needs_relayout() || !self.machine.is_idle()
    }

    fn wrap_on_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Mouse {
                offset, position, ..
            } => {
                let inside = position
                    .checked_sub(offset)
                    .map_or(false, |p| self.machine.point_inside(p));

                if inside {
                    self.machine.on_event(event)
                } else {
                    self.content.on_event(event)
                }
            }
            event => match self.machine.on_event(event.clone()) {
                EventResult::Ignored => self.content.on_event(event),
                result => result,
            },
        }
    }

    fn wrap_take_focus(&mut self, source: Direction) -> Result<EventResult, CannotFocus> {
        match self.content.take_focus(source) {
            Err(CannotFocus) if self.machine.takes_input() => Ok(EventResult::Consumed(None)),
            result => result,
        }
    }

    fn wrap_call_on_any(&mut self, selector: &Selector, callback: AnyCb) {
        self.content.call_on_any(selector, callback);
        self.machine.call_on_any(selector, callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::Inset;
    use crate::state::DisplayState;
    use cursive_core::event::{Key, MouseButton, MouseEvent};
    use cursive_core::view::Margins;
    use cursive_core::views::{DummyView, LastSizeView};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    // Consumes and counts every event.
    struct Counter(Arc<AtomicUsize>);

    impl View for Counter {
        fn draw(&self, _: &Printer) {}

        fn on_event(&mut self, _: Event) -> EventResult {
            self.0.fetch_add(1, Ordering::SeqCst);
            EventResult::Consumed(None)
        }
    }

    // Never asks for a new layout.
    struct Still;

    impl View for Still {
        fn draw(&self, _: &Printer) {}

        fn needs_relayout(&self) -> bool {
            false
        }
    }

    impl PlaceholderView for Still {}

    fn click(x: usize, y: usize) -> Event {
        Event::Mouse {
            offset: Vec2::zero(),
            position: Vec2::new(x, y),
            event: MouseEvent::Release(MouseButton::Left),
        }
    }

    fn instant() -> Settings {
        Settings::new().fade_duration(Duration::ZERO)
    }

    #[test]
    fn input_goes_through_to_content() {
        let content = Arc::new(AtomicUsize::new(0));
        let placeholder = Arc::new(AtomicUsize::new(0));

        let mut view = StatefulView::new(Counter(Arc::clone(&content)))
            .with_settings(instant())
            .with_placeholder(
                "error",
                Inset::new(Margins::lrtb(0, 0, 5, 0), Counter(Arc::clone(&placeholder))),
            );

        view.handle()
            .request_transition(DisplayState::showing("error"), true);
        view.layout(Vec2::new(20, 10));
        assert_eq!(view.machine().current_state(), DisplayState::showing("error"));

        // Above the placeholder.
        view.on_event(click(3, 2));
        assert_eq!(content.load(Ordering::SeqCst), 1);

        // On the placeholder.
        view.on_event(click(3, 7));
        assert_eq!(placeholder.load(Ordering::SeqCst), 1);

        // Keys go to the placeholder first.
        view.on_event(Event::Key(Key::Enter));
        assert_eq!(placeholder.load(Ordering::SeqCst), 2);

        view.handle().request_transition(DisplayState::Content, true);
        view.layout(Vec2::new(20, 10));

        view.on_event(click(3, 7));
        view.on_event(Event::Key(Key::Enter));
        assert_eq!(content.load(Ordering::SeqCst), 3);
        assert_eq!(placeholder.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn passive_placeholders_let_everything_through() {
        let content = Arc::new(AtomicUsize::new(0));

        let mut view = StatefulView::new(Counter(Arc::clone(&content)))
            .with_loading_view(DummyView);

        view.handle()
            .request_transition(ViewState::Loading.into(), false);
        view.layout(Vec2::new(20, 10));
        assert!(view.machine().is_attached("loading"));

        view.on_event(click(3, 7));
        view.on_event(Event::Key(Key::Enter));
        assert_eq!(content.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn shown_placeholders_can_ask_for_layout() {
        use crate::views::LoadingView;

        let mut view = StatefulView::new(Still)
            .with_empty_view(Still)
            .with_loading_view(LoadingView::new());
        let handle = view.handle();

        view.layout(Vec2::new(20, 10));
        assert!(!view.needs_relayout());

        handle.request_transition(ViewState::Empty.into(), false);
        view.layout(Vec2::new(20, 10));
        assert!(!view.needs_relayout());

        // The spinner needs a layout to turn.
        handle.request_transition(ViewState::Loading.into(), false);
        view.layout(Vec2::new(20, 10));
        assert!(view.machine().is_idle());
        assert!(view.needs_relayout());
    }

    #[test]
    fn layout_drives_transitions() {
        let mut view = StatefulView::new(LastSizeView::new(DummyView))
            .with_settings(instant())
            .with_empty_view(Inset::new(Margins::lrtb(1, 1, 2, 2), DummyView));
        let handle = view.handle();

        handle.request_transition(ViewState::Empty.into(), true);
        assert!(view.needs_relayout());
        assert_eq!(view.machine().current_state(), DisplayState::Content);

        view.layout(Vec2::new(30, 10));
        assert!(view.machine().is_idle());
        assert_eq!(handle.current_state(), DisplayState::showing("empty"));
        assert_eq!(view.get_inner().size, Vec2::new(30, 10));

        let frame = view.machine().frame("empty").unwrap();
        assert_eq!(frame.top_left(), Vec2::new(1, 2));
        assert_eq!(frame.size(), Vec2::new(28, 6));
    }
}
