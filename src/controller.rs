//! Decides which placeholder a screen should show.
//!
//! A screen usually doesn't request transitions directly. Instead, it
//! reports when it starts and stops loading, and a [`StatefulController`]
//! picks the state from three conditions:
//!
//! * Is the screen loading?
//! * Did the last load fail?
//! * Does the screen have content to show?
//!
//! Content is never hidden to show an error: if the screen has content,
//! errors are given to the [`on_error`](StatefulController::on_error)
//! callback instead, so the screen can show an unobtrusive notice.
use crate::machine::{StateHandle, Transition};
use crate::settings::Settings;
use crate::state::{DisplayState, ViewState};
use cursive_core::With;
use std::error::Error;
use std::sync::Arc;

/// Returns the state a screen should be in.
///
/// * With `always_show_loading`, loading wins over everything.
/// * Otherwise, content wins over everything.
/// * Without content, loading wins over errors, and errors over empty.
pub fn resolve_state(
    has_content: bool,
    loading: bool,
    has_error: bool,
    always_show_loading: bool,
) -> ViewState {
    if loading && always_show_loading {
        ViewState::Loading
    } else if has_content {
        ViewState::Content
    } else if loading {
        ViewState::Loading
    } else if has_error {
        ViewState::Error
    } else {
        ViewState::Empty
    }
}

/// Requests transitions based on the loading state of a screen.
///
/// The controller is a cheap, cloneable object: clones share the same
/// callbacks and send requests to the same state machine. It can be moved
/// to a worker thread to report the end of a load from there.
///
/// `E` is the error type given to [`end_loading`](Self::end_loading).
///
/// # Examples
///
/// ```rust
/// # use cursive_stateful::{StatefulController, ViewStateMachine};
/// let machine = ViewStateMachine::new();
/// let controller: StatefulController<String> =
///     StatefulController::new(machine.handle(), || false)
///         .on_error(|err| log::warn!("Could not refresh: {err}"));
///
/// controller.start_loading(true);
/// controller.end_loading(true, Some(String::from("timeout")));
/// ```
pub struct StatefulController<E = Box<dyn Error + Send + Sync>> {
    handle: StateHandle,
    has_content: Arc<dyn Fn() -> bool + Send + Sync>,
    on_error: Option<Arc<dyn Fn(E) + Send + Sync>>,
    always_show_loading: bool,
}

impl<E> Clone for StatefulController<E> {
    fn clone(&self) -> Self {
        StatefulController {
            handle: self.handle.clone(),
            has_content: Arc::clone(&self.has_content),
            on_error: self.on_error.clone(),
            always_show_loading: self.always_show_loading,
        }
    }
}

impl<E> StatefulController<E> {
    /// Creates a new controller sending requests through `handle`.
    ///
    /// `has_content` is called every time a state is picked. It should
    /// return `true` if the screen has content to show.
    pub fn new<F>(handle: StateHandle, has_content: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        StatefulController {
            handle,
            has_content: Arc::new(has_content),
            on_error: None,
            always_show_loading: false,
        }
    }

    /// Sets the callback for errors happening while content is shown.
    ///
    /// It is called right before the transition is requested, on the
    /// thread calling `end_loading`.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn on_error<F>(self, f: F) -> Self
    where
        F: Fn(E) + Send + Sync + 'static,
    {
        self.with(|s| s.on_error = Some(Arc::new(f)))
    }

    /// Applies the loading policy from `settings`.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn with_settings(self, settings: &Settings) -> Self {
        self.always_show_loading(settings.always_show_loading)
    }

    /// Shows the loading view while loading, even if content is available.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn always_show_loading(self, always: bool) -> Self {
        self.with(|s| s.set_always_show_loading(always))
    }

    /// Shows the loading view while loading, even if content is available.
    pub fn set_always_show_loading(&mut self, always: bool) {
        self.always_show_loading = always;
    }

    /// Returns the handle used to request transitions.
    pub fn handle(&self) -> &StateHandle {
        &self.handle
    }

    /// Returns the state currently on screen.
    ///
    /// Returns `None` if a placeholder with a custom key is shown.
    pub fn current_state(&self) -> Option<ViewState> {
        ViewState::from_display(&self.handle.current_state())
    }

    /// Returns the last requested state.
    ///
    /// Returns `None` if a placeholder with a custom key was requested.
    pub fn last_state(&self) -> Option<ViewState> {
        ViewState::from_display(&self.handle.last_requested_state())
    }

    /// Restores the last requested state, without animation.
    ///
    /// Call this before the screen is shown again, so it doesn't flash
    /// through another state. The error callback is not called.
    pub fn setup_initial_state(&self) {
        self.restore(None);
    }

    /// Restores the last requested state, and runs `on_complete` once done.
    pub fn setup_initial_state_with<F>(&self, on_complete: F)
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        self.restore(Some(Box::new(on_complete)));
    }

    fn restore(&self, on_complete: Option<crate::Completion>) {
        let last = self.last_state();
        let loading = last == Some(ViewState::Loading);
        let has_error = last == Some(ViewState::Error);

        self.transition(loading, has_error, None, false, on_complete);
    }

    /// Moves to the loading state.
    ///
    /// The loading view is only shown if there is no content, unless
    /// `always_show_loading` is set.
    pub fn start_loading(&self, animated: bool) {
        self.transition(true, false, None, animated, None);
    }

    /// Moves to the loading state, and runs `on_complete` once done.
    pub fn start_loading_with<F>(&self, animated: bool, on_complete: F)
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        self.transition(true, false, None, animated, Some(Box::new(on_complete)));
    }

    /// Ends the loading state.
    ///
    /// Shows the error view if `error` is set, or the empty view if there
    /// is no content.
    pub fn end_loading(&self, animated: bool, error: Option<E>) {
        self.transition_view_states(false, error, animated);
    }

    /// Ends the loading state, and runs `on_complete` once done.
    pub fn end_loading_with<F>(&self, animated: bool, error: Option<E>, on_complete: F)
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        let has_error = error.is_some();
        self.transition(false, has_error, error, animated, Some(Box::new(on_complete)));
    }

    /// Moves to the state matching the given conditions.
    pub fn transition_view_states(&self, loading: bool, error: Option<E>, animated: bool) {
        let has_error = error.is_some();
        self.transition(loading, has_error, error, animated, None);
    }

    fn transition(
        &self,
        loading: bool,
        has_error: bool,
        error: Option<E>,
        animated: bool,
        on_complete: Option<crate::Completion>,
    ) {
        let has_content = (self.has_content)();
        let state = resolve_state(has_content, loading, has_error, self.always_show_loading);

        if state == ViewState::Content {
            if let (Some(error), Some(on_error)) = (error, &self.on_error) {
                on_error(error);
            }
        }

        let mut transition = Transition::new(DisplayState::from(state), animated);
        if let Some(f) = on_complete {
            transition = transition.on_complete(f);
        }
        self.handle.request(transition);
    }
}

impl<E> std::fmt::Debug for StatefulController<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatefulController")
            .field("handle", &self.handle)
            .field("always_show_loading", &self.always_show_loading)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::ViewStateMachine;
    use crate::placeholder::PlaceholderHandle;
    use cursive_core::views::DummyView;
    use cursive_core::Vec2;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::thread;
    use std::time::{Duration, Instant};

    fn machine() -> ViewStateMachine {
        let mut machine = ViewStateMachine::with_views(
            ["loading", "error", "empty"]
                .map(|key| (key, PlaceholderHandle::new(DummyView))),
        );
        machine.layout(Vec2::new(40, 10));
        machine
    }

    fn settle(machine: &mut ViewStateMachine) {
        let mut now = Instant::now();
        machine.advance(now);
        while !machine.is_idle() {
            now += Duration::from_secs(1);
            machine.advance(now);
        }
    }

    #[test]
    fn decision_table() {
        use ViewState::*;

        // (has_content, loading, has_error) -> state
        let cases = [
            ((false, false, false), Empty),
            ((false, false, true), Error),
            ((false, true, false), Loading),
            ((false, true, true), Loading),
            ((true, false, false), Content),
            ((true, false, true), Content),
            ((true, true, false), Content),
            ((true, true, true), Content),
        ];

        for ((has_content, loading, has_error), expected) in cases {
            assert_eq!(
                resolve_state(has_content, loading, has_error, false),
                expected,
                "content: {has_content}, loading: {loading}, error: {has_error}"
            );
        }
    }

    #[test]
    fn always_show_loading_wins() {
        assert_eq!(resolve_state(true, true, false, true), ViewState::Loading);
        assert_eq!(resolve_state(true, true, true, true), ViewState::Loading);
        assert_eq!(resolve_state(true, false, true, true), ViewState::Content);
        assert_eq!(resolve_state(false, false, true, true), ViewState::Error);
    }

    #[test]
    fn error_with_content_goes_to_the_callback() {
        let mut machine = machine();
        let errors = Arc::new(AtomicUsize::new(0));

        let errors_in_cb = Arc::clone(&errors);
        let controller = StatefulController::new(machine.handle(), || true).on_error(
            move |err: &'static str| {
                assert_eq!(err, "timeout");
                errors_in_cb.fetch_add(1, Ordering::SeqCst);
            },
        );

        controller.start_loading(true);
        controller.end_loading(true, Some("timeout"));
        settle(&mut machine);

        assert_eq!(errors.load(Ordering::SeqCst), 1);
        assert_eq!(controller.current_state(), Some(ViewState::Content));
        assert!(!machine.container_attached());
    }

    #[test]
    fn error_without_content_shows_the_error_view() {
        let mut machine = machine();
        let errors = Arc::new(AtomicUsize::new(0));

        let errors_in_cb = Arc::clone(&errors);
        let controller = StatefulController::new(machine.handle(), || false)
            .on_error(move |_: String| {
                errors_in_cb.fetch_add(1, Ordering::SeqCst);
            });

        controller.start_loading(false);
        assert_eq!(controller.last_state(), Some(ViewState::Loading));
        settle(&mut machine);
        assert!(machine.is_attached("loading"));

        controller.end_loading(true, Some("offline".into()));
        settle(&mut machine);

        assert_eq!(errors.load(Ordering::SeqCst), 0);
        assert_eq!(controller.current_state(), Some(ViewState::Error));
        assert_eq!(machine.attached_keys().collect::<Vec<_>>(), ["error"]);
    }

    #[test]
    fn empty_once_loaded_without_content() {
        let mut machine = machine();
        let has_content = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&has_content);
        let controller: StatefulController =
            StatefulController::new(machine.handle(), move || flag.load(Ordering::SeqCst));

        controller.start_loading(true);
        controller.end_loading(true, None);
        settle(&mut machine);
        assert_eq!(controller.current_state(), Some(ViewState::Empty));

        has_content.store(true, Ordering::SeqCst);
        controller.start_loading(true);
        settle(&mut machine);
        assert_eq!(controller.current_state(), Some(ViewState::Content));
    }

    #[test]
    fn setup_initial_state_replays_without_callback() {
        let mut machine = machine();
        let errors = Arc::new(AtomicUsize::new(0));

        let errors_in_cb = Arc::clone(&errors);
        let controller = StatefulController::new(machine.handle(), || false)
            .on_error(move |_: String| {
                errors_in_cb.fetch_add(1, Ordering::SeqCst);
            });

        controller.end_loading(false, Some("offline".into()));
        settle(&mut machine);

        controller.setup_initial_state();
        assert_eq!(controller.last_state(), Some(ViewState::Error));
        settle(&mut machine);

        assert_eq!(controller.current_state(), Some(ViewState::Error));
        assert_eq!(errors.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn setup_initial_state_with_completion() {
        let mut machine = machine();
        let done = Arc::new(AtomicUsize::new(0));
        let controller: StatefulController = StatefulController::new(machine.handle(), || false);

        controller.start_loading(true);
        settle(&mut machine);

        let done_in_cb = Arc::clone(&done);
        controller.setup_initial_state_with(move || {
            done_in_cb.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(done.load(Ordering::SeqCst), 0);

        settle(&mut machine);
        assert_eq!(done.load(Ordering::SeqCst), 1);
        assert_eq!(controller.current_state(), Some(ViewState::Loading));
    }

    #[test]
    fn completion_runs_once_applied() {
        let mut machine = machine();
        let done = Arc::new(AtomicBool::new(false));

        let controller: StatefulController<String> =
            StatefulController::new(machine.handle(), || false)
                .with_settings(&Settings::new().always_show_loading(true));

        let done_in_cb = Arc::clone(&done);
        controller.start_loading_with(true, move || done_in_cb.store(true, Ordering::SeqCst));
        assert!(!done.load(Ordering::SeqCst));

        settle(&mut machine);
        assert!(done.load(Ordering::SeqCst));
        assert_eq!(controller.current_state(), Some(ViewState::Loading));
    }

    #[test]
    fn ends_loading_from_another_thread() {
        let mut machine = machine();
        let controller: StatefulController = StatefulController::new(machine.handle(), || false);

        controller.start_loading(true);
        let worker = controller.clone();
        thread::spawn(move || worker.end_loading(true, Some("boom".into())))
            .join()
            .unwrap();

        settle(&mut machine);
        assert_eq!(controller.current_state(), Some(ViewState::Error));
    }
}
