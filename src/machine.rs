//! The view state machine.
//!
//! A [`ViewStateMachine`] owns a set of placeholder views, indexed by key,
//! and shows at most one of them at a time in a [`ContainerView`].
//!
//! Transitions are requested through a [`StateHandle`], from any thread,
//! and executed in order on the thread running the event loop: each one
//! attaches and lays out views, fades them in or out, and cleans up hidden
//! views before the next one starts.
//!
//! [`ContainerView`]: crate::ContainerView
use crate::container::ContainerView;
use crate::fade::Fade;
use crate::placeholder::{PlaceholderHandle, PlaceholderView};
use crate::queue::{QueueSender, TransitionQueue, Waker};
use crate::registry::ViewRegistry;
use crate::settings::Settings;
use crate::state::DisplayState;
use cursive_core::event::{AnyCb, Event, EventResult};
use cursive_core::view::{Selector, View};
use cursive_core::{CbSink, Printer, Rect, Vec2, With};
use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

/// Callback run once a transition is complete.
pub type Completion = Box<dyn FnOnce() + Send + Sync>;

/// A request to move to a new display state.
pub struct Transition {
    target: DisplayState,
    animated: bool,
    on_complete: Option<Completion>,
}

impl Transition {
    /// Creates a new transition request.
    pub fn new(target: DisplayState, animated: bool) -> Self {
        Transition {
            target,
            animated,
            on_complete: None,
        }
    }

    /// Sets a callback to run once the transition is complete.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn on_complete<F>(self, f: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        self.with(|s| s.on_complete = Some(Box::new(f)))
    }

    /// Returns the requested state.
    pub fn target(&self) -> &DisplayState {
        &self.target
    }

    /// Returns `true` if views should fade in and out.
    pub fn is_animated(&self) -> bool {
        self.animated
    }

    fn complete(self) {
        if let Some(f) = self.on_complete {
            f();
        }
    }
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("target", &self.target)
            .field("animated", &self.animated)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

// State readable from any thread.
#[derive(Default)]
struct Shared {
    current: Mutex<DisplayState>,
    last_requested: Mutex<DisplayState>,
}

/// Handle to request transitions from anywhere.
///
/// Cheap to clone. Requests never block: they are queued and executed in
/// order by the state machine during the next layout phase.
#[derive(Clone)]
pub struct StateHandle {
    shared: Arc<Shared>,
    sender: QueueSender<Transition>,
}

impl StateHandle {
    /// Requests a transition to `target`.
    pub fn request_transition(&self, target: DisplayState, animated: bool) {
        self.request(Transition::new(target, animated));
    }

    /// Requests a transition to `target`, and runs `on_complete` once done.
    ///
    /// `on_complete` runs on the event loop thread, after all views have
    /// been updated. It also runs if the transition turned out to be a no-op.
    pub fn request_transition_with<F>(&self, target: DisplayState, animated: bool, on_complete: F)
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        self.request(Transition::new(target, animated).on_complete(on_complete));
    }

    /// Queues the given transition.
    pub fn request(&self, transition: Transition) {
        // Hold the lock while enqueuing, so the last requested state always
        // matches the last queued transition.
        let mut last = self.shared.last_requested.lock();
        log::debug!("Transition to {} requested", transition.target);
        *last = transition.target.clone();
        self.sender.enqueue(transition);
    }

    /// Returns the state that is fully applied on screen.
    pub fn current_state(&self) -> DisplayState {
        self.shared.current.lock().clone()
    }

    /// Returns the most recently requested state.
    ///
    /// It may not be applied yet.
    pub fn last_requested_state(&self) -> DisplayState {
        self.shared.last_requested.lock().clone()
    }
}

impl std::fmt::Debug for StateHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateHandle")
            .field("current", &self.current_state())
            .field("last_requested", &self.last_requested_state())
            .finish()
    }
}

// The transition currently being executed.
struct InFlight {
    transition: Transition,
    fade: Option<Fade>,
}

/// State machine managing a set of placeholder views.
///
/// There are two kinds of states:
///
/// * Show a specific placeholder view, represented by a key.
/// * Hide all placeholder views.
///
/// The machine does not run by itself: [`advance`](Self::advance) must be
/// called regularly on the event loop thread. [`StatefulView`] does it
/// during layout.
///
/// [`StatefulView`]: crate::StatefulView
pub struct ViewStateMachine {
    registry: ViewRegistry,
    container: ContainerView,
    container_attached: bool,
    queue: TransitionQueue<Transition>,
    in_flight: Option<InFlight>,
    handle: StateHandle,
    waker: Waker,
    settings: Settings,
    size: Vec2,
}

new_default!(ViewStateMachine);

impl ViewStateMachine {
    /// Creates a new state machine with no placeholder.
    pub fn new() -> Self {
        let queue = TransitionQueue::new();
        let handle = StateHandle {
            shared: Arc::new(Shared::default()),
            sender: queue.sender(),
        };

        ViewStateMachine {
            registry: ViewRegistry::new(),
            container: ContainerView::new(),
            container_attached: false,
            queue,
            in_flight: None,
            handle,
            waker: Waker::default(),
            settings: Settings::default(),
            size: Vec2::zero(),
        }
    }

    /// Creates a new state machine with the given placeholders.
    pub fn with_views<I, S>(views: I) -> Self
    where
        I: IntoIterator<Item = (S, PlaceholderHandle)>,
        S: Into<String>,
    {
        Self::new().with(|machine| {
            for (key, view) in views {
                machine.add_view(key, view);
            }
        })
    }

    /// Sets the settings used by this state machine.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn with_settings(self, settings: Settings) -> Self {
        self.with(|s| s.set_settings(settings))
    }

    /// Sets the settings used by this state machine.
    ///
    /// Applies to transitions starting after this call.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Returns the settings used by this state machine.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Sets the sink used to wake up the event loop.
    ///
    /// Without it, transitions requested from other threads only run on
    /// the next event, and fades only progress when something else causes
    /// a redraw.
    pub fn set_cb_sink(&mut self, sink: CbSink) {
        self.waker = Waker::new(sink);
        self.queue.set_waker(self.waker.clone());
        self.handle.sender = self.queue.sender();
    }

    /// Returns a handle to request transitions.
    ///
    /// Handles created before a call to `set_cb_sink` do not wake up the
    /// event loop.
    pub fn handle(&self) -> StateHandle {
        self.handle.clone()
    }

    /// Requests a transition to `target`.
    ///
    /// Shortcut for `self.handle().request_transition(target, animated)`.
    pub fn request_transition(&self, target: DisplayState, animated: bool) {
        self.handle.request_transition(target, animated);
    }

    /// Requests a transition to `target`, and runs `on_complete` once done.
    pub fn request_transition_with<F>(&self, target: DisplayState, animated: bool, on_complete: F)
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        self.handle
            .request_transition_with(target, animated, on_complete);
    }

    /// Returns the state that is fully applied on screen.
    pub fn current_state(&self) -> DisplayState {
        self.handle.current_state()
    }

    /// Returns the most recently requested state.
    pub fn last_requested_state(&self) -> DisplayState {
        self.handle.last_requested_state()
    }

    /// Associates a placeholder view with `key`.
    ///
    /// If a view is attached under this key, registered or not, the new view
    /// takes its place right away.
    pub fn add_view<S, V>(&mut self, key: S, view: V)
    where
        S: Into<String>,
        V: Into<PlaceholderHandle>,
    {
        let key = key.into();
        let view = view.into();

        self.registry.set(key.clone(), view.clone());
        if self.container.replace_key(&key, view) {
            log::debug!("Replaced attached view for {key}");
        }
    }

    /// Associates a placeholder view with `key`.
    ///
    /// Generic variant of `add_view`.
    pub fn add_placeholder<S, V>(&mut self, key: S, view: V)
    where
        S: Into<String>,
        V: PlaceholderView,
    {
        self.add_view(key, PlaceholderHandle::new(view));
    }

    /// Removes the view associated with `key`.
    ///
    /// The view is not detached if it is currently shown: it goes away with
    /// the next transition.
    pub fn remove_view(&mut self, key: &str) -> Option<PlaceholderHandle> {
        self.registry.remove(key)
    }

    /// Returns the view associated with `key`.
    pub fn view(&self, key: &str) -> Option<PlaceholderHandle> {
        self.registry.get(key).cloned()
    }

    /// Returns the registry of placeholder views.
    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    /// Returns `true` if a view is attached to the container under `key`.
    pub fn is_attached(&self, key: &str) -> bool {
        self.container_attached && self.container.is_attached(key)
    }

    /// Returns `true` if the given view is attached to the container.
    pub fn is_view_attached(&self, view: &PlaceholderHandle) -> bool {
        self.container_attached && self.container.contains(view)
    }

    /// Iterates on the keys of attached views.
    pub fn attached_keys(&self) -> impl Iterator<Item = &str> {
        self.container
            .attached_keys()
            .filter(move |_| self.container_attached)
    }

    /// Returns `true` if the container is attached to the parent.
    pub fn container_attached(&self) -> bool {
        self.container_attached
    }

    /// Returns the current opacity of the view attached under `key`.
    pub fn opacity(&self, key: &str) -> Option<f32> {
        self.container.opacity(key)
    }

    /// Returns the area given to the view attached under `key`.
    pub fn frame(&self, key: &str) -> Option<Rect> {
        self.container.frame(key)
    }

    /// Returns `true` if `point` should go to a placeholder.
    ///
    /// `point` is relative to the parent view.
    pub fn point_inside(&self, point: Vec2) -> bool {
        self.container_attached && self.container.point_inside(point)
    }

    /// Returns `true` if a shown placeholder accepts keyboard input.
    pub fn takes_input(&self) -> bool {
        self.container_attached && self.container.takes_input()
    }

    /// Returns `true` if a shown placeholder needs a new layout.
    pub fn needs_relayout(&self) -> bool {
        self.container_attached && self.container.needs_relayout()
    }

    /// Returns `true` if no transition is running or waiting.
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none() && self.queue.is_idle()
    }

    /// Sets the size of the parent view.
    pub fn layout(&mut self, size: Vec2) {
        self.size = size;
        if self.container_attached {
            self.container.layout(size);
        }
    }

    /// Runs queued transitions, and progresses the running one.
    ///
    /// Transitions without animation complete within this call; an animated
    /// transition blocks the ones after it until its fade is over.
    pub fn advance(&mut self, now: Instant) {
        loop {
            if let Some(flight) = self.in_flight.take() {
                match flight.fade {
                    Some(fade) if !fade.is_done(now) => {
                        self.apply_opacity(&flight.transition.target, fade.opacity_at(now));
                        self.in_flight = Some(flight);
                        return;
                    }
                    _ => self.complete(flight.transition),
                }
                continue;
            }

            let transition = match self.queue.next() {
                Some(transition) => transition,
                None => return,
            };

            if transition.target == self.current_state() {
                log::trace!("Already showing {}, skipping", transition.target);
                self.queue.finish();
                transition.complete();
                continue;
            }

            self.begin(transition, now);
        }
    }

    fn begin(&mut self, transition: Transition, now: Instant) {
        let result = panic::catch_unwind(AssertUnwindSafe(|| match transition.target {
            DisplayState::Showing(ref key) => self.show_view(key, transition.animated),
            DisplayState::Content => {
                if !transition.animated {
                    self.container.set_all_opacity(0.0);
                }
            }
        }));

        if result.is_err() {
            log::error!("Transition to {} panicked", transition.target);
            self.queue.finish();
            transition.complete();
            return;
        }

        let fade = transition.animated.then(|| {
            let duration = self.settings.fade_duration;
            self.waker.keep_awake(duration, self.settings.wake_fps);
            match transition.target {
                DisplayState::Showing(_) => Fade::fade_in(now, duration),
                DisplayState::Content => Fade::fade_out(now, duration),
            }
        });

        self.in_flight = Some(InFlight { transition, fade });
    }

    fn show_view(&mut self, key: &str, animated: bool) {
        if !self.container_attached {
            self.container_attached = true;
            self.container.layout(self.size);
        }

        match self.registry.get(key) {
            Some(view) => {
                let opacity = if animated { 0.0 } else { 1.0 };
                self.container.attach(key, view.clone(), opacity);
            }
            None => log::warn!("No view registered for {key}"),
        }
    }

    fn apply_opacity(&mut self, target: &DisplayState, opacity: f32) {
        match *target {
            DisplayState::Showing(ref key) => self.container.set_opacity(key, opacity),
            DisplayState::Content => self.container.set_all_opacity(opacity),
        }
    }

    fn complete(&mut self, transition: Transition) {
        let result = panic::catch_unwind(AssertUnwindSafe(|| match transition.target {
            DisplayState::Showing(ref key) => {
                self.container.set_opacity(key, 1.0);
                // Clear anything left over by previous transitions.
                self.container.detach_except(key);
            }
            DisplayState::Content => {
                self.container.detach_all();
                self.container_attached = false;
            }
        }));

        match result {
            Ok(()) => {
                log::debug!("Transition to {} complete", transition.target);
                *self.handle.shared.current.lock() = transition.target.clone();
            }
            Err(_) => log::error!("Cleanup after transition to {} panicked", transition.target),
        }

        self.queue.finish();
        transition.complete();
    }

    /// Draws the attached placeholders.
    pub fn draw(&self, printer: &Printer) {
        if self.container_attached {
            self.container.draw(printer);
        }
    }

    /// Sends an event to the attached placeholders.
    pub fn on_event(&mut self, event: Event) -> EventResult {
        if !self.container_attached {
            return EventResult::Ignored;
        }
        self.container.on_event(event)
    }

    /// Runs a closure on placeholder views matching the selector.
    ///
    /// Unlike drawing and events, this looks at all registered views,
    /// attached or not, as well as attached views no longer registered.
    pub fn call_on_any(&mut self, selector: &Selector, callback: AnyCb) {
        for (_, view) in self.registry.iter() {
            view.lock().call_on_any(selector, callback);
        }

        for view in self.container.attached_views() {
            if !self.registry.iter().any(|(_, known)| known.ptr_eq(view)) {
                view.lock().call_on_any(selector, callback);
            }
        }
    }
}
