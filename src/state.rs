//! States a screen can be in.
use std::fmt;

/// Display state of a [`ViewStateMachine`].
///
/// [`ViewStateMachine`]: crate::ViewStateMachine
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisplayState {
    /// No placeholder is shown: the content is visible.
    #[default]
    Content,

    /// The placeholder registered under this key is shown.
    Showing(String),
}

impl DisplayState {
    /// Returns a state showing the placeholder registered under `key`.
    pub fn showing<S: Into<String>>(key: S) -> Self {
        DisplayState::Showing(key.into())
    }

    /// Returns the placeholder key, if any placeholder is shown.
    pub fn key(&self) -> Option<&str> {
        match *self {
            DisplayState::Content => None,
            DisplayState::Showing(ref key) => Some(key),
        }
    }

    /// Returns `true` if no placeholder is shown.
    pub fn is_content(&self) -> bool {
        matches!(*self, DisplayState::Content)
    }
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DisplayState::Content => write!(f, "content"),
            DisplayState::Showing(ref key) => write!(f, "showing({key})"),
        }
    }
}

impl From<ViewState> for DisplayState {
    fn from(state: ViewState) -> Self {
        match state {
            ViewState::Content => DisplayState::Content,
            state => DisplayState::showing(state.key()),
        }
    }
}

/// Conventional states of a screen.
///
/// Each placeholder state maps to a key in the registry of the state
/// machine. The keys are only a convention: any string can be used with
/// [`DisplayState::Showing`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewState {
    /// The content is shown.
    Content,
    /// The loading placeholder is shown.
    Loading,
    /// The error placeholder is shown.
    Error,
    /// The empty placeholder is shown.
    Empty,
}

impl ViewState {
    /// Returns the registry key for this state.
    pub fn key(self) -> &'static str {
        match self {
            ViewState::Content => "content",
            ViewState::Loading => "loading",
            ViewState::Error => "error",
            ViewState::Empty => "empty",
        }
    }

    /// Projects a display state onto the conventional states.
    ///
    /// Returns `None` for placeholders registered under a custom key.
    pub fn from_display(state: &DisplayState) -> Option<Self> {
        match state.key() {
            None => Some(ViewState::Content),
            Some("loading") => Some(ViewState::Loading),
            Some("error") => Some(ViewState::Error),
            Some("empty") => Some(ViewState::Empty),
            Some(_) => None,
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
