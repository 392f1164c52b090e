//! Tuning of transitions.
//!
//! Settings can be built in code:
//!
//! ```rust
//! # use cursive_stateful::Settings;
//! # use std::time::Duration;
//! let settings = Settings::new()
//!     .fade_duration(Duration::from_millis(150))
//!     .always_show_loading(true);
//! ```
//!
//! With the `toml` feature, they can also be loaded from a toml file:
//!
//! ```toml
//! # Duration of fade-in and fade-out animations, in milliseconds.
//! fade_duration_ms = 300
//! # How often the event loop is woken up while a fade is running.
//! wake_fps = 30
//! # Show the loading view even when content is available.
//! always_show_loading = false
//! ```
use cursive_core::With;
#[cfg(feature = "toml")]
use std::{fs::File, io, io::Read, path::Path};
use std::time::Duration;

/// Settings shared by a state machine and its controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Duration of fade-in and fade-out animations.
    pub fade_duration: Duration,

    /// Refresh rate requested from the event loop while a fade is running.
    pub wake_fps: u32,

    /// Show the loading view while loading, even if content is available.
    pub always_show_loading: bool,
}

new_default!(Settings);

impl Settings {
    /// Returns the default settings.
    ///
    /// * `fade_duration`: 300ms
    /// * `wake_fps`: 30
    /// * `always_show_loading`: false
    pub fn new() -> Self {
        Settings {
            fade_duration: Duration::from_millis(300),
            wake_fps: 30,
            always_show_loading: false,
        }
    }

    /// Sets the duration of fade animations.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn fade_duration(self, duration: Duration) -> Self {
        self.with(|s| s.fade_duration = duration)
    }

    /// Sets the refresh rate used during fades.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn wake_fps(self, fps: u32) -> Self {
        self.with(|s| s.wake_fps = fps)
    }

    /// Sets the loading policy.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn always_show_loading(self, always: bool) -> Self {
        self.with(|s| s.always_show_loading = always)
    }

    #[cfg(feature = "toml")]
    #[cfg_attr(feature = "doc-cfg", doc(cfg(feature = "toml")))]
    /// Load values from an already parsed toml [`Table`], overwriting previous values.
    ///
    /// Unknown keys are ignored.
    ///
    /// [`Table`]: https://docs.rs/toml/latest/toml/type.Table.html
    pub fn load_toml(&mut self, table: &toml::value::Table) {
        if let Some(&toml::Value::Integer(millis)) = table.get("fade_duration_ms") {
            self.fade_duration = Duration::from_millis(millis.max(0) as u64);
        }

        if let Some(&toml::Value::Integer(fps)) = table.get("wake_fps") {
            self.wake_fps = fps.clamp(1, u32::MAX as i64) as u32;
        }

        if let Some(&toml::Value::Boolean(always)) = table.get("always_show_loading") {
            self.always_show_loading = always;
        }
    }
}

/// Possible error returned when loading settings.
#[derive(Debug)]
pub enum Error {
    /// An error occurred when reading the file.
    Io(std::io::Error),

    #[cfg(feature = "toml")]
    #[cfg_attr(feature = "doc-cfg", doc(cfg(feature = "toml")))]
    /// An error occurred when parsing the toml content.
    Parse(toml::de::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Error::Io(ref err) => write!(f, "could not read settings: {err}"),
            #[cfg(feature = "toml")]
            Error::Parse(ref err) => write!(f, "could not parse settings: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            #[cfg(feature = "toml")]
            Error::Parse(ref err) => Some(err),
        }
    }
}

#[cfg(feature = "toml")]
#[cfg_attr(feature = "doc-cfg", doc(cfg(feature = "toml")))]
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

#[cfg(feature = "toml")]
#[cfg_attr(feature = "doc-cfg", doc(cfg(feature = "toml")))]
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Parse(err)
    }
}

/// Loads settings from file.
///
/// Must have the `toml` feature enabled.
#[cfg(feature = "toml")]
#[cfg_attr(feature = "doc-cfg", doc(cfg(feature = "toml")))]
pub fn load_settings_file<P: AsRef<Path>>(filename: P) -> Result<Settings, Error> {
    let content = {
        let mut content = String::new();
        let mut file = File::open(filename)?;
        file.read_to_string(&mut content)?;
        content
    };

    load_toml(&content)
}

/// Loads settings from a toml string.
///
/// Must have the `toml` feature enabled.
#[cfg(feature = "toml")]
#[cfg_attr(feature = "doc-cfg", doc(cfg(feature = "toml")))]
pub fn load_toml(content: &str) -> Result<Settings, Error> {
    let table = toml::de::from_str(content)?;

    let mut settings = Settings::default();
    settings.load_toml(&table);

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.fade_duration, Duration::from_millis(300));
        assert_eq!(settings.wake_fps, 30);
        assert!(!settings.always_show_loading);
    }

    #[test]
    fn chainable() {
        let settings = Settings::new()
            .fade_duration(Duration::ZERO)
            .wake_fps(60)
            .always_show_loading(true);

        assert_eq!(settings.fade_duration, Duration::ZERO);
        assert_eq!(settings.wake_fps, 60);
        assert!(settings.always_show_loading);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn from_toml() {
        let settings = load_toml(
            r#"
            fade_duration_ms = 120
            always_show_loading = true
            unknown = "ignored"
            "#,
        )
        .unwrap();

        assert_eq!(settings.fade_duration, Duration::from_millis(120));
        assert_eq!(settings.wake_fps, 30);
        assert!(settings.always_show_loading);

        assert!(matches!(load_toml("fade_duration_ms = "), Err(Error::Parse(_))));
    }
}
