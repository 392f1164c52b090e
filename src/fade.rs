//! Opacity animation.
use std::time::{Duration, Instant};

/// Linear opacity animation between two values.
///
/// A fade does not run by itself: it is sampled with the current time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fade {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
}

impl Fade {
    /// Creates a fade from `from` to `to`, starting at `started`.
    pub fn new(from: f32, to: f32, started: Instant, duration: Duration) -> Self {
        Fade {
            from,
            to,
            started,
            duration,
        }
    }

    /// Fades in, from fully transparent to fully opaque.
    pub fn fade_in(started: Instant, duration: Duration) -> Self {
        Self::new(0.0, 1.0, started, duration)
    }

    /// Fades out, from fully opaque to fully transparent.
    pub fn fade_out(started: Instant, duration: Duration) -> Self {
        Self::new(1.0, 0.0, started, duration)
    }

    /// Returns the opacity at the given time.
    pub fn opacity_at(&self, now: Instant) -> f32 {
        if self.is_done(now) {
            return self.to;
        }

        let elapsed = now.saturating_duration_since(self.started);
        let progress = elapsed.as_secs_f32() / self.duration.as_secs_f32();

        self.from + (self.to - self.from) * progress
    }

    /// Returns `true` once the animation reached its target.
    pub fn is_done(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }

    /// Returns the final opacity.
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Returns the time at which the animation ends.
    pub fn deadline(&self) -> Instant {
        self.started + self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates() {
        let start = Instant::now();
        let fade = Fade::fade_in(start, Duration::from_millis(300));

        assert_eq!(fade.opacity_at(start), 0.0);
        assert!((fade.opacity_at(start + Duration::from_millis(150)) - 0.5).abs() < 0.01);
        assert!(!fade.is_done(start + Duration::from_millis(299)));
        assert!(fade.is_done(start + Duration::from_millis(300)));
        assert_eq!(fade.opacity_at(start + Duration::from_secs(1)), 1.0);
    }

    #[test]
    fn fade_out() {
        let start = Instant::now();
        let fade = Fade::fade_out(start, Duration::from_millis(100));

        assert_eq!(fade.opacity_at(start), 1.0);
        assert_eq!(fade.opacity_at(fade.deadline()), 0.0);
        assert_eq!(fade.target(), 0.0);
    }

    #[test]
    fn zero_duration_is_done_immediately() {
        let start = Instant::now();
        let fade = Fade::fade_in(start, Duration::ZERO);

        assert!(fade.is_done(start));
        assert_eq!(fade.opacity_at(start), 1.0);
    }
}
