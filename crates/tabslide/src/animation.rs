//! Indicator animation: easing curves and position tweens.
//!
//! The indicator is animated in tab units rather than columns, so a resize
//! mid-flight keeps the bar on its way to the right tab. Easing is delegated
//! to [`tachyonfx::Interpolation`].

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tachyonfx::Interpolation;

/// Easing curve applied to indicator movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Curve {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Overshoots the target slightly before settling.
    #[default]
    Spring,
    Bounce,
}

impl Curve {
    pub fn interpolation(self) -> Interpolation {
        match self {
            Self::Linear => Interpolation::Linear,
            Self::EaseIn => Interpolation::QuadIn,
            Self::EaseOut => Interpolation::QuadOut,
            Self::EaseInOut => Interpolation::QuadInOut,
            Self::Spring => Interpolation::BackOut,
            Self::Bounce => Interpolation::BounceOut,
        }
    }

    /// Eased progress for linear progress `t` (clamped to `0.0..=1.0`).
    pub fn apply(self, t: f32) -> f32 {
        self.interpolation().alpha(t.clamp(0.0, 1.0))
    }
}

/// Curve plus duration. A zero duration snaps instantly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Animation {
    pub curve: Curve,
    pub duration_ms: u64,
}

impl Animation {
    pub const fn new(curve: Curve, duration: Duration) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
        let duration_ms = duration.as_millis() as u64;
        Self { curve, duration_ms }
    }

    /// No animation at all.
    pub const fn instant() -> Self {
        Self {
            curve: Curve::Linear,
            duration_ms: 0,
        }
    }

    pub const fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            curve: Curve::default(),
            duration_ms: 300,
        }
    }
}

/// A single indicator move from one tab position to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    started: Instant,
    animation: Animation,
}

impl Tween {
    pub fn new(from: f64, to: f64, started: Instant, animation: Animation) -> Self {
        Self {
            from,
            to,
            started,
            animation,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    /// Linear progress in `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f32 {
        let duration = self.animation.duration();
        if duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
    }

    /// Position at `now`. Exactly the origin at the start and exactly the
    /// target once the duration has elapsed.
    pub fn sample(&self, now: Instant) -> f64 {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to;
        }
        if progress <= 0.0 {
            return self.from;
        }
        let eased = f64::from(self.animation.curve.apply(progress));
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}
