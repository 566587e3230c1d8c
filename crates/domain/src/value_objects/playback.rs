//! Story playback state and timing
//!
//! `PlaybackState` models the lifecycle of a story sequencer; `StoryTiming`
//! fixes how long each story is shown and how often the timer fires.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Lifecycle state of a story sequencer
///
/// # State Transitions
///
/// ```text
/// Idle -> Playing           (open)
/// Playing <-> Paused        (pause / resume)
/// Playing | Paused -> Closed (advance past the last story, or close)
/// Idle -> Closed            (close)
/// ```
///
/// `Closed` is terminal; viewing again means creating a new sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
    Closed,
}

impl PlaybackState {
    /// Returns true while a story is on screen (Playing or Paused)
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Playing | Self::Paused)
    }

    #[inline]
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Playing => write!(f, "playing"),
            Self::Paused => write!(f, "paused"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// How long each story is shown and how often progress is advanced.
///
/// All stories share one duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryTiming {
    story_duration: Duration,
    tick_interval: Duration,
}

impl StoryTiming {
    pub const DEFAULT_STORY_DURATION: Duration = Duration::from_millis(5000);
    pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// # Errors
    ///
    /// Returns `DomainError::Validation` if either duration is zero or the
    /// tick interval is longer than the story itself.
    pub fn new(story_duration: Duration, tick_interval: Duration) -> Result<Self, DomainError> {
        if story_duration.is_zero() || tick_interval.is_zero() {
            return Err(DomainError::validation(
                "Story duration and tick interval must be non-zero",
            ));
        }
        if tick_interval > story_duration {
            return Err(DomainError::validation(format!(
                "Tick interval ({}ms) cannot exceed story duration ({}ms)",
                tick_interval.as_millis(),
                story_duration.as_millis()
            )));
        }
        Ok(Self {
            story_duration,
            tick_interval,
        })
    }

    pub fn story_duration(&self) -> Duration {
        self.story_duration
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Percentage points added per tick: `100 / (duration / interval)`.
    pub fn progress_step(&self) -> f64 {
        let ticks = self.story_duration.as_nanos() as f64 / self.tick_interval.as_nanos() as f64;
        100.0 / ticks
    }
}

impl Default for StoryTiming {
    fn default() -> Self {
        Self {
            story_duration: Self::DEFAULT_STORY_DURATION,
            tick_interval: Self::DEFAULT_TICK_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timing_steps_two_percent() {
        let timing = StoryTiming::default();
        assert!((timing.progress_step() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_zero_and_inverted_timing() {
        assert!(StoryTiming::new(Duration::ZERO, Duration::from_millis(100)).is_err());
        assert!(StoryTiming::new(Duration::from_millis(100), Duration::ZERO).is_err());
        assert!(StoryTiming::new(Duration::from_millis(50), Duration::from_millis(100)).is_err());
    }

    #[test]
    fn active_states() {
        assert!(!PlaybackState::Idle.is_active());
        assert!(PlaybackState::Playing.is_active());
        assert!(PlaybackState::Paused.is_active());
        assert!(PlaybackState::Closed.is_closed());
    }
}
