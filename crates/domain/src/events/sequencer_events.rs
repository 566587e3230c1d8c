//! Story sequencer events
//!
//! Every sequencer mutation returns one of these so the caller knows which
//! story to mark viewed and whether playback ended.

use crate::value_objects::PlaybackState;
use crate::StoryId;

/// Outcome of moving between stories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Moved forward; the story left behind counts as viewed
    Advanced {
        from: usize,
        to: usize,
        viewed: StoryId,
    },
    /// Advanced past the last story; it counts as viewed and playback closed
    Finished { viewed: StoryId },
    /// Moved back one story
    Retreated { from: usize, to: usize },
    /// Retreat requested on the first story; nothing changed
    AtStart,
}

impl NavigationOutcome {
    /// Story the data layer should mark viewed, if any
    pub fn viewed_story(self) -> Option<StoryId> {
        match self {
            Self::Advanced { viewed, .. } | Self::Finished { viewed } => Some(viewed),
            Self::Retreated { .. } | Self::AtStart => None,
        }
    }

    /// New current index, if the index changed
    pub fn new_index(self) -> Option<usize> {
        match self {
            Self::Advanced { to, .. } | Self::Retreated { to, .. } => Some(to),
            Self::Finished { .. } | Self::AtStart => None,
        }
    }

    pub fn is_finished(self) -> bool {
        matches!(self, Self::Finished { .. })
    }
}

/// Outcome of a timer tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Tick had no effect (not playing, paused, or media still loading)
    Skipped,
    /// Progress moved but the story is not done
    Progressed { progress: f64 },
    /// Progress reached 100 and the sequencer advanced
    StoryCompleted(NavigationOutcome),
}

/// Outcome of a playback state change (open, pause, resume, close)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackChange {
    Started { index: usize, story_id: StoryId },
    StateChanged { from: PlaybackState, to: PlaybackState },
    Unchanged { state: PlaybackState },
}

/// Outcome of applying a `SequencerCommand`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerOutcome {
    Navigation(NavigationOutcome),
    Playback(PlaybackChange),
}

impl SequencerOutcome {
    pub fn viewed_story(self) -> Option<StoryId> {
        match self {
            Self::Navigation(nav) => nav.viewed_story(),
            Self::Playback(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewed_story_only_on_forward_moves() {
        let id = StoryId::new();
        assert_eq!(
            NavigationOutcome::Advanced { from: 0, to: 1, viewed: id }.viewed_story(),
            Some(id)
        );
        assert_eq!(NavigationOutcome::Finished { viewed: id }.viewed_story(), Some(id));
        assert_eq!(NavigationOutcome::Retreated { from: 1, to: 0 }.viewed_story(), None);
        assert_eq!(NavigationOutcome::AtStart.viewed_story(), None);
    }
}
