//! Story sequencer aggregate - timed playback through a list of stories
//!
//! The sequencer is a synchronous state machine. Timer ticks and user
//! navigation arrive as discrete method calls; each returns an outcome enum
//! describing what changed so the caller can perform side effects (marking
//! stories viewed, closing the viewer). Nothing here sleeps or spawns.
//!
//! # Invariants
//!
//! - While active, `current_index < items.len()`
//! - `progress` is in `[0, 100)` between calls and resets to 0 on every
//!   index change, together with the media-loaded flag
//! - `Closed` is terminal
//!
//! # Example
//!
//! ```
//! use glimpse_domain::aggregates::StorySequencer;
//! use glimpse_domain::{NavigationOutcome, StoryTiming};
//! # use glimpse_domain::{Story, UserRef, UserId, Username};
//! # let author = UserRef { id: UserId::new(), username: Username::new("ana").unwrap(), avatar: None };
//! # let stories: Vec<Story> = (0..2).map(|i| Story::new(author.clone(), format!("img{i}"), chrono::Utc::now())).collect();
//!
//! let mut sequencer = StorySequencer::new(StoryTiming::default());
//! sequencer.open(stories, 0).unwrap();
//! assert!(matches!(sequencer.advance().unwrap(), NavigationOutcome::Advanced { to: 1, .. }));
//! assert!(sequencer.advance().unwrap().is_finished());
//! assert!(sequencer.state().is_closed());
//! ```

use thiserror::Error;

use crate::entities::Story;
use crate::events::{NavigationOutcome, PlaybackChange, SequencerOutcome, TickOutcome};
use crate::navigation::SequencerCommand;
use crate::value_objects::{PlaybackState, StoryTiming};
use crate::StoryId;

/// Progress value at which the current story is complete
const PROGRESS_COMPLETE: f64 = 100.0;

/// Absorbs float drift when the step does not divide 100 exactly
const PROGRESS_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequencerError {
    /// Start index out of bounds, or no stories at all
    #[error("Invalid story index {index} for {len} stories")]
    InvalidIndex { index: usize, len: usize },

    #[error("Cannot {command} while {state}")]
    InvalidStateTransition {
        state: PlaybackState,
        command: &'static str,
    },
}

/// Plays an ordered list of stories with timed auto-advance
#[derive(Debug, Clone)]
pub struct StorySequencer {
    items: Vec<Story>,
    current_index: usize,
    progress: f64,
    media_loaded: bool,
    state: PlaybackState,
    timing: StoryTiming,
}

impl StorySequencer {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create an idle sequencer; call [`open`](Self::open) to start playback.
    pub fn new(timing: StoryTiming) -> Self {
        Self {
            items: Vec::new(),
            current_index: 0,
            progress: 0.0,
            media_loaded: false,
            state: PlaybackState::Idle,
            timing,
        }
    }

    /// Create and open in one step.
    pub fn start(
        items: Vec<Story>,
        start_index: usize,
        timing: StoryTiming,
    ) -> Result<Self, SequencerError> {
        let mut sequencer = Self::new(timing);
        sequencer.open(items, start_index)?;
        Ok(sequencer)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn items(&self) -> &[Story] {
        &self.items
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The story on screen, `None` unless active
    pub fn current_story(&self) -> Option<&Story> {
        if self.state.is_active() {
            self.items.get(self.current_index)
        } else {
            None
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_paused(&self) -> bool {
        self.state == PlaybackState::Paused
    }

    pub fn is_media_loaded(&self) -> bool {
        self.media_loaded
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn timing(&self) -> StoryTiming {
        self.timing
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Begin playback at `start_index`.
    ///
    /// # Errors
    ///
    /// - `InvalidIndex` if `items` is empty or `start_index` is out of bounds
    /// - `InvalidStateTransition` unless the sequencer is idle
    pub fn open(
        &mut self,
        items: Vec<Story>,
        start_index: usize,
    ) -> Result<PlaybackChange, SequencerError> {
        if self.state != PlaybackState::Idle {
            return Err(self.rejected("open"));
        }
        if start_index >= items.len() {
            return Err(SequencerError::InvalidIndex {
                index: start_index,
                len: items.len(),
            });
        }
        let story_id = items[start_index].id;
        self.items = items;
        self.state = PlaybackState::Playing;
        self.jump_to(start_index);
        Ok(PlaybackChange::Started {
            index: start_index,
            story_id,
        })
    }

    /// Close from any state. Closing twice is a no-op.
    pub fn close(&mut self) -> PlaybackChange {
        self.transition(PlaybackState::Closed)
    }

    /// Suspend the effect of ticks.
    pub fn pause(&mut self) -> Result<PlaybackChange, SequencerError> {
        if !self.state.is_active() {
            return Err(self.rejected("pause"));
        }
        Ok(self.transition(PlaybackState::Paused))
    }

    /// Let ticks advance progress again.
    pub fn resume(&mut self) -> Result<PlaybackChange, SequencerError> {
        if !self.state.is_active() {
            return Err(self.rejected("resume"));
        }
        Ok(self.transition(PlaybackState::Playing))
    }

    /// The current story's media finished loading. Loads reported for any
    /// other story are stale and ignored; returns whether the flag was set.
    pub fn media_loaded(&mut self, story_id: StoryId) -> bool {
        let is_current = self.current_story().is_some_and(|story| story.id == story_id);
        if is_current {
            self.media_loaded = true;
        }
        is_current
    }

    // =========================================================================
    // Timer and navigation
    // =========================================================================

    /// Advance progress by one timer step; completes the story at 100.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != PlaybackState::Playing || !self.media_loaded {
            return TickOutcome::Skipped;
        }
        self.progress += self.timing.progress_step();
        if self.progress < PROGRESS_COMPLETE - PROGRESS_TOLERANCE {
            return TickOutcome::Progressed {
                progress: self.progress,
            };
        }
        match self.advance() {
            Ok(outcome) => TickOutcome::StoryCompleted(outcome),
            // Unreachable: state was checked to be Playing above.
            Err(_) => TickOutcome::Skipped,
        }
    }

    /// Move to the next story, marking the current one viewed. On the last
    /// story this finishes playback and closes the sequencer.
    pub fn advance(&mut self) -> Result<NavigationOutcome, SequencerError> {
        if !self.state.is_active() {
            return Err(self.rejected("advance"));
        }
        let from = self.current_index;
        let story = &mut self.items[from];
        story.mark_viewed();
        let viewed = story.id;

        if from + 1 >= self.items.len() {
            self.progress = 0.0;
            self.state = PlaybackState::Closed;
            return Ok(NavigationOutcome::Finished { viewed });
        }
        self.jump_to(from + 1);
        Ok(NavigationOutcome::Advanced {
            from,
            to: from + 1,
            viewed,
        })
    }

    /// Move to the previous story; a no-op on the first one.
    pub fn retreat(&mut self) -> Result<NavigationOutcome, SequencerError> {
        if !self.state.is_active() {
            return Err(self.rejected("retreat"));
        }
        let from = self.current_index;
        if from == 0 {
            return Ok(NavigationOutcome::AtStart);
        }
        self.jump_to(from - 1);
        Ok(NavigationOutcome::Retreated { from, to: from - 1 })
    }

    /// Dispatch a discrete command.
    pub fn apply(&mut self, command: SequencerCommand) -> Result<SequencerOutcome, SequencerError> {
        match command {
            SequencerCommand::Advance => self.advance().map(SequencerOutcome::Navigation),
            SequencerCommand::Retreat => self.retreat().map(SequencerOutcome::Navigation),
            SequencerCommand::Pause => self.pause().map(SequencerOutcome::Playback),
            SequencerCommand::Resume => self.resume().map(SequencerOutcome::Playback),
            SequencerCommand::Close => Ok(SequencerOutcome::Playback(self.close())),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn jump_to(&mut self, index: usize) {
        self.current_index = index;
        self.progress = 0.0;
        self.media_loaded = false;
    }

    fn transition(&mut self, to: PlaybackState) -> PlaybackChange {
        let from = self.state;
        if from == to || from.is_closed() {
            return PlaybackChange::Unchanged { state: from };
        }
        self.state = to;
        PlaybackChange::StateChanged { from, to }
    }

    fn rejected(&self, command: &'static str) -> SequencerError {
        SequencerError::InvalidStateTransition {
            state: self.state,
            command,
        }
    }
}
