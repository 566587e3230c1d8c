//! Story viewer - drives a `StorySequencer` from a timer and user input.
//!
//! Each open viewer is one tokio task. The task owns the sequencer and
//! `select!`s over cancellation, the command channel and the tick interval,
//! so timer ticks and gestures are applied one at a time in arrival order.
//!
//! Stories left behind are reported to the story repository on spawned
//! tasks. Those calls are never awaited by navigation; failures are logged
//! and dropped.
//!
//! The task ends when the last story finishes, when the user dismisses the
//! viewer, or when the handle is cancelled or dropped. The interval is owned
//! by the task, so it stops with it.

use std::sync::Arc;

use glimpse_domain::{
    map_input, NavigationInput, NavigationOutcome, PlaybackChange, PlaybackState,
    SequencerCommand, SequencerError, SequencerOutcome, Story, StoryId, StorySequencer,
    StoryTiming, TickOutcome,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::infrastructure::ports::StoryRepo;

/// Why a viewer stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Played or skipped past the last story
    Completed,
    /// Closed by the user (Escape, close button)
    Dismissed,
    /// Cancelled or the handle was dropped
    Cancelled,
}

impl std::fmt::Display for CloseReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Dismissed => write!(f, "dismissed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Summary returned when the viewer task ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerReport {
    pub reason: CloseReason,
    /// Index on screen when the viewer stopped
    pub last_index: usize,
    /// Stories marked viewed, in the order they were left
    pub viewed: Vec<StoryId>,
}

impl ViewerReport {
    /// The "all stories viewed" notice only applies to a full playthrough.
    pub fn all_viewed(&self) -> bool {
        self.reason == CloseReason::Completed
    }
}

/// What the viewer tells its owner
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    Opened { index: usize, story_id: StoryId },
    IndexChanged {
        from: usize,
        to: usize,
        story_id: StoryId,
    },
    Progress { index: usize, progress: f64 },
    Paused,
    Resumed,
    Closed(ViewerReport),
}

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error(transparent)]
    Sequencer(#[from] SequencerError),
    #[error("Story viewer task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug)]
enum ViewerCommand {
    Input(NavigationInput),
    Command(SequencerCommand),
    MediaLoaded(StoryId),
}

/// Opens story viewers.
pub struct StoryViewer {
    stories: Arc<dyn StoryRepo>,
    timing: StoryTiming,
}

impl StoryViewer {
    pub fn new(stories: Arc<dyn StoryRepo>, timing: StoryTiming) -> Self {
        Self { stories, timing }
    }

    pub fn timing(&self) -> StoryTiming {
        self.timing
    }

    /// Start playing `items` from `start_index` on a new task.
    ///
    /// Must be called inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// `SequencerError::InvalidIndex` if `items` is empty or `start_index`
    /// is out of bounds. No task is spawned in that case.
    pub fn open(
        &self,
        items: Vec<Story>,
        start_index: usize,
    ) -> Result<ViewerHandle, ViewerError> {
        let sequencer = StorySequencer::start(items, start_index, self.timing)?;
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        tracing::info!(
            stories = sequencer.items().len(),
            start_index,
            "Opening story viewer"
        );

        let viewer = ViewerLoop {
            sequencer,
            stories: self.stories.clone(),
            events: event_tx,
            viewed: Vec::new(),
        };
        let task = tokio::spawn(viewer.run(command_rx, cancel.clone()));

        Ok(ViewerHandle {
            commands: command_tx,
            events: event_rx,
            cancel,
            task: Some(task),
        })
    }
}

/// Owner's side of an open viewer. Dropping it cancels the viewer.
pub struct ViewerHandle {
    commands: mpsc::UnboundedSender<ViewerCommand>,
    events: mpsc::UnboundedReceiver<ViewerEvent>,
    cancel: CancellationToken,
    task: Option<JoinHandle<ViewerReport>>,
}

impl ViewerHandle {
    /// Forward a raw gesture or key press. Returns `false` once the viewer
    /// has stopped.
    pub fn input(&self, input: NavigationInput) -> bool {
        self.send(ViewerCommand::Input(input))
    }

    pub fn command(&self, command: SequencerCommand) -> bool {
        self.send(ViewerCommand::Command(command))
    }

    /// Report that the media for `story_id` finished loading.
    pub fn media_loaded(&self, story_id: StoryId) -> bool {
        self.send(ViewerCommand::MediaLoaded(story_id))
    }

    pub fn close(&self) -> bool {
        self.command(SequencerCommand::Close)
    }

    /// Stop the viewer without it counting as a user dismissal.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub async fn next_event(&mut self) -> Option<ViewerEvent> {
        self.events.recv().await
    }

    pub fn try_next_event(&mut self) -> Option<ViewerEvent> {
        self.events.try_recv().ok()
    }

    /// Wait for the viewer task to end.
    pub async fn finished(mut self) -> Result<ViewerReport, ViewerError> {
        match self.task.take() {
            Some(task) => Ok(task.await?),
            None => Ok(ViewerReport {
                reason: CloseReason::Cancelled,
                last_index: 0,
                viewed: Vec::new(),
            }),
        }
    }

    fn send(&self, command: ViewerCommand) -> bool {
        self.commands.send(command).is_ok()
    }
}

impl Drop for ViewerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct ViewerLoop {
    sequencer: StorySequencer,
    stories: Arc<dyn StoryRepo>,
    events: mpsc::UnboundedSender<ViewerEvent>,
    viewed: Vec<StoryId>,
}

impl ViewerLoop {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<ViewerCommand>,
        cancel: CancellationToken,
    ) -> ViewerReport {
        let mut ticker = tokio::time::interval(self.sequencer.timing().tick_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately.
        ticker.tick().await;

        if let Some(story) = self.sequencer.current_story() {
            let (index, story_id) = (self.sequencer.current_index(), story.id);
            self.emit(ViewerEvent::Opened { index, story_id });
        }

        let reason = loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break CloseReason::Cancelled,
                command = commands.recv() => {
                    let Some(command) = command else {
                        break CloseReason::Cancelled;
                    };
                    if let Some(reason) = self.handle_command(command) {
                        break reason;
                    }
                }
                _ = ticker.tick() => {
                    if let Some(reason) = self.handle_tick() {
                        break reason;
                    }
                }
            }
        };

        self.sequencer.close();
        let report = ViewerReport {
            reason,
            last_index: self.sequencer.current_index(),
            viewed: std::mem::take(&mut self.viewed),
        };
        tracing::info!(
            reason = %report.reason,
            last_index = report.last_index,
            viewed = report.viewed.len(),
            "Story viewer closed"
        );
        self.emit(ViewerEvent::Closed(report.clone()));
        report
    }

    fn handle_command(&mut self, command: ViewerCommand) -> Option<CloseReason> {
        let command = match command {
            ViewerCommand::MediaLoaded(story_id) => {
                if !self.sequencer.media_loaded(story_id) {
                    tracing::debug!(story_id = %story_id, "Ignoring stale media load");
                }
                return None;
            }
            ViewerCommand::Input(input) => map_input(input)?,
            ViewerCommand::Command(command) => command,
        };

        match self.sequencer.apply(command) {
            Ok(SequencerOutcome::Navigation(outcome)) => self.handle_navigation(outcome),
            Ok(SequencerOutcome::Playback(change)) => self.handle_playback(change),
            Err(e) => {
                tracing::debug!(error = %e, ?command, "Ignoring viewer command");
                None
            }
        }
    }

    fn handle_tick(&mut self) -> Option<CloseReason> {
        match self.sequencer.tick() {
            TickOutcome::Skipped => None,
            TickOutcome::Progressed { progress } => {
                let index = self.sequencer.current_index();
                self.emit(ViewerEvent::Progress { index, progress });
                None
            }
            TickOutcome::StoryCompleted(outcome) => self.handle_navigation(outcome),
        }
    }

    fn handle_navigation(&mut self, outcome: NavigationOutcome) -> Option<CloseReason> {
        if let Some(story_id) = outcome.viewed_story() {
            self.viewed.push(story_id);
            self.notify_viewed(story_id);
        }

        match outcome {
            NavigationOutcome::Advanced { from, to, .. }
            | NavigationOutcome::Retreated { from, to } => {
                tracing::debug!(from, to, "Story viewer moved");
                if let Some(story) = self.sequencer.current_story() {
                    let story_id = story.id;
                    self.emit(ViewerEvent::IndexChanged { from, to, story_id });
                }
                None
            }
            NavigationOutcome::Finished { .. } => Some(CloseReason::Completed),
            NavigationOutcome::AtStart => None,
        }
    }

    fn handle_playback(&mut self, change: PlaybackChange) -> Option<CloseReason> {
        match change {
            PlaybackChange::StateChanged { to, .. } => match to {
                PlaybackState::Paused => {
                    self.emit(ViewerEvent::Paused);
                    None
                }
                PlaybackState::Playing => {
                    self.emit(ViewerEvent::Resumed);
                    None
                }
                PlaybackState::Closed => Some(CloseReason::Dismissed),
                PlaybackState::Idle => None,
            },
            PlaybackChange::Started { .. } | PlaybackChange::Unchanged { .. } => None,
        }
    }

    /// Fire-and-forget "viewed" notification.
    fn notify_viewed(&self, story_id: StoryId) {
        let stories = self.stories.clone();
        tokio::spawn(async move {
            if let Err(e) = stories.mark_viewed(story_id).await {
                tracing::warn!(error = %e, story_id = %story_id, "Failed to mark story as viewed");
            }
        });
    }

    fn emit(&self, event: ViewerEvent) {
        // The owner may have stopped listening; the viewer keeps going.
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::infrastructure::memory::{MemoryStoryRepo, SimulatedLatency};
    use crate::infrastructure::ports::{MockStoryRepo, RepoError};
    use chrono::{TimeZone, Utc};
    use glimpse_domain::{Key, UserId, UserRef, Username};

    fn stories(count: usize) -> Vec<Story> {
        let author = UserRef {
            id: UserId::new(),
            username: Username::new("sarah.j").unwrap(),
            avatar: None,
        };
        let at = Utc.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap();
        (0..count)
            .map(|i| Story::new(author.clone(), format!("https://img.example/{}.jpg", i), at))
            .collect()
    }

    fn memory_viewer(items: &[Story]) -> (StoryViewer, Arc<MemoryStoryRepo>) {
        let repo = Arc::new(MemoryStoryRepo::new(
            items.to_vec(),
            SimulatedLatency::disabled(),
        ));
        (StoryViewer::new(repo.clone(), StoryTiming::default()), repo)
    }

    /// Drain events until `Closed`, loading media whenever a story appears.
    async fn autoplay(handle: &mut ViewerHandle) -> Vec<ViewerEvent> {
        let mut seen = Vec::new();
        while let Some(event) = handle.next_event().await {
            match &event {
                ViewerEvent::Opened { story_id, .. }
                | ViewerEvent::IndexChanged { story_id, .. } => {
                    handle.media_loaded(*story_id);
                }
                _ => {}
            }
            let closed = matches!(event, ViewerEvent::Closed(_));
            seen.push(event);
            if closed {
                break;
            }
        }
        seen
    }

    #[tokio::test]
    async fn opening_with_no_stories_fails_fast() {
        let (viewer, _) = memory_viewer(&[]);
        let err = viewer.open(Vec::new(), 0).err().unwrap();
        assert!(matches!(
            err,
            ViewerError::Sequencer(SequencerError::InvalidIndex { index: 0, len: 0 })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn autoplay_marks_every_story_viewed_and_completes() {
        let items = stories(3);
        let ids: Vec<StoryId> = items.iter().map(|s| s.id).collect();
        let (viewer, repo) = memory_viewer(&items);

        let mut handle = viewer.open(items, 0).unwrap();
        let events = autoplay(&mut handle).await;
        let report = handle.finished().await.unwrap();

        assert_eq!(report.reason, CloseReason::Completed);
        assert!(report.all_viewed());
        assert_eq!(report.viewed, ids);
        assert_eq!(report.last_index, 2);
        assert!(matches!(events.last(), Some(ViewerEvent::Closed(_))));

        // Let the spawned notifications land.
        tokio::time::sleep(Duration::from_millis(10)).await;
        for story in repo.list().await.unwrap() {
            assert!(story.viewed, "story {} not marked viewed", story.id);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn one_story_takes_the_configured_duration() {
        let items = stories(1);
        let (viewer, _) = memory_viewer(&items);
        let start = tokio::time::Instant::now();

        let mut handle = viewer.open(items, 0).unwrap();
        autoplay(&mut handle).await;

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(5000), "{:?}", elapsed);
        assert!(elapsed < Duration::from_millis(5200), "{:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn no_progress_until_media_loads() {
        let items = stories(2);
        let (viewer, _) = memory_viewer(&items);
        let mut handle = viewer.open(items, 0).unwrap();

        assert!(matches!(
            handle.next_event().await,
            Some(ViewerEvent::Opened { index: 0, .. })
        ));
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(handle.try_next_event(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_freezes_progress_until_resume() {
        let items = stories(2);
        let first = items[0].id;
        let (viewer, _) = memory_viewer(&items);
        let mut handle = viewer.open(items, 0).unwrap();
        handle.next_event().await;
        handle.media_loaded(first);

        assert!(matches!(
            handle.next_event().await,
            Some(ViewerEvent::Progress { index: 0, .. })
        ));
        handle.input(NavigationInput::PointerDown);
        let mut event = handle.next_event().await;
        while matches!(event, Some(ViewerEvent::Progress { .. })) {
            event = handle.next_event().await;
        }
        assert_eq!(event, Some(ViewerEvent::Paused));

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(handle.try_next_event(), None);

        handle.input(NavigationInput::PointerUp);
        assert_eq!(handle.next_event().await, Some(ViewerEvent::Resumed));
        assert!(matches!(
            handle.next_event().await,
            Some(ViewerEvent::Progress { index: 0, .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_notifications_do_not_block_navigation() {
        let items = stories(3);
        let mut repo = MockStoryRepo::new();
        repo.expect_mark_viewed()
            .times(2)
            .returning(|id| Err(RepoError::storage("mark_viewed", format!("offline: {}", id))));
        let viewer = StoryViewer::new(Arc::new(repo), StoryTiming::default());

        let mut handle = viewer.open(items, 0).unwrap();
        handle.next_event().await;
        handle.input(NavigationInput::KeyPress(Key::ArrowRight));
        handle.input(NavigationInput::Tap {
            x: 300.0,
            width: 400.0,
        });

        assert!(matches!(
            handle.next_event().await,
            Some(ViewerEvent::IndexChanged { from: 0, to: 1, .. })
        ));
        assert!(matches!(
            handle.next_event().await,
            Some(ViewerEvent::IndexChanged { from: 1, to: 2, .. })
        ));

        handle.cancel();
        let report = handle.finished().await.unwrap();
        assert_eq!(report.viewed.len(), 2);
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn escape_dismisses_without_marking_the_current_story() {
        let items = stories(3);
        let (viewer, repo) = memory_viewer(&items);
        let mut handle = viewer.open(items, 1).unwrap();

        handle.input(NavigationInput::KeyPress(Key::Escape));
        let report = handle.finished().await.unwrap();

        assert_eq!(report.reason, CloseReason::Dismissed);
        assert!(!report.all_viewed());
        assert_eq!(report.last_index, 1);
        assert!(report.viewed.is_empty());
        assert!(repo.list().await.unwrap().iter().all(|s| !s.viewed));
    }

    #[tokio::test(start_paused = true)]
    async fn swipe_right_at_first_story_stays_put() {
        let items = stories(2);
        let (viewer, _) = memory_viewer(&items);
        let mut handle = viewer.open(items, 0).unwrap();
        handle.next_event().await;

        handle.input(NavigationInput::DragEnd {
            movement_x: 150.0,
            velocity_x: 0.1,
        });
        handle.close();

        let events = autoplay(&mut handle).await;
        assert!(!events
            .iter()
            .any(|e| matches!(e, ViewerEvent::IndexChanged { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_the_task() {
        let items = stories(2);
        let (viewer, repo) = memory_viewer(&items);
        let handle = viewer.open(items, 0).unwrap();
        drop(handle);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(repo.list().await.unwrap().iter().all(|s| !s.viewed));
    }
}
