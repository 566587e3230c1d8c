//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::SystemClock,
    memory::{MemoryRepositories, SimulatedLatency},
    ports::{ActivityRepo, ClockPort, MessageRepo, PostRepo, RepoError, StoryRepo, UserRepo},
    seed::SeedData,
    settings::AppSettings,
};
use crate::use_cases;

/// Main application state.
///
/// Holds all repository ports and use cases.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub settings: AppSettings,
}

/// Container for all repository ports.
pub struct Repositories {
    pub stories: Arc<dyn StoryRepo>,
    pub posts: Arc<dyn PostRepo>,
    pub users: Arc<dyn UserRepo>,
    pub activities: Arc<dyn ActivityRepo>,
    pub messages: Arc<dyn MessageRepo>,
}

impl From<MemoryRepositories> for Repositories {
    fn from(repos: MemoryRepositories) -> Self {
        Self {
            stories: repos.stories,
            posts: repos.posts,
            users: repos.users,
            activities: repos.activities,
            messages: repos.messages,
        }
    }
}

/// Container for all use cases.
pub struct UseCases {
    pub current_user: Arc<use_cases::CurrentUser>,
    pub stories: use_cases::StoryOps,
    pub viewer: use_cases::StoryViewer,
    pub feed: use_cases::FeedOps,
    pub activity: use_cases::ActivityOps,
    pub messages: use_cases::MessageOps,
    pub profile: use_cases::ProfileOps,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(repos: Repositories, settings: AppSettings, clock: Arc<dyn ClockPort>) -> Self {
        let current_user = Arc::new(use_cases::CurrentUser::new(
            repos.users.clone(),
            settings.current_username.clone(),
        ));

        let use_cases = UseCases {
            stories: use_cases::StoryOps::new(
                repos.stories.clone(),
                current_user.clone(),
                clock.clone(),
            ),
            viewer: use_cases::StoryViewer::new(repos.stories.clone(), settings.timing()),
            feed: use_cases::FeedOps::new(repos.posts.clone(), current_user.clone(), clock.clone()),
            activity: use_cases::ActivityOps::new(repos.activities.clone(), clock.clone()),
            messages: use_cases::MessageOps::new(
                repos.messages.clone(),
                current_user.clone(),
                clock,
            ),
            profile: use_cases::ProfileOps::new(
                repos.users.clone(),
                repos.posts.clone(),
                current_user.clone(),
            ),
            current_user,
        };

        Self {
            repositories: repos,
            use_cases,
            settings,
        }
    }

    /// Build the in-memory app described by `settings`.
    ///
    /// Loads the seed from `seed_path` when set, otherwise the embedded seed.
    pub fn from_settings(settings: AppSettings) -> Result<Self, RepoError> {
        let seed = match &settings.seed_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading seed file");
                SeedData::from_path(path)?
            }
            None => SeedData::embedded()?,
        };
        let latency = SimulatedLatency::from_flag(settings.simulated_latency);
        let repos = MemoryRepositories::from_seed(seed, latency);
        Ok(Self::new(repos.into(), settings, Arc::new(SystemClock)))
    }
}
