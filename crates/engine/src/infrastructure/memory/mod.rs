//! In-memory adapters for every repository port.
//!
//! State lives for the life of the process. Each adapter optionally sleeps
//! per call to mimic the round trip of a remote API.

mod activities;
mod latency;
mod messages;
mod posts;
mod stories;
mod table;
mod users;

use std::sync::Arc;

pub use activities::MemoryActivityRepo;
pub use latency::{Operation, SimulatedLatency};
pub use messages::MemoryMessageRepo;
pub use posts::MemoryPostRepo;
pub use stories::MemoryStoryRepo;
pub use table::{Keyed, Table};
pub use users::MemoryUserRepo;

use crate::infrastructure::seed::SeedData;

/// All in-memory repositories, loaded from one seed.
pub struct MemoryRepositories {
    pub stories: Arc<MemoryStoryRepo>,
    pub posts: Arc<MemoryPostRepo>,
    pub users: Arc<MemoryUserRepo>,
    pub activities: Arc<MemoryActivityRepo>,
    pub messages: Arc<MemoryMessageRepo>,
}

impl MemoryRepositories {
    pub fn from_seed(seed: SeedData, latency: SimulatedLatency) -> Self {
        tracing::info!(
            users = seed.users.len(),
            stories = seed.stories.len(),
            posts = seed.posts.len(),
            activities = seed.activities.len(),
            conversations = seed.conversations.len(),
            messages = seed.messages.len(),
            simulated_latency = latency.is_enabled(),
            "Seeding in-memory repositories"
        );
        Self {
            stories: Arc::new(MemoryStoryRepo::new(seed.stories, latency)),
            posts: Arc::new(MemoryPostRepo::new(seed.posts, latency)),
            users: Arc::new(MemoryUserRepo::new(seed.users, latency)),
            activities: Arc::new(MemoryActivityRepo::new(seed.activities, latency)),
            messages: Arc::new(MemoryMessageRepo::new(
                seed.conversations,
                seed.messages,
                latency,
            )),
        }
    }

    /// Empty repositories without latency.
    pub fn empty() -> Self {
        Self::from_seed(SeedData::default(), SimulatedLatency::disabled())
    }
}
