//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Data access (in-memory today, could swap for a remote API)
//! - Clock (for testing)

mod error;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{ActivityRepo, MessageRepo, PostRepo, StoryRepo, UserRepo};

#[cfg(test)]
pub use repos::{
    MockActivityRepo, MockMessageRepo, MockPostRepo, MockStoryRepo, MockUserRepo,
};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;

#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::RepoError;
