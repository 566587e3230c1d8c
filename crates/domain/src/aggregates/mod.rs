//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Returns outcome enums from mutations instead of performing side effects
//!
//! The only aggregate with a lifecycle of its own is the story sequencer;
//! posts, stories and messages are plain entities mutated through the
//! repositories.

pub mod story_sequencer;

pub use story_sequencer::{SequencerError, StorySequencer};
