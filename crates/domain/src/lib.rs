//! Glimpse domain - entities, value objects and the story sequencer
//!
//! Everything in this crate is synchronous and free of I/O. The engine crate
//! owns timers, repositories and tasks, and feeds events in here.

pub mod aggregates;
pub mod common;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod navigation;
pub mod value_objects;

pub use aggregates::{SequencerError, StorySequencer};

pub use entities::{
    Activity, ActivityDescriptor, ActivityKind, ActivityTab, Comment, Conversation, Message, Post,
    Story, User, UserRef, COMMENT_PREVIEW_LIMIT, COMPACT_SUMMARY_LIMIT,
};

pub use error::DomainError;

pub use events::{LikeChange, NavigationOutcome, PlaybackChange, SequencerOutcome, TickOutcome};

pub use ids::{ActivityId, CommentId, ConversationId, MessageId, PostId, StoryId, UserId};

pub use navigation::{map_input, Key, NavigationInput, SequencerCommand};

pub use value_objects::{
    Caption, CommentText, ImageFilter, MessageText, PlaybackState, StoryTiming, Username,
};
