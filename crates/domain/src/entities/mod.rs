//! Domain entities - records owned by the data layer

mod activity;
mod message;
mod post;
mod story;
mod user;

pub use activity::{
    Activity, ActivityDescriptor, ActivityKind, ActivityTab, COMPACT_SUMMARY_LIMIT,
};
pub use message::{Conversation, Message};
pub use post::{Comment, Post, COMMENT_PREVIEW_LIMIT};
pub use story::Story;
pub use user::{User, UserRef};
