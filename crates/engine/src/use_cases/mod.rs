//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area of the app.
//! Use cases orchestrate across repository ports to fulfill user stories.

pub mod activity;
pub mod current_user;
pub mod feed;
pub mod messages;
pub mod profile;
pub mod stories;
pub mod story_viewer;

pub use activity::{ActivityError, ActivityOps, ActivityView, NotificationDigest};
pub use current_user::CurrentUser;
pub use feed::{FeedError, FeedOps, NewPost};
pub use messages::{MessageError, MessageOps};
pub use profile::{Profile, ProfileError, ProfileOps, SearchResults};
pub use stories::{StoryError, StoryOps};
pub use story_viewer::{
    CloseReason, StoryViewer, ViewerError, ViewerEvent, ViewerHandle, ViewerReport,
};
