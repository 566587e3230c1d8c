//! Value objects - immutable, validated building blocks for entities

mod image_filter;
mod names;
mod playback;

pub use image_filter::ImageFilter;
pub use names::{Caption, CommentText, MessageText, Username};
pub use playback::{PlaybackState, StoryTiming};
