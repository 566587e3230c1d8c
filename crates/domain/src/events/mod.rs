//! Aggregate mutation outcomes
//!
//! These enums communicate what happened when state was modified,
//! allowing callers to perform side effects (notify the data layer,
//! update the screen) without the domain doing any I/O itself.

pub mod feed_events;
pub mod sequencer_events;

pub use feed_events::*;
pub use sequencer_events::*;
