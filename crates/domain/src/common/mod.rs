//! Common utility functions shared across the domain and engine.
//!
//! # Design Principles
//!
//! - **Pure functions only** - no side effects, no I/O
//! - **Minimal dependencies** - only chrono for datetime utilities

pub mod datetime;
pub mod string;

// Re-export commonly used functions at crate root for convenience
pub use datetime::time_ago;
pub use string::{contains_ignore_case, none_if_blank, truncate_with_ellipsis};
