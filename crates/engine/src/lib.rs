//! Glimpse Engine library.
//!
//! Repositories, use cases and the story viewer driver for the Glimpse
//! photo-sharing client core.
//!
//! ## Structure
//!
//! - `use_cases/` - User story orchestration across repository ports
//! - `infrastructure/` - Ports plus the in-memory adapters, seed and settings
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
