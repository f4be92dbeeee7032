//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key identifiers to movement flags)
//! - Time (wall clock in milliseconds)

pub mod input;
pub mod time;

pub use input::KeyBindings;
pub use time::now_ms;
