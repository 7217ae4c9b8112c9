//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Which key
//! triggers which action is purely a front-end concern; the rules engine only
//! sees actions.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, is_repeatable, should_quit};
