//! Terminal input module
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. The core
//! only understands "a tile was selected"; everything cursor-shaped lives in
//! the binary, which turns these actions into cursor moves and selections.
//! Intentionally independent of any UI framework.

pub mod map;

pub use tui_match_types as types;

pub use map::{handle_key_event, should_quit};
