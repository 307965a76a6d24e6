//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the view draws the board into a
//! plain framebuffer, and the renderer flushes changed cells to the
//! terminal. No widget/layout framework; tile movement needs per-cell
//! control, and a framebuffer gives exactly that.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Draw tiles at their animated pixel positions, not their slots
//! - Let the whole view be unit-tested without a terminal

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use tui_match_core as core;
pub use tui_match_types as types;

pub use board_view::{visual_key, BoardView, Hud, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::TerminalRenderer;
