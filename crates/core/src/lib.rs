//! Core game logic - pure, deterministic, and testable
//!
//! Everything that makes the match game a game lives here: the tile grid,
//! match detection, the animated swap exchange, and the clear/refill cycle.
//! There are no dependencies on UI, terminals, or I/O, so the whole crate
//! runs headless under tests.
//!
//! # Module structure
//!
//! - [`grid`]: tile storage, board geometry, and the match-free builder
//! - [`tile`]: a single cell's identity, selection flag, and pixel position
//! - [`detector`]: full-board scan for runs of three or more
//! - [`swap`]: the two-tile exchange state machine
//! - [`processor`]: the detect -> clear -> refill -> cascade cycle
//! - [`session`]: one playable board tying the above together
//! - [`animation`]: tick-driven move and clear timers
//! - [`rng`]: seeded LCG for reproducible identity rolls
//!
//! # Concurrency model
//!
//! One logical thread, cooperative timers. Every animation is a millisecond
//! counter advanced by `tick`; "parallel" animations are counters that are
//! live at the same time. Logical board mutations (the swap exchange, the
//! post-clear removal) happen in full at one point in the cycle, never
//! spread across ticks, so a detection pass can run at any time and see a
//! consistent board.
//!
//! # Example
//!
//! ```
//! use tui_match_core::{BoardConfig, GameSession};
//! use tui_match_core::types::{GridPos, TICK_MS};
//!
//! let mut session = GameSession::new(&BoardConfig::default(), 12345).unwrap();
//!
//! // Click two adjacent tiles to request a swap
//! session.on_tile_selected(GridPos::new(3, 3));
//! session.on_tile_selected(GridPos::new(3, 4));
//!
//! // Drive the animations; input is blocked until the board settles
//! while session.is_animating() {
//!     session.tick(TICK_MS);
//! }
//! ```

pub mod animation;
pub mod detector;
pub mod error;
pub mod grid;
pub mod processor;
mod refill;
pub mod rng;
pub mod session;
pub mod swap;
pub mod tile;

pub use tui_match_types as types;

// Re-export commonly used types for convenience
pub use animation::{ClearAnim, Motion};
pub use detector::{find_matches, MatchSet, MIN_RUN};
pub use error::{ConfigError, SwapError};
pub use grid::{BoardConfig, Geometry, Grid};
pub use processor::{MatchProcessor, ProcessorEvent};
pub use rng::SimpleRng;
pub use session::{GameSession, SessionEvent};
pub use swap::{SwapCoordinator, SwapDone, SwapState};
pub use tile::Tile;
