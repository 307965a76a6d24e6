//! Error types for board construction and swap requests.
//!
//! Construction errors are fatal: a board that cannot be filled without a
//! starting match is a configuration bug, not something to recover from at
//! runtime. Swap errors are ordinary rejections; the caller keeps going.

use thiserror::Error;
use tui_match_types::GridPos;

/// Fatal configuration problems detected while building a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("tile palette is empty")]
    EmptyPalette,

    #[error("board dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: u8, height: u8 },

    #[error("palette size {palette} exceeds the supported maximum of {max}")]
    PaletteTooLarge { palette: u8, max: usize },

    #[error(
        "palette of {palette} identities cannot fill a {width}x{height} board \
         without a starting match"
    )]
    PaletteTooSmall { palette: u8, width: u8, height: u8 },

    #[error("layout has {got} rows, expected {expected}")]
    RowCountMismatch { got: usize, expected: u8 },

    #[error("row {y} has {got} identities, expected {expected}")]
    RowWidthMismatch { y: u8, got: usize, expected: u8 },

    #[error("identity {id} at ({x}, {y}) is outside the palette of {palette}")]
    IdentityOutOfRange { id: u8, x: u8, y: u8, palette: u8 },
}

/// Why a swap request was not started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SwapError {
    #[error("a swap is already in flight")]
    Busy,

    #[error("tiles at {a} and {b} are not adjacent")]
    NotAdjacent { a: GridPos, b: GridPos },

    #[error("no tile at {pos}")]
    MissingTile { pos: GridPos },
}
