//! Match detector - finds every run of three or more equal identities
//!
//! A full-board scan: horizontal and vertical runs are measured from their
//! first tile, and every tile of a qualifying run is marked in a board-sized
//! mask. The mask deduplicates tiles that sit in both a horizontal and a
//! vertical run, so each tile appears in the result exactly once. Holes
//! (mid-refill slots) break runs. An empty result is the normal "nothing to
//! do" answer, not an error.

use crate::grid::Grid;
use tui_match_types::GridPos;

/// Minimum run length that counts as a match
pub const MIN_RUN: usize = 3;

/// The deduplicated set of tiles belonging to at least one qualifying run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSet {
    positions: Vec<GridPos>,
}

impl MatchSet {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        self.positions.contains(&pos)
    }

    /// Matched positions in row-major scan order.
    pub fn positions(&self) -> &[GridPos] {
        &self.positions
    }
}

/// Scan the whole board and collect every matched tile.
pub fn find_matches(grid: &Grid) -> MatchSet {
    let w = grid.width() as usize;
    let h = grid.height() as usize;
    let mut mask = vec![false; w * h];

    for y in 0..h as i16 {
        for x in 0..w as i16 {
            let Some(id) = grid.identity(x, y) else {
                continue;
            };

            // Horizontal run, measured once from its leftmost tile
            if grid.identity(x - 1, y) != Some(id) {
                let mut len = 1;
                while grid.identity(x + len, y) == Some(id) {
                    len += 1;
                }
                if len as usize >= MIN_RUN {
                    for dx in 0..len {
                        mask[y as usize * w + (x + dx) as usize] = true;
                    }
                }
            }

            // Vertical run, measured once from its topmost tile
            if grid.identity(x, y - 1) != Some(id) {
                let mut len = 1;
                while grid.identity(x, y + len) == Some(id) {
                    len += 1;
                }
                if len as usize >= MIN_RUN {
                    for dy in 0..len {
                        mask[(y + dy) as usize * w + x as usize] = true;
                    }
                }
            }
        }
    }

    let positions = mask
        .iter()
        .enumerate()
        .filter(|(_, &m)| m)
        .map(|(i, _)| GridPos::new((i % w) as u8, (i / w) as u8))
        .collect();

    MatchSet { positions }
}
