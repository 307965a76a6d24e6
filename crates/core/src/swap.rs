//! Swap coordinator - exchanges two adjacent tiles with animation
//!
//! Two states: Idle and Swapping. The logical exchange happens in full when
//! a swap is accepted, before either tile starts traveling, so any lookup or
//! detection that runs mid-animation already sees the post-swap layout. The
//! coordinator reports completion once, only after both travel animations
//! have finished.
//!
//! Non-adjacent pairs are rejected: a swap request is only valid between
//! orthogonal neighbors.

use crate::error::SwapError;
use crate::grid::Grid;
use tui_match_types::GridPos;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapState {
    Idle,
    Swapping { a: GridPos, b: GridPos },
}

/// A finished exchange, reported exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapDone {
    pub a: GridPos,
    pub b: GridPos,
}

#[derive(Debug, Clone)]
pub struct SwapCoordinator {
    state: SwapState,
}

impl SwapCoordinator {
    pub fn new() -> Self {
        Self {
            state: SwapState::Idle,
        }
    }

    pub fn state(&self) -> SwapState {
        self.state
    }

    pub fn is_swapping(&self) -> bool {
        matches!(self.state, SwapState::Swapping { .. })
    }

    /// Start exchanging the tiles at `a` and `b`.
    ///
    /// On success the grid already reflects the new layout when this
    /// returns; the tiles then travel to their new slots over the standard
    /// move duration. Rejected while another swap is in flight, when the
    /// slots are not adjacent, or when either slot has no tile.
    pub fn begin(&mut self, grid: &mut Grid, a: GridPos, b: GridPos) -> Result<(), SwapError> {
        if self.is_swapping() {
            return Err(SwapError::Busy);
        }
        if !a.is_adjacent(b) {
            return Err(SwapError::NotAdjacent { a, b });
        }
        if grid.tile_at(a).is_none() {
            return Err(SwapError::MissingTile { pos: a });
        }
        if grid.tile_at(b).is_none() {
            return Err(SwapError::MissingTile { pos: b });
        }

        // Logical exchange first; the visuals catch up.
        grid.swap_tiles(a, b);

        let target_a = grid.slot_position(a.x as i32, a.y as i32);
        let target_b = grid.slot_position(b.x as i32, b.y as i32);
        if let Some(tile) = grid.tile_at_mut(a) {
            tile.start_move(target_a);
        }
        if let Some(tile) = grid.tile_at_mut(b) {
            tile.start_move(target_b);
        }

        self.state = SwapState::Swapping { a, b };
        Ok(())
    }

    /// Check for completion. Motions are advanced by the owning tick loop
    /// (`Grid::tick_motions`); this only observes the join of both tiles.
    pub fn poll(&mut self, grid: &Grid) -> Option<SwapDone> {
        let SwapState::Swapping { a, b } = self.state else {
            return None;
        };

        let a_moving = grid.tile_at(a).is_some_and(|t| t.is_moving());
        let b_moving = grid.tile_at(b).is_some_and(|t| t.is_moving());
        if a_moving || b_moving {
            return None;
        }

        self.state = SwapState::Idle;
        Some(SwapDone { a, b })
    }

    /// Abandon the in-flight swap, if any.
    ///
    /// The logical exchange stands (it already happened); both tiles snap to
    /// their slots and no completion is ever reported.
    pub fn cancel(&mut self, grid: &mut Grid) {
        if let SwapState::Swapping { a, b } = self.state {
            if let Some(tile) = grid.tile_at_mut(a) {
                tile.snap_to_target();
            }
            if let Some(tile) = grid.tile_at_mut(b) {
                tile.snap_to_target();
            }
            self.state = SwapState::Idle;
        }
    }
}

impl Default for SwapCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
