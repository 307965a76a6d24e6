//! Refill - gravity compaction and spawn-in after a clear
//!
//! Each column is settled independently: surviving tiles slide down into the
//! lowest open slots, then fresh tiles are stacked above the rim and dropped
//! into whatever stays vacant. Spawned identities are drawn with the same
//! two-neighbor exclusion used at build time, evaluated against the
//! post-gravity board, so a spawned tile never completes a run at its own
//! slot. Chains can still form where survivors land next to each other;
//! that is what cascades are for.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::tile::Tile;
use tui_match_types::{GridPos, TileId, MAX_PALETTE};

/// Fill every hole in the grid, starting fall motions for each tile that
/// needs to travel. The grid is complete again when this returns; the board
/// merely looks unsettled until the motions finish.
pub(crate) fn start(grid: &mut Grid, rng: &mut SimpleRng) {
    let h = grid.height() as i16;

    for x in 0..grid.width() {
        // Slide survivors down, bottom-up, two-pointer style.
        let mut write_y = h;
        for read_y in (0..h).rev() {
            let from = GridPos::new(x, read_y as u8);
            if let Some(mut tile) = grid.take_tile(from) {
                write_y -= 1;
                let dest = GridPos::new(x, write_y as u8);
                if dest != from {
                    tile.assign(tile.id(), dest.x, dest.y);
                    tile.start_move(grid.slot_position(x as i32, write_y as i32));
                }
                grid.put_tile(dest, tile);
            }
        }

        // Drop fresh tiles into the vacated top rows, lowest slot first so
        // the exclusion pool always sees settled neighbors below.
        for (k, y) in (0..write_y).rev().enumerate() {
            let id = spawn_identity(grid, rng, x as i16, y);
            let dest = GridPos::new(x, y as u8);
            let above_rim = grid.slot_position(x as i32, -(k as i32) - 1);
            let mut tile = Tile::new(id, dest.x, dest.y, above_rim);
            tile.start_move(grid.slot_position(x as i32, y as i32));
            grid.put_tile(dest, tile);
        }
    }

    debug_assert!(grid.is_complete(), "refill left a hole");
}

/// Identity for a spawned tile at (x, y): uniform over the palette minus
/// anything that would complete a run with the two settled neighbors below
/// or the two to the left.
fn spawn_identity(grid: &Grid, rng: &mut SimpleRng, x: i16, y: i16) -> TileId {
    let mut pool: ArrayVec<TileId, MAX_PALETTE> =
        (0..grid.palette()).map(TileId).collect();

    if let (Some(a), Some(b)) = (grid.identity(x, y + 1), grid.identity(x, y + 2)) {
        if a == b {
            pool.retain(|&mut id| id != a);
        }
    }
    if let (Some(a), Some(b)) = (grid.identity(x - 1, y), grid.identity(x - 2, y)) {
        if a == b {
            pool.retain(|&mut id| id != a);
        }
    }

    if pool.is_empty() {
        // A two-identity palette can exclude everything; allow the match and
        // let the cascade clear it.
        TileId(rng.next_range(grid.palette() as u32) as u8)
    } else {
        pool[rng.next_range(pool.len() as u32) as usize]
    }
}
