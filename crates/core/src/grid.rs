//! Grid module - tile storage and board geometry
//!
//! The grid owns every tile by coordinate slot. Outside of a refill, every
//! slot holds a tile; holes exist only between "matched tiles removed" and
//! "replacements settled". Geometry constants are fixed at construction, so
//! pixel positions of slots never change for the lifetime of a board.
//!
//! Coordinates: (x, y) with x in 0..width left to right and y in 0..height
//! top to bottom. Gravity during refill pulls toward larger y.

use arrayvec::ArrayVec;

use crate::error::ConfigError;
use crate::rng::SimpleRng;
use crate::tile::Tile;
use tui_match_types::{
    GridPos, TileId, Vec2, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_PALETTE_SIZE,
    MAX_PALETTE,
};

/// Board pixel-space layout: tile footprint, gaps, and board origin.
///
/// `slot_position` is a pure function of these constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub tile_w: f32,
    pub tile_h: f32,
    pub spacing_x: f32,
    pub spacing_y: f32,
    pub origin_x: f32,
    pub origin_y: f32,
}

impl Default for Geometry {
    fn default() -> Self {
        // Terminal-friendly footprint: 4 columns x 2 rows per tile, one cell
        // of air between tiles.
        Self {
            tile_w: 4.0,
            tile_h: 2.0,
            spacing_x: 1.0,
            spacing_y: 1.0,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }
}

impl Geometry {
    /// Pixel position of slot (x, y).
    ///
    /// Accepts virtual coordinates: refill spawns tiles at negative y, above
    /// the board rim, and lets them fall in.
    pub fn slot_position(&self, x: i32, y: i32) -> Vec2 {
        Vec2::new(
            self.origin_x + (self.tile_w + self.spacing_x) * x as f32,
            self.origin_y + (self.tile_h + self.spacing_y) * y as f32,
        )
    }
}

/// Everything needed to build a board.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    pub width: u8,
    pub height: u8,
    /// Number of tile identities to draw from
    pub palette: u8,
    pub geometry: Geometry,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            palette: DEFAULT_PALETTE_SIZE,
            geometry: Geometry::default(),
        }
    }
}

impl BoardConfig {
    /// Reject configurations no board can be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette == 0 {
            return Err(ConfigError::EmptyPalette);
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.palette as usize > MAX_PALETTE {
            return Err(ConfigError::PaletteTooLarge {
                palette: self.palette,
                max: MAX_PALETTE,
            });
        }
        Ok(())
    }
}

/// The tile grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: u8,
    height: u8,
    palette: u8,
    geometry: Geometry,
    cells: Vec<Option<Tile>>,
}

impl Grid {
    /// Build a fresh board with no match anywhere on it.
    ///
    /// Tiles are placed column-major with y increasing. Each new tile draws
    /// its identity uniformly from the palette minus any identity that would
    /// complete a run of three with the two already-placed neighbors to the
    /// left or the two above. That exclusion makes a post-build validation
    /// pass unnecessary.
    pub fn build(config: &BoardConfig, rng: &mut SimpleRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut grid = Self::empty(config);
        for x in 0..config.width {
            for y in 0..config.height {
                let pool = grid.starting_pool(x, y);
                if pool.is_empty() {
                    return Err(ConfigError::PaletteTooSmall {
                        palette: config.palette,
                        width: config.width,
                        height: config.height,
                    });
                }
                let id = pool[rng.next_range(pool.len() as u32) as usize];
                grid.place_new(x, y, id);
            }
        }
        Ok(grid)
    }

    /// Build a board from an explicit identity layout, row by row.
    ///
    /// `rows[y][x]` is the identity at (x, y). No match-freedom is enforced;
    /// scenario tests use this to set up boards that do contain matches.
    pub fn from_rows(config: &BoardConfig, rows: &[&[u8]]) -> Result<Self, ConfigError> {
        config.validate()?;

        if rows.len() != config.height as usize {
            return Err(ConfigError::RowCountMismatch {
                got: rows.len(),
                expected: config.height,
            });
        }

        let mut grid = Self::empty(config);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != config.width as usize {
                return Err(ConfigError::RowWidthMismatch {
                    y: y as u8,
                    got: row.len(),
                    expected: config.width,
                });
            }
            for (x, &id) in row.iter().enumerate() {
                if id >= config.palette {
                    return Err(ConfigError::IdentityOutOfRange {
                        id,
                        x: x as u8,
                        y: y as u8,
                        palette: config.palette,
                    });
                }
                grid.place_new(x as u8, y as u8, TileId(id));
            }
        }
        Ok(grid)
    }

    fn empty(config: &BoardConfig) -> Self {
        let len = config.width as usize * config.height as usize;
        Self {
            width: config.width,
            height: config.height,
            palette: config.palette,
            geometry: config.geometry,
            cells: vec![None; len],
        }
    }

    fn place_new(&mut self, x: u8, y: u8, id: TileId) {
        let pixel = self.geometry.slot_position(x as i32, y as i32);
        let idx = y as usize * self.width as usize + x as usize;
        self.cells[idx] = Some(Tile::new(id, x, y, pixel));
    }

    /// Identities a new tile at (x, y) may take without creating a run with
    /// the two placed neighbors to its left or the two above.
    fn starting_pool(&self, x: u8, y: u8) -> ArrayVec<TileId, MAX_PALETTE> {
        let mut pool: ArrayVec<TileId, MAX_PALETTE> =
            (0..self.palette).map(TileId).collect();

        let x = x as i16;
        let y = y as i16;
        if let (Some(a), Some(b)) = (self.identity(x - 1, y), self.identity(x - 2, y)) {
            if a == b {
                pool.retain(|&mut id| id != a);
            }
        }
        if let (Some(a), Some(b)) = (self.identity(x, y - 1), self.identity(x, y - 2)) {
            if a == b {
                pool.retain(|&mut id| id != a);
            }
        }
        pool
    }

    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= self.width as i16 || y < 0 || y >= self.height as i16 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn palette(&self) -> u8 {
        self.palette
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Pixel position of slot (x, y); see [`Geometry::slot_position`].
    pub fn slot_position(&self, x: i32, y: i32) -> Vec2 {
        self.geometry.slot_position(x, y)
    }

    /// Tile at (x, y). None when out of bounds or the slot is a hole.
    pub fn tile(&self, x: i16, y: i16) -> Option<&Tile> {
        self.index(x, y).and_then(|i| self.cells[i].as_ref())
    }

    pub fn tile_at(&self, pos: GridPos) -> Option<&Tile> {
        self.tile(pos.x as i16, pos.y as i16)
    }

    pub(crate) fn tile_at_mut(&mut self, pos: GridPos) -> Option<&mut Tile> {
        self.index(pos.x as i16, pos.y as i16)
            .and_then(|i| self.cells[i].as_mut())
    }

    /// Identity at (x, y), if a tile is there.
    pub fn identity(&self, x: i16, y: i16) -> Option<TileId> {
        self.tile(x, y).map(|t| t.id())
    }

    /// Whether every slot currently holds a tile (always true outside refill).
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Find the slot holding this exact tile, by linear search.
    ///
    /// `tile` must be a borrow out of this grid; the result doubles as a
    /// check that the tile's self-reported coordinate matches its slot.
    pub fn index_of(&self, tile: &Tile) -> Option<GridPos> {
        self.cells.iter().enumerate().find_map(|(i, cell)| {
            let t = cell.as_ref()?;
            if std::ptr::eq(t, tile) {
                let pos = GridPos::new(
                    (i % self.width as usize) as u8,
                    (i / self.width as usize) as u8,
                );
                debug_assert_eq!(t.pos(), pos, "tile coordinate desynced from its slot");
                Some(pos)
            } else {
                None
            }
        })
    }

    /// Exchange the tiles at `a` and `b` in one step.
    ///
    /// Both slots and both tiles' self-reported coordinates are updated
    /// before this returns; there is no intermediate state for a detection
    /// pass to observe. Pixel positions are untouched - travel is the swap
    /// coordinator's business. Returns false if either slot is empty.
    pub fn swap_tiles(&mut self, a: GridPos, b: GridPos) -> bool {
        let (Some(ia), Some(ib)) = (
            self.index(a.x as i16, a.y as i16),
            self.index(b.x as i16, b.y as i16),
        ) else {
            return false;
        };
        if ia == ib || self.cells[ia].is_none() || self.cells[ib].is_none() {
            return false;
        }

        self.cells.swap(ia, ib);
        if let Some(t) = self.cells[ia].as_mut() {
            let id = t.id();
            t.assign(id, a.x, a.y);
        }
        if let Some(t) = self.cells[ib].as_mut() {
            let id = t.id();
            t.assign(id, b.x, b.y);
        }
        true
    }

    pub(crate) fn take_tile(&mut self, pos: GridPos) -> Option<Tile> {
        self.index(pos.x as i16, pos.y as i16)
            .and_then(|i| self.cells[i].take())
    }

    pub(crate) fn put_tile(&mut self, pos: GridPos, tile: Tile) {
        debug_assert_eq!(tile.pos(), pos, "tile placed into a foreign slot");
        if let Some(i) = self.index(pos.x as i16, pos.y as i16) {
            debug_assert!(self.cells[i].is_none(), "slot {pos} already occupied");
            self.cells[i] = Some(tile);
        }
    }

    /// Advance every tile motion by `dt_ms`. Returns how many are still live.
    pub fn tick_motions(&mut self, dt_ms: u32) -> usize {
        let mut live = 0;
        for cell in self.cells.iter_mut() {
            if let Some(tile) = cell.as_mut() {
                tile.tick_motion(dt_ms);
                if tile.is_moving() {
                    live += 1;
                }
            }
        }
        live
    }

    /// Number of tile motions currently in flight.
    pub fn motions_in_flight(&self) -> usize {
        self.tiles().filter(|t| t.is_moving()).count()
    }

    /// Drop every in-flight motion, leaving tiles at their destinations.
    pub fn snap_all_motions(&mut self) {
        for cell in self.cells.iter_mut() {
            if let Some(tile) = cell.as_mut() {
                tile.snap_to_target();
            }
        }
    }

    /// All tiles currently on the board.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().filter_map(|c| c.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> BoardConfig {
        BoardConfig {
            width: 4,
            height: 4,
            palette: 4,
            ..BoardConfig::default()
        }
    }

    #[test]
    fn test_build_fills_every_slot() {
        let mut rng = SimpleRng::new(42);
        let grid = Grid::build(&small_config(), &mut rng).unwrap();
        assert!(grid.is_complete());
        assert_eq!(grid.tiles().count(), 16);
    }

    #[test]
    fn test_build_rejects_empty_palette() {
        let config = BoardConfig {
            palette: 0,
            ..small_config()
        };
        let mut rng = SimpleRng::new(1);
        assert_eq!(
            Grid::build(&config, &mut rng),
            Err(ConfigError::EmptyPalette)
        );
    }

    #[test]
    fn test_build_rejects_zero_dimension() {
        let config = BoardConfig {
            width: 0,
            ..small_config()
        };
        let mut rng = SimpleRng::new(1);
        assert!(matches!(
            Grid::build(&config, &mut rng),
            Err(ConfigError::ZeroDimension { .. })
        ));
    }

    #[test]
    fn test_single_identity_palette_cannot_fill_a_matchable_board() {
        let config = BoardConfig {
            palette: 1,
            ..small_config()
        };
        let mut rng = SimpleRng::new(1);
        assert!(matches!(
            Grid::build(&config, &mut rng),
            Err(ConfigError::PaletteTooSmall { .. })
        ));
    }

    #[test]
    fn test_from_rows_layout() {
        let config = small_config();
        let grid = Grid::from_rows(
            &config,
            &[
                &[0, 1, 2, 3],
                &[1, 2, 3, 0],
                &[2, 3, 0, 1],
                &[3, 0, 1, 2],
            ],
        )
        .unwrap();
        assert_eq!(grid.identity(0, 0), Some(TileId(0)));
        assert_eq!(grid.identity(3, 0), Some(TileId(3)));
        assert_eq!(grid.identity(0, 3), Some(TileId(3)));
    }

    #[test]
    fn test_from_rows_rejects_out_of_palette_identity() {
        let config = small_config();
        let result = Grid::from_rows(
            &config,
            &[
                &[0, 1, 2, 9],
                &[1, 2, 3, 0],
                &[2, 3, 0, 1],
                &[3, 0, 1, 2],
            ],
        );
        assert!(matches!(
            result,
            Err(ConfigError::IdentityOutOfRange { id: 9, .. })
        ));
    }

    #[test]
    fn test_swap_updates_slots_and_coordinates() {
        let config = small_config();
        let mut grid = Grid::from_rows(
            &config,
            &[
                &[0, 1, 2, 3],
                &[1, 2, 3, 0],
                &[2, 3, 0, 1],
                &[3, 0, 1, 2],
            ],
        )
        .unwrap();

        let a = GridPos::new(0, 0);
        let b = GridPos::new(1, 0);
        assert!(grid.swap_tiles(a, b));

        assert_eq!(grid.identity(0, 0), Some(TileId(1)));
        assert_eq!(grid.identity(1, 0), Some(TileId(0)));
        assert_eq!(grid.tile_at(a).unwrap().pos(), a);
        assert_eq!(grid.tile_at(b).unwrap().pos(), b);
    }

    #[test]
    fn test_index_of_agrees_with_self_reported_position() {
        let mut rng = SimpleRng::new(9);
        let grid = Grid::build(&small_config(), &mut rng).unwrap();
        let tile = grid.tile(2, 3).unwrap();
        assert_eq!(grid.index_of(tile), Some(GridPos::new(2, 3)));
    }

    #[test]
    fn test_out_of_bounds_lookups_are_none() {
        let mut rng = SimpleRng::new(5);
        let grid = Grid::build(&small_config(), &mut rng).unwrap();
        assert!(grid.tile(-1, 0).is_none());
        assert!(grid.tile(0, -1).is_none());
        assert!(grid.tile(4, 0).is_none());
        assert!(grid.tile(0, 4).is_none());
    }
}
