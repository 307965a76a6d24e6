//! Tile module - one grid cell's mutable state
//!
//! A tile knows its identity, its self-reported board coordinate, whether it
//! is selected, and where it currently sits in pixel space. The coordinate
//! must always equal the grid slot that owns the tile; the grid maintains
//! that when swapping and refilling.

use crate::animation::Motion;
use tui_match_types::{GridPos, TileId, Vec2};

#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    id: TileId,
    x: u8,
    y: u8,
    selected: bool,
    pixel: Vec2,
    motion: Option<Motion>,
}

impl Tile {
    /// Create a tile already resting at `pixel`.
    pub fn new(id: TileId, x: u8, y: u8, pixel: Vec2) -> Self {
        Self {
            id,
            x,
            y,
            selected: false,
            pixel,
            motion: None,
        }
    }

    /// Rebind identity and coordinate.
    ///
    /// Used when a surviving tile falls into a new slot during refill; the
    /// visual side picks the change up from `id()` on the next frame.
    pub fn assign(&mut self, id: TileId, x: u8, y: u8) {
        self.id = id;
        self.x = x;
        self.y = y;
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn pos(&self) -> GridPos {
        GridPos::new(self.x, self.y)
    }

    pub fn select(&mut self) {
        self.selected = true;
    }

    pub fn deselect(&mut self) {
        self.selected = false;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Current pixel-space position (interpolated while moving).
    pub fn pixel(&self) -> Vec2 {
        self.pixel
    }

    /// Begin traveling toward `target` over the standard move duration.
    ///
    /// Replaces any motion already in flight; the replaced motion never
    /// reports completion.
    pub fn start_move(&mut self, target: Vec2) {
        self.motion = Some(Motion::new(self.pixel, target));
    }

    pub fn is_moving(&self) -> bool {
        self.motion.is_some()
    }

    /// Advance the motion, if any. Returns true on the tick the motion
    /// finishes; the finished motion is removed so completion is seen once.
    pub fn tick_motion(&mut self, dt_ms: u32) -> bool {
        let Some(motion) = self.motion.as_mut() else {
            return false;
        };

        if motion.tick(dt_ms) {
            self.pixel = motion.target();
            self.motion = None;
            true
        } else {
            self.pixel = motion.sample();
            false
        }
    }

    /// Drop the in-flight motion, leaving the tile at its destination.
    ///
    /// Cancellation path: no completion is ever reported for the motion.
    pub fn snap_to_target(&mut self) {
        if let Some(motion) = self.motion.take() {
            self.pixel = motion.target();
        }
    }
}
