//! Animation module - cooperative tick-driven timers
//!
//! All animation in the core is a millisecond timer advanced by the single
//! tick loop. "Concurrent" animations are timers that happen to be live at
//! the same time; nothing here blocks or spawns. Completion is observed on
//! the tick that finishes a timer, exactly once, because the owner removes
//! the finished animation on that tick.

use tui_match_types::{Vec2, CLEAR_DURATION_MS, MOVE_DURATION_MS};

/// A tile traveling from one pixel position to another.
///
/// Progress is linear; the shape of the tween does not matter to anyone but
/// the view, only that the motion ends after `duration_ms` and reports so
/// once. A zero-length duration finishes on the first tick after creation,
/// never on the tick it was scheduled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    from: Vec2,
    to: Vec2,
    elapsed_ms: u32,
    duration_ms: u32,
}

impl Motion {
    /// Start a motion with the standard travel time.
    pub fn new(from: Vec2, to: Vec2) -> Self {
        Self::with_duration(from, to, MOVE_DURATION_MS)
    }

    pub fn with_duration(from: Vec2, to: Vec2, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            elapsed_ms: 0,
            duration_ms,
        }
    }

    /// Advance by `dt_ms`. Returns true once the motion has run its course.
    pub fn tick(&mut self, dt_ms: u32) -> bool {
        self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
        self.finished()
    }

    pub fn finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// Position at the current progress.
    pub fn sample(&self) -> Vec2 {
        if self.duration_ms == 0 {
            return self.to;
        }
        let t = self.elapsed_ms as f32 / self.duration_ms as f32;
        self.from.lerp(self.to, t)
    }

    /// Where this motion will leave the tile.
    pub fn target(&self) -> Vec2 {
        self.to
    }
}

/// The clear/destroy animation of a matched tile.
///
/// The tile stays on the board while this runs; removal happens in one step
/// once every matched tile's animation has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearAnim {
    elapsed_ms: u32,
}

impl ClearAnim {
    pub fn new() -> Self {
        Self { elapsed_ms: 0 }
    }

    /// Advance by `dt_ms`. Returns true once finished.
    pub fn tick(&mut self, dt_ms: u32) -> bool {
        self.elapsed_ms = (self.elapsed_ms + dt_ms).min(CLEAR_DURATION_MS);
        self.finished()
    }

    pub fn finished(&self) -> bool {
        self.elapsed_ms >= CLEAR_DURATION_MS
    }

    /// Progress in `[0, 1]`, for the view's fade.
    pub fn progress(&self) -> f32 {
        self.elapsed_ms as f32 / CLEAR_DURATION_MS as f32
    }
}

impl Default for ClearAnim {
    fn default() -> Self {
        Self::new()
    }
}
