//! Session - one playable board
//!
//! `GameSession` wires the grid, the swap coordinator, and the match
//! processor together and owns the selection state. Components are held
//! directly, not looked up through any registry, so several independent
//! boards can coexist; the selected tile is a plain field, not shared
//! mutable state.
//!
//! Input flow: `on_tile_selected` implements the click rules, a completed
//! swap kicks off a processing cycle, and `tick` drives everything. While
//! `is_animating()` is true (a swap or a processing cycle is in flight) new
//! selections are ignored, as they are after game over.

use crate::error::ConfigError;
use crate::grid::{BoardConfig, Grid};
use crate::processor::{MatchProcessor, ProcessorEvent};
use crate::rng::SimpleRng;
use crate::swap::SwapCoordinator;
use tui_match_types::{ClearSummary, GridPos};

/// Things collaborators may care about, drained with `take_events`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Both tiles of a swap arrived at their new slots.
    SwapCompleted { a: GridPos, b: GridPos },
    /// A clear step removed tiles; score keepers want this one.
    MatchesCleared(ClearSummary),
    /// The board is stable again and input is live.
    BoardSettled { cascades: u32 },
}

#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    swap: SwapCoordinator,
    processor: MatchProcessor,
    rng: SimpleRng,
    selected: Option<GridPos>,
    game_over: bool,
    events: Vec<SessionEvent>,
}

impl GameSession {
    /// Build a fresh, match-free board and an idle session around it.
    pub fn new(config: &BoardConfig, seed: u32) -> Result<Self, ConfigError> {
        let mut rng = SimpleRng::new(seed);
        let grid = Grid::build(config, &mut rng)?;
        Ok(Self::from_grid(grid, rng))
    }

    /// Wrap an existing grid. Scenario tests use this with `Grid::from_rows`.
    pub fn from_grid(grid: Grid, rng: SimpleRng) -> Self {
        Self {
            grid,
            swap: SwapCoordinator::new(),
            processor: MatchProcessor::new(),
            rng,
            selected: None,
            game_over: false,
            events: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Coordinate of the currently selected tile, if any.
    pub fn selected(&self) -> Option<GridPos> {
        self.selected
    }

    pub fn is_swapping(&self) -> bool {
        self.swap.is_swapping()
    }

    pub fn is_processing(&self) -> bool {
        self.processor.is_processing()
    }

    /// The combined flag the input layer gates on.
    pub fn is_animating(&self) -> bool {
        self.is_swapping() || self.is_processing()
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Tiles mid clear animation, with fade progress for the view.
    pub fn clearing_tiles(&self) -> Vec<(GridPos, f32)> {
        self.processor.clearing_tiles()
    }

    /// A tile was clicked/chosen by the player.
    ///
    /// Rules: clicking the selected tile deselects it; with nothing
    /// selected, the tile becomes selected; a second, adjacent tile
    /// triggers the swap attempt and the selection clears regardless of
    /// what the swap leads to; a second, non-adjacent tile takes over the
    /// selection. Ignored while animating or after game over.
    pub fn on_tile_selected(&mut self, pos: GridPos) {
        if self.game_over || self.is_animating() {
            return;
        }
        if self.grid.tile_at(pos).is_none() {
            return;
        }

        match self.selected {
            Some(prev) if prev == pos => {
                self.mark_selected(pos, false);
                self.selected = None;
            }
            Some(prev) if prev.is_adjacent(pos) => {
                self.mark_selected(prev, false);
                self.selected = None;
                // Idle and both tiles present, so this cannot be rejected;
                // if it somehow is, the board is simply left alone.
                let _ = self.swap.begin(&mut self.grid, prev, pos);
            }
            Some(prev) => {
                self.mark_selected(prev, false);
                self.mark_selected(pos, true);
                self.selected = Some(pos);
            }
            None => {
                self.mark_selected(pos, true);
                self.selected = Some(pos);
            }
        }
    }

    fn mark_selected(&mut self, pos: GridPos, on: bool) {
        if let Some(tile) = self.grid.tile_at_mut(pos) {
            if on {
                tile.select();
            } else {
                tile.deselect();
            }
        }
    }

    /// Run a processing cycle now: detect, clear, refill, cascade.
    ///
    /// Returns whether anything matched. Called automatically when a swap
    /// completes; exposed for boards set up by other means.
    pub fn process(&mut self) -> bool {
        self.processor.begin(&self.grid)
    }

    /// Advance the session by one timestep.
    pub fn tick(&mut self, dt_ms: u32) {
        if self.game_over {
            return;
        }

        self.grid.tick_motions(dt_ms);

        if let Some(done) = self.swap.poll(&self.grid) {
            self.events.push(SessionEvent::SwapCompleted {
                a: done.a,
                b: done.b,
            });
            self.process();
        }

        if let Some(ev) = self.processor.poll(&mut self.grid, &mut self.rng, dt_ms) {
            self.events.push(match ev {
                ProcessorEvent::MatchesCleared(summary) => SessionEvent::MatchesCleared(summary),
                ProcessorEvent::Settled { cascades } => SessionEvent::BoardSettled { cascades },
            });
        }
    }

    /// Lock the board: no further selections, and anything in flight is
    /// cancelled without reporting completion, so the animating flag cannot
    /// stay wedged.
    pub fn set_game_over(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;

        if let Some(pos) = self.selected.take() {
            self.mark_selected(pos, false);
        }
        self.swap.cancel(&mut self.grid);
        self.processor.cancel(&mut self.grid);
        self.grid.snap_all_motions();
    }

    /// Drain pending events for the collaborators (score, UI).
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}
