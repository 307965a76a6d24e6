//! Match processor - the detect/clear/refill cycle
//!
//! State machine: Idle -> Clearing -> Refilling -> (cascade back to
//! Clearing) -> Idle. A cycle starts with a detection pass; every matched
//! tile runs its clear animation in parallel and the board is mutated only
//! once the all-of join completes, so the logical clear is a single step.
//! After refill the detector runs again; cascades continue until a pass
//! comes back empty or the round cap (one per board row) is spent.

use crate::animation::ClearAnim;
use crate::detector::{find_matches, MatchSet};
use crate::grid::Grid;
use crate::refill;
use crate::rng::SimpleRng;
use tui_match_types::{ClearSummary, GridPos, TileId};

/// Progress reports from a processing cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessorEvent {
    /// A clear step finished and the board is refilling.
    MatchesCleared(ClearSummary),
    /// The cycle is over; `cascades` counts the extra rounds after the first.
    Settled { cascades: u32 },
}

#[derive(Debug, Clone)]
struct ClearingTile {
    pos: GridPos,
    anim: ClearAnim,
    done: bool,
}

#[derive(Debug, Clone)]
enum ProcState {
    Idle,
    Clearing { tiles: Vec<ClearingTile> },
    Refilling,
}

/// What a poll pass decided, decoupled from the state borrow.
enum Step {
    ClearFinished(Vec<GridPos>),
    RefillSettled,
}

#[derive(Debug, Clone)]
pub struct MatchProcessor {
    state: ProcState,
    cascades: u32,
    cascade_cap: u32,
}

impl MatchProcessor {
    pub fn new() -> Self {
        Self {
            state: ProcState::Idle,
            cascades: 0,
            cascade_cap: 0,
        }
    }

    /// The board-level "processing" flag.
    pub fn is_processing(&self) -> bool {
        !matches!(self.state, ProcState::Idle)
    }

    /// Extra detect/clear rounds run so far in the current cycle.
    pub fn cascades(&self) -> u32 {
        self.cascades
    }

    /// Tiles currently playing their clear animation, with fade progress.
    pub fn clearing_tiles(&self) -> Vec<(GridPos, f32)> {
        match &self.state {
            ProcState::Clearing { tiles } => tiles
                .iter()
                .map(|t| (t.pos, t.anim.progress()))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Start a processing cycle: detect and, if anything matched, begin
    /// clearing. Returns whether the processor is now (or still) busy.
    pub fn begin(&mut self, grid: &Grid) -> bool {
        if self.is_processing() {
            return true;
        }

        let matches = find_matches(grid);
        if matches.is_empty() {
            return false;
        }

        self.cascades = 0;
        self.cascade_cap = grid.height() as u32;
        self.state = Self::clearing_from(&matches);
        true
    }

    fn clearing_from(matches: &MatchSet) -> ProcState {
        ProcState::Clearing {
            tiles: matches
                .positions()
                .iter()
                .map(|&pos| ClearingTile {
                    pos,
                    anim: ClearAnim::new(),
                    done: false,
                })
                .collect(),
        }
    }

    /// Advance the cycle by one tick.
    ///
    /// Tile motions are advanced by the owner (`Grid::tick_motions`); this
    /// advances the clear animations and the state machine around them.
    pub fn poll(
        &mut self,
        grid: &mut Grid,
        rng: &mut SimpleRng,
        dt_ms: u32,
    ) -> Option<ProcessorEvent> {
        let step = match &mut self.state {
            ProcState::Idle => return None,
            ProcState::Clearing { tiles } => {
                for t in tiles.iter_mut() {
                    if !t.done && t.anim.tick(dt_ms) {
                        t.done = true;
                    }
                }
                if tiles.iter().any(|t| !t.done) {
                    return None;
                }
                Step::ClearFinished(tiles.iter().map(|t| t.pos).collect())
            }
            ProcState::Refilling => {
                if grid.motions_in_flight() > 0 {
                    return None;
                }
                Step::RefillSettled
            }
        };

        match step {
            Step::ClearFinished(positions) => {
                let summary = remove_tiles(grid, &positions);
                refill::start(grid, rng);
                self.state = ProcState::Refilling;
                Some(ProcessorEvent::MatchesCleared(summary))
            }
            Step::RefillSettled => {
                let matches = find_matches(grid);
                if !matches.is_empty() && self.cascades < self.cascade_cap {
                    self.cascades += 1;
                    self.state = Self::clearing_from(&matches);
                    None
                } else {
                    let cascades = self.cascades;
                    self.state = ProcState::Idle;
                    Some(ProcessorEvent::Settled { cascades })
                }
            }
        }
    }

    /// Abandon the cycle.
    ///
    /// Mid-clear, the animations are dropped and the tiles stay: the logical
    /// clear never happened. Mid-refill, the board is already logically
    /// final, so tiles just snap to their slots. Either way no further
    /// events fire, and the processing flag clears.
    pub fn cancel(&mut self, grid: &mut Grid) {
        match self.state {
            ProcState::Idle => {}
            ProcState::Clearing { .. } => {
                self.state = ProcState::Idle;
            }
            ProcState::Refilling => {
                grid.snap_all_motions();
                self.state = ProcState::Idle;
            }
        }
    }
}

impl Default for MatchProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove the matched tiles in one step and tally what was removed.
fn remove_tiles(grid: &mut Grid, positions: &[GridPos]) -> ClearSummary {
    let mut counts = vec![0u32; grid.palette() as usize];
    let mut total = 0;
    for &pos in positions {
        let tile = grid
            .take_tile(pos)
            .expect("matched tile vanished before removal");
        counts[tile.id().index()] += 1;
        total += 1;
    }

    ClearSummary {
        total,
        by_id: counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(i, &c)| (TileId(i as u8), c))
            .collect(),
    }
}
