//! Terminal match game runner (default binary).
//!
//! Thin glue around the core session: a crossterm poll/tick loop, a cursor,
//! a score tally fed by clear events, and a countdown that flips the board
//! into game over when it runs out.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_match::core::{BoardConfig, GameSession, SessionEvent};
use tui_match::input::{handle_key_event, should_quit};
use tui_match::term::{BoardView, Hud, TerminalRenderer, Viewport};
use tui_match::types::{GameAction, GridPos, GAME_TIME_MS, POINTS_PER_TILE, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

struct App {
    session: GameSession,
    cursor: GridPos,
    hud: Hud,
}

impl App {
    fn new(seed: u32) -> Result<Self> {
        let session = GameSession::new(&BoardConfig::default(), seed)?;
        Ok(Self {
            session,
            cursor: GridPos::new(0, 0),
            hud: Hud {
                score: 0,
                time_left_ms: GAME_TIME_MS,
                paused: false,
            },
        })
    }

    fn apply_action(&mut self, action: GameAction) {
        let width = self.session.grid().width();
        let height = self.session.grid().height();

        match action {
            GameAction::CursorLeft => self.cursor.x = self.cursor.x.saturating_sub(1),
            GameAction::CursorRight => {
                if self.cursor.x + 1 < width {
                    self.cursor.x += 1;
                }
            }
            GameAction::CursorUp => self.cursor.y = self.cursor.y.saturating_sub(1),
            GameAction::CursorDown => {
                if self.cursor.y + 1 < height {
                    self.cursor.y += 1;
                }
            }
            GameAction::Select => {
                if !self.hud.paused {
                    self.session.on_tile_selected(self.cursor);
                }
            }
            GameAction::Pause => {
                if !self.session.game_over() {
                    self.hud.paused = !self.hud.paused;
                }
            }
            // Restart is handled by the loop; it needs a fresh seed.
            GameAction::Restart => {}
        }
    }

    fn tick(&mut self) {
        if self.hud.paused {
            return;
        }

        if !self.session.game_over() {
            self.hud.time_left_ms = self.hud.time_left_ms.saturating_sub(TICK_MS);
            if self.hud.time_left_ms == 0 {
                self.session.set_game_over();
            }
        }

        self.session.tick(TICK_MS);

        for event in self.session.take_events() {
            if let SessionEvent::MatchesCleared(summary) = event {
                self.hud.score += summary.total * POINTS_PER_TILE;
            }
        }
    }
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut app = App::new(time_seed())?;
    let view = BoardView::new();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let mut fb = view.render(&app.session, app.cursor, &app.hud, Viewport::new(w, h));
        term.draw(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Auto-repeat moves the cursor; no separate repeat logic.
                    if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                        if should_quit(key) {
                            return Ok(());
                        }
                        match handle_key_event(key) {
                            Some(GameAction::Restart) => app = App::new(time_seed())?,
                            Some(action) => app.apply_action(action),
                            None => {}
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            app.tick();
        }
    }
}

fn time_seed() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
