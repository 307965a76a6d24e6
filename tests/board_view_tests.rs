//! Terminal view tests: session state to framebuffer, no terminal needed

use tui_match::core::{BoardConfig, GameSession, Grid, SimpleRng};
use tui_match::term::{BoardView, Hud, Viewport};
use tui_match::types::{GridPos, TICK_MS};

fn session() -> GameSession {
    let config = BoardConfig {
        width: 4,
        height: 2,
        palette: 3,
        ..BoardConfig::default()
    };
    let grid = Grid::from_rows(&config, &[&[0, 0, 1, 2], &[1, 2, 0, 1]]).unwrap();
    GameSession::from_grid(grid, SimpleRng::new(6))
}

fn frame_text(session: &GameSession, cursor: GridPos, hud: &Hud) -> String {
    let view = BoardView::new();
    let fb = view.render(session, cursor, hud, Viewport::new(80, 24));
    fb.cells().iter().map(|c| c.ch).collect()
}

#[test]
fn test_idle_frame_shows_board_and_panel() {
    let s = session();
    let text = frame_text(&s, GridPos::new(0, 0), &Hud::default());

    assert!(text.contains("SCORE"));
    assert!(text.contains("TIME"));
    assert!(text.contains('█'), "tile blocks missing");
    assert!(text.contains('A') && text.contains('B') && text.contains('C'));
}

#[test]
fn test_swapping_state_is_reported() {
    let mut s = session();
    s.on_tile_selected(GridPos::new(2, 0));
    s.on_tile_selected(GridPos::new(2, 1));

    let text = frame_text(&s, GridPos::new(2, 1), &Hud::default());
    assert!(text.contains("swapping"));
}

#[test]
fn test_clearing_tiles_fade() {
    let mut s = session();
    s.on_tile_selected(GridPos::new(2, 0));
    s.on_tile_selected(GridPos::new(2, 1));

    // Finish the swap, then step into the clear animation
    let mut guard = 0;
    while s.is_swapping() {
        s.tick(TICK_MS);
        guard += TICK_MS;
        assert!(guard < 10_000);
    }
    assert!(s.is_processing());
    for _ in 0..14 {
        s.tick(TICK_MS);
    }

    let text = frame_text(&s, GridPos::new(0, 0), &Hud::default());
    assert!(
        text.contains('▓') || text.contains('▒') || text.contains('░'),
        "expected fade glyphs while clearing"
    );
}

#[test]
fn test_paused_and_game_over_overlays() {
    let mut s = session();
    let paused = Hud {
        paused: true,
        ..Hud::default()
    };
    assert!(frame_text(&s, GridPos::new(0, 0), &paused).contains("PAUSED"));

    s.set_game_over();
    let text = frame_text(&s, GridPos::new(0, 0), &Hud::default());
    assert!(text.contains("GAME OVER"));
    // Game over wins over paused
    assert!(!frame_text(&s, GridPos::new(0, 0), &paused).contains("PAUSED"));
}

#[test]
fn test_hud_values_rendered() {
    let s = session();
    let hud = Hud {
        score: 4200,
        time_left_ms: 83_000,
        paused: false,
    };
    let text = frame_text(&s, GridPos::new(0, 0), &hud);
    assert!(text.contains("4200"));
    assert!(text.contains("1:23"));
}
