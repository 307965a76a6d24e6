//! BoardView: maps a `core::GameSession` into a terminal framebuffer.
//!
//! This module is pure (no I/O). Tiles are drawn at their animated pixel
//! positions, so swaps and falls glide across the board; anything above the
//! rim (tiles spawned during refill) is clipped by the board frame.

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use tui_match_core::GameSession;
use tui_match_types::{GridPos, TileId};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Glue-layer state shown in the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    pub score: u32,
    pub time_left_ms: u32,
    pub paused: bool,
}

/// The identity-to-appearance mapping: every identity gets a color and a
/// letter, so boards stay readable on terminals with poor color support.
pub fn visual_key(id: TileId) -> (Rgb, char) {
    const COLORS: [Rgb; 12] = [
        Rgb::new(220, 80, 80),
        Rgb::new(100, 220, 120),
        Rgb::new(80, 120, 220),
        Rgb::new(240, 220, 80),
        Rgb::new(200, 120, 220),
        Rgb::new(80, 220, 220),
        Rgb::new(255, 165, 0),
        Rgb::new(160, 200, 90),
        Rgb::new(230, 120, 160),
        Rgb::new(120, 160, 230),
        Rgb::new(190, 190, 190),
        Rgb::new(140, 100, 60),
    ];
    let color = COLORS[id.index() % COLORS.len()];
    let letter = (b'A' + id.0 % 26) as char;
    (color, letter)
}

/// A lightweight terminal view of one session.
#[derive(Debug, Default)]
pub struct BoardView;

/// Pixel-space rectangle of the board interior, in terminal cells.
#[derive(Clone, Copy)]
struct Interior {
    x0: i32,
    y0: i32,
    w: i32,
    h: i32,
}

impl Interior {
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x0 + self.w && y >= self.y0 && y < self.y0 + self.h
    }
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);

impl BoardView {
    pub fn new() -> Self {
        Self
    }

    /// Render the session into a framebuffer.
    pub fn render(
        &self,
        session: &GameSession,
        cursor: GridPos,
        hud: &Hud,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let grid = session.grid();
        let g = grid.geometry();
        let board_px_w =
            ((g.tile_w + g.spacing_x) * grid.width() as f32 - g.spacing_x).ceil() as u16;
        let board_px_h =
            ((g.tile_h + g.spacing_y) * grid.height() as f32 - g.spacing_y).ceil() as u16;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let interior = Interior {
            x0: start_x as i32 + 1,
            y0: start_y as i32 + 1,
            w: board_px_w as i32,
            h: board_px_h as i32,
        };

        let bg = CellStyle {
            fg: Rgb::new(90, 90, 100),
            bg: BOARD_BG,
            dim: true,
            ..CellStyle::default()
        };
        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);

        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            ..CellStyle::default()
        };
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        // Clear-animation progress per position
        let clearing = session.clearing_tiles();

        for tile in grid.tiles() {
            let fade = clearing
                .iter()
                .find(|(pos, _)| *pos == tile.pos())
                .map(|&(_, p)| p);
            self.draw_tile(&mut fb, interior, g, tile, fade);
        }

        self.draw_cursor(&mut fb, interior, grid, cursor);
        self.draw_side_panel(&mut fb, session, hud, viewport, start_x, start_y, frame_w);

        if hud.paused && !session.game_over() {
            self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "PAUSED");
        } else if session.game_over() {
            self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }

        fb
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        interior: Interior,
        g: &tui_match_core::Geometry,
        tile: &tui_match_core::Tile,
        fade: Option<f32>,
    ) {
        let (color, letter) = visual_key(tile.id());

        let px = tile.pixel();
        let tx = interior.x0 + (px.x - g.origin_x).round() as i32;
        let ty = interior.y0 + (px.y - g.origin_y).round() as i32;
        let tw = g.tile_w.round() as i32;
        let th = g.tile_h.round() as i32;

        let glyph = match fade {
            Some(p) if p >= 0.75 => '░',
            Some(p) if p >= 0.5 => '▒',
            Some(p) if p >= 0.25 => '▓',
            _ => '█',
        };

        // Selected tiles render in reverse video.
        let fill = CellStyle {
            fg: color,
            bg: BOARD_BG,
            bold: !tile.is_selected(),
            dim: fade.map_or(false, |p| p >= 0.75),
            reverse: tile.is_selected(),
            ..CellStyle::default()
        };

        for dy in 0..th {
            for dx in 0..tw {
                let x = tx + dx;
                let y = ty + dy;
                if interior.contains(x, y) {
                    fb.put_char(x as u16, y as u16, glyph, fill);
                }
            }
        }

        // Identity letter at the tile center, skipped once the fade sets in
        if fade.is_none() {
            let cx = tx + tw / 2;
            let cy = ty + th / 2;
            if interior.contains(cx, cy) {
                let label = CellStyle {
                    fg: Rgb::new(20, 20, 25),
                    bg: color,
                    bold: true,
                    reverse: tile.is_selected(),
                    ..CellStyle::default()
                };
                fb.put_char(cx as u16, cy as u16, letter, label);
            }
        }
    }

    fn draw_cursor(&self, fb: &mut FrameBuffer, interior: Interior, grid: &tui_match_core::Grid, cursor: GridPos) {
        let g = grid.geometry();
        let slot = grid.slot_position(cursor.x as i32, cursor.y as i32);
        let tx = interior.x0 + (slot.x - g.origin_x).round() as i32;
        let ty = interior.y0 + (slot.y - g.origin_y).round() as i32;
        let tw = g.tile_w.round() as i32;
        let th = g.tile_h.round() as i32;

        let marker = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: BOARD_BG,
            bold: true,
            ..CellStyle::default()
        };

        for &(x, y, ch) in &[
            (tx, ty, '┌'),
            (tx + tw - 1, ty, '┐'),
            (tx, ty + th - 1, '└'),
            (tx + tw - 1, ty + th - 1, '┘'),
        ] {
            if interior.contains(x, y) {
                fb.put_char(x as u16, y as u16, ch, marker);
            }
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        session: &GameSession,
        hud: &Hud,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            ..CellStyle::default()
        };
        let help = CellStyle {
            dim: true,
            ..CellStyle::default()
        };

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}", hud.score), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TIME", label);
        y = y.saturating_add(1);
        let secs = hud.time_left_ms / 1000;
        fb.put_str(panel_x, y, &format!("{}:{:02}", secs / 60, secs % 60), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "STATE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, self.state_line(session, hud), value);
        y = y.saturating_add(2);

        for line in [
            "arrows/hjkl move",
            "enter/space pick",
            "p pause  r restart",
            "q quit",
        ] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y = y.saturating_add(1);
        }
    }

    fn state_line(&self, session: &GameSession, hud: &Hud) -> &'static str {
        if session.game_over() {
            "game over"
        } else if hud.paused {
            "paused"
        } else if session.is_swapping() {
            "swapping"
        } else if session.is_processing() {
            if session.clearing_tiles().is_empty() {
                "falling"
            } else {
                "clearing"
            }
        } else {
            "your move"
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bold: true,
            ..CellStyle::default()
        };
        fb.put_str(x, mid_y, text, style);
    }
}
