//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Raw mode and the alternate screen are entered once; each frame is then
//! diffed against the previous one and only changed cells are written, with
//! consecutive changes coalesced into runs to keep cursor moves down.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to repaint everything (e.g. after a resize event).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a frame. The buffer is swapped into the renderer so the caller
    /// can reuse its (now previous-frame) allocation without cloning.
    pub fn draw(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        let mut prev = match self.last.take() {
            Some(prev) if (prev.width(), prev.height()) == (fb.width(), fb.height()) => prev,
            _ => {
                self.repaint(fb)?;
                let mut fresh = FrameBuffer::new(fb.width(), fb.height());
                std::mem::swap(&mut fresh, fb);
                self.last = Some(fresh);
                return Ok(());
            }
        };

        self.flush_changes(&prev, fb)?;
        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn repaint(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;

        let mut style: Option<CellStyle> = None;
        for y in 0..fb.height() {
            self.stdout.queue(cursor::MoveTo(0, y))?;
            for x in 0..fb.width() {
                let cell = fb.get(x, y).unwrap_or_default();
                self.print_cell(cell, &mut style)?;
            }
        }

        self.finish_frame()
    }

    fn flush_changes(&mut self, prev: &FrameBuffer, next: &FrameBuffer) -> Result<()> {
        let mut style: Option<CellStyle> = None;

        for y in 0..next.height() {
            let mut x = 0;
            while x < next.width() {
                if prev.get(x, y) == next.get(x, y) {
                    x += 1;
                    continue;
                }

                // Start of a changed run; emit until cells agree again.
                self.stdout.queue(cursor::MoveTo(x, y))?;
                while x < next.width() && prev.get(x, y) != next.get(x, y) {
                    let cell = next.get(x, y).unwrap_or_default();
                    self.print_cell(cell, &mut style)?;
                    x += 1;
                }
            }
        }

        self.finish_frame()
    }

    fn print_cell(&mut self, cell: Cell, current: &mut Option<CellStyle>) -> Result<()> {
        if *current != Some(cell.style) {
            self.apply_style(cell.style)?;
            *current = Some(cell.style);
        }
        self.stdout.queue(Print(cell.ch))?;
        Ok(())
    }

    fn finish_frame(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;
        Ok(())
    }

    fn apply_style(&mut self, style: CellStyle) -> Result<()> {
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout
            .queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        self.stdout
            .queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        if style.bold {
            self.stdout.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            self.stdout.queue(SetAttribute(Attribute::Dim))?;
        }
        if style.reverse {
            self.stdout.queue(SetAttribute(Attribute::Reverse))?;
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Terminal I/O itself is not unit-testable; exercise the pieces around it.
    #[test]
    fn test_rgb_conversion() {
        let rgb = Rgb::new(10, 20, 30);
        assert_eq!(
            rgb_to_color(rgb),
            Color::Rgb {
                r: 10,
                g: 20,
                b: 30
            }
        );
    }

    #[test]
    fn test_framebuffers_of_same_content_have_no_changes() {
        let a = FrameBuffer::new(4, 2);
        let b = FrameBuffer::new(4, 2);
        for y in 0..2 {
            for x in 0..4 {
                assert_eq!(a.get(x, y), b.get(x, y));
            }
        }
    }
}
