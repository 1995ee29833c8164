//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It only reads the snapshot and the presentation
//! settings, never the engine itself.

use crate::core::{GameSnapshot, Presentation};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::Outcome;

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

const HINT: &str = "arrows/wasd/hjkl move  r restart  q quit";

/// A lightweight terminal renderer for the 2048 grid.
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 7 columns fit six-digit tiles with a margin; 3 rows keep tiles roughly square.
        Self {
            cell_w: 7,
            cell_h: 3,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Outer frame size (border included) for a board of `size`.
    ///
    /// Saturates at `u16::MAX`; the frame is clipped to the viewport anyway.
    pub fn frame_size(&self, size: usize) -> (u16, u16) {
        let size = u16::try_from(size).unwrap_or(u16::MAX);
        let span = |cell: u16| size.saturating_mul(cell).saturating_add(2);
        (span(self.cell_w), span(self.cell_h))
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        presentation: &Presentation,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size(snap.size);
        // Status line, key hint and a spacer row sit below the frame.
        let block_h = frame_h.saturating_add(3);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(block_h) / 2;

        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            ..CellStyle::default()
        };
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Tiles past the viewport edge are clipped.
        let cols = snap.size.min(usize::from(viewport.width / self.cell_w.max(1)) + 1);
        let rows = snap.size.min(usize::from(viewport.height / self.cell_h.max(1)) + 1);
        for (y, cell_y) in (0..rows).zip(0u16..) {
            for (x, cell_x) in (0..cols).zip(0u16..) {
                let value = snap.tile(x, y).unwrap_or(0);
                self.draw_tile(fb, presentation, start_x, start_y, cell_x, cell_y, value);
            }
        }

        self.draw_status(fb, snap, start_x, start_y.saturating_add(frame_h));

        match snap.outcome {
            Outcome::Win => self.draw_banner(fb, start_x, start_y, frame_w, frame_h, "YOU WIN!"),
            Outcome::GameOver => {
                self.draw_banner(fb, start_x, start_y, frame_w, frame_h, "GAME OVER")
            }
            _ => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        presentation: &Presentation,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, presentation, viewport, &mut fb);
        fb
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

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        presentation: &Presentation,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        value: u32,
    ) {
        let empty_bg = Rgb::from_hex(presentation.color_for(0)).unwrap_or(Rgb::new(25, 25, 25));
        let bg = if value == 0 {
            empty_bg
        } else {
            Rgb::from_hex(presentation.color_for(value)).unwrap_or(Rgb::new(120, 120, 120))
        };
        let style = CellStyle {
            fg: bg.contrasting_text(),
            bg,
            bold: true,
            dim: false,
        };

        let px = start_x
            .saturating_add(1)
            .saturating_add(cell_x.saturating_mul(self.cell_w));
        let py = start_y
            .saturating_add(1)
            .saturating_add(cell_y.saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);

        if value == 0 {
            let dot = CellStyle {
                fg: Rgb::new(90, 90, 100),
                bold: false,
                dim: true,
                ..style
            };
            fb.put_char(
                px.saturating_add(self.cell_w / 2),
                py.saturating_add(self.cell_h / 2),
                '·',
                dot,
            );
            return;
        }

        let label = value.to_string();
        let label_w = label.len() as u16;
        let lx = px.saturating_add(self.cell_w.saturating_sub(label_w) / 2);
        fb.put_str(lx, py.saturating_add(self.cell_h / 2), &label, style);
    }

    fn draw_status(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let dim = CellStyle {
            dim: true,
            ..CellStyle::default()
        };

        let line = format!(
            "SCORE {}  STEP {}  {}",
            snap.score,
            snap.step,
            snap.outcome.as_str().to_uppercase()
        );
        fb.put_str(x, y, &line, label);
        fb.put_str(x, y.saturating_add(1), HINT, dim);
    }

    fn draw_banner(
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
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}
