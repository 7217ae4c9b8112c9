//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O).

use crate::core::{GameSnapshot, Piece};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, GRID_HEIGHT, GRID_WIDTH};

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

const PANEL_GAP: u16 = 2;
const PANEL_WIDTH: u16 = 18;

const BLOCK: char = '█';
const GHOST: char = '░';

const WELL_BG: Rgb = Rgb::new(24, 24, 32);
const LOCKED_FG: Rgb = Rgb::new(150, 150, 160);
const BORDER_FG: Rgb = Rgb::new(200, 200, 200);
const LABEL_FG: Rgb = Rgb::new(140, 140, 150);
const VALUE_FG: Rgb = Rgb::new(240, 240, 240);

const HELP: [&str; 6] = [
    "←/→  move",
    "↓    soft drop",
    "↑    rotate",
    "spc  hard drop",
    "p    pause",
    "q    quit",
];

/// Renders the playfield plus a side panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps blocks roughly square.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Total columns and rows the layout needs.
    pub fn required_size(&self) -> (u16, u16) {
        let frame_w = GRID_WIDTH as u16 * self.cell_w + 2;
        let frame_h = GRID_HEIGHT as u16 + 2;
        (frame_w + PANEL_GAP + PANEL_WIDTH, frame_h)
    }

    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Render into an existing framebuffer, reusing its allocation.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);

        let (total_w, total_h) = self.required_size();
        if viewport.width < total_w || viewport.height < total_h {
            let msg = format!("terminal too small: need {total_w}x{total_h}");
            fb.put_str(0, 0, &msg, CellStyle::fg(VALUE_FG).bold());
            return;
        }

        let origin_x = (viewport.width - total_w) / 2;
        let origin_y = (viewport.height - total_h) / 2;
        let well_w = GRID_WIDTH as u16 * self.cell_w;
        let well_h = GRID_HEIGHT as u16;

        fb.fill_rect(
            origin_x + 1,
            origin_y + 1,
            well_w,
            well_h,
            ' ',
            CellStyle::fg(LOCKED_FG).on(WELL_BG),
        );
        draw_border(fb, origin_x, origin_y, well_w + 2, well_h + 2);

        let well = (origin_x + 1, origin_y + 1);
        let locked = CellStyle::fg(LOCKED_FG).on(WELL_BG);
        for (y, row) in snap.grid.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell != 0 {
                    self.put_cell(fb, well, x as i8, y as i8, BLOCK, locked);
                }
            }
        }

        if snap.started && !snap.game_over {
            let color = piece_color(snap.current.kind);
            let ghost_style = CellStyle::fg(color).on(WELL_BG).dim();
            for pos in snap.ghost_piece().cells() {
                self.put_cell(fb, well, pos.x, pos.y, GHOST, ghost_style);
            }
            let style = CellStyle::fg(color).on(WELL_BG);
            for pos in snap.current.cells() {
                self.put_cell(fb, well, pos.x, pos.y, BLOCK, style);
            }
        }

        let panel_x = origin_x + well_w + 2 + PANEL_GAP;
        self.draw_panel(fb, snap, panel_x, origin_y + 1);

        let overlay = if snap.game_over {
            Some(("GAME OVER", "Enter: new game"))
        } else if snap.paused {
            Some(("PAUSED", "p: resume"))
        } else if !snap.started {
            Some(("BLOCKFALL", "Enter: start"))
        } else {
            None
        };
        if let Some((title, hint)) = overlay {
            let mid_y = origin_y + 1 + well_h / 2;
            let title_style = CellStyle::fg(VALUE_FG).on(WELL_BG).bold();
            let hint_style = CellStyle::fg(LABEL_FG).on(WELL_BG);
            center_text(fb, well.0, well_w, mid_y - 1, title, title_style);
            center_text(fb, well.0, well_w, mid_y + 1, hint, hint_style);
        }
    }

    fn put_cell(
        &self,
        fb: &mut FrameBuffer,
        well: (u16, u16),
        x: i8,
        y: i8,
        ch: char,
        style: CellStyle,
    ) {
        // Rows above the well are not drawn.
        if x < 0 || y < 0 || x >= GRID_WIDTH as i8 || y >= GRID_HEIGHT as i8 {
            return;
        }
        let sx = well.0 + x as u16 * self.cell_w;
        let sy = well.1 + y as u16;
        for dx in 0..self.cell_w {
            fb.put(sx + dx, sy, ch, style);
        }
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let label = CellStyle::fg(LABEL_FG);
        let value = CellStyle::fg(VALUE_FG).bold();

        fb.put_str(x, y, "NEXT", label);
        self.draw_preview(fb, &snap.next, x, y + 1);

        let stats = [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ];
        for (i, (name, n)) in stats.iter().enumerate() {
            let row = y + 6 + i as u16 * 2;
            fb.put_str(x, row, name, label);
            fb.put_str(x, row + 1, &n.to_string(), value);
        }

        let help_y = y + 13;
        for (i, line) in HELP.iter().enumerate() {
            fb.put_str(x, help_y + i as u16, line, label.dim());
        }
    }

    /// Next piece in spawn orientation, on a 4x4 box.
    fn draw_preview(&self, fb: &mut FrameBuffer, piece: &Piece, x: u16, y: u16) {
        let style = CellStyle::fg(piece_color(piece.kind));
        for (dx, dy) in piece.matrix().occupied() {
            let sx = x + dx as u16 * self.cell_w;
            for c in 0..self.cell_w {
                fb.put(sx + c, y + dy as u16, BLOCK, style);
            }
        }
    }
}

pub fn piece_color(kind: PieceKind) -> Rgb {
    Rgb::from_hex(kind.color()).unwrap_or(VALUE_FG)
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    let style = CellStyle::fg(BORDER_FG);
    let right = x + w - 1;
    let bottom = y + h - 1;
    for cx in x + 1..right {
        fb.put(cx, y, '─', style);
        fb.put(cx, bottom, '─', style);
    }
    for cy in y + 1..bottom {
        fb.put(x, cy, '│', style);
        fb.put(right, cy, '│', style);
    }
    fb.put(x, y, '┌', style);
    fb.put(right, y, '┐', style);
    fb.put(x, bottom, '└', style);
    fb.put(right, bottom, '┘', style);
}

fn center_text(fb: &mut FrameBuffer, x: u16, w: u16, y: u16, text: &str, style: CellStyle) {
    let len = text.chars().count() as u16;
    let start = x + w.saturating_sub(len) / 2;
    fb.put_str(start, y, text, style);
}
