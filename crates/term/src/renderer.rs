//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Only rows that differ from the previous frame are rewritten.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Attribute, Color, Colors, Print, ResetColor, SetAttribute, SetColors};
use crossterm::terminal::{
    self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::QueueableCommand;

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.last = None;
        self.buf.clear();
        self.buf
            .queue(EnterAlternateScreen)?
            .queue(Hide)?
            .queue(DisableLineWrap)?;
        self.flush_buf()
    }

    /// Undo [`enter`](Self::enter). Raw mode is disabled even if the flush fails.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(EnableLineWrap)?
            .queue(Show)?
            .queue(LeaveAlternateScreen)?;
        let flushed = self.flush_buf();
        terminal::disable_raw_mode()?;
        flushed
    }

    /// Force the next draw to repaint everything (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame_into(self.last.as_ref(), fb, &mut self.buf)?;
        self.flush_buf()?;

        match &mut self.last {
            Some(last) => last.clone_from(fb),
            None => self.last = Some(fb.clone()),
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        let mut out = self.stdout.lock();
        out.write_all(&self.buf)?;
        out.flush()?;
        Ok(())
    }
}

/// Encode the rows of `next` that differ from `prev` into `out`.
///
/// With no previous frame, or a size change, the screen is cleared and every
/// row is written.
pub fn encode_frame_into(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<()> {
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
    if prev.is_none() {
        out.queue(Clear(ClearType::All))?;
    }

    let mut current_style: Option<CellStyle> = None;
    for y in 0..next.height() {
        if prev.is_some_and(|p| p.row(y) == next.row(y)) {
            continue;
        }
        out.queue(MoveTo(0, y))?;
        for cell in next.row(y) {
            if current_style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current_style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    // Attribute reset also drops colors, so it goes first.
    out.queue(SetAttribute(Attribute::Reset))?
        .queue(SetColors(Colors::new(style.fg.into(), style.bg.into())))?;
    for (on, attr) in [(style.bold, Attribute::Bold), (style.dim, Attribute::Dim)] {
        if on {
            out.queue(SetAttribute(attr))?;
        }
    }
    Ok(())
}

impl From<Rgb> for Color {
    fn from(Rgb { r, g, b }: Rgb) -> Self {
        Color::Rgb { r, g, b }
    }
}
