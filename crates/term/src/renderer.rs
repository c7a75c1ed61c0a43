//! TerminalRenderer: flushes a [`Frame`] to a real terminal.
//!
//! Every draw rewrites the whole frame in place (cursor home, then each row
//! followed by clear-to-end-of-line) so there is no full-screen flash.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::game_view::{Frame, Glyph};
use crate::types::PieceKind;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        self.buf.clear();
        encode_full_into(frame, &mut self.buf)?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal color for a piece kind.
pub fn piece_color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color::Cyan,
        PieceKind::O => Color::Yellow,
        PieceKind::T => Color::Magenta,
        PieceKind::S => Color::Green,
        PieceKind::Z => Color::Red,
        PieceKind::J => Color::Blue,
        PieceKind::L => Color::DarkYellow,
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(frame: &Frame, out: &mut Vec<u8>) -> Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current: Option<(Option<PieceKind>, bool)> = None;
    for (y, row) in frame.iter().enumerate() {
        for glyph in row {
            let style = (glyph.color, glyph.dim);
            if current != Some(style) {
                apply_style_into(out, glyph)?;
                current = Some(style);
            }
            out.queue(Print(glyph.ch))?;
        }
        out.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
        if y + 1 < frame.len() {
            out.queue(Print("\r\n"))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(terminal::Clear(terminal::ClearType::FromCursorDown))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, glyph: &Glyph) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    match glyph.color {
        Some(kind) => out.queue(SetForegroundColor(piece_color(kind)))?,
        None => out.queue(ResetColor)?,
    };
    if glyph.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}
