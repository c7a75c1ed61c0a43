//! GameView: maps a core [`Snapshot`] into rows of glyphs.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{PieceKind, Snapshot};

/// One terminal cell: a character and an optional piece color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub color: Option<PieceKind>,
    /// Drawn dimmed (ghost piece)
    pub dim: bool,
}

impl Glyph {
    fn plain(ch: char) -> Self {
        Self {
            ch,
            color: None,
            dim: false,
        }
    }
}

pub type Frame = Vec<Vec<Glyph>>;

/// A lightweight text layout for the board plus a side panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2 columns per cell helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Render the snapshot: a bordered board on the left, stats on the right.
    pub fn render(&self, snap: &Snapshot) -> Frame {
        let mut frame = Frame::with_capacity(snap.rows as usize + 2);
        let inner_w = snap.cols as usize * self.cell_w as usize;

        frame.push(border_row(inner_w));
        for y in 0..snap.rows as usize {
            let mut row = vec![Glyph::plain('|')];
            for x in 0..snap.cols as usize {
                let glyph = self.board_glyph(snap, x, y);
                row.extend(std::iter::repeat(glyph).take(self.cell_w as usize));
            }
            row.push(Glyph::plain('|'));
            frame.push(row);
        }
        frame.push(border_row(inner_w));

        for (i, line) in side_panel(snap).into_iter().enumerate() {
            if let Some(row) = frame.get_mut(i + 1) {
                row.push(Glyph::plain(' '));
                row.extend(line);
            }
        }
        frame
    }

    fn board_glyph(&self, snap: &Snapshot, x: usize, y: usize) -> Glyph {
        let (xi, yi) = (x as i16, y as i16);
        if snap.is_active_cell(xi, yi) {
            return Glyph {
                ch: '█',
                color: snap.active_kind,
                dim: false,
            };
        }
        if let Some(kind) = PieceKind::from_color_id(snap.locked_at(x, y)) {
            return Glyph {
                ch: '█',
                color: Some(kind),
                dim: false,
            };
        }
        if snap.is_ghost_cell(xi, yi) {
            return Glyph {
                ch: '░',
                color: snap.active_kind,
                dim: true,
            };
        }
        Glyph::plain(' ')
    }
}

fn border_row(inner_w: usize) -> Vec<Glyph> {
    let mut row = vec![Glyph::plain('+')];
    row.extend(std::iter::repeat(Glyph::plain('-')).take(inner_w));
    row.push(Glyph::plain('+'));
    row
}

fn text(s: &str) -> Vec<Glyph> {
    s.chars().map(Glyph::plain).collect()
}

fn shape_lines(shape: &[Vec<u8>]) -> Vec<Vec<Glyph>> {
    shape
        .iter()
        .map(|row| {
            row.iter()
                .flat_map(|&id| {
                    let glyph = match PieceKind::from_color_id(id) {
                        Some(kind) => Glyph {
                            ch: '█',
                            color: Some(kind),
                            dim: false,
                        },
                        None => Glyph::plain(' '),
                    };
                    [glyph, glyph]
                })
                .collect()
        })
        .collect()
}

fn side_panel(snap: &Snapshot) -> Vec<Vec<Glyph>> {
    let mut lines = vec![
        text(&format!("SCORE {}", snap.score)),
        text(&format!("LEVEL {}", snap.level)),
        text(&format!("LINES {}", snap.lines)),
        Vec::new(),
        text("NEXT"),
    ];
    lines.extend(shape_lines(&snap.next_shape));
    lines.push(Vec::new());
    lines.push(text(if snap.can_hold { "HOLD" } else { "HOLD (used)" }));
    if let Some(held) = &snap.held_shape {
        lines.extend(shape_lines(held));
    }
    lines.push(Vec::new());
    if !snap.playable() {
        lines.push(text(if snap.game_over {
            "GAME OVER - r to restart"
        } else {
            "PAUSED"
        }));
    }
    lines
}

/// Frame as plain text, one line per row (for tests and logs).
pub fn frame_to_string(frame: &Frame) -> String {
    frame
        .iter()
        .map(|row| row.iter().map(|g| g.ch).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
