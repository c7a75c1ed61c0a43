//! Scoring module - line clear points, level progression and gravity speed
//!
//! - A lock that clears `n` lines scores `LINE_SCORES[n] * level`, using the
//!   level in effect when the piece locked.
//! - `level = 1 + total_lines / lines_per_level`.
//! - Gravity at level `n` is `base_drop_ms / n`.

use tracing::info;

use crate::types::LINE_SCORES;

/// Base points for clearing `lines` at once (0 for anything outside 0..=4).
pub fn base_points(lines: u32) -> u32 {
    LINE_SCORES.get(lines as usize).copied().unwrap_or(0)
}

/// Points for a clear of `lines` at `level`.
pub fn line_score(lines: u32, level: u32) -> u32 {
    base_points(lines).saturating_mul(level)
}

/// Level reached after clearing `total_lines`.
pub fn level_for_lines(total_lines: u32, lines_per_level: u32) -> u32 {
    1 + total_lines / lines_per_level.max(1)
}

/// Gravity interval for a level, never below 1ms.
pub fn drop_interval_ms(base_drop_ms: u32, level: u32) -> u32 {
    (base_drop_ms / level.max(1)).max(1)
}

/// Running score, line total and level of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreKeeper {
    score: u32,
    lines: u32,
    level: u32,
    lines_per_level: u32,
}

impl ScoreKeeper {
    pub fn new(lines_per_level: u32) -> Self {
        Self {
            score: 0,
            lines: 0,
            level: 1,
            lines_per_level,
        }
    }

    /// Credit a lock that cleared `lines`; returns the points awarded.
    pub fn on_lines_cleared(&mut self, lines: u32) -> u32 {
        let points = line_score(lines, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(lines);

        let level = level_for_lines(self.lines, self.lines_per_level);
        if level != self.level {
            info!(from = self.level, to = level, lines = self.lines, "level up");
            self.level = level;
        }
        points
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }
}
