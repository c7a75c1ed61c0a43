//! Game state module - a complete game session
//!
//! This module ties together all core components: board, pieces, queue,
//! scoring and gravity. It owns the lock/clear lifecycle:
//!
//! ```text
//! Active --(downward move fails / hard drop)--> Locked
//!        --> line clear evaluation (synchronous)
//!        --> Respawned (Active) | GameOver (spawn position blocked)
//! ```
//!
//! `GameOver` is terminal: only [`Intent::Restart`] (or [`Session::reset`])
//! changes the session afterwards. Illegal moves are rejected by returning
//! `false`; nothing here fails.

use tracing::{debug, info};

use crate::board::Board;
use crate::collision::is_valid;
use crate::config::{InputMode, SessionConfig};
use crate::ghost;
use crate::piece::{Piece, Shape};
use crate::queue::PieceQueue;
use crate::rng::PieceSource;
use crate::scheduler::{Gravity, PendingIntents};
use crate::scoring::ScoreKeeper;
use crate::snapshot::{LockReport, Snapshot, TickResult};
use crate::types::{Intent, PieceKind};

/// Externally visible lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A piece is falling and accepts intents
    Active,
    /// Gravity and movement are suspended
    Paused,
    /// Terminal until reset
    GameOver,
}

/// Complete game state
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    board: Board,
    active: Option<Piece>,
    queue: PieceQueue,
    scoring: ScoreKeeper,
    gravity: Gravity,
    pending: PendingIntents,
    /// Lock results not yet returned from `tick`
    unreported: TickResult,
    phase: Phase,
    pieces_locked: u32,
}

impl Session {
    /// New session on an empty board, pieces from `source`.
    pub fn new(config: SessionConfig, source: Box<dyn PieceSource>) -> Self {
        let board = Board::new(config.cols, config.rows);
        Self::with_board(config, source, board)
    }

    /// New session using the configured randomizer and seed.
    pub fn from_config(config: SessionConfig) -> Self {
        let source = config.piece_source();
        Self::new(config, source)
    }

    /// New session on a pre-filled board; the board's dimensions win over
    /// the config's.
    pub fn with_board(mut config: SessionConfig, source: Box<dyn PieceSource>, board: Board) -> Self {
        config.cols = board.cols();
        config.rows = board.rows();
        let mut session = Self {
            scoring: ScoreKeeper::new(config.lines_per_level),
            config,
            board,
            active: None,
            queue: PieceQueue::new(source),
            gravity: Gravity::new(),
            pending: PendingIntents::default(),
            unreported: TickResult::default(),
            phase: Phase::Active,
            pieces_locked: 0,
        };
        let first = session.queue.next();
        session.spawn(first);
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn level(&self) -> u32 {
        self.scoring.level()
    }

    pub fn lines(&self) -> u32 {
        self.scoring.lines()
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.queue.held()
    }

    pub fn next_kind(&self) -> PieceKind {
        self.queue.peek()
    }

    pub fn can_hold(&self) -> bool {
        self.queue.can_hold()
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn soft_drop(&self) -> bool {
        self.gravity.soft_drop()
    }

    /// Gravity interval currently in force
    pub fn drop_interval_ms(&self) -> u32 {
        self.gravity.interval_ms(&self.config, self.scoring.level())
    }

    /// Landing position of the active piece
    pub fn ghost(&self) -> Option<Piece> {
        self.active.map(|piece| ghost::project(&self.board, &piece))
    }

    /// Apply a player intent.
    ///
    /// Returns whether the intent was accepted. In deferred input mode
    /// movement intents are only recorded here and run on the next tick.
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        match (self.phase, intent) {
            (_, Intent::Restart) => {
                self.reset();
                true
            }
            (Phase::GameOver, _) => false,
            (Phase::Active, Intent::Pause) => {
                self.phase = Phase::Paused;
                self.gravity.set_soft_drop(false);
                self.pending = PendingIntents::default();
                true
            }
            (Phase::Paused, Intent::Pause) => {
                self.phase = Phase::Active;
                true
            }
            (Phase::Paused, _) => false,
            (Phase::Active, Intent::SoftDrop(on)) => {
                self.gravity.set_soft_drop(on);
                true
            }
            (Phase::Active, _) if self.config.input_mode == InputMode::Deferred => {
                self.pending.record(intent)
            }
            (Phase::Active, _) => self.perform(intent),
        }
    }

    fn perform(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::MoveLeft => self.attempt_move(-1, 0),
            Intent::MoveRight => self.attempt_move(1, 0),
            Intent::RotateCw => self.attempt_rotate(),
            Intent::HardDrop => self.hard_drop().is_some(),
            Intent::Hold => self.hold(),
            Intent::SoftDrop(on) => {
                self.gravity.set_soft_drop(on);
                true
            }
            Intent::Pause | Intent::Restart => false,
        }
    }

    /// Translate the active piece if the result is legal.
    pub fn attempt_move(&mut self, dx: i16, dy: i16) -> bool {
        self.commit_if_valid(|piece| piece.translated(dx, dy))
    }

    /// Rotate the active piece clockwise if the result is legal (no kicks).
    pub fn attempt_rotate(&mut self) -> bool {
        self.commit_if_valid(|piece| piece.rotated())
    }

    fn commit_if_valid(&mut self, candidate: impl FnOnce(&Piece) -> Piece) -> bool {
        if self.phase != Phase::Active {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        let moved = candidate(&active);
        if !is_valid(&self.board, &moved) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    /// Move down one row; locks the piece when it cannot.
    ///
    /// Returns true if the piece moved.
    pub fn soft_drop_step(&mut self) -> bool {
        if self.attempt_move(0, 1) {
            return true;
        }
        self.lock();
        false
    }

    /// Drop the active piece to its landing row and lock it.
    pub fn hard_drop(&mut self) -> Option<LockReport> {
        if self.phase != Phase::Active {
            return None;
        }
        let active = self.active?;
        self.active = Some(ghost::project(&self.board, &active));
        self.lock()
    }

    /// Lock the active piece, clear lines, score, and respawn.
    pub fn lock(&mut self) -> Option<LockReport> {
        if self.phase != Phase::Active {
            return None;
        }
        let piece = self.active.take()?;

        if !self.board.lock_piece(&piece) {
            debug!(kind = ?piece.kind, y = piece.y, "cells above the top edge were dropped");
        }
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let lines_cleared = self.board.clear_lines();
        let points = self.scoring.on_lines_cleared(lines_cleared as u32);
        debug!(
            kind = ?piece.kind,
            x = piece.x,
            y = piece.y,
            lines_cleared,
            points,
            "piece locked"
        );

        self.queue.rearm_hold();
        let next = self.queue.next();
        let respawned = self.spawn(next);

        self.unreported.locked = true;
        self.unreported.lines_cleared = self.unreported.lines_cleared.saturating_add(lines_cleared);

        Some(LockReport {
            lines_cleared,
            points,
            game_over: !respawned,
        })
    }

    /// Swap the active piece with the hold slot (once per spawn).
    pub fn hold(&mut self) -> bool {
        if self.phase != Phase::Active {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        let Some(incoming) = self.queue.hold(active.kind) else {
            return false;
        };
        self.spawn(incoming);
        true
    }

    /// Place `kind` at its spawn origin, or end the game if it collides.
    fn spawn(&mut self, kind: PieceKind) -> bool {
        let piece = Piece::spawn(kind, self.board.cols());
        self.gravity.restart();
        if is_valid(&self.board, &piece) {
            self.active = Some(piece);
            return true;
        }
        info!(
            ?kind,
            score = self.scoring.score(),
            lines = self.scoring.lines(),
            pieces = self.pieces_locked,
            "spawn blocked, game over"
        );
        self.active = None;
        self.phase = Phase::GameOver;
        self.pending = PendingIntents::default();
        false
    }

    /// Advance time: run deferred intents, then gravity.
    pub fn tick(&mut self, elapsed_ms: u32) -> TickResult {
        if self.phase == Phase::Active {
            for intent in self.pending.drain() {
                if self.phase != Phase::Active {
                    break;
                }
                self.perform(intent);
            }
        }

        if self.phase == Phase::Active {
            let interval = self.drop_interval_ms();
            let steps = self.gravity.advance(elapsed_ms, interval);
            // A piece can fall at most `rows` times before it must lock.
            for _ in 0..steps.min(self.board.rows() as u32 + 1) {
                if !self.soft_drop_step() {
                    break;
                }
            }
        }

        let mut result = std::mem::take(&mut self.unreported);
        result.game_over = self.is_game_over();
        result
    }

    /// Start over on an empty board, keeping the config and piece source.
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.queue.reset();
        self.scoring = ScoreKeeper::new(self.config.lines_per_level);
        self.gravity = Gravity::new();
        self.pending = PendingIntents::default();
        self.unreported = TickResult::default();
        self.phase = Phase::Active;
        self.pieces_locked = 0;
        let first = self.queue.next();
        self.spawn(first);
        info!("session reset");
    }

    /// Read-only view for renderers.
    pub fn snapshot(&self) -> Snapshot {
        let next_kind = self.queue.peek();
        let held_kind = self.queue.held();
        Snapshot {
            cols: self.board.cols(),
            rows: self.board.rows(),
            grid: self.board.to_color_rows(),
            active_kind: self.active.map(|piece| piece.kind),
            active_cells: self
                .active
                .map(|piece| piece.cells().to_vec())
                .unwrap_or_default(),
            ghost_cells: self
                .ghost()
                .map(|piece| piece.cells().to_vec())
                .unwrap_or_default(),
            next_kind,
            next_shape: Shape::of(next_kind).to_rows(),
            held_kind,
            held_shape: held_kind.map(|kind| Shape::of(kind).to_rows()),
            can_hold: self.queue.can_hold(),
            score: self.scoring.score(),
            level: self.scoring.level(),
            lines: self.scoring.lines(),
            paused: self.is_paused(),
            game_over: self.is_game_over(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceSource;

    fn session(letters: &str) -> Session {
        Session::new(
            SessionConfig::default(),
            Box::new(SequenceSource::from_letters(letters)),
        )
    }

    #[test]
    fn test_new_session_spawns_first_piece() {
        let s = session("TO");
        let active = s.active().unwrap();
        assert_eq!(active.kind, PieceKind::T);
        assert_eq!((active.x, active.y), (3, 0));
        assert_eq!(s.next_kind(), PieceKind::O);
        assert_eq!(s.phase(), Phase::Active);
        assert_eq!((s.score(), s.level(), s.lines()), (0, 1, 0));
    }

    #[test]
    fn test_moves_stop_at_walls() {
        let mut s = session("O");
        let mut steps = 0;
        while s.attempt_move(-1, 0) {
            steps += 1;
        }
        assert_eq!(steps, 4);
        assert_eq!(s.active().unwrap().x, 0);
        assert!(!s.attempt_move(-1, 0));
    }

    #[test]
    fn test_move_and_rotate_never_touch_grid() {
        let mut s = session("L");
        s.attempt_move(1, 0);
        s.attempt_rotate();
        s.attempt_move(0, 1);
        assert_eq!(s.board().filled_count(), 0);
    }

    #[test]
    fn test_rotation_rejected_at_floor() {
        let mut s = session("I");
        s.hard_drop();
        // New I sits on row 0; drop it onto the previous one then try to stand it up.
        let piece = s.active().unwrap();
        s.commit_if_valid(|_| piece.translated(0, 18));
        let before = s.active();
        assert!(!s.attempt_rotate());
        assert_eq!(s.active(), before);
    }

    #[test]
    fn test_soft_drop_step_locks_on_floor() {
        let mut s = session("OT");
        for _ in 0..18 {
            assert!(s.soft_drop_step());
        }
        assert!(!s.soft_drop_step());
        assert_eq!(s.pieces_locked(), 1);
        assert_eq!(s.board().filled_count(), 4);
        assert_eq!(s.active().unwrap().kind, PieceKind::T);
    }

    #[test]
    fn test_gravity_follows_interval() {
        let mut s = session("T");
        s.tick(999);
        assert_eq!(s.active().unwrap().y, 0);
        s.tick(1);
        assert_eq!(s.active().unwrap().y, 1);

        s.apply_intent(Intent::SoftDrop(true));
        s.tick(150);
        assert_eq!(s.active().unwrap().y, 4);
    }

    #[test]
    fn test_pause_suspends_gravity_and_moves() {
        let mut s = session("T");
        assert!(s.apply_intent(Intent::Pause));
        assert!(s.is_paused());
        assert!(!s.apply_intent(Intent::MoveLeft));
        s.tick(5000);
        assert_eq!(s.active().unwrap().y, 0);
        assert!(s.apply_intent(Intent::Pause));
        s.tick(1000);
        assert_eq!(s.active().unwrap().y, 1);
    }

    #[test]
    fn test_deferred_mode_applies_on_tick() {
        let config = SessionConfig::default().with_input_mode(InputMode::Deferred);
        let mut s = Session::new(config, Box::new(SequenceSource::from_letters("T")));
        assert!(s.apply_intent(Intent::MoveLeft));
        assert!(s.apply_intent(Intent::MoveLeft));
        assert!(s.apply_intent(Intent::MoveRight));
        assert_eq!(s.active().unwrap().x, 3);

        s.tick(0);
        assert_eq!(s.active().unwrap().x, 4);
    }

    #[test]
    fn test_pause_discards_deferred_intents() {
        let config = SessionConfig::default().with_input_mode(InputMode::Deferred);
        let mut s = Session::new(config, Box::new(SequenceSource::from_letters("T")));
        assert!(s.apply_intent(Intent::MoveLeft));
        assert!(s.apply_intent(Intent::Pause));
        s.tick(16);
        assert!(s.apply_intent(Intent::Pause));
        s.tick(0);
        assert_eq!(s.active().unwrap().x, 3);
        assert!(s.pending.is_empty());
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut s = session("I");
        s.hold();
        s.hard_drop();
        assert!(s.apply_intent(Intent::Restart));
        assert_eq!(s.board().filled_count(), 0);
        assert_eq!(s.held(), None);
        assert!(s.can_hold());
        assert_eq!(s.pieces_locked(), 0);
        assert_eq!(s.tick(0), TickResult::default());
    }
}
