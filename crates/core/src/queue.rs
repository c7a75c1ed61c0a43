//! Piece queue - next preview and the once-per-spawn hold slot.

use std::fmt;

use tracing::trace;

use crate::rng::PieceSource;
use crate::types::PieceKind;

/// Upcoming piece, held piece and the hold permission flag.
pub struct PieceQueue {
    source: Box<dyn PieceSource>,
    next: PieceKind,
    held: Option<PieceKind>,
    can_hold: bool,
}

impl PieceQueue {
    /// Create a queue, drawing the first preview from `source`.
    pub fn new(mut source: Box<dyn PieceSource>) -> Self {
        let next = source.next_kind();
        Self {
            source,
            next,
            held: None,
            can_hold: true,
        }
    }

    /// Peek at the upcoming piece without consuming it
    pub fn peek(&self) -> PieceKind {
        self.next
    }

    /// Take the upcoming piece and draw a new preview from the source.
    pub fn next(&mut self) -> PieceKind {
        std::mem::replace(&mut self.next, self.source.next_kind())
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    /// Put `active` into the hold slot and return the kind that becomes active.
    ///
    /// With an empty slot the replacement is the next queued piece; otherwise
    /// the previously held piece comes back. Returns `None` (and changes
    /// nothing) if a hold was already used since the last lock.
    pub fn hold(&mut self, active: PieceKind) -> Option<PieceKind> {
        if !self.can_hold {
            trace!(?active, "hold rejected: already used this spawn");
            return None;
        }
        let incoming = match self.held.replace(active) {
            Some(previous) => previous,
            None => self.next(),
        };
        self.can_hold = false;
        Some(incoming)
    }

    /// Re-arm the hold slot; called on every lock.
    pub fn rearm_hold(&mut self) {
        self.can_hold = true;
    }

    /// Empty the hold slot and refresh the preview from the source.
    pub fn reset(&mut self) {
        self.held = None;
        self.can_hold = true;
        self.next = self.source.next_kind();
    }
}

impl fmt::Debug for PieceQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PieceQueue")
            .field("next", &self.next)
            .field("held", &self.held)
            .field("can_hold", &self.can_hold)
            .finish_non_exhaustive()
    }
}
