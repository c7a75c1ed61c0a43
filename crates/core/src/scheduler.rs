//! Tick scheduler - gravity timing and pending intents
//!
//! Gravity accumulates elapsed milliseconds and releases one row step per
//! interval. The interval is `base_drop_ms / level`, or the fixed soft drop
//! interval while a soft drop is held.
//!
//! In deferred input mode, intents that arrive between ticks are folded into
//! [`PendingIntents`]: the latest horizontal direction wins, and rotation,
//! hold and hard drop are plain flags. Nothing accumulates past one tick.

use crate::config::SessionConfig;
use crate::scoring::drop_interval_ms;
use crate::types::Intent;

/// Gravity timer and soft drop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gravity {
    drop_timer_ms: u32,
    soft_drop: bool,
}

impl Gravity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn soft_drop(&self) -> bool {
        self.soft_drop
    }

    /// Turn soft drop on or off; a change restarts the timer.
    pub fn set_soft_drop(&mut self, on: bool) {
        if self.soft_drop != on {
            self.soft_drop = on;
            self.drop_timer_ms = 0;
        }
    }

    /// Current gravity interval for `level`.
    pub fn interval_ms(&self, config: &SessionConfig, level: u32) -> u32 {
        if self.soft_drop {
            config.soft_drop_ms.max(1)
        } else {
            drop_interval_ms(config.base_drop_ms, level)
        }
    }

    /// Add `elapsed_ms` and return how many row steps are due.
    pub fn advance(&mut self, elapsed_ms: u32, interval_ms: u32) -> u32 {
        let interval_ms = interval_ms.max(1);
        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        let steps = self.drop_timer_ms / interval_ms;
        self.drop_timer_ms %= interval_ms;
        steps
    }

    /// Start a fresh interval (after a spawn).
    pub fn restart(&mut self) {
        self.drop_timer_ms = 0;
    }

    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }
}

/// Movement intents waiting for the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingIntents {
    /// `-1` for left, `1` for right
    pub horizontal: Option<i16>,
    pub rotate: bool,
    pub hold: bool,
    pub hard_drop: bool,
}

impl PendingIntents {
    /// Fold an intent in; returns false for intents that are never deferred.
    pub fn record(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::MoveLeft => self.horizontal = Some(-1),
            Intent::MoveRight => self.horizontal = Some(1),
            Intent::RotateCw => self.rotate = true,
            Intent::Hold => self.hold = true,
            Intent::HardDrop => self.hard_drop = true,
            Intent::SoftDrop(_) | Intent::Pause | Intent::Restart => return false,
        }
        true
    }

    /// Take the pending set in application order: hold, horizontal move,
    /// rotation, hard drop.
    pub fn drain(&mut self) -> impl Iterator<Item = Intent> {
        let pending = std::mem::take(self);
        let horizontal = pending.horizontal.map(|dx| {
            if dx < 0 {
                Intent::MoveLeft
            } else {
                Intent::MoveRight
            }
        });
        [
            pending.hold.then_some(Intent::Hold),
            horizontal,
            pending.rotate.then_some(Intent::RotateCw),
            pending.hard_drop.then_some(Intent::HardDrop),
        ]
        .into_iter()
        .flatten()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
