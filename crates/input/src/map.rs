//! Key mapping from terminal events to intents.

use crate::types::{Intent, SOFT_DROP_GRACE_MS};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

fn is_down(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S')
    )
}

/// Map keyboard input to intents.
///
/// Down starts a soft drop on press/repeat and ends it on release. Other keys
/// fire on press; horizontal movement also fires on terminal auto-repeat.
pub fn handle_key_event(key: KeyEvent) -> Option<Intent> {
    if is_down(key.code) {
        return match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => Some(Intent::SoftDrop(true)),
            KeyEventKind::Release => Some(Intent::SoftDrop(false)),
        };
    }

    let intent = match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Intent::MoveLeft
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Intent::MoveRight
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Intent::RotateCw,

        // Actions
        KeyCode::Char(' ') => Intent::HardDrop,
        KeyCode::Char('c') | KeyCode::Char('C') => Intent::Hold,
        KeyCode::Char('p') | KeyCode::Char('P') => Intent::Pause,

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Intent::Restart,

        _ => return None,
    };

    match (key.kind, intent) {
        (KeyEventKind::Press, _) => Some(intent),
        (KeyEventKind::Repeat, Intent::MoveLeft | Intent::MoveRight) => Some(intent),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Soft drop timeout for terminals without key-release events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SoftDropLatch {
    remaining_ms: u32,
}

impl SoftDropLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a Down press/repeat.
    pub fn press(&mut self) {
        self.remaining_ms = SOFT_DROP_GRACE_MS;
    }

    /// Record an explicit release.
    pub fn release(&mut self) {
        self.remaining_ms = 0;
    }

    pub fn is_held(&self) -> bool {
        self.remaining_ms > 0
    }

    /// Advance time; yields `SoftDrop(false)` once when the latch expires.
    pub fn update(&mut self, elapsed_ms: u32) -> Option<Intent> {
        if self.remaining_ms == 0 {
            return None;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        (self.remaining_ms == 0).then_some(Intent::SoftDrop(false))
    }
}
