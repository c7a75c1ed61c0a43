//! Terminal Blockfall runner (default binary).
//!
//! crossterm handles raw input and drawing; the engine runs on a fixed 16ms
//! tick. Configuration comes from `BLOCKFALL_*` environment variables, and
//! logs go to the file named by `BLOCKFALL_LOG_FILE` (the terminal itself is
//! busy with the game).

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use blockfall::core::{Session, SessionConfig};
use blockfall::input::{handle_key_event, should_quit, SoftDropLatch};
use blockfall::term::{GameView, TerminalRenderer};
use blockfall::types::{Intent, TICK_MS};

fn main() -> Result<()> {
    init_logging()?;
    let config = SessionConfig::from_env().context("invalid BLOCKFALL_* configuration")?;
    info!(?config, "starting terminal session");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("BLOCKFALL_LOG_FILE") else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("cannot create log file {path}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blockfall=info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: SessionConfig) -> Result<()> {
    let mut session = Session::from_config(config);
    let view = GameView::default();
    let mut soft_drop = SoftDropLatch::new();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        term.draw(&view.render(&session.snapshot()))?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && should_quit(key) {
                    info!(score = session.score(), lines = session.lines(), "quit");
                    return Ok(());
                }
                if let Some(intent) = handle_key_event(key) {
                    match intent {
                        Intent::SoftDrop(true) => soft_drop.press(),
                        Intent::SoftDrop(false) => soft_drop.release(),
                        _ => {}
                    }
                    session.apply_intent(intent);
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            if let Some(release) = soft_drop.update(TICK_MS) {
                session.apply_intent(release);
            }

            let result = session.tick(TICK_MS);
            if result.lines_cleared > 0 {
                debug!(
                    lines = result.lines_cleared,
                    score = session.score(),
                    level = session.level(),
                    "lines cleared"
                );
            }
        }
    }
}
