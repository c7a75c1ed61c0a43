//! Headless Blockfall runner.
//!
//! Plays a script of line-delimited JSON steps against a session and prints
//! one JSON observation per tick step to stdout:
//!
//! ```text
//! {"intent":"moveLeft"}
//! {"intent":"hardDrop"}
//! {"tick":16}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped; unknown intents are
//! logged and ignored. Logs go to stderr (`RUST_LOG`, default
//! `blockfall=info`).

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use blockfall::core::{
    Randomizer, SequenceSource, Session, SessionConfig, Snapshot, TickResult,
};
use blockfall::types::Intent;

#[derive(Parser, Debug)]
#[command(name = "blockfall-headless", about = "Replay a scripted Blockfall session")]
struct Args {
    /// Script file of JSON steps, `-` for stdin
    script: PathBuf,

    /// Randomizer seed (overrides BLOCKFALL_SEED)
    #[arg(long)]
    seed: Option<u32>,

    /// Board width (overrides BLOCKFALL_COLS)
    #[arg(long)]
    cols: Option<u8>,

    /// Board height (overrides BLOCKFALL_ROWS)
    #[arg(long)]
    rows: Option<u8>,

    /// Use the 7-bag randomizer
    #[arg(long)]
    bag: bool,

    /// Fixed piece sequence such as "ITOSZJL", cycled
    #[arg(long, conflicts_with = "bag")]
    pieces: Option<String>,

    /// Only print the final observation
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Step {
    Intent { intent: String },
    Tick { tick: u32 },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Observation<'a> {
    step: usize,
    result: TickResult,
    snapshot: &'a Snapshot,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blockfall=info")),
        )
        .with_writer(io::stderr)
        .compact()
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;
    info!(?config, script = %args.script.display(), "starting headless session");

    let mut session = match &args.pieces {
        Some(letters) => Session::new(config, Box::new(SequenceSource::from_letters(letters))),
        None => Session::from_config(config),
    };

    let reader: Box<dyn BufRead> = if args.script.as_os_str() == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(&args.script)
            .with_context(|| format!("cannot open script {}", args.script.display()))?;
        Box::new(BufReader::new(file))
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut last = None;

    for (index, line) in reader.lines().enumerate() {
        let line = line.context("cannot read script")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step: Step = serde_json::from_str(line)
            .with_context(|| format!("line {}: not a step: {line}", index + 1))?;

        match step {
            Step::Intent { intent } => match Intent::from_str(&intent) {
                Some(intent) => {
                    session.apply_intent(intent);
                }
                None => warn!(line = index + 1, %intent, "unknown intent ignored"),
            },
            Step::Tick { tick } => {
                let result = session.tick(tick);
                let snapshot = session.snapshot();
                if !args.quiet {
                    write_observation(&mut out, index + 1, result, &snapshot)?;
                }
                last = Some((index + 1, result, snapshot));
            }
        }
    }

    if args.quiet {
        if let Some((step, result, snapshot)) = &last {
            write_observation(&mut out, *step, *result, snapshot)?;
        }
    }

    info!(
        score = session.score(),
        lines = session.lines(),
        level = session.level(),
        game_over = session.is_game_over(),
        "script finished"
    );
    Ok(())
}

fn build_config(args: &Args) -> Result<SessionConfig> {
    let mut config = SessionConfig::from_env().context("invalid BLOCKFALL_* configuration")?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(cols) = args.cols {
        config.cols = cols;
    }
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if args.bag {
        config.randomizer = Randomizer::Bag;
    }
    Ok(config.validated()?)
}

fn write_observation(
    out: &mut impl Write,
    step: usize,
    result: TickResult,
    snapshot: &Snapshot,
) -> Result<()> {
    let observation = Observation {
        step,
        result,
        snapshot,
    };
    serde_json::to_writer(&mut *out, &observation)?;
    writeln!(out)?;
    Ok(())
}
