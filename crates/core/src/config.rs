//! Session configuration
//!
//! A [`SessionConfig`] is built once, validated, and handed to
//! [`Session::new`](crate::Session::new). Sessions keep their own copy, so
//! there is no shared mutable configuration between games.
//!
//! # Environment Variables
//!
//! [`SessionConfig::from_env`] overlays these on the defaults:
//!
//! - `BLOCKFALL_COLS`: board width (default 10)
//! - `BLOCKFALL_ROWS`: board height (default 20)
//! - `BLOCKFALL_SEED`: randomizer seed (default 1)
//! - `BLOCKFALL_RANDOMIZER`: `uniform` or `bag` (default `uniform`)
//! - `BLOCKFALL_INPUT_MODE`: `immediate` or `deferred` (default `immediate`)

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rng::{BagSource, PieceSource, UniformSource};
use crate::types::{
    BASE_DROP_MS, DEFAULT_COLS, DEFAULT_ROWS, LINES_PER_LEVEL, MAX_DIMENSION, MIN_DIMENSION,
    SOFT_DROP_MS,
};

/// How upcoming pieces are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Randomizer {
    /// Each piece is drawn uniformly from the 7 kinds.
    #[default]
    Uniform,
    /// Shuffled bags of 7, each kind once per bag.
    Bag,
}

impl Randomizer {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "uniform" => Some(Randomizer::Uniform),
            "bag" | "7bag" | "7-bag" => Some(Randomizer::Bag),
            _ => None,
        }
    }
}

/// When movement intents take effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Apply each intent as soon as it arrives.
    #[default]
    Immediate,
    /// Record intents as pending flags and apply them on the next tick.
    Deferred,
}

impl InputMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "immediate" => Some(InputMode::Immediate),
            "deferred" => Some(InputMode::Deferred),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board {axis} must be between {min} and {max}, got {value}")]
    Dimension {
        axis: &'static str,
        value: u8,
        min: u8,
        max: u8,
    },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error("{var}: cannot parse {value:?}")]
    InvalidValue { var: String, value: String },
    #[error("unknown randomizer {0:?} (expected \"uniform\" or \"bag\")")]
    UnknownRandomizer(String),
    #[error("unknown input mode {0:?} (expected \"immediate\" or \"deferred\")")]
    UnknownInputMode(String),
}

/// Immutable per-session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    pub cols: u8,
    pub rows: u8,
    /// Gravity interval at level 1
    pub base_drop_ms: u32,
    /// Gravity interval while soft drop is held
    pub soft_drop_ms: u32,
    pub lines_per_level: u32,
    pub randomizer: Randomizer,
    pub seed: u32,
    pub input_mode: InputMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            base_drop_ms: BASE_DROP_MS,
            soft_drop_ms: SOFT_DROP_MS,
            lines_per_level: LINES_PER_LEVEL,
            randomizer: Randomizer::default(),
            seed: 1,
            input_mode: InputMode::default(),
        }
    }
}

impl SessionConfig {
    /// Default settings on a `cols x rows` board.
    pub fn new(cols: u8, rows: u8) -> Result<Self, ConfigError> {
        Self {
            cols,
            rows,
            ..Self::default()
        }
        .validated()
    }

    /// Check ranges; returns the config unchanged when it is usable.
    pub fn validated(self) -> Result<Self, ConfigError> {
        for (axis, value) in [("cols", self.cols), ("rows", self.rows)] {
            if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
                return Err(ConfigError::Dimension {
                    axis,
                    value,
                    min: MIN_DIMENSION,
                    max: MAX_DIMENSION,
                });
            }
        }
        for (field, value) in [
            ("baseDropMs", self.base_drop_ms),
            ("softDropMs", self.soft_drop_ms),
            ("linesPerLevel", self.lines_per_level),
        ] {
            if value == 0 {
                return Err(ConfigError::Zero { field });
            }
        }
        Ok(self)
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_randomizer(mut self, randomizer: Randomizer) -> Self {
        self.randomizer = randomizer;
        self
    }

    pub fn with_input_mode(mut self, input_mode: InputMode) -> Self {
        self.input_mode = input_mode;
        self
    }

    /// Read `BLOCKFALL_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Like [`SessionConfig::from_env`] but with an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(v) = lookup("BLOCKFALL_COLS") {
            config.cols = parse_var("BLOCKFALL_COLS", &v)?;
        }
        if let Some(v) = lookup("BLOCKFALL_ROWS") {
            config.rows = parse_var("BLOCKFALL_ROWS", &v)?;
        }
        if let Some(v) = lookup("BLOCKFALL_SEED") {
            config.seed = parse_var("BLOCKFALL_SEED", &v)?;
        }
        if let Some(v) = lookup("BLOCKFALL_RANDOMIZER") {
            config.randomizer =
                Randomizer::from_str(&v).ok_or(ConfigError::UnknownRandomizer(v))?;
        }
        if let Some(v) = lookup("BLOCKFALL_INPUT_MODE") {
            config.input_mode =
                InputMode::from_str(&v).ok_or(ConfigError::UnknownInputMode(v))?;
        }

        config.validated()
    }

    /// Fresh piece source for the configured randomizer and seed.
    pub fn piece_source(&self) -> Box<dyn PieceSource> {
        match self.randomizer {
            Randomizer::Uniform => Box::new(UniformSource::new(self.seed)),
            Randomizer::Bag => Box::new(BagSource::new(self.seed)),
        }
    }
}

fn parse_var<T: std::str::FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var: var.to_string(),
        value: value.to_string(),
    })
}
