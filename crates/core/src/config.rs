//! Engine configuration
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `TETRIS_WIDTH` | 10 | Grid columns |
//! | `TETRIS_HEIGHT` | 20 | Grid rows |
//! | `TETRIS_TILE_SIZE` | 30 | Surface pixels per cell |
//! | `TETRIS_SEED` | unset | Fixed RNG seed (entropy when unset) |
//!
//! Empty values fall back to the default; anything else that does not parse
//! is an [`EngineError::InvalidConfig`].

use std::str::FromStr;

use log::warn;

use crate::types::{EngineError, DEFAULT_HEIGHT, DEFAULT_TILE_SIZE, DEFAULT_WIDTH};

pub const ENV_WIDTH: &str = "TETRIS_WIDTH";
pub const ENV_HEIGHT: &str = "TETRIS_HEIGHT";
pub const ENV_TILE_SIZE: &str = "TETRIS_TILE_SIZE";
pub const ENV_SEED: &str = "TETRIS_SEED";

/// Engine construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub width: u16,
    pub height: u16,
    pub tile_size: u32,
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tile_size: DEFAULT_TILE_SIZE,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Default dimensions with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup (environment, tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EngineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            width: parse_var(&lookup, ENV_WIDTH)?.unwrap_or(defaults.width),
            height: parse_var(&lookup, ENV_HEIGHT)?.unwrap_or(defaults.height),
            tile_size: parse_var(&lookup, ENV_TILE_SIZE)?.unwrap_or(defaults.tile_size),
            seed: parse_var(&lookup, ENV_SEED)?,
        })
    }

    /// Check the construction preconditions
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let fits = |cells: u16| u32::from(cells).checked_mul(self.tile_size).is_some();
        if self.tile_size == 0 || !fits(self.width) || !fits(self.height) {
            return Err(EngineError::InvalidTileSize(self.tile_size));
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, EngineError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => {
            warn!("rejecting {}={:?}", key, raw);
            Err(EngineError::InvalidConfig { key, value: raw })
        }
    }
}
