//! Console settings loaded from TOML.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "chess_console.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// `tracing` filter directive, used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// List destinations after `select`.
    pub show_hints: bool,
    /// Print the board after every applied move.
    pub show_board_after_move: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            show_hints: true,
            show_board_after_move: true,
        }
    }
}

impl ConsoleConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("failed to parse console config")
    }

    /// Load `explicit` if given (it must exist), otherwise the default file
    /// in the working directory if present, otherwise built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path: PathBuf = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }
}
