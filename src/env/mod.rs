//! Environment variable synchronisation between the shell rc file and JSON files
//!
//! Variables live as `export KEY=VALUE` lines in the user's shell startup file
//! (`~/.bashrc`, or `~/.zshrc` for zsh on macOS). They can be exported to a
//! portable JSON object and imported again on another machine.

use std::collections::BTreeMap;

pub mod commands;
pub mod error;
pub mod file;
mod interactive;
pub mod manager;

pub use commands::EnvCommand;

/// Variable name to value, ordered by name
pub type EnvVars = BTreeMap<String, String>;
