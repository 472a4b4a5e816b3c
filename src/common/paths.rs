//! Centralized path management for BuildCLI

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Directory holding BuildCLI's own configuration. Not created on lookup.
pub fn buildcli_config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Unable to determine user config directory")?
        .join("buildcli"))
}

/// Location of the optional `config.toml`
pub fn config_file_path() -> Result<PathBuf> {
    Ok(buildcli_config_dir()?.join("config.toml"))
}

pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Unable to determine home directory")
}

/// Expand a leading `~` in a user-supplied path. `$VAR` references are left as-is.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}
