//! User configuration loaded from `config.toml`.
//!
//! The file is optional. A missing file yields the defaults and is never
//! created implicitly, so read-only commands leave the filesystem alone.
//!
//! ```toml
//! [env]
//! rc_file = "~/.bashrc"
//! json_indent = 4
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::paths;

fn default_json_indent() -> usize {
    4
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EnvConfig {
    /// Shell startup file to read and write instead of the detected one
    #[serde(default)]
    pub rc_file: Option<String>,
    /// Indentation used when exporting variables to JSON
    #[serde(default = "default_json_indent")]
    pub json_indent: usize,
}

impl Default for EnvConfig {
    fn default() -> Self {
        EnvConfig {
            rc_file: None,
            json_indent: default_json_indent(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub env: EnvConfig,
}

impl Config {
    /// Load the config from `path`, or from the default location when `None`.
    /// A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let cfg_path = match path {
            Some(p) => p.to_path_buf(),
            None => paths::config_file_path()?,
        };
        if !cfg_path.exists() {
            return Ok(Config::default());
        }
        let s = fs::read_to_string(&cfg_path)
            .with_context(|| format!("reading config {}", cfg_path.display()))?;
        Self::parse(&s).with_context(|| format!("parsing config {}", cfg_path.display()))
    }

    pub fn parse(s: &str) -> Result<Config> {
        toml::from_str(s).context("parsing config toml")
    }

    /// The rc file override with `~` expanded, if one is configured
    pub fn rc_file_override(&self) -> Option<PathBuf> {
        self.env
            .rc_file
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(paths::expand_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = Config::parse("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.env.json_indent, 4);
        assert!(cfg.rc_file_override().is_none());
    }

    #[test]
    fn test_parse_env_section() {
        let cfg = Config::parse("[env]\nrc_file = \"/tmp/custom_rc\"\njson_indent = 2\n").unwrap();
        assert_eq!(cfg.env.json_indent, 2);
        assert_eq!(cfg.rc_file_override(), Some(PathBuf::from("/tmp/custom_rc")));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(Config::parse("[env]\nrcfile = \"typo\"\n").is_err());
        assert!(Config::parse("[unknown]\n").is_err());
    }

    #[test]
    fn test_blank_rc_file_is_ignored() {
        let cfg = Config::parse("[env]\nrc_file = \"  \"\n").unwrap();
        assert!(cfg.rc_file_override().is_none());
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[env]\njson_indent = 8\n").unwrap();
        let cfg = Config::load(Some(&path)).unwrap();
        assert_eq!(cfg.env.json_indent, 8);
    }
}
