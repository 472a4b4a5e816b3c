//! Reading and editing `export KEY=VALUE` lines in a shell startup file.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::EnvVars;
use super::error::EnvError;
use crate::common::config::Config;
use crate::common::{paths, shell};
use crate::ui::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Other(String),
}

impl Platform {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "linux" => Platform::Linux,
            "macos" => Platform::MacOs,
            other => Platform::Other(other.to_string()),
        }
    }
}

/// Pick the rc file for `platform`. zsh users on macOS get `~/.zshrc`,
/// everyone else `~/.bashrc`.
pub fn resolve_rc_file(
    platform: &Platform,
    shell: Option<&str>,
    home: &Path,
) -> Result<PathBuf, EnvError> {
    match platform {
        Platform::MacOs if shell.is_some_and(|s| s.contains("zsh")) => Ok(home.join(".zshrc")),
        Platform::Linux | Platform::MacOs => Ok(home.join(".bashrc")),
        Platform::Other(name) => Err(EnvError::UnsupportedPlatform(name.clone())),
    }
}

pub fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn validate_key(key: &str) -> Result<(), EnvError> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(EnvError::InvalidKey(key.to_string()))
    }
}

/// Values must fit on a single `export` line. Tabs are allowed, other
/// control characters (including `\n` and `\r`) are not.
pub fn validate_value(key: &str, value: &str) -> Result<(), EnvError> {
    if value.chars().any(|c| c.is_control() && c != '\t') {
        Err(EnvError::ControlCharacter(key.to_string()))
    } else {
        Ok(())
    }
}

/// Parse one rc line of the form `export KEY=VALUE`.
/// Comments, other statements and malformed names yield `None`.
pub fn parse_export_line(line: &str) -> Option<(String, String)> {
    let rest = line.trim_start().strip_prefix("export")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let (name, value) = rest.trim_start().split_once('=')?;
    if !is_valid_key(name) {
        return None;
    }
    Some((name.to_string(), shell::unquote_value(value)))
}

fn defines_key(line: &str, key: &str) -> bool {
    parse_export_line(line).is_some_and(|(name, _)| name == key)
}

/// Environment variables persisted as `export` lines in a shell rc file.
#[derive(Debug, Clone)]
pub struct RcFileManager {
    rc_file: PathBuf,
}

impl RcFileManager {
    pub fn new(rc_file: impl Into<PathBuf>) -> Self {
        Self {
            rc_file: rc_file.into(),
        }
    }

    /// Build a manager for the configured rc file, or the one detected for
    /// this platform and `$SHELL`.
    pub fn from_config(config: &Config) -> Result<Self> {
        if let Some(path) = config.rc_file_override() {
            return Ok(Self::new(path));
        }
        let shell = std::env::var("SHELL").ok();
        let home = paths::home_dir()?;
        let rc_file = resolve_rc_file(&Platform::current(), shell.as_deref(), &home)?;
        Ok(Self::new(rc_file))
    }

    pub fn rc_file(&self) -> &Path {
        &self.rc_file
    }

    fn read_contents(&self) -> Result<Option<String>> {
        if !self.rc_file.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.rc_file)
            .with_context(|| format!("reading {}", self.rc_file.display()))?;
        Ok(Some(contents))
    }

    /// All exported variables, optionally restricted to `keys`.
    /// A later definition of the same key wins, as it would when sourced.
    pub fn read_exports(&self, keys: Option<&[String]>) -> Result<EnvVars> {
        let Some(contents) = self.read_contents()? else {
            emit(
                Level::Warn,
                "env.rc.missing",
                &format!("Shell rc file not found: {}", self.rc_file.display()),
                None,
            );
            return Ok(EnvVars::new());
        };

        let vars = contents
            .lines()
            .filter_map(parse_export_line)
            .filter(|(name, _)| keys.is_none_or(|keys| keys.contains(name)))
            .collect();
        Ok(vars)
    }

    pub fn contains(&self, key: &str) -> Result<bool> {
        Ok(self
            .read_contents()?
            .is_some_and(|contents| contents.lines().any(|line| defines_key(line, key))))
    }

    /// The subset of `keys` already exported by the rc file, in input order
    pub fn existing_keys<'a, I>(&self, keys: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let exported = self.read_exports_quiet()?;
        Ok(keys
            .into_iter()
            .filter(|k| exported.contains_key(*k))
            .cloned()
            .collect())
    }

    fn read_exports_quiet(&self) -> Result<EnvVars> {
        Ok(self
            .read_contents()?
            .map(|c| c.lines().filter_map(parse_export_line).collect())
            .unwrap_or_default())
    }

    /// Append `export KEY=VALUE`, creating the rc file if needed.
    pub fn set_variable(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        validate_value(key, value)?;
        let needs_newline = self
            .read_contents()?
            .is_some_and(|c| !c.is_empty() && !c.ends_with('\n'));

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.rc_file)
            .with_context(|| format!("opening {}", self.rc_file.display()))?;
        let line = format!(
            "{}export {}={}\n",
            if needs_newline { "\n" } else { "" },
            key,
            shell::quote_export_value(value)
        );
        file.write_all(line.as_bytes())
            .with_context(|| format!("writing {}", self.rc_file.display()))?;

        emit(
            Level::Debug,
            "env.rc.append",
            &format!("Appended {} to {}", key, self.rc_file.display()),
            None,
        );
        Ok(())
    }

    /// Drop every line exporting `key`. Returns whether anything was removed.
    pub fn remove_variable(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        let Some(contents) = self.read_contents()? else {
            return Ok(false);
        };

        let mut removed = false;
        let kept: String = contents
            .split_inclusive('\n')
            .filter(|line| {
                let hit = defines_key(line, key);
                removed |= hit;
                !hit
            })
            .collect();

        if removed {
            fs::write(&self.rc_file, kept)
                .with_context(|| format!("writing {}", self.rc_file.display()))?;
        }
        Ok(removed)
    }
}
