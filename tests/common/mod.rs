use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated home and config directories for running the binary
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        fs::create_dir_all(temp_dir.path().join("home"))?;
        fs::create_dir_all(temp_dir.path().join("config"))?;
        Ok(Self { temp_dir })
    }

    /// Stand-in for `$HOME`
    pub fn home(&self) -> PathBuf {
        self.temp_dir.path().join("home")
    }

    /// Stand-in for `$XDG_CONFIG_HOME`
    pub fn config_home(&self) -> PathBuf {
        self.temp_dir.path().join("config")
    }

    /// Scratch space for JSON files and the like
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn bashrc(&self) -> PathBuf {
        self.home().join(".bashrc")
    }

    pub fn write_config(&self, contents: &str) -> Result<()> {
        let dir = self.config_home().join("buildcli");
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("config.toml"), contents)?;
        Ok(())
    }
}
