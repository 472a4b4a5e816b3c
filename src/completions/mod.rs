use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use clap::{Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::commands::BuildCliCommand;
use crate::ui::prelude::*;

const BIN_NAME: &str = "buildcli";

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SupportedShell {
    Bash,
    Zsh,
    Fish,
}

impl SupportedShell {
    fn as_complete_shell(self) -> Shell {
        match self {
            SupportedShell::Bash => Shell::Bash,
            SupportedShell::Zsh => Shell::Zsh,
            SupportedShell::Fish => Shell::Fish,
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            SupportedShell::Bash => "buildcli.bash",
            SupportedShell::Zsh => "_buildcli",
            SupportedShell::Fish => "buildcli.fish",
        }
    }

    fn install_instructions(self, install_path: &Path) -> String {
        match self {
            SupportedShell::Bash => format!(
                "Add this to your ~/.bashrc:\n  [ -r \"{}\" ] && source \"{}\"",
                install_path.display(),
                install_path.display()
            ),
            SupportedShell::Zsh => format!(
                "Add this directory to your ~/.zshrc:\n  fpath=(\"{}\" $fpath)\nThen reload your shell or run: autoload -U compinit && compinit",
                install_path
                    .parent()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| install_path.to_string_lossy().into())
            ),
            SupportedShell::Fish => format!(
                "Copy or link it into ~/.config/fish/completions/:\n  ln -s \"{}\" ~/.config/fish/completions/",
                install_path.display()
            ),
        }
    }
}

impl fmt::Display for SupportedShell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupportedShell::Bash => write!(f, "bash"),
            SupportedShell::Zsh => write!(f, "zsh"),
            SupportedShell::Fish => write!(f, "fish"),
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum CompletionCommands {
    /// Print the completion script to stdout
    Generate {
        #[arg(value_enum)]
        shell: SupportedShell,
    },
    /// Write the completion script to the BuildCLI data directory
    Install {
        #[arg(value_enum)]
        shell: SupportedShell,
        /// Write to this path instead
        #[arg(long)]
        path: Option<PathBuf>,
        /// Replace an existing script
        #[arg(long)]
        force: bool,
    },
}

impl BuildCliCommand for CompletionCommands {
    fn run(&self) -> Result<()> {
        match self {
            CompletionCommands::Generate { shell } => {
                print!("{}", generate(*shell)?);
            }
            CompletionCommands::Install { shell, path, force } => {
                let target = install(*shell, path.clone(), *force)?;
                emit(
                    Level::Success,
                    "completions.installed",
                    &format!("Installed {} completions to {}", shell, target.display()),
                    Some(serde_json::json!({ "path": target.display().to_string() })),
                );
                emit(
                    Level::Info,
                    "completions.instructions",
                    &shell.install_instructions(&target),
                    None,
                );
            }
        }
        Ok(())
    }
}

pub fn generate(shell: SupportedShell) -> Result<String> {
    let mut command = crate::cli_command();
    let mut buffer = Vec::new();
    clap_complete::generate(shell.as_complete_shell(), &mut command, BIN_NAME, &mut buffer);
    String::from_utf8(buffer).context("rendering completions")
}

pub fn install(shell: SupportedShell, path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let default_dir = dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(BIN_NAME)
        .join("completions");
    let target_path = path.unwrap_or_else(|| default_dir.join(shell.file_name()));

    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating completions directory {}", parent.display()))?;
    }

    if target_path.exists() && !force {
        return Err(anyhow!(
            "{} already exists, pass --force to overwrite",
            target_path.display()
        ));
    }

    let script = generate(shell)?;
    fs::write(&target_path, script)
        .with_context(|| format!("writing completion script to {}", target_path.display()))?;

    Ok(target_path)
}
