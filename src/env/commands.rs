//! Command handling for `buildcli env`

use anyhow::Result;
use clap::{ArgGroup, Args, Subcommand};
use std::path::{Path, PathBuf};

use super::EnvVars;
use super::error::EnvError;
use super::file;
use super::interactive;
use super::manager::{RcFileManager, validate_key, validate_value};
use crate::commands::BuildCliCommand;
use crate::common::config::Config;
use crate::ui::prelude::*;

#[derive(Args, Debug, Clone)]
pub struct EnvCommand {
    #[command(subcommand)]
    pub command: EnvCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum EnvCommands {
    /// Export variables from the shell rc file to a JSON file
    Export(ExportArgs),
    /// Add variables from a JSON file to the shell rc file
    Import(ImportArgs),
    /// Add a single variable to the shell rc file
    Set {
        key: String,
        value: String,
        /// Replace an existing definition
        #[arg(long)]
        overwrite: bool,
    },
    /// Remove a variable from the shell rc file
    Unset { key: String },
    /// List variables exported by the shell rc file
    List,
    /// Guided import/export with prompts
    Interactive,
}

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("selection").required(true).args(["keys", "all"])))]
pub struct ExportArgs {
    /// Comma-separated variable names to export
    #[arg(short, long, value_delimiter = ',')]
    pub keys: Vec<String>,
    /// Export every variable
    #[arg(long)]
    pub all: bool,
    /// JSON file to write
    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// JSON file to read
    pub file: PathBuf,
    /// Replace variables that are already defined
    #[arg(long)]
    pub overwrite: bool,
    /// Only replace these already-defined variables (comma-separated); others are skipped
    #[arg(short, long, value_delimiter = ',', requires = "overwrite")]
    pub keys: Vec<String>,
}

/// How to treat variables that are already defined in the rc file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overwrite {
    Never,
    All,
    Only(Vec<String>),
}

impl Overwrite {
    fn from_flags(overwrite: bool, keys: Vec<String>) -> Self {
        match (overwrite, keys.is_empty()) {
            (false, _) => Overwrite::Never,
            (true, true) => Overwrite::All,
            (true, false) => Overwrite::Only(keys),
        }
    }
}

/// Outcome of applying a set of variables
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    pub added: Vec<String>,
    pub replaced: Vec<String>,
    pub skipped: Vec<String>,
}

impl BuildCliCommand for EnvCommand {
    fn run(&self) -> Result<()> {
        handle_env_command(&self.command)
    }
}

pub fn handle_env_command(command: &EnvCommands) -> Result<()> {
    let config = Config::load(None)?;
    let manager = RcFileManager::from_config(&config)?;
    emit(
        Level::Debug,
        "env.rc.resolved",
        &format!("Using shell rc file {}", manager.rc_file().display()),
        None,
    );

    match command {
        EnvCommands::Export(args) => {
            let keys = (!args.all).then_some(args.keys.as_slice());
            export_vars(&manager, keys, &args.output, config.env.json_indent)?;
        }
        EnvCommands::Import(args) => {
            let overwrite = Overwrite::from_flags(args.overwrite, args.keys.clone());
            let vars = file::import_from_file(&args.file)?;
            let report = apply_vars(&manager, &vars, &overwrite)?;
            print_report(&manager, &report);
        }
        EnvCommands::Set {
            key,
            value,
            overwrite,
        } => {
            let vars = EnvVars::from([(key.clone(), value.clone())]);
            let overwrite = Overwrite::from_flags(*overwrite, Vec::new());
            let report = apply_vars(&manager, &vars, &overwrite)?;
            print_report(&manager, &report);
        }
        EnvCommands::Unset { key } => unset_var(&manager, key)?,
        EnvCommands::List => list_vars(&manager)?,
        EnvCommands::Interactive => interactive::run(&manager, config.env.json_indent)?,
    }

    Ok(())
}

/// Write the selected variables to `output`. Returns how many were written;
/// nothing is written when none match.
pub fn export_vars(
    manager: &RcFileManager,
    keys: Option<&[String]>,
    output: &Path,
    indent: usize,
) -> Result<usize> {
    let vars = manager.read_exports(keys)?;
    if vars.is_empty() {
        emit(
            Level::Warn,
            "env.export.empty",
            "No matching environment variables found; nothing exported.",
            None,
        );
        return Ok(0);
    }

    file::export_to_file(&vars, output, indent)?;
    emit(
        Level::Success,
        "env.export.done",
        &format!(
            "Exported {} variable(s) to {}",
            vars.len(),
            output.display()
        ),
        Some(serde_json::json!({
            "file": output.display().to_string(),
            "keys": vars.keys().collect::<Vec<_>>(),
        })),
    );
    Ok(vars.len())
}

/// Append `vars` to the rc file. Conflicts with existing definitions are
/// resolved by `overwrite`; with [`Overwrite::Never`] any conflict aborts
/// before the file is touched.
pub fn apply_vars(
    manager: &RcFileManager,
    vars: &EnvVars,
    overwrite: &Overwrite,
) -> Result<ApplyReport> {
    for (key, value) in vars {
        validate_key(key)?;
        validate_value(key, value)?;
    }

    let existing = manager.existing_keys(vars.keys())?;
    let (replace, skipped): (Vec<String>, Vec<String>) = match overwrite {
        Overwrite::Never if !existing.is_empty() => {
            return Err(EnvError::AlreadyExists {
                path: manager.rc_file().to_path_buf(),
                keys: existing,
            }
            .into());
        }
        Overwrite::Never => (Vec::new(), Vec::new()),
        Overwrite::All => (existing, Vec::new()),
        Overwrite::Only(keys) => existing.into_iter().partition(|k| keys.contains(k)),
    };

    for key in &replace {
        manager.remove_variable(key)?;
    }

    let mut report = ApplyReport {
        replaced: replace,
        skipped,
        ..Default::default()
    };
    for (key, value) in vars {
        if report.skipped.contains(key) {
            continue;
        }
        manager.set_variable(key, value)?;
        if !report.replaced.contains(key) {
            report.added.push(key.clone());
        }
    }
    Ok(report)
}

fn print_report(manager: &RcFileManager, report: &ApplyReport) {
    let rc = manager.rc_file().display();
    for key in &report.added {
        emit(
            Level::Success,
            "env.set",
            &format!("Environment variable {} added to {}", key, rc),
            Some(serde_json::json!({ "key": key })),
        );
    }
    for key in &report.replaced {
        emit(
            Level::Success,
            "env.replaced",
            &format!("Environment variable {} replaced in {}", key, rc),
            Some(serde_json::json!({ "key": key })),
        );
    }
    for key in &report.skipped {
        emit(
            Level::Info,
            "env.skipped",
            &format!("Kept existing definition of {}", key),
            Some(serde_json::json!({ "key": key })),
        );
    }
}

fn unset_var(manager: &RcFileManager, key: &str) -> Result<()> {
    validate_key(key)?;
    if manager.contains(key)? {
        manager.remove_variable(key)?;
        emit(
            Level::Success,
            "env.unset",
            &format!(
                "Environment variable {} removed from {}",
                key,
                manager.rc_file().display()
            ),
            Some(serde_json::json!({ "key": key })),
        );
    } else {
        emit(
            Level::Info,
            "env.unset.missing",
            &format!(
                "Environment variable {} is not defined in {}",
                key,
                manager.rc_file().display()
            ),
            None,
        );
    }
    Ok(())
}

fn list_vars(manager: &RcFileManager) -> Result<()> {
    let vars = manager.read_exports(None)?;
    match get_output_format() {
        OutputFormat::Json => emit(
            Level::Info,
            "env.list",
            &format!("{} variable(s)", vars.len()),
            Some(serde_json::json!(vars)),
        ),
        OutputFormat::Text => {
            for (key, value) in &vars {
                println!("{}={}", key, value);
            }
        }
    }
    Ok(())
}
