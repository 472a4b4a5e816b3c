//! Prompt-driven import/export for `buildcli env interactive`

use anyhow::Result;
use dialoguer::{Confirm, Input, Select};
use std::path::PathBuf;

use super::EnvVars;
use super::commands::{ApplyReport, Overwrite, apply_vars, export_vars};
use super::file;
use super::manager::{RcFileManager, is_valid_key};
use crate::ui::prelude::*;

pub fn run(manager: &RcFileManager, indent: usize) -> Result<()> {
    emit(
        Level::Info,
        "env.interactive.start",
        "Welcome to the interactive environment variable manager!",
        None,
    );

    let choice = Select::new()
        .with_prompt("What do you want to do?")
        .items(&["Import variables into your shell", "Export variables to JSON"])
        .default(0)
        .interact()?;

    match choice {
        0 => import_flow(manager),
        _ => export_flow(manager, indent),
    }
}

fn import_flow(manager: &RcFileManager) -> Result<()> {
    let filename: String = Input::new()
        .with_prompt("JSON file to import (leave empty to type variables)")
        .allow_empty(true)
        .interact_text()?;

    let mut vars = EnvVars::new();
    if !filename.trim().is_empty() {
        match file::import_from_file(&PathBuf::from(filename.trim())) {
            Ok(v) => vars = v,
            Err(e) => emit(Level::Warn, "env.import.failed", &format!("{e:#}"), None),
        }
    }
    if vars.is_empty() {
        emit(
            Level::Info,
            "env.import.manual",
            "No variables imported. Enter them manually (empty name to finish).",
            None,
        );
        vars = prompt_variables()?;
    }
    if vars.is_empty() {
        emit(
            Level::Info,
            "env.import.none",
            "No environment variables provided.",
            None,
        );
        return Ok(());
    }

    for (key, value) in &vars {
        println!("  {}={}", key, value);
    }
    if !Confirm::new()
        .with_prompt(format!(
            "Set these variables in {}?",
            manager.rc_file().display()
        ))
        .default(true)
        .interact()?
    {
        emit(
            Level::Info,
            "env.import.cancelled",
            "Operation cancelled.",
            None,
        );
        return Ok(());
    }

    let existing = manager.existing_keys(vars.keys())?;
    let overwrite = if existing.is_empty() {
        Overwrite::Never
    } else {
        match choose_overwrite(&existing)? {
            Some(o) => o,
            None => {
                emit(
                    Level::Info,
                    "env.import.cancelled",
                    "No changes made.",
                    None,
                );
                return Ok(());
            }
        }
    };

    let report = apply_vars(manager, &vars, &overwrite)?;
    summarize(manager, &report);
    Ok(())
}

/// `None` means the user backed out and nothing should change
fn choose_overwrite(existing: &[String]) -> Result<Option<Overwrite>> {
    emit(
        Level::Warn,
        "env.import.conflict",
        &format!("Already defined: {}", existing.join(", ")),
        None,
    );
    if Confirm::new()
        .with_prompt("Overwrite all of them?")
        .default(false)
        .interact()?
    {
        return Ok(Some(Overwrite::All));
    }

    let answer: String = Input::new()
        .with_prompt("Variables to overwrite (comma-separated, 'all', or empty to cancel)")
        .allow_empty(true)
        .interact_text()?;
    Ok(parse_selection(&answer).map(|keys| match keys {
        None => Overwrite::All,
        Some(keys) => Overwrite::Only(keys),
    }))
}

fn export_flow(manager: &RcFileManager, indent: usize) -> Result<()> {
    let answer: String = Input::new()
        .with_prompt("Variables to export (comma-separated, 'all', or empty to cancel)")
        .allow_empty(true)
        .interact_text()?;
    let Some(selection) = parse_selection(&answer) else {
        emit(Level::Info, "env.export.cancelled", "No changes made.", None);
        return Ok(());
    };

    if manager.read_exports(selection.as_deref())?.is_empty() {
        emit(
            Level::Warn,
            "env.export.empty",
            "No matching environment variables found.",
            None,
        );
        return Ok(());
    }

    let filename: String = Input::new()
        .with_prompt("File to export to")
        .default("export.json".to_string())
        .interact_text()?;
    export_vars(manager, selection.as_deref(), &PathBuf::from(filename), indent)?;
    Ok(())
}

fn prompt_variables() -> Result<EnvVars> {
    let mut vars = EnvVars::new();
    loop {
        let key: String = Input::new()
            .with_prompt("Variable name")
            .allow_empty(true)
            .validate_with(|input: &String| -> Result<(), String> {
                if input.trim().is_empty() || is_valid_key(input.trim()) {
                    Ok(())
                } else {
                    Err("Use letters, digits and underscores, not starting with a digit".into())
                }
            })
            .interact_text()?;
        let key = key.trim().to_string();
        if key.is_empty() {
            break;
        }
        let value: String = Input::new()
            .with_prompt(format!("Value for '{}'", key))
            .allow_empty(true)
            .interact_text()?;
        vars.insert(key, value);
    }
    Ok(vars)
}

/// Parse a comma-separated key list typed at a prompt.
///
/// Empty input cancels (`None`), `all` selects everything (`Some(None)`),
/// otherwise the trimmed non-empty names are returned.
fn parse_selection(answer: &str) -> Option<Option<Vec<String>>> {
    let answer = answer.trim();
    if answer.is_empty() {
        return None;
    }
    if answer.eq_ignore_ascii_case("all") {
        return Some(None);
    }
    let keys: Vec<String> = answer
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect();
    if keys.is_empty() { None } else { Some(Some(keys)) }
}

fn summarize(manager: &RcFileManager, report: &ApplyReport) {
    let total = report.added.len() + report.replaced.len();
    emit(
        Level::Success,
        "env.import.done",
        &format!(
            "Wrote {} variable(s) to {} ({} new, {} replaced, {} kept)",
            total,
            manager.rc_file().display(),
            report.added.len(),
            report.replaced.len(),
            report.skipped.len()
        ),
        None,
    );
}
