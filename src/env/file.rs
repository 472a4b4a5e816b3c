//! Portable JSON files of environment variables.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

use super::EnvVars;
use super::error::EnvError;

/// Serialize `vars` as a JSON object indented by `indent` spaces.
pub fn to_json(vars: &EnvVars, indent: usize) -> Result<String> {
    let indent = vec![b' '; indent];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    vars.serialize(&mut ser)
        .context("serializing environment variables")?;
    let mut out = String::from_utf8(buf).context("encoding environment variables")?;
    out.push('\n');
    Ok(out)
}

pub fn export_to_file(vars: &EnvVars, path: &Path, indent: usize) -> Result<()> {
    let json = to_json(vars, indent)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

/// Parse a JSON object of variables. Numbers and booleans are accepted and
/// stored in their textual form; anything else is rejected.
pub fn from_json(contents: &str, origin: &Path) -> Result<EnvVars> {
    let value: Value = serde_json::from_str(contents)
        .with_context(|| format!("parsing JSON in {}", origin.display()))?;
    let Value::Object(map) = value else {
        return Err(EnvError::NotAnObject(origin.to_path_buf()).into());
    };

    let mut vars = EnvVars::new();
    for (key, value) in map {
        let text = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return Err(EnvError::InvalidValue(key).into()),
        };
        vars.insert(key, text);
    }
    Ok(vars)
}

pub fn import_from_file(path: &Path) -> Result<EnvVars> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    from_json(&contents, path)
}
