use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("Invalid environment variable name '{0}'")]
    InvalidKey(String),

    #[error("Unsupported value for '{0}': expected a string, number or boolean")]
    InvalidValue(String),

    #[error("Value for '{0}' contains a line break or control character, which an export line cannot hold")]
    ControlCharacter(String),

    #[error("Expected a JSON object of variables in {}", .0.display())]
    NotAnObject(PathBuf),

    #[error(
        "Variables already defined in {}: {} (use --overwrite to replace them)",
        .path.display(),
        .keys.join(", ")
    )]
    AlreadyExists { path: PathBuf, keys: Vec<String> },

    #[error("Unsupported operating system: {0}")]
    UnsupportedPlatform(String),
}
