//! Uniform entry point shared by every subcommand.

use anyhow::Result;

pub mod about;

pub use about::AboutCommand;

/// A named, independently invocable unit of CLI functionality.
///
/// The dispatcher resolves a parsed subcommand to one of these and calls
/// [`BuildCliCommand::run`] exactly once.
pub trait BuildCliCommand {
    fn run(&self) -> Result<()>;
}
