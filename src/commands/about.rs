use anyhow::Result;
use clap::Args;

use super::BuildCliCommand;
use crate::intro;

/// Prints the BuildCLI banner. Takes no arguments and reads no state.
#[derive(Args, Debug, Clone, Default)]
pub struct AboutCommand {}

impl BuildCliCommand for AboutCommand {
    fn run(&self) -> Result<()> {
        intro::about()?;
        Ok(())
    }
}
