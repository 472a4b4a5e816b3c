mod commands;
mod common;
mod completions;
mod env;
mod intro;
mod ui;

use clap::{CommandFactory, Parser, Subcommand};

use crate::commands::{AboutCommand, BuildCliCommand};
use crate::completions::CompletionCommands;
use crate::env::EnvCommand;
use crate::ui::prelude::*;

/// BuildCLI main parser
#[derive(Parser, Debug)]
#[command(name = "buildcli", author, version, about, long_about = None)]
pub struct Cli {
    /// Activate debug mode
    #[arg(short, long, global = true)]
    debug: bool,

    /// Format for status messages
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Displays information about BuildCLI, including its purpose and usage
    #[command(short_flag = 'a')]
    About(AboutCommand),

    /// Import and export environment variables
    Env(EnvCommand),

    /// Shell completion scripts
    Completions {
        #[command(subcommand)]
        command: CompletionCommands,
    },
}

impl Commands {
    fn into_command(self) -> Box<dyn BuildCliCommand> {
        match self {
            Commands::About(cmd) => Box::new(cmd),
            Commands::Env(cmd) => Box::new(cmd),
            Commands::Completions { command } => Box::new(command),
        }
    }
}

pub fn cli_command() -> clap::Command {
    Cli::command()
}

fn main() {
    let cli = Cli::parse();

    // Per-stream terminal checks happen when each event is emitted
    let color = !cli.no_color && std::env::var_os("NO_COLOR").is_none();
    ui::init(cli.format, color);
    ui::set_debug_mode(cli.debug);

    let Some(command) = cli.command else {
        println!("buildcli: run with --help for usage");
        return;
    };

    if let Err(e) = command.into_command().run() {
        emit(Level::Error, "cli.error", &format!("Error: {e:#}"), None);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_about_resolves_by_name_and_alias() {
        for args in [["buildcli", "about"], ["buildcli", "-a"]] {
            let cli = Cli::try_parse_from(args).unwrap();
            assert!(matches!(cli.command, Some(Commands::About(_))));
        }
    }

    #[test]
    fn test_about_rejects_extra_arguments() {
        let err = Cli::try_parse_from(["buildcli", "about", "extra"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert!(Cli::try_parse_from(["buildcli", "-a", "extra"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["buildcli", "about", "--debug", "--format", "json"]).unwrap();
        assert!(cli.debug);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_env_export_requires_selection() {
        let err = Cli::try_parse_from(["buildcli", "env", "export", "-o", "out.json"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert!(
            Cli::try_parse_from(["buildcli", "env", "export", "--keys", "A,B", "-o", "x.json"])
                .is_ok()
        );
    }

    #[test]
    fn test_env_import_keys_require_overwrite() {
        assert!(Cli::try_parse_from(["buildcli", "env", "import", "f.json", "--keys", "A"]).is_err());
        assert!(
            Cli::try_parse_from(["buildcli", "env", "import", "f.json", "--overwrite", "--keys", "A"])
                .is_ok()
        );
    }
}
