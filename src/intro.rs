//! Static informational text about BuildCLI.
//!
//! The banner is kept apart from command dispatch so it can be reworded
//! without touching any command code.

use std::io::{self, Write};

pub const ABOUT_TEXT: &str = r#"
 ____        _ _     _  ____ _     ___
| __ ) _   _(_) | __| |/ ___| |   |_ _|
|  _ \| | | | | |/ _` | |   | |    | |
| |_) | |_| | | | (_| | |___| |___ | |
|____/ \__,_|_|_|\__,_|\____|_____|___|

BuildCLI is a command-line tool that takes care of the repetitive chores
around a development project, so you can spend your time writing code.

What it does:
  - Gives every project task a short, memorable command
  - Keeps your environment variables portable: export them from your shell
    startup file to JSON and import them on another machine
  - Generates shell completions for bash, zsh and fish

Usage:
  buildcli <command> [options]
  buildcli --help            List all commands
  buildcli <command> --help  Show help for a single command

Examples:
  buildcli about
  buildcli env export --all --output env.json
  buildcli env import env.json
"#;

/// Render the full about banner, including the version line.
pub fn about_text() -> String {
    format!(
        "{}\nVersion: {}\n",
        ABOUT_TEXT.trim_start_matches('\n'),
        env!("CARGO_PKG_VERSION")
    )
}

/// Write the about banner to `out` in a single write.
pub fn write_about<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(about_text().as_bytes())?;
    out.flush()
}

/// Print the about banner to standard output.
pub fn about() -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_about(&mut handle)
}
