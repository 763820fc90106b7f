//! Iconbake - Command-line tool for rendering item and block icons

use std::process::ExitCode;

use iconbake::cli;

fn main() -> ExitCode {
    cli::run()
}
