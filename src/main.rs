//! kagrender - Command-line tool for rendering blueprint maps

use std::process::ExitCode;

use kagrender::cli;

fn main() -> ExitCode {
    cli::run()
}
