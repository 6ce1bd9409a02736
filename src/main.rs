//! zxtex - Command-line tool for converting sprites between images and hex text

use std::process::ExitCode;

use zxtex::cli;

fn main() -> ExitCode {
    cli::run()
}
