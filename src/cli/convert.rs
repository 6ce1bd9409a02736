//! Default conversion command implementation

use std::io::Write;
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, CliOverrides};
use crate::convert::{self, ConvertError, Outcome};

use super::{ConvertArgs, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute a conversion for the given input
pub fn run_convert(args: ConvertArgs) -> ExitCode {
    let Some(input) = args.input else {
        eprintln!("Usage: zxtex <INPUT> [--width N] [--output FILE] [--raw]");
        eprintln!("       zxtex palette [--json]");
        return ExitCode::from(EXIT_INVALID_ARGS);
    };

    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let overrides = CliOverrides {
        raw: args.raw.then_some(true),
        width: args.width.map(|w| w as usize),
        output: args.output,
        transparent_color: args.transparent_color,
        transparent_index: args.transparent_index,
        scale: args.scale,
    };
    merge_cli_overrides(&mut config, &overrides);

    let mut opts = config.to_convert_options();
    opts.output = overrides.output.clone();

    match convert::run(&input, &opts) {
        Ok(Outcome::Text { text, written_to: None }) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout.write_all(text.as_bytes()).and_then(|_| stdout.flush()) {
                eprintln!("Error: Failed to write to stdout: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(Outcome::Text { written_to: Some(path), .. }) => {
            println!("Text written to {}", path.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(Outcome::Image { path, width, height }) => {
            println!("Image saved as {} ({}x{})", path.display(), width, height);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            let code = match e {
                ConvertError::Configuration(_) => EXIT_INVALID_ARGS,
                _ => EXIT_ERROR,
            };
            ExitCode::from(code)
        }
    }
}
