//! Palette command implementation

use std::process::ExitCode;

use crate::grid::Cell;
use crate::palette::{PALETTE_NAMES, ZX_PALETTE};

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Build the JSON listing of the palette.
fn palette_json() -> serde_json::Value {
    let entries: Vec<serde_json::Value> = ZX_PALETTE
        .iter()
        .zip(PALETTE_NAMES.iter())
        .enumerate()
        .map(|(i, (color, name))| {
            serde_json::json!({
                "index": i,
                "digit": Cell::Index(i as u8).to_char().to_string(),
                "color": color.to_hex(),
                "name": name,
            })
        })
        .collect();
    serde_json::json!({ "palette": entries, "transparent": "." })
}

/// Execute the palette command
pub fn run_palette(json: bool) -> ExitCode {
    if json {
        match serde_json::to_string_pretty(&palette_json()) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    println!("Sprite palette:");
    println!();
    for (i, (color, name)) in ZX_PALETTE.iter().zip(PALETTE_NAMES.iter()).enumerate() {
        println!("  {} => {}  {}", Cell::Index(i as u8).to_char(), color.to_hex(), name);
    }
    println!("  . => transparent");
    ExitCode::from(EXIT_SUCCESS)
}
