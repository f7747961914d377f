//! CLI dispatch for the inspection commands: `info` and `color`.

use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;

use crate::color::{compose_with_alpha, compress, is_recognized_color, to_canonical_hex8};
use crate::config::PxgConfig;

use super::{load_session, EXIT_ERROR, EXIT_SUCCESS};

/// Summary of a grid file.
#[derive(Debug, Serialize)]
struct GridInfo {
    width: usize,
    height: usize,
    cells: usize,
    painted: usize,
    colors: usize,
}

/// Execute the info command.
pub fn run_info(config: &PxgConfig, input: &Path, json: bool) -> ExitCode {
    let session = match load_session(config, input) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let grid = session.grid();

    let mut distinct: Vec<_> = grid.cells().to_vec();
    distinct.sort_by_key(|c| c.channels());
    distinct.dedup();

    let info = GridInfo {
        width: grid.width(),
        height: grid.height(),
        cells: grid.len(),
        painted: grid.painted_count(),
        colors: distinct.len(),
    };

    if json {
        match serde_json::to_string_pretty(&info) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        println!("Size: {}x{}", info.width, info.height);
        println!("Cells: {}", info.cells);
        println!("Painted: {}", info.painted);
        println!("Colors: {}", info.colors);
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the color command.
pub fn run_color(value: &str, alpha: Option<u8>) -> ExitCode {
    if !is_recognized_color(value) {
        eprintln!("Warning: '{}' is not a recognized color, treating as transparent", value);
    }

    let canonical = to_canonical_hex8(value);
    println!("Canonical: {}", canonical);
    println!("Compressed: {}", compress(&canonical));
    if let Some(a) = alpha {
        println!("Composed: {}", compose_with_alpha(value, a));
    }

    ExitCode::from(EXIT_SUCCESS)
}
