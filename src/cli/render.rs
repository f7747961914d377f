//! CLI dispatch for the `pxg render` command.

use std::path::Path;
use std::process::ExitCode;

use crate::config::PxgConfig;
use crate::output::{generate_output_path, save_png};

use super::{load_session, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the render command.
pub fn run_render(config: &PxgConfig, input: &Path, output: Option<&Path>) -> ExitCode {
    let session = match load_session(config, input) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let image = match session.export_raster() {
        Ok(img) => img,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let output_path = generate_output_path(input, output, "png");
    if let Err(e) = save_png(&image, &output_path) {
        eprintln!("Error: Failed to save '{}': {}", output_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("Saved: {}", output_path.display());
    ExitCode::from(EXIT_SUCCESS)
}
