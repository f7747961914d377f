//! CLI dispatch for the editing commands: `new`, `paint`, `fill` and `clear`.
//!
//! Each command loads the grid into an `EditorSession`, applies the edit, and
//! writes the text export back.

use std::path::Path;
use std::process::ExitCode;

use crate::config::PxgConfig;
use crate::session::EditorSession;

use super::{load_session, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the new command.
pub fn run_new(config: &PxgConfig, output: Option<&Path>) -> ExitCode {
    let session = match EditorSession::new(config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    match output {
        Some(path) => write_result(&session, path, output, false),
        None => {
            println!("{}", session.export_text());
            ExitCode::from(EXIT_SUCCESS)
        }
    }
}

/// Execute the paint command.
pub fn run_paint(
    config: &PxgConfig,
    input: &Path,
    centers: &[(usize, usize)],
    output: Option<&Path>,
    dry_run: bool,
) -> ExitCode {
    let mut session = match load_session(config, input) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let mut painted = 0;
    for &(row, col) in centers {
        let index = match session.grid().index_of(row, col) {
            Ok(i) => i,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        };
        match session.paint_at(index) {
            Ok(n) => painted += n,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }
    log::info!("painted {} cells with {}", painted, session.active_color());

    write_result(&session, input, output, dry_run)
}

/// Execute the fill command.
pub fn run_fill(config: &PxgConfig, input: &Path, output: Option<&Path>, dry_run: bool) -> ExitCode {
    let mut session = match load_session(config, input) {
        Ok(s) => s,
        Err(code) => return code,
    };
    session.fill();
    write_result(&session, input, output, dry_run)
}

/// Execute the clear command.
pub fn run_clear(config: &PxgConfig, input: &Path, output: Option<&Path>, dry_run: bool) -> ExitCode {
    let mut session = match load_session(config, input) {
        Ok(s) => s,
        Err(code) => return code,
    };
    session.clear();
    write_result(&session, input, output, dry_run)
}

/// Write the session's text export to `output` (or back to `input`), or print it on dry runs.
fn write_result(
    session: &EditorSession,
    input: &Path,
    output: Option<&Path>,
    dry_run: bool,
) -> ExitCode {
    let content = session.export_text();
    if dry_run {
        println!("{}", content);
        return ExitCode::from(EXIT_SUCCESS);
    }

    let target = output.unwrap_or(input);
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: Failed to create '{}': {}", parent.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }
    if let Err(e) = std::fs::write(target, content) {
        eprintln!("Error: Failed to write '{}': {}", target.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("Saved: {}", target.display());
    ExitCode::from(EXIT_SUCCESS)
}
