//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod draw;
mod info;
mod render;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, PxgConfig};
use crate::session::EditorSession;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Pixelgrid - edit pixel art grids stored as comma-separated hex text
#[derive(Parser)]
#[command(name = "pxg")]
#[command(about = "Pixelgrid - edit pixel art grids stored as comma-separated hex text")]
#[command(version)]
pub struct Cli {
    /// Path to pxg.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a blank grid
    New {
        /// Grid width in cells (1-50)
        #[arg(short = 'W', long)]
        width: Option<usize>,

        /// Grid height in cells (1-50)
        #[arg(short = 'H', long)]
        height: Option<usize>,

        /// Output file (default: print to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Paint cells with a round brush
    Paint {
        /// Grid file to edit
        input: PathBuf,

        /// Brush center as ROW,COL (repeatable)
        #[arg(long = "at", value_parser = parse_cell, required = true)]
        at: Vec<(usize, usize)>,

        /// Base color: #hex, rgb() or rgba()
        #[arg(short, long)]
        color: Option<String>,

        /// Alpha applied to the base color (0-255)
        #[arg(short, long)]
        alpha: Option<u8>,

        /// Brush size (1 paints a single cell)
        #[arg(short, long)]
        brush: Option<u32>,

        /// Write to this file instead of editing in place
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the result instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Fill every cell with one color
    Fill {
        /// Grid file to edit
        input: PathBuf,

        /// Base color: #hex, rgb() or rgba()
        #[arg(short, long)]
        color: String,

        /// Write to this file instead of editing in place
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the result instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Reset every cell to transparent
    Clear {
        /// Grid file to edit
        input: PathBuf,

        /// Write to this file instead of editing in place
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the result instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Render a grid file to PNG
    Render {
        /// Grid file to render
        input: PathBuf,

        /// Output file or directory (default: {input}.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pixels per cell (1-128)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=128))]
        scale: Option<u32>,
    },

    /// Show grid dimensions and painted cell count
    Info {
        /// Grid file to inspect
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show canonical, compressed and composed forms of a color
    Color {
        /// Color: #hex, rgb() or rgba()
        value: String,

        /// Alpha to compose with (0-255)
        #[arg(short, long)]
        alpha: Option<u8>,
    },
}

/// Parse a `ROW,COL` cell argument.
fn parse_cell(s: &str) -> Result<(usize, usize), String> {
    let (row, col) = s.split_once(',').ok_or_else(|| format!("expected ROW,COL, got '{}'", s))?;
    let row = row.trim().parse().map_err(|_| format!("invalid row '{}'", row.trim()))?;
    let col = col.trim().parse().map_err(|_| format!("invalid column '{}'", col.trim()))?;
    Ok((row, col))
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::New { width, height, output } => {
            let overrides = CliOverrides { width, height, ..Default::default() };
            match resolve_config(config_path, &overrides) {
                Ok(config) => draw::run_new(&config, output.as_deref()),
                Err(code) => code,
            }
        }
        Commands::Paint { input, at, color, alpha, brush, output, dry_run } => {
            let overrides = CliOverrides { color, alpha, brush_size: brush, ..Default::default() };
            match resolve_config(config_path, &overrides) {
                Ok(config) => {
                    draw::run_paint(&config, &input, &at, output.as_deref(), dry_run)
                }
                Err(code) => code,
            }
        }
        Commands::Fill { input, color, output, dry_run } => {
            let overrides = CliOverrides { color: Some(color), ..Default::default() };
            match resolve_config(config_path, &overrides) {
                Ok(config) => draw::run_fill(&config, &input, output.as_deref(), dry_run),
                Err(code) => code,
            }
        }
        Commands::Clear { input, output, dry_run } => {
            match resolve_config(config_path, &CliOverrides::default()) {
                Ok(config) => draw::run_clear(&config, &input, output.as_deref(), dry_run),
                Err(code) => code,
            }
        }
        Commands::Render { input, output, scale } => {
            let overrides = CliOverrides { scale, ..Default::default() };
            match resolve_config(config_path, &overrides) {
                Ok(config) => render::run_render(&config, &input, output.as_deref()),
                Err(code) => code,
            }
        }
        Commands::Info { input, json } => {
            match resolve_config(config_path, &CliOverrides::default()) {
                Ok(config) => info::run_info(&config, &input, json),
                Err(code) => code,
            }
        }
        Commands::Color { value, alpha } => info::run_color(&value, alpha),
    }
}

/// Load config, apply CLI overrides, and validate the result.
fn resolve_config(path: Option<&Path>, overrides: &CliOverrides) -> Result<PxgConfig, ExitCode> {
    let mut config = match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_ERROR));
        }
    };
    merge_cli_overrides(&mut config, overrides);

    let errors = config.validate();
    if !errors.is_empty() {
        for e in errors {
            eprintln!("Error: {}", e);
        }
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }
    Ok(config)
}

/// Open a grid file into a fresh session.
pub(crate) fn load_session(config: &PxgConfig, input: &Path) -> Result<EditorSession, ExitCode> {
    let text = match std::fs::read_to_string(input) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: Cannot open input file '{}': {}", input.display(), e);
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
    };

    let mut session = match EditorSession::new(config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_ERROR));
        }
    };
    if let Err(e) = session.import_text(&text) {
        eprintln!("Error: '{}': {}", input.display(), e);
        return Err(ExitCode::from(EXIT_ERROR));
    }
    Ok(session)
}
