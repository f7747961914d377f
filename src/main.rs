//! Pixelgrid - command-line editor for pixel art grids stored as hex text

use std::process::ExitCode;

use pixelgrid::cli;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    cli::run()
}
