//! PNG output and file path generation

use image::{ImageEncoder, RgbaImage};
use std::io;
use std::path::{Path, PathBuf};

/// Error type for output operations
#[derive(Debug)]
pub enum OutputError {
    /// IO error during file operations
    Io(io::Error),
    /// Image encoding error
    Image(image::ImageError),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "IO error: {}", e),
            OutputError::Image(e) => write!(f, "Image error: {}", e),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
            OutputError::Image(e) => Some(e),
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<image::ImageError> for OutputError {
    fn from(e: image::ImageError) -> Self {
        OutputError::Image(e)
    }
}

/// Save an RGBA image to a PNG file, creating parent directories as needed.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(path, encode_png(image)?)?;
    Ok(())
}

/// Encode an RGBA image as PNG bytes in memory.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, OutputError> {
    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_data);
    encoder.write_image(image.as_raw(), image.width(), image.height(), image::ColorType::Rgba8)?;
    Ok(png_data)
}

/// Download name for an exported grid: `pixel-art-{W}x{H}-{date}.{ext}`.
///
/// `date` is supplied by the caller, typically `YYYY-MM-DD`.
pub fn export_file_name(width: usize, height: usize, date: &str, ext: &str) -> String {
    format!("pixel-art-{}x{}-{}.{}", width, height, date, ext)
}

/// Generate the output path for a rendered file.
///
/// | Scenario | Output |
/// |----------|--------|
/// | No `-o` | `{input_stem}.{ext}` next to the input |
/// | `-o out.png` | `out.png` |
/// | `-o dir/` | `dir/{input_stem}.{ext}` |
pub fn generate_output_path(input: &Path, output_arg: Option<&Path>, ext: &str) -> PathBuf {
    let input_stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    let file_name = format!("{}.{}", input_stem, ext);

    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
            if is_dir {
                output.join(file_name)
            } else {
                output.to_path_buf()
            }
        }
        None => {
            let parent = input.parent().unwrap_or(Path::new(""));
            if parent.as_os_str().is_empty() {
                PathBuf::from(file_name)
            } else {
                parent.join(file_name)
            }
        }
    }
}
