//! Color codec for cell colors
//!
//! Converts between three representations:
//! - Canonical: `#rrggbbaa`, always 8 lowercase hex digits
//! - Compressed: the shortest lossless hex form (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`)
//! - Device strings: hex (3/4/6/8 digits), `rgb(r, g, b)` and `rgba(r, g, b, a)`
//!
//! The fail-soft entry points (`to_canonical_hex8`, `compress`, `compose_with_alpha`)
//! never return errors: anything unrecognized degrades to fully transparent.
//! `parse_hex_color` is the strict parser used where rejection matters (import).

use std::fmt;

use image::Rgba;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Canonical form of an unpainted cell.
pub const TRANSPARENT_HEX: &str = "#00000000";

/// Matches `rgb(r, g, b)` and `rgba(r, g, b, a)` with integer channels.
static RGB_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*(?:,\s*([\d.]+)\s*)?\)$")
        .expect("rgb() pattern is valid")
});

/// Error type for strict hex color parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Input string doesn't start with '#'
    #[error("color must start with '#'")]
    MissingHash,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// A single cell color, stored as straight (non-premultiplied) RGBA bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    rgba: [u8; 4],
}

impl Color {
    /// Fully transparent black, the value of an unpainted cell.
    pub const TRANSPARENT: Color = Color { rgba: [0, 0, 0, 0] };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { rgba: [r, g, b, a] }
    }

    /// Parse any supported color string, falling back to transparent.
    ///
    /// ```
    /// use pixelgrid::color::Color;
    ///
    /// assert_eq!(Color::parse("#F00"), Color::new(255, 0, 0, 255));
    /// assert_eq!(Color::parse("rgba(0, 0, 255, 0.5)"), Color::new(0, 0, 255, 128));
    /// assert_eq!(Color::parse("not a color"), Color::TRANSPARENT);
    /// ```
    pub fn parse(s: &str) -> Self {
        parse_device_color(s).unwrap_or(Color::TRANSPARENT)
    }

    pub fn r(&self) -> u8 {
        self.rgba[0]
    }

    pub fn g(&self) -> u8 {
        self.rgba[1]
    }

    pub fn b(&self) -> u8 {
        self.rgba[2]
    }

    pub fn a(&self) -> u8 {
        self.rgba[3]
    }

    /// Raw channel bytes in RGBA order.
    pub fn channels(&self) -> [u8; 4] {
        self.rgba
    }

    /// Return the same color with its alpha byte replaced.
    pub fn with_alpha(self, alpha: u8) -> Self {
        let [r, g, b, _] = self.rgba;
        Self::new(r, g, b, alpha)
    }

    /// True only for the unpainted value `#00000000`.
    ///
    /// A painted color with alpha 0 (e.g. `#ff000000`) is not transparent in this sense.
    pub fn is_transparent(&self) -> bool {
        *self == Color::TRANSPARENT
    }

    /// Canonical `#rrggbbaa` string.
    pub fn to_hex8(&self) -> String {
        let [r, g, b, a] = self.rgba;
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }

    /// Shortest lossless hex string for this color.
    pub fn to_compressed(&self) -> String {
        compress_channels(self.rgba)
    }

    /// Channels normalized to `[0, 1]`.
    pub fn to_device_rgba(&self) -> DeviceRgba {
        let [r, g, b, a] = self.rgba;
        DeviceRgba {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex8())
    }
}

impl From<Rgba<u8>> for Color {
    fn from(px: Rgba<u8>) -> Self {
        Self { rgba: px.0 }
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        Rgba(c.rgba)
    }
}

/// A color with each channel as a float in `[0, 1]`, as a drawing device expects it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl DeviceRgba {
    /// Quantize back to 8-bit channels.
    pub fn to_rgba8(&self) -> Rgba<u8> {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([q(self.r), q(self.g), q(self.b), q(self.a)])
    }
}

/// Normalize any color string to canonical `#rrggbbaa`.
///
/// Accepts `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b)` and
/// `rgba(r, g, b, a)` where `a` is in `[0, 1]`. Empty input, `transparent`,
/// `white` (what an unset style reports) and anything unparseable all map to
/// `#00000000`.
///
/// ```
/// use pixelgrid::color::to_canonical_hex8;
///
/// assert_eq!(to_canonical_hex8("#abc"), "#aabbccff");
/// assert_eq!(to_canonical_hex8("rgba(255, 0, 0, 0.5)"), "#ff000080");
/// assert_eq!(to_canonical_hex8("white"), "#00000000");
/// ```
pub fn to_canonical_hex8(input: &str) -> String {
    Color::parse(input).to_hex8()
}

/// Compress a canonical color to its shortest lossless hex form.
///
/// An opaque alpha (`ff`) is dropped, then if every channel has two identical
/// digits each collapses to one. Input that is not canonical is canonicalized first.
///
/// ```
/// use pixelgrid::color::compress;
///
/// assert_eq!(compress("#ff0000ff"), "#f00");
/// assert_eq!(compress("#11223344"), "#1234");
/// assert_eq!(compress("#12345678"), "#12345678");
/// ```
pub fn compress(hex8: &str) -> String {
    Color::parse(hex8).to_compressed()
}

/// Compose the color a paint action writes from a base color and an alpha slider value.
///
/// Hex bases keep their RGB and get their alpha byte replaced by `alpha`, yielding
/// canonical hex. `rgb()`/`rgba()` bases become `rgba(r,g,b,A)` with `A = alpha/255`
/// to three decimals. Any other base yields transparent.
///
/// ```
/// use pixelgrid::color::compose_with_alpha;
///
/// assert_eq!(compose_with_alpha("#ff0000", 128), "#ff000080");
/// assert_eq!(compose_with_alpha("rgb(10, 20, 30)", 255), "rgba(10,20,30,1.000)");
/// ```
pub fn compose_with_alpha(base: &str, alpha: u8) -> String {
    let base = base.trim();
    if base.starts_with('#') {
        return match parse_hex_color(base) {
            Ok(rgba) => Color::from(rgba).with_alpha(alpha).to_hex8(),
            Err(_) => TRANSPARENT_HEX.to_string(),
        };
    }
    match RGB_FUNCTION.captures(base) {
        Some(caps) => {
            let r = parse_channel(&caps[1]);
            let g = parse_channel(&caps[2]);
            let b = parse_channel(&caps[3]);
            format!("rgba({},{},{},{:.3})", r, g, b, alpha as f64 / 255.0)
        }
        None => TRANSPARENT_HEX.to_string(),
    }
}

/// Split a color into float channels in `[0, 1]`.
pub fn to_device_rgba(hex8: &str) -> DeviceRgba {
    Color::parse(hex8).to_device_rgba()
}

/// Whether `s` is a color the codec understands, rather than one it would
/// silently degrade to transparent.
pub fn is_recognized_color(s: &str) -> bool {
    parse_device_color(s).is_some()
}

/// Parse a device color string, returning `None` for anything unrecognized.
fn parse_device_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("transparent") || s.eq_ignore_ascii_case("white") {
        return None;
    }
    if s.starts_with('#') {
        return parse_hex_color(s).ok().map(Color::from);
    }

    let caps = RGB_FUNCTION.captures(s)?;
    let r = parse_channel(&caps[1]);
    let g = parse_channel(&caps[2]);
    let b = parse_channel(&caps[3]);
    let a = match caps.get(4) {
        Some(m) => {
            let alpha: f64 = m.as_str().parse().ok()?;
            (alpha * 255.0).round().clamp(0.0, 255.0) as u8
        }
        None => 255,
    };
    Some(Color::new(r, g, b, a))
}

/// Parse a decimal channel value, clamping to `[0, 255]`.
fn parse_channel(digits: &str) -> u8 {
    digits.parse::<u64>().map(|v| v.min(255) as u8).unwrap_or(255)
}

fn compress_channels([r, g, b, a]: [u8; 4]) -> String {
    let doubled = |v: u8| v >> 4 == v & 0x0f;
    if a == 0xff {
        if doubled(r) && doubled(g) && doubled(b) {
            format!("#{:x}{:x}{:x}", r & 0x0f, g & 0x0f, b & 0x0f)
        } else {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        }
    } else if doubled(r) && doubled(g) && doubled(b) && doubled(a) {
        format!("#{:x}{:x}{:x}{:x}", r & 0x0f, g & 0x0f, b & 0x0f, a & 0x0f)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }
}

/// Parse a hex color string (#RGB, #RGBA, #RRGGBB, #RRGGBBAA)
///
/// # Errors
///
/// Returns `ColorError` if the input is empty, lacks the leading `#`, has a
/// length other than 3, 4, 6 or 8 digits, or contains non-hex characters.
pub fn parse_hex_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    let hex = s.strip_prefix('#').ok_or(ColorError::MissingHash)?;

    // Validate all characters are hex
    for c in hex.chars() {
        if !c.is_ascii_hexdigit() {
            return Err(ColorError::InvalidHex(c));
        }
    }

    let digits: Vec<u8> = hex.chars().map(parse_hex_digit).collect::<Result<_, _>>()?;
    match digits.as_slice() {
        // #RGB -> #RRGGBB (doubled digits), alpha = 255
        [r, g, b] => Ok(Rgba([r * 17, g * 17, b * 17, 255])),
        // #RGBA -> #RRGGBBAA (doubled digits)
        [r, g, b, a] => Ok(Rgba([r * 17, g * 17, b * 17, a * 17])),
        [r1, r0, g1, g0, b1, b0] => Ok(Rgba([r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0, 255])),
        [r1, r0, g1, g0, b1, b0, a1, a0] => {
            Ok(Rgba([r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0, a1 * 16 + a0]))
        }
        other => Err(ColorError::InvalidLength(other.len())),
    }
}

/// Parse a single hex digit (0-9, A-F, a-f) to u8 (0-15)
fn parse_hex_digit(c: char) -> Result<u8, ColorError> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'a'..='f' => Ok(c as u8 - b'a' + 10),
        'A'..='F' => Ok(c as u8 - b'A' + 10),
        _ => Err(ColorError::InvalidHex(c)),
    }
}
