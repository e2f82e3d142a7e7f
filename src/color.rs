//! Blueprint pixel colors
//!
//! Every pixel of a blueprint image is matched against tile definitions by its
//! exact RGB value. Colors are written in definition files either as `[r, g, b]`
//! arrays or as `#RRGGBB` hex strings.

use std::fmt;

use image::Rgba;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Input string doesn't start with '#'
    #[error("color must start with '#'")]
    MissingHash,
    /// Invalid length (must be 3 or 6 hex chars after #)
    #[error("invalid color length {0}, expected 3 or 6")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// An exact 8-bit RGB blueprint color. Alpha is never part of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(pub [u8; 3]);

/// Color of the synthetic tile returned for out-of-grid neighbor queries.
pub const BOUNDARY_COLOR: Color = Color([100, 113, 96]);

/// Color substituted for pixels that match no tile definition.
pub const FALLBACK_COLOR: Color = Color([0, 0, 0]);

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Take the RGB part of a decoded pixel.
    pub fn from_pixel(pixel: &Rgba<u8>) -> Self {
        Self([pixel[0], pixel[1], pixel[2]])
    }

    /// Lowercase `rrggbb` without the leading '#'.
    pub fn hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex())
    }
}

impl From<[u8; 3]> for Color {
    fn from(rgb: [u8; 3]) -> Self {
        Self(rgb)
    }
}

/// Parse a hex color string (`#RGB` or `#RRGGBB`).
///
/// # Examples
///
/// ```
/// use kagrender::color::{parse_color, Color};
///
/// assert_eq!(parse_color("#647160").unwrap(), Color::new(100, 113, 96));
/// assert_eq!(parse_color("#F00").unwrap(), Color::new(255, 0, 0));
/// ```
pub fn parse_color(s: &str) -> Result<Color, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    let hex = s.strip_prefix('#').ok_or(ColorError::MissingHash)?;

    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }

    let digits: Vec<u8> = hex.chars().map(parse_hex_digit).collect::<Result<_, _>>()?;
    match digits.len() {
        // #RGB -> #RRGGBB (doubled digits)
        3 => Ok(Color([digits[0] * 17, digits[1] * 17, digits[2] * 17])),
        6 => Ok(Color([
            digits[0] * 16 + digits[1],
            digits[2] * 16 + digits[3],
            digits[4] * 16 + digits[5],
        ])),
        len => Err(ColorError::InvalidLength(len)),
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

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Array([u8; 3]),
    ArrayWithAlpha([u8; 4]),
    Hex(String),
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match ColorRepr::deserialize(deserializer)? {
            ColorRepr::Array(rgb) => Ok(Color(rgb)),
            ColorRepr::ArrayWithAlpha([r, g, b, _]) => Ok(Color([r, g, b])),
            ColorRepr::Hex(s) => parse_color(&s).map_err(serde::de::Error::custom),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
