use std::fmt;

use halftone_engine::coords::ColorRgba;

/// Why a color string was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorParseError {
    Empty,
    /// Hex input that is not 6 or 8 hex digits.
    BadHex(String),
    /// A comma-separated component that is not a float.
    BadComponent(String),
    /// Comma-separated input with other than 3 or 4 components.
    WrongArity(usize),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorParseError::Empty => f.write_str("empty color"),
            ColorParseError::BadHex(s) => write!(f, "invalid hex color {s:?}"),
            ColorParseError::BadComponent(s) => write!(f, "invalid color component {s:?}"),
            ColorParseError::WrongArity(n) => write!(f, "expected 3 or 4 components, got {n}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

/// Parses `#RRGGBB`, `#RRGGBBAA` (leading `#` optional) or `r,g,b[,a]` floats
/// in `[0, 1]`.
///
/// Range is not checked here; the sphere clamps at mount.
pub fn parse_color(input: &str) -> Result<ColorRgba, ColorParseError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ColorParseError::Empty);
    }
    if s.contains(',') {
        parse_components(s)
    } else {
        parse_hex(s)
    }
}

/// Parses `#RRGGBB` or `#RRGGBBAA`, with or without the `#`.
pub fn parse_hex(hex: &str) -> Result<ColorRgba, ColorParseError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let bad = || ColorParseError::BadHex(hex.to_string());
    if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
        return Err(bad());
    }

    let channel = |i: usize| -> Result<f32, ColorParseError> {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| bad())
    };

    let a = if digits.len() == 8 { channel(6)? } else { 1.0 };
    Ok(ColorRgba::new(channel(0)?, channel(2)?, channel(4)?, a))
}

fn parse_components(s: &str) -> Result<ColorRgba, ColorParseError> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if !(parts.len() == 3 || parts.len() == 4) {
        return Err(ColorParseError::WrongArity(parts.len()));
    }

    let mut c = [1.0f32; 4];
    for (slot, part) in c.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f32>()
            .map_err(|_| ColorParseError::BadComponent(part.to_string()))?;
    }
    Ok(ColorRgba::from_array(c))
}
