//! Internal color representation.
//!
//! All palette math happens on [`Rgb`] triples. Text forms (`#rrggbb`,
//! `rgb(r, g, b)`) only appear at the config boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::math::lerp;

/// Errors produced when parsing a textual color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    /// Neither `#rgb`, `#rrggbb` nor `rgb(r, g, b)`.
    #[error("unrecognised color format: {0:?}")]
    UnknownFormat(String),

    /// Hex form with a non-hex digit.
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),

    /// `rgb(...)` form with a channel that is not an integer.
    #[error("invalid channel {channel:?} in {input:?}")]
    InvalidChannel { input: String, channel: String },
}

/// An opaque 8-bit-per-channel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Per-channel linear blend, rounded back to whole channel values.
    ///
    /// The result is itself a plain [`Rgb`], so blended colors can be fed
    /// straight into further blends (day → dusk on top of biome → biome).
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        Rgb {
            r: lerp_channel(self.r, other.r, t),
            g: lerp_channel(self.g, other.g, t),
            b: lerp_channel(self.b, other.b, t),
        }
    }

    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba::new(self, alpha)
    }

    /// `#rrggbb`, lowercase.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels as `[0, 1]` floats.
    pub fn to_unit(self) -> [f64; 3] {
        [self.r as f64 / 255.0, self.g as f64 / 255.0, self.b as f64 / 255.0]
    }
}

fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    lerp(a as f64, b as f64, t).round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(trimmed, hex);
        }
        if let Some(body) = trimmed.strip_prefix("rgb(").and_then(|rest| rest.strip_suffix(')')) {
            return parse_channels(trimmed, body);
        }
        Err(ColorParseError::UnknownFormat(s.to_string()))
    }
}

fn parse_hex(input: &str, hex: &str) -> Result<Rgb, ColorParseError> {
    if !hex.is_ascii() {
        return Err(ColorParseError::InvalidHex(input.to_string()));
    }
    let digit = |range: &str| {
        u8::from_str_radix(range, 16).map_err(|_| ColorParseError::InvalidHex(input.to_string()))
    };
    match hex.len() {
        6 => Ok(Rgb::new(digit(&hex[0..2])?, digit(&hex[2..4])?, digit(&hex[4..6])?)),
        // #rgb shorthand: each digit is doubled
        3 => {
            let r = digit(&hex[0..1])?;
            let g = digit(&hex[1..2])?;
            let b = digit(&hex[2..3])?;
            Ok(Rgb::new(r * 17, g * 17, b * 17))
        }
        _ => Err(ColorParseError::InvalidHex(input.to_string())),
    }
}

fn parse_channels(input: &str, body: &str) -> Result<Rgb, ColorParseError> {
    let mut channels = [0u8; 3];
    let mut parts = body.split(',');
    for slot in channels.iter_mut() {
        let part = parts
            .next()
            .ok_or_else(|| ColorParseError::UnknownFormat(input.to_string()))?
            .trim();
        let value: i64 = part.parse().map_err(|_| ColorParseError::InvalidChannel {
            input: input.to_string(),
            channel: part.to_string(),
        })?;
        *slot = value.clamp(0, 255) as u8;
    }
    if parts.next().is_some() {
        return Err(ColorParseError::UnknownFormat(input.to_string()));
    }
    Ok(Rgb::new(channels[0], channels[1], channels[2]))
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

/// A color with straight (non-premultiplied) alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba { rgb: Rgb::BLACK, alpha: 0.0 };

    pub fn new(rgb: Rgb, alpha: f64) -> Self {
        Self { rgb, alpha: alpha.clamp(0.0, 1.0) }
    }

    pub fn opaque(rgb: Rgb) -> Self {
        Self { rgb, alpha: 1.0 }
    }

    pub fn lerp(self, other: Rgba, t: f64) -> Rgba {
        Rgba::new(self.rgb.lerp(other.rgb, t), lerp(self.alpha, other.alpha, t))
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        Rgba::opaque(rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_black_to_white_midpoint_is_mid_gray() {
        let mid = Rgb::BLACK.lerp(Rgb::WHITE, 0.5);
        assert_eq!(mid, Rgb::new(128, 128, 128));
        assert_eq!(mid.to_string(), "#808080");
    }

    #[test]
    fn lerp_endpoints_are_exact() {
        let a = Rgb::from_hex(0x2c3a2a);
        let b = Rgb::from_hex(0x4a3a22);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn hex_round_trip_allows_chained_blends() {
        let day = Rgb::from_hex(0x86d3ff).lerp(Rgb::from_hex(0x7fd6ff), 0.3);
        let reparsed: Rgb = day.to_hex().parse().unwrap();
        assert_eq!(reparsed, day);
        let dusk = Rgb::from_hex(0x5b6da8);
        assert_eq!(reparsed.lerp(dusk, 0.5), day.lerp(dusk, 0.5));
    }

    #[test]
    fn parses_hex_shorthand_and_css_forms() {
        assert_eq!("#3A7FC1".parse::<Rgb>().unwrap(), Rgb::new(0x3a, 0x7f, 0xc1));
        assert_eq!("#fff".parse::<Rgb>().unwrap(), Rgb::WHITE);
        assert_eq!("rgb(12, 300, -4)".parse::<Rgb>().unwrap(), Rgb::new(12, 255, 0));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!(matches!("#12345".parse::<Rgb>(), Err(ColorParseError::InvalidHex(_))));
        assert!(matches!("#gg0000".parse::<Rgb>(), Err(ColorParseError::InvalidHex(_))));
        assert!(matches!("blue".parse::<Rgb>(), Err(ColorParseError::UnknownFormat(_))));
        assert!(matches!(
            "rgb(1, two, 3)".parse::<Rgb>(),
            Err(ColorParseError::InvalidChannel { .. })
        ));
        assert!(matches!("rgb(1, 2, 3, 4)".parse::<Rgb>(), Err(ColorParseError::UnknownFormat(_))));
    }

    #[test]
    fn rgba_clamps_alpha() {
        assert_eq!(Rgb::WHITE.with_alpha(1.5).alpha, 1.0);
        assert_eq!(Rgb::WHITE.with_alpha(-0.2).alpha, 0.0);
        assert_eq!(Rgb::new(1, 2, 3).with_alpha(0.5), Rgba { rgb: Rgb::new(1, 2, 3), alpha: 0.5 });
    }
}
