//! Color values for nodes and links
//!
//! Accepted input formats:
//! - `#RRGGBB` (hex, `#` optional)
//! - `rgb(r, g, b)`
//! - `rgba(r, g, b, a)` with `a` in [0, 1]
//!
//! A color remembers the format it was written in so that it can be passed
//! through unchanged. Applying an opacity always yields `rgba(...)`.

use super::error::{Result, SankeyError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An RGB color, optionally with an alpha channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// Written as `#rrggbb`
    Hex([u8; 3]),
    /// Written as `rgb(r,g,b)`
    Rgb([u8; 3]),
    /// Written as `rgba(r,g,b,a)`
    Rgba([u8; 3], f64),
}

impl Color {
    /// RGB components regardless of format
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            Color::Hex(rgb) | Color::Rgb(rgb) | Color::Rgba(rgb, _) => *rgb,
        }
    }

    /// Alpha channel (1.0 for opaque formats)
    pub fn alpha(&self) -> f64 {
        match self {
            Color::Rgba(_, a) => *a,
            _ => 1.0,
        }
    }

    /// Same color with the given opacity in [0, 1]
    pub fn with_opacity(&self, opacity: f64) -> Result<Color> {
        check_opacity(opacity)?;
        Ok(Color::Rgba(self.rgb(), opacity))
    }
}

/// Reject opacity values outside the canonical [0, 1] range
pub fn check_opacity(opacity: f64) -> Result<f64> {
    if opacity.is_finite() && (0.0..=1.0).contains(&opacity) {
        Ok(opacity)
    } else {
        Err(SankeyError::InvalidOpacity(opacity))
    }
}

/// Convert an opacity given as a percentage (0-100) to the canonical [0, 1] range
pub fn opacity_from_percent(percent: f64) -> Result<f64> {
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(SankeyError::InvalidOpacity(percent));
    }
    Ok(percent / 100.0)
}

impl FromStr for Color {
    type Err = SankeyError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();

        if let Some(args) = strip_function(&lower, "rgba") {
            let parts = split_args(args);
            if parts.len() != 4 {
                return Err(SankeyError::InvalidColor(s.to_string()));
            }
            let rgb = parse_components(&parts[..3])
                .ok_or_else(|| SankeyError::InvalidColor(s.to_string()))?;
            let alpha: f64 = parts[3]
                .parse()
                .map_err(|_| SankeyError::InvalidColor(s.to_string()))?;
            let alpha = check_opacity(alpha).map_err(|_| SankeyError::InvalidColor(s.to_string()))?;
            return Ok(Color::Rgba(rgb, alpha));
        }

        if let Some(args) = strip_function(&lower, "rgb") {
            let parts = split_args(args);
            if parts.len() != 3 {
                return Err(SankeyError::InvalidColor(s.to_string()));
            }
            let rgb = parse_components(&parts)
                .ok_or_else(|| SankeyError::InvalidColor(s.to_string()))?;
            return Ok(Color::Rgb(rgb));
        }

        parse_hex_color(trimmed)
            .map(Color::Hex)
            .ok_or_else(|| SankeyError::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Hex([r, g, b]) => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
            Color::Rgb([r, g, b]) => write!(f, "rgb({},{},{})", r, g, b),
            Color::Rgba([r, g, b], a) => write!(f, "rgba({},{},{},{})", r, g, b, a),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn strip_function<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn split_args(args: &str) -> Vec<&str> {
    args.split(',').map(str::trim).collect()
}

fn parse_components(parts: &[&str]) -> Option<[u8; 3]> {
    let r = parts.first()?.parse::<u8>().ok()?;
    let g = parts.get(1)?.parse::<u8>().ok()?;
    let b = parts.get(2)?.parse::<u8>().ok()?;
    Some([r, g, b])
}

/// Parse a `#RRGGBB` (or `RRGGBB`) hex color string to an RGB array
fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);

    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some([r, g, b])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!("#FF0000".parse::<Color>().unwrap(), Color::Hex([255, 0, 0]));
        assert_eq!("#1F78B4".parse::<Color>().unwrap(), Color::Hex([31, 120, 180]));
        assert_eq!("00ff00".parse::<Color>().unwrap(), Color::Hex([0, 255, 0]));

        assert!("#FFF".parse::<Color>().is_err());
        assert!("GGGGGG".parse::<Color>().is_err());
        assert!("#440154FF".parse::<Color>().is_err());
        assert!("##ff0000".parse::<Color>().is_err());
    }

    #[test]
    fn test_parse_rgb_and_rgba() {
        assert_eq!(
            "rgb(31, 120, 180)".parse::<Color>().unwrap(),
            Color::Rgb([31, 120, 180])
        );
        assert_eq!(
            "RGBA(1,2,3,0.25)".parse::<Color>().unwrap(),
            Color::Rgba([1, 2, 3], 0.25)
        );
        assert!("rgb(256,0,0)".parse::<Color>().is_err());
        assert!("rgb(1,2)".parse::<Color>().is_err());
        assert!("rgba(1,2,3,1.5)".parse::<Color>().is_err());
        assert!("hsl(1,2,3)".parse::<Color>().is_err());
    }

    #[test]
    fn test_display_keeps_input_format() {
        assert_eq!("#1F78B4".parse::<Color>().unwrap().to_string(), "#1f78b4");
        assert_eq!("rgb(1, 2, 3)".parse::<Color>().unwrap().to_string(), "rgb(1,2,3)");
        assert_eq!(
            "rgba(1,2,3,0.5)".parse::<Color>().unwrap().to_string(),
            "rgba(1,2,3,0.5)"
        );
    }

    #[test]
    fn test_with_opacity() {
        let color = Color::Hex([31, 120, 180]);
        let faded = color.with_opacity(0.5).unwrap();
        assert_eq!(faded, Color::Rgba([31, 120, 180], 0.5));
        assert_eq!(faded.to_string(), "rgba(31,120,180,0.5)");
        assert_eq!(faded.alpha(), 0.5);
        assert_eq!(color.alpha(), 1.0);

        assert!(matches!(
            color.with_opacity(1.5),
            Err(SankeyError::InvalidOpacity(_))
        ));
        assert!(color.with_opacity(f64::NAN).is_err());
    }

    #[test]
    fn test_opacity_from_percent() {
        assert_eq!(opacity_from_percent(50.0).unwrap(), 0.5);
        assert_eq!(opacity_from_percent(100.0).unwrap(), 1.0);
        assert!(opacity_from_percent(120.0).is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let color: Color = serde_json::from_str("\"rgb(1,2,3)\"").unwrap();
        assert_eq!(color, Color::Rgb([1, 2, 3]));
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"rgb(1,2,3)\"");
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
