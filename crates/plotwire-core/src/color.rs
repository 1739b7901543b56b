use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// D3's category10 palette.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Line color used when no color facet is given (first entry of [`CATEGORY10`]).
pub const DEFAULT_LINE_COLOR: Rgba = Rgba::rgb(0x1f, 0x77, 0xb4);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Returns the same color with `alpha` in `[0, 1]`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }

    pub fn alpha(&self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// `#rrggbb` for opaque colors, `#rrggbbaa` otherwise.
    pub fn to_hex_string(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn to_rgba_string(&self) -> String {
        let alpha = (self.alpha() * 1000.0).round() / 1000.0;
        format!("rgba({}, {}, {}, {alpha})", self.r, self.g, self.b)
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map_err(|_| invalid());
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        match hex.len() {
            3 => Ok(Self::rgb(
                nibble(0)? * 17,
                nibble(1)? * 17,
                nibble(2)? * 17,
            )),
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_string())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_long_and_alpha_hex() {
        assert_eq!("#f00".parse::<Rgba>().unwrap(), Rgba::rgb(255, 0, 0));
        assert_eq!("#1f77b4".parse::<Rgba>().unwrap(), DEFAULT_LINE_COLOR);
        assert_eq!(
            "#1f77b433".parse::<Rgba>().unwrap(),
            DEFAULT_LINE_COLOR.with_alpha(0.2)
        );
        assert!("red".parse::<Rgba>().is_err());
        assert!("#12345".parse::<Rgba>().is_err());
    }

    #[test]
    fn translucent_colors_keep_alpha_in_hex() {
        assert_eq!(DEFAULT_LINE_COLOR.to_hex_string(), "#1f77b4");
        assert_eq!(DEFAULT_LINE_COLOR.with_alpha(0.2).to_hex_string(), "#1f77b433");
        assert_eq!(
            DEFAULT_LINE_COLOR.with_alpha(0.2).to_rgba_string(),
            "rgba(31, 119, 180, 0.2)"
        );
    }
}
