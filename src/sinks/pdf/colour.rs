use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Colour {
    pub const fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour { r, g, b }
    }

    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    pub const fn new_grey(v: f32) -> Colour {
        Colour { r: v, g: v, b: v }
    }

    fn to_bytes(self) -> (u8, u8, u8) {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (byte(self.r), byte(self.g), byte(self.b))
    }
}

pub mod colours {
    use super::Colour;

    pub const BLACK: Colour = Colour::new_grey(0.0);
    pub const WHITE: Colour = Colour::new_grey(1.0);
    /// `#14365D`, used behind the item table header.
    pub const NAVY: Colour = Colour::new_rgb(20.0 / 255.0, 54.0 / 255.0, 93.0 / 255.0);
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not a colour in #RRGGBB form")]
pub struct ParseColourError(String);

impl FromStr for Colour {
    type Err = ParseColourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColourError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Colour::new_rgb_bytes(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Colour {
    type Error = ParseColourError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Colour> for String {
    fn from(colour: Colour) -> Self {
        colour.to_string()
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.to_bytes();
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_parse_hex_colours() {
        let navy: Colour = "#14365D".parse().expect("can parse colour");
        assert_eq!(navy.to_string(), "#14365D");
        assert_eq!(navy, colours::NAVY);
    }

    #[test]
    fn rejects_malformed_colours() {
        assert!("14365D".parse::<Colour>().is_err());
        assert!("#14365".parse::<Colour>().is_err());
        assert!("#GG365D".parse::<Colour>().is_err());
    }
}
