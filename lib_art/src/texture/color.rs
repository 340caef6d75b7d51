use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ColorError {
    #[error("Invalid number of channels: expected 3 or 4, got {0}")]
    ChannelCount(usize),
    #[error("Invalid hex color: {0:?}")]
    InvalidHex(String),
}

/// An 8-bit per channel RGBA color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Builds a color from a list of 3 or 4 channel values.
    ///
    /// Values are clamped to `0..=255`. A missing alpha channel means fully opaque.
    ///
    /// # Errors
    /// - Returns `ColorError::ChannelCount` if the list does not hold 3 or 4 values
    pub fn from_channels(channels: &[i32]) -> Result<Self, ColorError> {
        let clamp = |value: i32| value.clamp(0, 255) as u8;

        match *channels {
            [r, g, b] => Ok(Self::rgb(clamp(r), clamp(g), clamp(b))),
            [r, g, b, a] => Ok(Self::new(clamp(r), clamp(g), clamp(b), clamp(a))),
            _ => Err(ColorError::ChannelCount(channels.len())),
        }
    }

    /// Parses `rrggbb` or `rrggbbaa`, with an optional leading `#`.
    ///
    /// # Errors
    /// - Returns `ColorError::InvalidHex` on a wrong digit count or a non-hex digit
    pub fn from_hex(text: &str) -> Result<Self, ColorError> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        let invalid = || ColorError::InvalidHex(text.to_string());

        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());

        match digits.len() {
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(invalid()),
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_array(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// `rrggbbaa` in lowercase, no prefix.
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }

    pub fn rgba_hex(self) -> String {
        format!("#{}", self.to_hex())
    }

    pub fn rgb_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgba {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<&[i32]> for Rgba {
    type Error = ColorError;

    fn try_from(channels: &[i32]) -> Result<Self, Self::Error> {
        Self::from_channels(channels)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(bytes: [u8; 4]) -> Self {
        Self::from_array(bytes)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.r, self.g, self.b, self.a)
    }
}
