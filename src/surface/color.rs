//! Color type with alpha support

use crate::errors::{Result, ScratchError};

/// RGBA color with f32 components (0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from 8-bit RGB values (0-255)
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    /// Create from 8-bit RGBA values (0-255)
    #[inline]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Parse a CSS-style hex color, `#rgb` or `#rrggbb`
    pub fn from_hex_str(raw: &str) -> Result<Self> {
        let digits = raw.strip_prefix('#').unwrap_or(raw);
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => {
                return Err(ScratchError::Configuration(format!(
                    "invalid hex color '{raw}'"
                )))
            }
        };
        let parse = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| {
                ScratchError::Configuration(format!("invalid hex color '{raw}'"))
            })
        };
        Ok(Self::from_rgb8(
            parse(&expanded[0..2])?,
            parse(&expanded[2..4])?,
            parse(&expanded[4..6])?,
        ))
    }

    /// Whether the pixel counts as visible mask
    #[inline]
    pub fn is_opaque_enough(&self) -> bool {
        self.a > 0.001
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}
