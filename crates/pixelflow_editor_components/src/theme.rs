// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node accent colors and shading.

use pixelflow_editor_graph::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shade applied to an edge's accent color while selected
pub const SELECTED_SHADE: i32 = -40;

/// Neutral gray used when no accent can be derived
pub const NEUTRAL: Color = Color::rgb(0x71, 0x80, 0x96);

/// An RGB display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Create a color from channel values
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` hex string
    pub fn from_hex(hex: &str) -> Result<Self, ParseColorError> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| ParseColorError(hex.to_owned()))?;
        if digits.len() != 6 {
            return Err(ParseColorError(hex.to_owned()));
        }
        let channel = |range| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ParseColorError(hex.to_owned()))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Format as a `#RRGGBB` hex string
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Scale brightness by a percentage: each channel is multiplied by
    /// `(100 + percent) / 100` and clamped. Negative percentages darken.
    pub fn shade(&self, percent: i32) -> Self {
        let scale = |channel: u8| {
            let scaled = i64::from(channel) * i64::from(100 + percent) / 100;
            scaled.clamp(0, 255) as u8
        };
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Error parsing a hex color string
#[derive(Debug, thiserror::Error)]
#[error("Invalid hex color: {0}")]
pub struct ParseColorError(pub String);

/// Base accent color for a node, derived from its palette placement.
///
/// Pure and total: unmapped combinations fall back to [`NEUTRAL`].
pub fn accent_color(category: Category, subcategory: &str) -> Color {
    match (category, subcategory) {
        (Category::Utility, "Math") => Color::rgb(0xD6, 0x9E, 0x2E),
        (Category::Image, _) => Color::rgb(0xC5, 0x30, 0x30),
        (Category::ImageDimension, _) => Color::rgb(0x31, 0x82, 0xCE),
        (Category::ImageAdjustment, _) => Color::rgb(0x31, 0x97, 0x95),
        (Category::ImageFilter, _) => Color::rgb(0x38, 0xA1, 0x69),
        (Category::ImageChannel, _) => Color::rgb(0xD5, 0x3F, 0x8C),
        (Category::Utility, _) => NEUTRAL,
        (Category::Pytorch, _) => Color::rgb(0xDD, 0x6B, 0x20),
        (Category::Onnx, _) => Color::rgb(0x63, 0xB3, 0xED),
        (Category::Ncnn, _) => Color::rgb(0xED, 0x64, 0xA6),
    }
}
