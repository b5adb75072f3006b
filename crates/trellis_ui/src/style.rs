//! Colours and the default palette used by the built-in element kinds.
//!
//! Skinning is out of scope; the palette only gives every kind a sane
//! starting colour.

use serde::{Deserialize, Serialize};

/// 8-bit RGBA colour.
///
/// The packed-integer form is `0xRRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Colour {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
    /// Alpha component.
    pub a: u8,
}

impl Colour {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);

    /// Creates a colour from RGBA components.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque colour from RGB components.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Creates a colour from its packed form (`0xRRGGBBAA`).
    #[must_use]
    pub const fn hex(hex: u32) -> Self {
        Self::rgba(
            (hex >> 24) as u8,
            (hex >> 16) as u8,
            (hex >> 8) as u8,
            hex as u8,
        )
    }

    /// Returns the packed form (`0xRRGGBBAA`).
    #[must_use]
    pub const fn to_hex(self) -> u32 {
        (self.r as u32) << 24 | (self.g as u32) << 16 | (self.b as u32) << 8 | self.a as u32
    }

    /// Returns a new colour with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Linearly interpolates between two colours (`t` in 0..=1).
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| {
            let v = f32::from(a) + (f32::from(b) - f32::from(a)) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Self::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// Converts to normalized float components.
    #[must_use]
    pub fn to_array(self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        ]
    }
}

impl Default for Colour {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<u32> for Colour {
    fn from(hex: u32) -> Self {
        Self::hex(hex)
    }
}

/// Default colours of the built-in kinds.
pub mod palette {
    use super::Colour;

    /// Dark element body (buttons, editboxes).
    pub const ELEMENT_DARK: Colour = Colour::hex(0x3E3E3EFF);
    /// Window and canvas body.
    pub const ELEMENT_BODY: Colour = Colour::hex(0x2A2A2AF0);
    /// Border colour.
    pub const BORDER: Colour = Colour::hex(0x101010FF);
    /// Default text colour.
    pub const TEXT: Colour = Colour::hex(0xE6E6E6FF);
    /// Window titlebar.
    pub const TITLEBAR: Colour = Colour::hex(0x1E4A78FF);
    /// Element drop shadow.
    pub const SHADOW: Colour = Colour::hex(0x0000007D);
    /// Text shadow, drawn one pixel below and right of the text.
    pub const TEXT_SHADOW: Colour = Colour::hex(0x0000007D);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colour_hex_roundtrip() {
        let colour = Colour::hex(0x1234_56AB);
        assert_eq!(colour, Colour::rgba(0x12, 0x34, 0x56, 0xAB));
        assert_eq!(colour.to_hex(), 0x1234_56AB);
    }

    #[test]
    fn test_colour_lerp() {
        let mid = Colour::BLACK.lerp(Colour::WHITE, 0.5);
        assert_eq!(mid.r, 128);
        assert_eq!(mid.a, 255);
        assert_eq!(Colour::BLACK.lerp(Colour::WHITE, 2.0), Colour::WHITE);
    }

    #[test]
    fn test_colour_to_array() {
        let arr = Colour::rgba(255, 0, 0, 255).to_array();
        assert!((arr[0] - 1.0).abs() < 0.001);
        assert!(arr[1].abs() < 0.001);
    }
}
