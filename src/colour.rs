//! Colour type and CSS serialization.

use std::fmt;

use palette::{Hsl, IntoColor, Srgb};
use serde::{Serialize, Serializer};

/// An RGB colour with a fractional alpha channel.
///
/// Channels are 8-bit. Alpha is a fraction in `[0.0, 1.0]` so the fixed
/// design alphas survive into the serialized `rgba(...)` form unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Colour {
    /// Create a new colour from RGB components and an alpha fraction.
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Replace the alpha fraction, clamped to `[0.0, 1.0]`.
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Build an opaque colour from HSL components.
    ///
    /// Hue is in degrees and wraps; saturation and lightness are clamped
    /// to `[0.0, 1.0]`.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let hsl = Hsl::new(h.rem_euclid(360.0), s.clamp(0.0, 1.0), l.clamp(0.0, 1.0));
        let rgb: Srgb<f32> = hsl.into_color();
        Self::rgb(
            (rgb.red * 255.0).round() as u8,
            (rgb.green * 255.0).round() as u8,
            (rgb.blue * 255.0).round() as u8,
        )
    }

    /// Decompose into HSL components, hue in `[0.0, 360.0)` degrees.
    pub fn to_hsl(self) -> (f32, f32, f32) {
        let rgb = Srgb::new(
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        );
        let hsl: Hsl = rgb.into_color();
        (
            hsl.hue.into_positive_degrees(),
            hsl.saturation,
            hsl.lightness,
        )
    }

    /// Check if the colour is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }

    /// Serialize to a CSS colour value.
    ///
    /// Opaque colours render as lowercase `#rrggbb`; translucent ones as
    /// `rgba(r, g, b, a)` with a two-decimal alpha.
    pub fn css(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "rgba({}, {}, {}, {:.2})",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

impl Serialize for Colour {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
