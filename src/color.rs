//! Color values and the pure color helpers shared with the engine boundary
//!
//! Colors travel through configuration as `"#RRGGBB"` strings and through the
//! platform as packed `0xAARRGGBB` integers. Math is done on `glam::Vec3`.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Opaque 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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

    /// Unpack from `0xAARRGGBB`, ignoring alpha
    pub const fn from_argb(color: u32) -> Self {
        Self {
            r: ((color >> 16) & 0xFF) as u8,
            g: ((color >> 8) & 0xFF) as u8,
            b: (color & 0xFF) as u8,
        }
    }

    /// Pack as opaque `0xFFRRGGBB`
    pub const fn to_argb(self) -> u32 {
        0xFF00_0000 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Channels as 0..=255 floats
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r as f32, self.g as f32, self.b as f32)
    }

    /// Round and clamp 0..=255 float channels
    pub fn from_vec3(v: Vec3) -> Self {
        let c = v.round().clamp(Vec3::ZERO, Vec3::splat(255.0));
        Self::new(c.x as u8, c.y as u8, c.z as u8)
    }

    /// Parse `#RRGGBB` (leading `#` optional)
    pub fn parse_hex(s: &str) -> Result<Self, ConfigError> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 {
            return Err(ConfigError::InvalidColor(s.to_string()));
        }
        u32::from_str_radix(hex, 16)
            .map(Self::from_argb)
            .map_err(|_| ConfigError::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&s)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}

/// WCAG 2.0 relative luminance, 0.0 (black) to 1.0 (white)
pub fn relative_luminance(color: Rgb) -> f32 {
    let linear = (color.to_vec3() / 255.0).to_array().map(|c| {
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    });
    Vec3::from_array(linear).dot(Vec3::new(0.2126, 0.7152, 0.0722))
}

/// Black or white, whichever contrasts more with `color`
pub fn text_color_for(color: Rgb) -> Rgb {
    // Luminance where contrast against black equals contrast against white
    let threshold = 0.0525_f32.sqrt() - 0.05;
    if relative_luminance(color) > threshold {
        Rgb::BLACK
    } else {
        Rgb::WHITE
    }
}

/// Palette slot for a ball of the given size class.
///
/// Size class 1 (the "2" ball) takes the first color; larger classes walk up
/// the palette and stay on the last color once it is reached.
pub fn ball_color_index(size_class: u32, palette_len: usize) -> usize {
    if palette_len == 0 {
        return 0;
    }
    (size_class.saturating_sub(1) as usize).min(palette_len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_argb_round_trip() {
        let c = Rgb::from_argb(0x80_12_34_56);
        assert_eq!(c, Rgb::new(0x12, 0x34, 0x56));
        assert_eq!(c.to_argb(), 0xFF12_3456);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgb::parse_hex("#FF8000").unwrap(), Rgb::new(255, 128, 0));
        assert_eq!(Rgb::parse_hex("00ff00").unwrap(), Rgb::new(0, 255, 0));
        assert!(Rgb::parse_hex("#FFF").is_err());
        assert!(Rgb::parse_hex("#GG0000").is_err());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Rgb::new(1, 2, 255)).unwrap();
        assert_eq!(json, "\"#0102FF\"");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgb::new(1, 2, 255));
        assert!(serde_json::from_str::<Rgb>("\"blue\"").is_err());
    }

    #[test]
    fn test_text_color_contrast() {
        assert_eq!(text_color_for(Rgb::WHITE), Rgb::BLACK);
        assert_eq!(text_color_for(Rgb::BLACK), Rgb::WHITE);
        assert_eq!(text_color_for(Rgb::new(255, 255, 0)), Rgb::BLACK);
        assert_eq!(text_color_for(Rgb::new(0, 0, 160)), Rgb::WHITE);
    }

    #[test]
    fn test_ball_color_index_small_classes() {
        assert_eq!(ball_color_index(0, 5), 0);
        assert_eq!(ball_color_index(1, 5), 0);
        assert_eq!(ball_color_index(2, 5), 1);
        assert_eq!(ball_color_index(5, 5), 4);
        assert_eq!(ball_color_index(11, 5), 4);
        assert_eq!(ball_color_index(3, 0), 0);
    }

    proptest! {
        #[test]
        fn prop_ball_color_index_in_bounds(size in 0u32..10_000, len in 1usize..64) {
            prop_assert!(ball_color_index(size, len) < len);
        }

        #[test]
        fn prop_ball_color_index_never_decreases(size in 0u32..10_000, len in 1usize..64) {
            prop_assert!(ball_color_index(size + 1, len) >= ball_color_index(size, len));
        }
    }
}
