//! Pressure gauge coloring
//!
//! The gauge fill is a gradient through an ordered table of color stops.
//! Stops are spaced evenly by index; their positions only have to be ordered.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::ConfigError;

/// One entry of a gradient table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f32,
    pub color: Rgb,
}

impl ColorStop {
    pub const fn new(position: f32, color: Rgb) -> Self {
        Self { position, color }
    }
}

/// Validated gradient table: at least two stops, strictly increasing positions
#[derive(Debug, Clone, PartialEq)]
pub struct ColorStops {
    stops: Vec<ColorStop>,
}

impl ColorStops {
    pub fn new(stops: Vec<ColorStop>) -> Result<Self, ConfigError> {
        if stops.len() < 2 {
            return Err(ConfigError::NotEnoughColorStops(stops.len()));
        }
        for (index, pair) in stops.windows(2).enumerate() {
            // Written so NaN positions fail too
            if !(pair[1].position > pair[0].position) {
                return Err(ConfigError::UnorderedColorStops {
                    index: index + 1,
                    position: pair[1].position,
                });
            }
        }
        Ok(Self { stops })
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Never true for a validated table
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn first(&self) -> Rgb {
        self.stops[0].color
    }

    pub fn last(&self) -> Rgb {
        self.stops[self.stops.len() - 1].color
    }

    pub fn as_slice(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Color at `percent` (0.0..=1.0) along the table
    pub fn interpolate(&self, percent: f32) -> Rgb {
        interpolate(percent, self)
    }
}

/// Map `percent` through `stops`.
///
/// Out-of-range input is clamped; NaN reads as 0.
pub fn interpolate(percent: f32, stops: &ColorStops) -> Rgb {
    let percent = if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 1.0)
    };
    let n = stops.len();
    let idx = percent * (n - 1) as f32;
    let i = (idx.floor() as usize).min(n - 2);
    let frac = idx - i as f32;

    let from = stops.stops[i].color.to_vec3();
    let to = stops.stops[i + 1].color.to_vec3();
    Rgb::from_vec3(from.lerp(to, frac))
}

/// Gauge input from an engine pressure reading (0..=100)
pub fn pressure_percent(pressure: u8) -> f32 {
    f32::from(pressure.min(100)) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn black_red_white() -> ColorStops {
        ColorStops::new(vec![
            ColorStop::new(0.0, Rgb::BLACK),
            ColorStop::new(50.0, Rgb::new(255, 0, 0)),
            ColorStop::new(100.0, Rgb::WHITE),
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_short_tables() {
        assert_eq!(
            ColorStops::new(vec![]),
            Err(ConfigError::NotEnoughColorStops(0))
        );
        assert_eq!(
            ColorStops::new(vec![ColorStop::new(0.0, Rgb::BLACK)]),
            Err(ConfigError::NotEnoughColorStops(1))
        );
    }

    #[test]
    fn test_rejects_unordered_positions() {
        let result = ColorStops::new(vec![
            ColorStop::new(0.0, Rgb::BLACK),
            ColorStop::new(60.0, Rgb::WHITE),
            ColorStop::new(60.0, Rgb::BLACK),
        ]);
        assert!(matches!(
            result,
            Err(ConfigError::UnorderedColorStops { index: 2, .. })
        ));
    }

    #[test]
    fn test_endpoints_are_exact() {
        let stops = black_red_white();
        assert_eq!(stops.interpolate(0.0), Rgb::BLACK);
        assert_eq!(stops.interpolate(1.0), Rgb::WHITE);
        assert_eq!(stops.interpolate(0.5), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_quarter_is_halfway_black_to_red() {
        let c = black_red_white().interpolate(0.25);
        assert!(c.r == 127 || c.r == 128, "r = {}", c.r);
        assert_eq!((c.g, c.b), (0, 0));
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        let stops = black_red_white();
        assert_eq!(stops.interpolate(-3.0), Rgb::BLACK);
        assert_eq!(stops.interpolate(7.0), Rgb::WHITE);
        assert_eq!(stops.interpolate(f32::NAN), Rgb::BLACK);
    }

    #[test]
    fn test_pressure_percent() {
        assert_eq!(pressure_percent(0), 0.0);
        assert_eq!(pressure_percent(50), 0.5);
        assert_eq!(pressure_percent(100), 1.0);
        assert_eq!(pressure_percent(250), 1.0);
    }

    fn arb_rgb() -> impl Strategy<Value = Rgb> {
        any::<(u8, u8, u8)>().prop_map(|(r, g, b)| Rgb::new(r, g, b))
    }

    fn between(v: u8, a: u8, b: u8) -> bool {
        v >= a.min(b) && v <= a.max(b)
    }

    proptest! {
        #[test]
        fn prop_result_within_bracketing_stops(
            colors in prop::collection::vec(arb_rgb(), 2..8),
            percent in 0.0f32..=1.0,
        ) {
            let n = colors.len();
            let stops = ColorStops::new(
                colors.iter().enumerate().map(|(i, c)| ColorStop::new(i as f32, *c)).collect(),
            ).unwrap();
            let c = stops.interpolate(percent);

            let i = ((percent * (n - 1) as f32).floor() as usize).min(n - 2);
            let (a, b) = (colors[i], colors[i + 1]);
            prop_assert!(between(c.r, a.r, b.r));
            prop_assert!(between(c.g, a.g, b.g));
            prop_assert!(between(c.b, a.b, b.b));
        }

        #[test]
        fn prop_endpoints(colors in prop::collection::vec(arb_rgb(), 2..8)) {
            let stops = ColorStops::new(
                colors.iter().enumerate().map(|(i, c)| ColorStop::new(i as f32, *c)).collect(),
            ).unwrap();
            prop_assert_eq!(stops.interpolate(0.0), colors[0]);
            prop_assert_eq!(stops.interpolate(1.0), colors[colors.len() - 1]);
        }
    }
}
