//! Game settings and preferences
//!
//! Persisted as JSON next to the engine's data. Read once at session start;
//! the session never writes them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::achievement::{AchievementTexts, BallPalette};
use crate::color::Rgb;
use crate::error::ConfigError;
use crate::gauge::{ColorStop, ColorStops};
use crate::platform::DeviceCapabilities;

/// Day/night theme selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Follow the system setting
    #[default]
    System,
    Day,
    Night,
    /// Switch by time of day
    Auto,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::System => "System",
            Theme::Day => "Day",
            Theme::Night => "Night",
            Theme::Auto => "Auto",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "system" => Some(Theme::System),
            "day" | "light" => Some(Theme::Day),
            "night" | "dark" => Some(Theme::Night),
            "auto" => Some(Theme::Auto),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tilt-driven input instead of swipes and keys
    pub gravity: bool,
    pub theme: Theme,

    // === Presentation tables ===
    /// Pressure gauge gradient, low to high
    pub pressure_colors: Vec<ColorStop>,
    /// Ball colors by size class
    pub ball_colors: Vec<Rgb>,
    /// Achievement popup texts by size class; the last one repeats
    pub achievement_texts: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity: false,
            theme: Theme::System,

            pressure_colors: vec![
                ColorStop::new(0.0, Rgb::new(0x4C, 0xAF, 0x50)),
                ColorStop::new(50.0, Rgb::new(0xFF, 0xC1, 0x07)),
                ColorStop::new(100.0, Rgb::new(0xF4, 0x43, 0x36)),
            ],
            ball_colors: [
                0xEEE4DA, 0xEDE0C8, 0xF2B179, 0xF59563, 0xF67C5F, 0xF65E3B, 0xEDCF72, 0xEDCC61,
                0xEDC850, 0xEDC53F, 0xEDC22E, 0x3C3A32,
            ]
            .into_iter()
            .map(Rgb::from_argb)
            .collect(),
            achievement_texts: [
                "Nothing yet",
                "First ball",
                "Getting started",
                "Warming up",
                "Nice merge",
                "Rolling",
                "Heavy hitter",
                "Big ball",
                "Huge ball",
                "Massive",
                "Almost there",
                "You made 2048!",
                "Beyond 2048",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl Settings {
    /// Gravity mode actually usable on this device
    pub fn effective_gravity(&self, caps: &DeviceCapabilities) -> bool {
        self.gravity && caps.has_accelerometer
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Settings saved");
        Ok(())
    }
}

/// Validated presentation tables
#[derive(Debug, Clone, PartialEq)]
pub struct Resources {
    pub pressure_colors: ColorStops,
    pub ball_colors: BallPalette,
    pub achievement_texts: AchievementTexts,
}

impl Resources {
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        Ok(Self {
            pressure_colors: ColorStops::new(settings.pressure_colors.clone())?,
            ball_colors: BallPalette::new(settings.ball_colors.clone())?,
            achievement_texts: AchievementTexts::new(settings.achievement_texts.clone())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("merge-shell-settings-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_defaults_are_valid_resources() {
        let res = Resources::from_settings(&Settings::default()).unwrap();
        assert_eq!(res.pressure_colors.len(), 3);
        assert_eq!(res.ball_colors.len(), 12);
        assert_eq!(res.achievement_texts.text_for(11), "You made 2048!");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "gravity": true, "theme": "night" }"#).unwrap();
        assert!(settings.gravity);
        assert_eq!(settings.theme, Theme::Night);
        assert_eq!(settings.ball_colors, Settings::default().ball_colors);
    }

    #[test]
    fn test_stops_from_json() {
        let settings: Settings = serde_json::from_str(
            r##"{ "pressure_colors": [
                { "position": 0, "color": "#000000" },
                { "position": 100, "color": "#FFFFFF" }
            ] }"##,
        )
        .unwrap();
        let res = Resources::from_settings(&settings).unwrap();
        assert_eq!(res.pressure_colors.first(), Rgb::BLACK);
        assert_eq!(res.pressure_colors.last(), Rgb::WHITE);
    }

    #[test]
    fn test_single_stop_is_fatal() {
        let settings = Settings {
            pressure_colors: vec![ColorStop::new(0.0, Rgb::BLACK)],
            ..Settings::default()
        };
        assert_eq!(
            Resources::from_settings(&settings),
            Err(ConfigError::NotEnoughColorStops(1))
        );
    }

    #[test]
    fn test_gravity_needs_accelerometer() {
        let settings = Settings {
            gravity: true,
            ..Settings::default()
        };
        assert!(settings.effective_gravity(&DeviceCapabilities::default()));
        assert!(!settings.effective_gravity(&DeviceCapabilities {
            has_accelerometer: false
        }));
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_file("save_then_load.json");
        let settings = Settings {
            gravity: true,
            theme: Theme::Day,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_or_broken_file_gives_defaults() {
        assert_eq!(
            Settings::load(&temp_file("does_not_exist.json")),
            Settings::default()
        );
        let path = temp_file("broken.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_theme_names() {
        assert_eq!(Theme::from_str("Dark"), Some(Theme::Night));
        assert_eq!(Theme::from_str("bogus"), None);
        assert_eq!(Theme::Auto.as_str(), "Auto");
    }
}
