//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Device capabilities (accelerometer present or not)
//! - Display rotation
//! - Storage path resolution

use std::path::Path;

/// What the device can do, probed once per process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceCapabilities {
    pub has_accelerometer: bool,
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        Self {
            has_accelerometer: true,
        }
    }
}

/// Display rotation relative to the natural orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayRotation {
    #[default]
    Rotation0,
    Rotation90,
    Rotation180,
    Rotation270,
}

impl DisplayRotation {
    pub fn degrees(self) -> u16 {
        match self {
            DisplayRotation::Rotation0 => 0,
            DisplayRotation::Rotation90 => 90,
            DisplayRotation::Rotation180 => 180,
            DisplayRotation::Rotation270 => 270,
        }
    }

    /// Nearest quarter turn
    pub fn from_degrees(degrees: i32) -> Self {
        match ((degrees as f32 / 90.0).round() as i32).rem_euclid(4) {
            1 => DisplayRotation::Rotation90,
            2 => DisplayRotation::Rotation180,
            3 => DisplayRotation::Rotation270,
            _ => DisplayRotation::Rotation0,
        }
    }
}

/// Canonical data directory for the engine's save files.
///
/// An unresolvable directory is logged and replaced by an empty path; the
/// engine then runs without persistent storage.
pub fn resolve_storage_path(dir: Option<&Path>) -> String {
    let Some(dir) = dir else {
        log::error!("Could not get data directory: none provided");
        return String::new();
    };
    match dir.canonicalize() {
        Ok(path) => path.to_string_lossy().into_owned(),
        Err(e) => {
            log::error!("Could not get data directory {}: {}", dir.display(), e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_from_degrees() {
        assert_eq!(DisplayRotation::from_degrees(0), DisplayRotation::Rotation0);
        assert_eq!(DisplayRotation::from_degrees(90), DisplayRotation::Rotation90);
        assert_eq!(DisplayRotation::from_degrees(-90), DisplayRotation::Rotation270);
        assert_eq!(DisplayRotation::from_degrees(450), DisplayRotation::Rotation90);
        assert_eq!(DisplayRotation::Rotation180.degrees(), 180);
    }

    #[test]
    fn test_storage_path_resolves_existing_dir() {
        let dir = std::env::temp_dir();
        let resolved = resolve_storage_path(Some(&dir));
        assert!(!resolved.is_empty());
        assert_eq!(Path::new(&resolved), dir.canonicalize().unwrap());
    }

    #[test]
    fn test_storage_path_falls_back_to_empty() {
        let missing = std::env::temp_dir().join("merge-shell-no-such-dir/inner");
        assert_eq!(resolve_storage_path(Some(&missing)), "");
        assert_eq!(resolve_storage_path(None), "");
    }
}
