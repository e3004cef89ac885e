//! Game settings and preferences
//!
//! Supplied by the host page as JSON; every field is optional and falls back
//! to the defaults in `consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::platform::Platform;

/// Chase camera placement and smoothing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Distance behind the kart
    pub distance: f32,
    /// Height above the track
    pub height: f32,
    /// Height of the look-at point above the kart
    pub look_height: f32,
    /// Fraction of the remaining gap left after one second (0..1)
    pub smoothing_base: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            distance: CAMERA_DISTANCE,
            height: CAMERA_HEIGHT,
            look_height: CAMERA_LOOK_HEIGHT,
            smoothing_base: CAMERA_SMOOTHING_BASE,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Chase camera tuning
    pub camera: CameraTuning,
    /// Force an input platform instead of detecting it
    pub platform: Option<Platform>,
    /// Show the FPS counter in the HUD
    pub show_fps: bool,
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let cam = &self.camera;
        if ![cam.distance, cam.height, cam.look_height].iter().all(|v| v.is_finite()) {
            return Err(ConfigError::InvalidSettings("camera offsets must be finite"));
        }
        if cam.distance < 0.0 {
            return Err(ConfigError::InvalidSettings("camera distance must not be negative"));
        }
        if !(cam.smoothing_base > 0.0 && cam.smoothing_base < 1.0) {
            return Err(ConfigError::InvalidSettings(
                "camera smoothing_base must be between 0 and 1",
            ));
        }
        Ok(())
    }

    /// Platform override, or whatever the host detects
    pub fn effective_platform(&self, detected: Platform) -> Platform {
        self.platform.unwrap_or(detected)
    }
}
