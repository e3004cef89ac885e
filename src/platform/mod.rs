//! Platform abstraction layer
//!
//! Decides which input scheme a session uses:
//! - Desktop: keyboard (arrows / WASD)
//! - Mobile: on-screen touch zones
//!
//! Detection only runs in the browser; native builds always report Desktop.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Input platform a race is driven from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Platform {
    #[default]
    Desktop,
    Mobile,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Desktop => "Desktop",
            Platform::Mobile => "Mobile",
        }
    }

    /// Guess the platform from a browser user agent and touch point count
    pub fn from_user_agent(user_agent: &str, max_touch_points: i32) -> Self {
        let ua = user_agent.to_lowercase();
        let mobile_ua = ["android", "iphone", "ipad", "ipod", "mobile"]
            .iter()
            .any(|needle| ua.contains(needle));
        // iPadOS reports a desktop Safari UA but exposes touch points
        let touch_mac = ua.contains("macintosh") && max_touch_points > 1;
        if mobile_ua || touch_mac {
            Platform::Mobile
        } else {
            Platform::Desktop
        }
    }

    /// Detect the platform of the running browser
    #[cfg(target_arch = "wasm32")]
    pub fn detect() -> Self {
        let Some(navigator) = web_sys::window().map(|w| w.navigator()) else {
            log::warn!("No window, assuming desktop input");
            return Platform::Desktop;
        };
        let ua = navigator.user_agent().unwrap_or_default();
        let platform = Self::from_user_agent(&ua, navigator.max_touch_points());
        log::info!("Detected {} platform", platform.as_str());
        platform
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn detect() -> Self {
        Platform::Desktop
    }
}

impl FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "desktop" | "keyboard" => Ok(Platform::Desktop),
            "mobile" | "touch" => Ok(Platform::Mobile),
            _ => Err(ConfigError::UnknownEntry {
                kind: "platform",
                id: s.to_string(),
            }),
        }
    }
}
