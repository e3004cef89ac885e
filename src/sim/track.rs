//! Ring track geometry
//!
//! A stadium track is an annulus around the origin of the track plane:
//! - inner_radius / outer_radius: the two walls
//! - centerline: midway between the walls, where the start line sits
//! - boost windows: angular sectors near the centerline that speed karts up

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BOOST_LANE_FRACTION, START_LINE_LANE_FRACTION};
use crate::error::ConfigError;
use crate::normalize_angle;

/// Cosmetic stadium theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrackTheme {
    #[default]
    Neon,
    Desert,
    Frost,
    Jungle,
}

impl TrackTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackTheme::Neon => "Neon",
            TrackTheme::Desert => "Desert",
            TrackTheme::Frost => "Frost",
            TrackTheme::Jungle => "Jungle",
        }
    }
}

/// An angular sector of the ring that grants a boost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoostWindow {
    /// Sector center (radians, normalized to [-π, π))
    pub center_angle: f32,
    /// Half of the sector's angular extent (radians)
    pub half_width: f32,
}

impl BoostWindow {
    pub fn new(center_angle: f32, half_width: f32) -> Self {
        Self {
            center_angle: normalize_angle(center_angle),
            half_width,
        }
    }

    /// Shortest angular distance from the window center (handles wraparound)
    pub fn angular_distance(&self, theta: f32) -> f32 {
        normalize_angle(theta - self.center_angle).abs()
    }

    /// Check if an angle is strictly within the window
    pub fn contains_angle(&self, theta: f32) -> bool {
        self.angular_distance(theta) < self.half_width
    }
}

/// Immutable ring track description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackProfile {
    pub id: String,
    pub name: String,
    pub theme: TrackTheme,
    pub inner_radius: f32,
    pub outer_radius: f32,
    #[serde(default)]
    pub boost_windows: Vec<BoostWindow>,
}

impl TrackProfile {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        theme: TrackTheme,
        inner_radius: f32,
        outer_radius: f32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            theme,
            inner_radius,
            outer_radius,
            boost_windows: Vec::new(),
        }
    }

    /// Add a boost window (builder style)
    pub fn with_boost(mut self, center_angle: f32, half_width: f32) -> Self {
        self.boost_windows
            .push(BoostWindow::new(center_angle, half_width));
        self
    }

    /// Reject degenerate rings and windows
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |reason| {
            Err(ConfigError::InvalidTrack {
                id: self.id.clone(),
                reason,
            })
        };
        if !(self.inner_radius.is_finite() && self.outer_radius.is_finite()) {
            return fail("radii must be finite");
        }
        if self.inner_radius <= 0.0 {
            return fail("inner_radius must be positive");
        }
        if self.inner_radius >= self.outer_radius {
            return fail("inner_radius must be below outer_radius");
        }
        for (index, window) in self.boost_windows.iter().enumerate() {
            if !window.center_angle.is_finite() {
                return Err(ConfigError::InvalidBoostWindow {
                    id: self.id.clone(),
                    index,
                    reason: "center_angle must be finite",
                });
            }
            if !(window.half_width.is_finite() && window.half_width > 0.0) {
                return Err(ConfigError::InvalidBoostWindow {
                    id: self.id.clone(),
                    index,
                    reason: "half_width must be positive",
                });
            }
        }
        Ok(())
    }

    /// Radius of the driving line midway between the walls
    #[inline]
    pub fn centerline_radius(&self) -> f32 {
        (self.inner_radius + self.outer_radius) / 2.0
    }

    /// Radial extent of the drivable surface
    #[inline]
    pub fn width(&self) -> f32 {
        self.outer_radius - self.inner_radius
    }

    /// Distance of a radius from the centerline
    #[inline]
    pub fn lane_offset(&self, r: f32) -> f32 {
        (r - self.centerline_radius()).abs()
    }

    /// Whether a radius is close enough to the centerline to use a boost pad
    pub fn in_boost_lane(&self, r: f32) -> bool {
        self.lane_offset(r) <= self.width() * BOOST_LANE_FRACTION
    }

    /// Whether a radius is close enough to the centerline to cross the start line
    pub fn in_start_lane(&self, r: f32) -> bool {
        self.lane_offset(r) <= self.width() * START_LINE_LANE_FRACTION
    }

    /// First boost window containing the point (r, theta), if any
    pub fn boost_window_at(&self, r: f32, theta: f32) -> Option<&BoostWindow> {
        if !self.in_boost_lane(r) {
            return None;
        }
        self.boost_windows.iter().find(|w| w.contains_angle(theta))
    }

    /// Check if a point (in cartesian) is on the drivable surface
    pub fn contains_point(&self, point: Vec2) -> bool {
        let r = point.length();
        r >= self.inner_radius && r <= self.outer_radius
    }
}
