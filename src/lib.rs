//! Stadium Kart - Arcade kart racing on ring-shaped stadium tracks
//!
//! Core modules:
//! - `sim`: Race simulation (vehicle physics, ring walls, boost pads, laps)
//! - `camera`: Trailing chase camera
//! - `input`: Keyboard/touch input normalized to steering intents
//! - `store`: Observable selection and race-progress records
//! - `session`: One race from start line to finish
//! - `catalog`: Built-in characters, vehicles and tracks
//! - `hud`: FPS readout
//! - `platform`: Browser/native platform abstraction

pub mod camera;
pub mod catalog;
pub mod demo;
pub mod error;
pub mod hud;
pub mod input;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod store;

pub use catalog::{Catalog, CharacterProfile};
pub use error::ConfigError;
pub use session::{FrameSnapshot, RaceSession};
pub use settings::{CameraTuning, Settings};

use glam::Vec2;

/// Race tuning constants
pub mod consts {
    /// Longest step a single tick may integrate (seconds)
    pub const MAX_TICK_DT: f32 = 0.05;

    /// Throttle gain applied to vehicle acceleration
    pub const THROTTLE_GAIN: f32 = 0.6;
    /// Coast friction as a fraction of throttle gain
    pub const COAST_FRICTION: f32 = 0.4;
    /// Brake gain applied to vehicle acceleration
    pub const BRAKE_GAIN: f32 = 0.8;
    /// Reverse speed limit as a fraction of max speed
    pub const REVERSE_LIMIT: f32 = 0.3;

    /// Heading change rate at full steering strength (radians/s)
    pub const STEER_RATE: f32 = 1.8;
    /// Steering authority available at rest
    pub const STEER_FLOOR: f32 = 0.1;

    /// Speed kept after hitting a ring wall
    pub const WALL_RESTITUTION: f32 = 0.6;
    /// Below this radius the vehicle has no defined radial direction
    pub const RADIUS_EPSILON: f32 = 1e-6;

    /// Seconds of simulated time between boosts (per vehicle)
    pub const BOOST_COOLDOWN: f32 = 1.0;
    /// Speed added by a boost pad
    pub const BOOST_IMPULSE: f32 = 8.0;
    /// Boosted speed cap as a multiple of max speed
    pub const BOOST_SPEED_CAP: f32 = 1.2;
    /// Pad radial tolerance as a fraction of ring width
    pub const BOOST_LANE_FRACTION: f32 = 1.0 / 3.0;
    /// Start-line radial tolerance as a fraction of ring width
    pub const START_LINE_LANE_FRACTION: f32 = 0.5;

    /// Chase camera defaults
    pub const CAMERA_DISTANCE: f32 = 8.0;
    pub const CAMERA_HEIGHT: f32 = 4.0;
    pub const CAMERA_LOOK_HEIGHT: f32 = 1.0;
    /// Fraction of the camera gap left after one second of smoothing
    pub const CAMERA_SMOOTHING_BASE: f32 = 0.001;
}

/// Normalized angle to [-π, π)
///
/// Constant time for any finite input; non-finite angles map to 0.
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if !angle.is_finite() {
        return 0.0;
    }
    if (-PI..PI).contains(&angle) {
        return angle;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid can round up to TAU itself
    if wrapped >= PI { -PI } else { wrapped }
}

/// Convert polar (r, theta) to track-plane cartesian (x, z)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert track-plane cartesian (x, z) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
