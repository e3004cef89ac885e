//! Trailing chase camera
//!
//! World space is y-up; the track plane is (x, z), so a track-plane `Vec2`
//! maps to `Vec3::new(p.x, 0.0, p.y)`.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::settings::CameraTuning;

/// Lift a track-plane position into world space
#[inline]
pub fn track_to_world(p: Vec2) -> Vec3 {
    Vec3::new(p.x, 0.0, p.y)
}

/// Camera that eases toward a point behind the kart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraController {
    tuning: CameraTuning,
    /// Current camera position
    pub position: Vec3,
    /// Point the camera looks at
    pub look_at: Vec3,
}

impl CameraController {
    /// Create a camera already sitting at its target behind the kart
    pub fn new(tuning: CameraTuning, vehicle_pos: Vec2, heading: f32) -> Self {
        let mut camera = Self {
            tuning,
            position: Vec3::ZERO,
            look_at: Vec3::ZERO,
        };
        camera.snap_to(vehicle_pos, heading);
        camera
    }

    /// Where the camera wants to be for a given kart pose
    pub fn desired_position(&self, vehicle_pos: Vec2, heading: f32) -> Vec3 {
        let forward = Vec3::new(heading.cos(), 0.0, heading.sin());
        track_to_world(vehicle_pos) - forward * self.tuning.distance
            + Vec3::Y * self.tuning.height
    }

    fn target_look_at(&self, vehicle_pos: Vec2) -> Vec3 {
        track_to_world(vehicle_pos) + Vec3::Y * self.tuning.look_height
    }

    /// Jump straight to the target pose (session start, respawn)
    pub fn snap_to(&mut self, vehicle_pos: Vec2, heading: f32) {
        self.position = self.desired_position(vehicle_pos, heading);
        self.look_at = self.target_look_at(vehicle_pos);
    }

    /// Frame-rate independent blend factor for a step of `dt` seconds
    pub fn smoothing_factor(&self, dt: f32) -> f32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0.0;
        }
        1.0 - self.tuning.smoothing_base.powf(dt)
    }

    /// Ease toward the kart; the look-at point always tracks it exactly
    pub fn update(&mut self, vehicle_pos: Vec2, heading: f32, dt: f32) {
        let target = self.desired_position(vehicle_pos, heading);
        let t = self.smoothing_factor(dt);
        self.position = self.position.lerp(target, t);
        self.look_at = self.target_look_at(vehicle_pos);
    }
}
