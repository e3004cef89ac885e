//! Scripted driver for headless runs
//!
//! Follows the ring centerline counter-clockwise (the racing direction) by
//! steering toward the local tangent, with a small correction back toward the
//! centerline. Used by the native binary and by race tests.

use crate::input::{InputIntent, InputSource};
use crate::normalize_angle;
use crate::sim::{TrackProfile, VehicleState};

/// Heading error tolerated before steering (radians)
const STEER_DEADBAND: f32 = 0.02;
/// Heading error above which the autopilot lifts off the throttle
const LIFT_THRESHOLD: f32 = 0.35;
/// Max extra heading used to pull back toward the centerline
const LANE_CORRECTION: f32 = 0.4;

/// Autopilot that laps the ring
#[derive(Debug, Clone, Default)]
pub struct RingAutopilot {
    intent: InputIntent,
}

impl RingAutopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the held controls from the kart's current pose
    pub fn update(&mut self, vehicle: &VehicleState, track: &TrackProfile) {
        let r = vehicle.pos.length();
        let angle = vehicle.ring_angle();

        // Positive when outside the centerline; turning left heads inward
        let lane_error = (r - track.centerline_radius()) / (track.width() / 2.0);
        let correction = (lane_error * LANE_CORRECTION).clamp(-LANE_CORRECTION, LANE_CORRECTION);
        let desired = angle + std::f32::consts::FRAC_PI_2 + correction;
        let error = normalize_angle(desired - vehicle.heading);

        self.intent = InputIntent {
            steer_left: error > STEER_DEADBAND,
            steer_right: error < -STEER_DEADBAND,
            throttle: error.abs() < LIFT_THRESHOLD,
            brake: false,
        };
    }
}

impl InputSource for RingAutopilot {
    fn sample_intent(&self) -> InputIntent {
        self.intent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polar_to_cartesian;
    use crate::sim::TrackTheme;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn ring() -> TrackProfile {
        TrackProfile::new("ring", "Ring", TrackTheme::Neon, 12.0, 22.0)
    }

    #[test]
    fn test_on_line_full_throttle() {
        let mut pilot = RingAutopilot::new();
        let vehicle = VehicleState::on_start_line(&ring());
        pilot.update(&vehicle, &ring());
        let intent = pilot.sample_intent();
        assert!(intent.throttle);
        assert!(!intent.steer_left && !intent.steer_right);
    }

    #[test]
    fn test_turns_toward_tangent() {
        let mut pilot = RingAutopilot::new();
        let mut vehicle = VehicleState::on_start_line(&ring());
        // A quarter lap along, still facing the start heading
        vehicle.pos = polar_to_cartesian(17.0, FRAC_PI_2);
        vehicle.heading = FRAC_PI_2;
        pilot.update(&vehicle, &ring());
        assert!(pilot.sample_intent().steer_left);
        assert!(!pilot.sample_intent().throttle);

        vehicle.heading = PI + 0.2;
        pilot.update(&vehicle, &ring());
        assert!(pilot.sample_intent().steer_right);
    }
}
