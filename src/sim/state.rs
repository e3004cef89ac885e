//! Race state and simulation events
//!
//! `VehicleState` is owned by the simulation and mutated in place each tick.
//! `RaceSessionState` is the display-facing progress record shared through a store.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::track::TrackProfile;
use crate::polar_to_cartesian;

/// Which ring wall a vehicle touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallSide {
    Inner,
    Outer,
}

/// Things that happened during a tick, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RaceEvent {
    /// Vehicle was pushed back onto the ring
    WallContact { side: WallSide },
    /// Boost pad fired, with the resulting speed
    Boost { speed: f32 },
    /// Vehicle passed the half-lap point
    CheckpointArmed,
    /// A lap was completed; `lap` is the new current lap
    LapCompleted { lap: u32 },
    /// Final lap completed (emitted once per session)
    Finished,
}

/// Kinematic state of the player's kart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleState {
    /// Position on the track plane (x, z)
    pub pos: Vec2,
    /// Heading (radians, 0 = +x, increasing toward +z)
    pub heading: f32,
    /// Signed speed along the heading (negative = reverse)
    pub forward_speed: f32,
    /// Simulation time of the last boost
    pub last_boost_at: Option<f32>,
    /// Ring angle at the end of the previous tick
    pub last_angle: f32,
    /// Set once the half-lap point has been passed since the last lap
    pub checkpoint_armed: bool,
}

impl VehicleState {
    /// Place a stationary kart on the start line, facing along the ring
    pub fn on_start_line(track: &TrackProfile) -> Self {
        let start_angle = 0.0;
        Self {
            pos: polar_to_cartesian(track.centerline_radius(), start_angle),
            heading: start_angle + std::f32::consts::FRAC_PI_2,
            forward_speed: 0.0,
            last_boost_at: None,
            last_angle: start_angle,
            checkpoint_armed: false,
        }
    }

    /// Unit vector along the heading
    #[inline]
    pub fn forward(&self) -> Vec2 {
        Vec2::new(self.heading.cos(), self.heading.sin())
    }

    /// Current ring angle in (-π, π]
    #[inline]
    pub fn ring_angle(&self) -> f32 {
        self.pos.y.atan2(self.pos.x)
    }

    /// Whether the boost cooldown has elapsed at time `now`
    pub fn boost_ready(&self, now: f32, cooldown: f32) -> bool {
        self.last_boost_at.is_none_or(|t| now - t > cooldown)
    }
}

/// Cross-tick race progress observed by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceSessionState {
    /// Lap being driven (starts at 1)
    pub current_lap: u32,
    /// Laps needed to finish
    pub total_laps: u32,
    /// Latched once the final lap is completed
    pub finished: bool,
}

impl RaceSessionState {
    pub fn new(total_laps: u32) -> Self {
        Self {
            current_lap: 1,
            total_laps,
            finished: false,
        }
    }

    /// Lap number to display (never past the last lap)
    pub fn display_lap(&self) -> u32 {
        self.current_lap.min(self.total_laps)
    }
}
