//! The race simulation: one kart on one ring track

use serde::Serialize;

use super::state::{RaceEvent, VehicleState};
use super::tick::tick;
use super::track::TrackProfile;
use super::vehicle::VehicleProfile;
use crate::error::ConfigError;
use crate::input::InputIntent;
use crate::store::RaceSessionStore;

/// Vehicle and track configuration plus the kart's live state
///
/// Serialize-only: a simulation is always built through `new`, which
/// validates its configuration.
#[derive(Debug, Clone, Serialize)]
pub struct RaceSimulation {
    pub(crate) profile: VehicleProfile,
    pub(crate) track: TrackProfile,
    /// Kart state, mutated in place by `tick`
    pub vehicle: VehicleState,
    /// Simulated seconds since the start
    pub(crate) elapsed: f32,
    /// Simulation tick counter
    pub(crate) ticks: u64,
}

impl RaceSimulation {
    /// Validate the configuration and put the kart on the start line
    pub fn new(profile: VehicleProfile, track: TrackProfile) -> Result<Self, ConfigError> {
        profile.validate()?;
        track.validate()?;
        let vehicle = VehicleState::on_start_line(&track);
        Ok(Self {
            profile,
            track,
            vehicle,
            elapsed: 0.0,
            ticks: 0,
        })
    }

    /// Advance by one frame (see `sim::tick`)
    pub fn tick(
        &mut self,
        progress: &mut RaceSessionStore,
        input: &InputIntent,
        dt: f32,
    ) -> Vec<RaceEvent> {
        tick(self, progress, input, dt)
    }

    pub fn profile(&self) -> &VehicleProfile {
        &self.profile
    }

    pub fn track(&self) -> &TrackProfile {
        &self.track
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
