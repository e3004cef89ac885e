//! One race, from the start line to the finish
//!
//! A session owns everything that lives for a single race: the simulation,
//! its own progress store and the chase camera. Ending a race is dropping the
//! session; starting a new one builds fresh state from a `RaceSetup`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::{CameraController, track_to_world};
use crate::catalog::CharacterProfile;
use crate::error::ConfigError;
use crate::input::InputIntent;
use crate::settings::Settings;
use crate::sim::{RaceEvent, RaceSessionState, RaceSimulation, clamp_dt};
use crate::store::{RaceSessionStore, RaceSetup};

/// What the render layer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub vehicle_position: Vec3,
    pub heading: f32,
    pub speed: f32,
    pub camera_position: Vec3,
    pub look_at: Vec3,
    pub current_lap: u32,
    pub total_laps: u32,
    pub finished: bool,
}

/// A running race
pub struct RaceSession {
    sim: RaceSimulation,
    progress: RaceSessionStore,
    camera: CameraController,
    character: CharacterProfile,
    paused: bool,
}

impl RaceSession {
    /// Validate the setup and line up on the start line
    pub fn new(setup: &RaceSetup, settings: &Settings) -> Result<Self, ConfigError> {
        if setup.total_laps == 0 {
            return Err(ConfigError::InvalidLapCount(setup.total_laps));
        }
        settings.validate()?;
        let sim = RaceSimulation::new(setup.vehicle.clone(), setup.track.clone())?;
        let camera =
            CameraController::new(settings.camera, sim.vehicle.pos, sim.vehicle.heading);

        log::info!(
            "Race start: {} in {} on {} ({} laps)",
            setup.character.name,
            setup.vehicle.name,
            setup.track.name,
            setup.total_laps
        );

        Ok(Self {
            sim,
            progress: RaceSessionStore::new(RaceSessionState::new(setup.total_laps)),
            camera,
            character: setup.character.clone(),
            paused: false,
        })
    }

    /// Run one frame: tick the race, then ease the camera
    ///
    /// Paused sessions ignore frames entirely.
    pub fn frame(&mut self, dt: f32, input: InputIntent) -> Vec<RaceEvent> {
        if self.paused {
            return Vec::new();
        }
        let dt = clamp_dt(dt);
        let events = self.sim.tick(&mut self.progress, &input, dt);
        self.camera
            .update(self.sim.vehicle.pos, self.sim.vehicle.heading, dt);
        events
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.paused);
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if paused != self.paused {
            log::info!("Race {}", if paused { "paused" } else { "resumed" });
        }
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_finished(&self) -> bool {
        self.progress.get().finished
    }

    /// Race progress store, for UI subscriptions
    pub fn progress(&self) -> &RaceSessionStore {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut RaceSessionStore {
        &mut self.progress
    }

    pub fn simulation(&self) -> &RaceSimulation {
        &self.sim
    }

    pub fn simulation_mut(&mut self) -> &mut RaceSimulation {
        &mut self.sim
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn character(&self) -> &CharacterProfile {
        &self.character
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let vehicle = &self.sim.vehicle;
        let progress = self.progress.get();
        FrameSnapshot {
            vehicle_position: track_to_world(vehicle.pos),
            heading: vehicle.heading,
            speed: vehicle.forward_speed,
            camera_position: self.camera.position,
            look_at: self.camera.look_at,
            current_lap: progress.current_lap,
            total_laps: progress.total_laps,
            finished: progress.finished,
        }
    }
}
