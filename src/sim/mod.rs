//! Race simulation module
//!
//! All driving logic lives here. This module is pure and single-threaded:
//! - One tick per rendered frame, delta clamped to `MAX_TICK_DT`
//! - Simulated clock only (no wall-clock reads)
//! - No rendering or platform dependencies

pub mod collision;
pub mod lap;
pub mod race;
pub mod state;
pub mod tick;
pub mod track;
pub mod vehicle;

pub use collision::{CollisionResult, resolve_ring_boundary};
pub use lap::{AngleCrossing, classify_crossing};
pub use race::RaceSimulation;
pub use state::{RaceEvent, RaceSessionState, VehicleState, WallSide};
pub use tick::{apply_longitudinal, apply_steering, clamp_dt, tick};
pub use track::{BoostWindow, TrackProfile, TrackTheme};
pub use vehicle::VehicleProfile;
