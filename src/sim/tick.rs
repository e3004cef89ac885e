//! Per-frame simulation tick
//!
//! One tick advances the kart by a clamped frame delta, in a fixed order:
//! longitudinal speed, steering, Euler position step, ring walls, boost pads,
//! then lap counting.

use super::collision::resolve_ring_boundary;
use super::lap::{AngleCrossing, classify_crossing};
use super::race::RaceSimulation;
use super::state::{RaceEvent, VehicleState};
use super::track::TrackProfile;
use super::vehicle::VehicleProfile;
use crate::consts::*;
use crate::input::InputIntent;
use crate::normalize_angle;
use crate::store::RaceSessionStore;

/// Clamp a frame delta to something safe to integrate
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_TICK_DT)
    } else {
        0.0
    }
}

/// Advance the race by one frame
pub fn tick(
    sim: &mut RaceSimulation,
    progress: &mut RaceSessionStore,
    input: &InputIntent,
    dt: f32,
) -> Vec<RaceEvent> {
    let dt = clamp_dt(dt);
    let mut events = Vec::new();

    sim.elapsed += dt;
    sim.ticks += 1;
    let now = sim.elapsed;
    let profile = &sim.profile;
    let track = &sim.track;
    let vehicle = &mut sim.vehicle;

    vehicle.forward_speed = apply_longitudinal(vehicle.forward_speed, profile, input, dt);
    vehicle.heading = apply_steering(vehicle.heading, vehicle.forward_speed, profile, input, dt);
    vehicle.pos += vehicle.forward() * vehicle.forward_speed * dt;

    let contact = resolve_ring_boundary(vehicle.pos, track);
    if let Some(side) = contact.hit {
        vehicle.pos = contact.pos;
        vehicle.forward_speed *= WALL_RESTITUTION;
        log::debug!(
            "Wall contact ({:?}, {:.2} deep), speed now {:.2}",
            side,
            contact.penetration,
            vehicle.forward_speed
        );
        events.push(RaceEvent::WallContact { side });
    }

    let r = vehicle.pos.length();
    let angle = vehicle.ring_angle();

    if let Some(speed) = try_boost(vehicle, profile, track, r, angle, now) {
        log::debug!("Boost at t={:.2}s, speed {:.2}", now, speed);
        events.push(RaceEvent::Boost { speed });
    }

    update_laps(vehicle, track, progress, r, angle, &mut events);

    events
}

/// Throttle, coast friction and brake, clamped to the vehicle's speed range
pub fn apply_longitudinal(
    speed: f32,
    profile: &VehicleProfile,
    input: &InputIntent,
    dt: f32,
) -> f32 {
    let accel = THROTTLE_GAIN * profile.acceleration;
    let mut speed = if input.throttle {
        (speed + accel * dt).min(profile.max_speed)
    } else {
        // Coast toward zero without overshooting
        let friction = COAST_FRICTION * accel * dt;
        if speed > 0.0 {
            (speed - friction).max(0.0)
        } else {
            (speed + friction).min(0.0)
        }
    };

    if input.brake {
        speed -= BRAKE_GAIN * profile.acceleration * dt;
    }

    speed.clamp(profile.min_speed(), profile.max_speed)
}

/// Speed-scaled steering with a small authority floor at rest
///
/// The returned heading is wrapped to [-π, π).
pub fn apply_steering(
    heading: f32,
    speed: f32,
    profile: &VehicleProfile,
    input: &InputIntent,
    dt: f32,
) -> f32 {
    let speed_factor = (speed.abs() / profile.max_speed).clamp(0.0, 1.0);
    let strength = profile.handling * ((1.0 - STEER_FLOOR) * speed_factor + STEER_FLOOR);
    let turn = STEER_RATE * strength * dt;

    let mut heading = heading;
    if input.steer_left {
        heading += turn;
    }
    if input.steer_right {
        heading -= turn;
    }
    normalize_angle(heading)
}

/// Fire a boost pad under the kart if the per-vehicle cooldown allows it
///
/// Returns the boosted speed.
fn try_boost(
    vehicle: &mut VehicleState,
    profile: &VehicleProfile,
    track: &TrackProfile,
    r: f32,
    angle: f32,
    now: f32,
) -> Option<f32> {
    track.boost_window_at(r, angle)?;
    if !vehicle.boost_ready(now, BOOST_COOLDOWN) {
        return None;
    }
    vehicle.forward_speed =
        (vehicle.forward_speed + BOOST_IMPULSE).min(profile.max_speed * BOOST_SPEED_CAP);
    vehicle.last_boost_at = Some(now);
    Some(vehicle.forward_speed)
}

/// Arm the half-lap checkpoint and count start-line crossings
fn update_laps(
    vehicle: &mut VehicleState,
    track: &TrackProfile,
    progress: &mut RaceSessionStore,
    r: f32,
    angle: f32,
    events: &mut Vec<RaceEvent>,
) {
    let prev = vehicle.last_angle;
    vehicle.last_angle = angle;

    if progress.get().finished {
        return;
    }

    match classify_crossing(prev, angle) {
        AngleCrossing::HalfLap => {
            if !vehicle.checkpoint_armed {
                vehicle.checkpoint_armed = true;
                events.push(RaceEvent::CheckpointArmed);
            }
        }
        AngleCrossing::StartLine => {
            if !vehicle.checkpoint_armed || !track.in_start_lane(r) {
                return;
            }
            vehicle.checkpoint_armed = false;
            progress.update(|s| {
                s.current_lap += 1;
                if s.current_lap > s.total_laps {
                    s.finished = true;
                }
            });

            let state = *progress.get();
            log::info!("Lap completed, now on lap {}/{}", state.current_lap, state.total_laps);
            events.push(RaceEvent::LapCompleted {
                lap: state.current_lap,
            });
            if state.finished {
                log::info!("Race finished");
                events.push(RaceEvent::Finished);
            }
        }
        AngleCrossing::None => {}
    }
}
