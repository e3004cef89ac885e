//! Ring wall collision
//!
//! The drivable surface is the annulus between the track's inner and outer
//! radius. A kart that ends a step outside it is projected radially back onto
//! the wall it crossed.

use glam::Vec2;

use super::state::WallSide;
use super::track::TrackProfile;
use crate::consts::RADIUS_EPSILON;

/// Result of a wall check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a wall was hit
    pub hit: Option<WallSide>,
    /// Position after correction (unchanged on a miss)
    pub pos: Vec2,
    /// How far past the wall the kart was
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss(pos: Vec2) -> Self {
        Self {
            hit: None,
            pos,
            penetration: 0.0,
        }
    }
}

/// Project a position back inside the ring walls
///
/// At (nearly) zero radius there is no radial direction to push along, so the
/// position is returned untouched.
pub fn resolve_ring_boundary(pos: Vec2, track: &TrackProfile) -> CollisionResult {
    let r = pos.length();
    if r < RADIUS_EPSILON {
        return CollisionResult::miss(pos);
    }

    if r < track.inner_radius {
        CollisionResult {
            hit: Some(WallSide::Inner),
            pos: pos * (track.inner_radius / r),
            penetration: track.inner_radius - r,
        }
    } else if r > track.outer_radius {
        CollisionResult {
            hit: Some(WallSide::Outer),
            pos: pos * (track.outer_radius / r),
            penetration: r - track.outer_radius,
        }
    } else {
        CollisionResult::miss(pos)
    }
}
