//! Lap and checkpoint counting
//!
//! The start line sits at ring angle 0 and the half-lap checkpoint at ±π.
//! Both are detected from the ring angle of consecutive ticks:
//! - a jump larger than π means the ±π seam was crossed (checkpoint)
//! - a move from negative to non-negative without a seam jump is a start-line crossing

use std::f32::consts::PI;

/// What the ring angle did between two ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleCrossing {
    None,
    /// Crossed the ±π seam opposite the start line (either direction)
    HalfLap,
    /// Crossed angle 0 going forward
    StartLine,
}

/// Classify the move from `prev` to `angle` (both in [-π, π])
pub fn classify_crossing(prev: f32, angle: f32) -> AngleCrossing {
    if (angle - prev).abs() > PI {
        AngleCrossing::HalfLap
    } else if prev < 0.0 && angle >= 0.0 {
        AngleCrossing::StartLine
    } else {
        AngleCrossing::None
    }
}
