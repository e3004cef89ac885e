//! Vehicle performance profiles

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Immutable vehicle stats, chosen before the race starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    pub id: String,
    pub name: String,
    /// Base acceleration (units/s²)
    pub acceleration: f32,
    /// Top forward speed (units/s)
    pub max_speed: f32,
    /// Steering authority multiplier
    pub handling: f32,
    /// Body color (0xRRGGBB), cosmetic
    pub color: u32,
}

impl VehicleProfile {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        acceleration: f32,
        max_speed: f32,
        handling: f32,
        color: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            acceleration,
            max_speed,
            handling,
            color,
        }
    }

    /// Reject stats the integrator cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |reason| {
            Err(ConfigError::InvalidVehicle {
                id: self.id.clone(),
                reason,
            })
        };
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return fail("max_speed must be positive");
        }
        if !(self.handling.is_finite() && self.handling > 0.0) {
            return fail("handling must be positive");
        }
        if !(self.acceleration.is_finite() && self.acceleration > 0.0) {
            return fail("acceleration must be positive");
        }
        Ok(())
    }

    /// Slowest allowed (reverse) speed
    #[inline]
    pub fn min_speed(&self) -> f32 {
        -crate::consts::REVERSE_LIMIT * self.max_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_non_positive_stats() {
        let ok = VehicleProfile::new("kart", "Kart", 14.0, 26.0, 1.0, 0xff0000);
        assert!(ok.validate().is_ok());

        let zero_speed = VehicleProfile { max_speed: 0.0, ..ok.clone() };
        assert!(matches!(
            zero_speed.validate(),
            Err(ConfigError::InvalidVehicle { .. })
        ));

        let bad_handling = VehicleProfile { handling: -1.0, ..ok.clone() };
        assert!(bad_handling.validate().is_err());

        let nan_accel = VehicleProfile { acceleration: f32::NAN, ..ok };
        assert!(nan_accel.validate().is_err());
    }

    #[test]
    fn test_min_speed_is_reverse_limit() {
        let v = VehicleProfile::new("kart", "Kart", 14.0, 20.0, 1.0, 0);
        assert!((v.min_speed() + 6.0).abs() < 1e-6);
    }
}
