//! Configuration errors
//!
//! Every malformed setup is rejected before a race starts; ticks never fail.

/// Reasons a race configuration cannot be used
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid vehicle '{id}': {reason}")]
    InvalidVehicle { id: String, reason: &'static str },

    #[error("Invalid track '{id}': {reason}")]
    InvalidTrack { id: String, reason: &'static str },

    #[error("Invalid boost window {index} on track '{id}': {reason}")]
    InvalidBoostWindow {
        id: String,
        index: usize,
        reason: &'static str,
    },

    #[error("Lap count must be at least 1, got {0}")]
    InvalidLapCount(u32),

    #[error("Catalog has no {0}")]
    EmptyCatalog(&'static str),

    #[error("Unknown {kind} '{id}'")]
    UnknownEntry { kind: &'static str, id: String },

    #[error("Invalid settings: {0}")]
    InvalidSettings(&'static str),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
