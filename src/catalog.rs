//! Selectable characters, vehicles, tracks and lap counts
//!
//! A catalog is never empty: every list has a first entry, which is the
//! default choice when the player has not picked one.

use std::f32::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::{TrackProfile, TrackTheme, VehicleProfile};

/// A driver; only the color reaches the race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub id: String,
    pub name: String,
    /// Suit/helmet color (0xRRGGBB)
    pub color: u32,
}

impl CharacterProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color,
        }
    }
}

/// Unvalidated catalog contents, as found in JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogData {
    characters: Vec<CharacterProfile>,
    vehicles: Vec<VehicleProfile>,
    tracks: Vec<TrackProfile>,
    lap_options: Vec<u32>,
}

/// Validated selection lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CatalogData", into = "CatalogData")]
pub struct Catalog {
    characters: Vec<CharacterProfile>,
    vehicles: Vec<VehicleProfile>,
    tracks: Vec<TrackProfile>,
    lap_options: Vec<u32>,
}

impl TryFrom<CatalogData> for Catalog {
    type Error = ConfigError;

    fn try_from(data: CatalogData) -> Result<Self, Self::Error> {
        Catalog::new(data.characters, data.vehicles, data.tracks, data.lap_options)
    }
}

impl From<Catalog> for CatalogData {
    fn from(catalog: Catalog) -> Self {
        Self {
            characters: catalog.characters,
            vehicles: catalog.vehicles,
            tracks: catalog.tracks,
            lap_options: catalog.lap_options,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Build a catalog, rejecting empty lists and invalid entries
    pub fn new(
        characters: Vec<CharacterProfile>,
        vehicles: Vec<VehicleProfile>,
        tracks: Vec<TrackProfile>,
        lap_options: Vec<u32>,
    ) -> Result<Self, ConfigError> {
        if characters.is_empty() {
            return Err(ConfigError::EmptyCatalog("characters"));
        }
        if vehicles.is_empty() {
            return Err(ConfigError::EmptyCatalog("vehicles"));
        }
        if tracks.is_empty() {
            return Err(ConfigError::EmptyCatalog("tracks"));
        }
        if lap_options.is_empty() {
            return Err(ConfigError::EmptyCatalog("lap options"));
        }
        for vehicle in &vehicles {
            vehicle.validate()?;
        }
        for track in &tracks {
            track.validate()?;
        }
        if let Some(&bad) = lap_options.iter().find(|&&laps| laps == 0) {
            return Err(ConfigError::InvalidLapCount(bad));
        }
        Ok(Self {
            characters,
            vehicles,
            tracks,
            lap_options,
        })
    }

    /// Parse and validate a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::try_from(data)
    }

    /// The stock roster shipped with the game
    pub fn builtin() -> Self {
        Self {
            characters: vec![
                CharacterProfile::new("blaze", "Blaze", 0xe63946),
                CharacterProfile::new("volt", "Volt", 0xffd60a),
                CharacterProfile::new("aqua", "Aqua", 0x219ebc),
                CharacterProfile::new("moss", "Moss", 0x52b788),
            ],
            vehicles: vec![
                VehicleProfile::new("classic", "Classic Kart", 14.0, 26.0, 1.0, 0xf1faee),
                VehicleProfile::new("rocket", "Rocket", 12.0, 32.0, 0.8, 0xff7b00),
                VehicleProfile::new("drifter", "Drifter", 16.0, 24.0, 1.3, 0x7209b7),
            ],
            tracks: vec![
                TrackProfile::new("neon-bowl", "Neon Bowl", TrackTheme::Neon, 12.0, 22.0)
                    .with_boost(FRAC_PI_2, 0.15)
                    .with_boost(-FRAC_PI_2, 0.15),
                TrackProfile::new("dune-dome", "Dune Dome", TrackTheme::Desert, 14.0, 26.0)
                    .with_boost(PI, 0.2),
                TrackProfile::new("ice-ring", "Ice Ring", TrackTheme::Frost, 10.0, 19.0)
                    .with_boost(PI / 4.0, 0.12)
                    .with_boost(3.0 * PI / 4.0, 0.12)
                    .with_boost(-3.0 * PI / 4.0, 0.12),
                TrackProfile::new("canopy", "Canopy Coliseum", TrackTheme::Jungle, 16.0, 28.0),
            ],
            lap_options: vec![3, 5, 7],
        }
    }

    pub fn characters(&self) -> &[CharacterProfile] {
        &self.characters
    }

    pub fn vehicles(&self) -> &[VehicleProfile] {
        &self.vehicles
    }

    pub fn tracks(&self) -> &[TrackProfile] {
        &self.tracks
    }

    pub fn lap_options(&self) -> &[u32] {
        &self.lap_options
    }

    pub fn find_character(&self, id: &str) -> Option<&CharacterProfile> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn find_vehicle(&self, id: &str) -> Option<&VehicleProfile> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn find_track(&self, id: &str) -> Option<&TrackProfile> {
        self.tracks.iter().find(|t| t.id == id)
    }

    // Lists are non-empty by construction, so index 0 always exists.

    pub fn default_character(&self) -> &CharacterProfile {
        &self.characters[0]
    }

    pub fn default_vehicle(&self) -> &VehicleProfile {
        &self.vehicles[0]
    }

    pub fn default_track(&self) -> &TrackProfile {
        &self.tracks[0]
    }

    pub fn default_laps(&self) -> u32 {
        self.lap_options[0]
    }
}
