use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::error::ConfigError;
use crate::components::light_source::LightSource;
use crate::molecule::kinds::MoleculeKind;

/// Configuration for a simulation, usually supplied by the host as JSON.
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Seed for the shared random source (default: 42).
    pub seed: u64,
    /// World width in picometres, centred on the origin. Photons and
    /// molecules that leave the world are removed.
    pub world_width: f32,
    /// World height in picometres, centred on the origin.
    pub world_height: f32,
    /// Molecule placed in the beam on start and reset (default: CH4).
    pub initial_target: MoleculeKind,
    /// Where the target molecule sits.
    pub target_position: Vec2,
    pub light_source: LightSource,
    /// The light source holds fire while this many photons are in flight.
    /// Molecule re-emissions are never dropped.
    pub max_photons: usize,
    /// Maximum number of events forwarded to the host per frame.
    pub max_events: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            seed: 42,
            world_width: 3000.0,
            world_height: 1600.0,
            initial_target: MoleculeKind::CH4,
            target_position: Vec2::ZERO,
            light_source: LightSource::default(),
            max_photons: 256,
            max_events: 64,
        }
    }
}

impl SimConfig {
    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_dt.is_finite() && self.fixed_dt > 0.0) {
            return Err(ConfigError::InvalidTimestep(self.fixed_dt));
        }
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return Err(ConfigError::InvalidBounds);
        }
        Ok(())
    }

    /// Whether `point` lies inside the world rectangle.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x.abs() <= self.world_width / 2.0 && point.y.abs() <= self.world_height / 2.0
    }
}
