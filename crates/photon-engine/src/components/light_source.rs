use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::PhotonId;
use crate::components::photon::Photon;
use crate::components::wavelength::Wavelength;

/// Lamp that fires photons of one wavelength in a fixed direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightSource {
    /// Whether the lamp is switched on.
    pub on: bool,
    pub wavelength: Wavelength,
    /// Emission point in picometres.
    pub position: Vec2,
    /// Emission direction in radians (0 = +x).
    pub direction: f32,
    /// Photons per second.
    pub emission_rate: f32,
    /// Fractional photons carried between ticks.
    #[serde(skip)]
    accumulator: f32,
}

impl Default for LightSource {
    fn default() -> Self {
        Self {
            on: true,
            wavelength: Wavelength::Infrared,
            position: Vec2::new(-1200.0, 0.0),
            direction: 0.0,
            emission_rate: 0.8,
            accumulator: 0.0,
        }
    }
}

impl LightSource {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Builder pattern --

    pub fn with_wavelength(mut self, wavelength: Wavelength) -> Self {
        self.wavelength = wavelength;
        self
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_direction(mut self, direction: f32) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_emission_rate(mut self, rate: f32) -> Self {
        self.emission_rate = rate.max(0.0);
        self
    }

    /// Change the band. Photons already in flight keep theirs.
    pub fn set_wavelength(&mut self, wavelength: Wavelength) {
        self.wavelength = wavelength;
    }

    pub fn set_emission_rate(&mut self, rate: f32) {
        self.emission_rate = rate.max(0.0);
    }

    /// Advance by `dt` seconds. Returns the number of photons to fire.
    pub fn tick(&mut self, dt: f32) -> usize {
        if !self.on {
            return 0;
        }
        self.accumulator += self.emission_rate * dt;
        let count = self.accumulator as usize;
        self.accumulator -= count as f32;
        count
    }

    /// Build one photon leaving the lamp.
    pub fn fire(&self, id: PhotonId) -> Photon {
        Photon::new(id, self.wavelength, self.position).with_direction(self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::photon::PHOTON_SPEED;

    #[test]
    fn builder_pattern() {
        let source = LightSource::new()
            .with_wavelength(Wavelength::Ultraviolet)
            .with_emission_rate(4.0)
            .with_position(Vec2::new(-500.0, 10.0));
        assert_eq!(source.wavelength, Wavelength::Ultraviolet);
        assert_eq!(source.emission_rate, 4.0);
        assert_eq!(source.position, Vec2::new(-500.0, 10.0));
    }

    #[test]
    fn accumulates_fractional_photons() {
        let mut source = LightSource::new().with_emission_rate(2.0);
        assert_eq!(source.tick(0.25), 0);
        assert_eq!(source.tick(0.25), 1);
    }

    #[test]
    fn switched_off_fires_nothing() {
        let mut source = LightSource::new().with_emission_rate(100.0);
        source.on = false;
        assert_eq!(source.tick(1.0), 0);
    }

    #[test]
    fn fired_photon_heads_along_direction() {
        let source = LightSource::new();
        let photon = source.fire(PhotonId(9));
        assert_eq!(photon.position, source.position);
        assert!((photon.velocity.x - PHOTON_SPEED).abs() < 1e-3);
        assert_eq!(photon.wavelength(), Wavelength::Infrared);
    }
}
