use glam::Vec2;

use crate::api::types::PhotonId;
use crate::components::wavelength::Wavelength;

/// Speed of every photon in the simulation, in picometres per second.
/// Light-source photons and molecule re-emissions share it.
pub const PHOTON_SPEED: f32 = 3000.0;

/// A moving point of light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Photon {
    pub id: PhotonId,
    /// Position in picometres.
    pub position: Vec2,
    /// Velocity in picometres per second.
    pub velocity: Vec2,
    wavelength: Wavelength,
}

impl Photon {
    /// Create a photon at rest. Use the builder methods to aim it.
    pub fn new(id: PhotonId, wavelength: Wavelength, position: Vec2) -> Self {
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            wavelength,
        }
    }

    /// Aim the photon along `angle` (radians) at the fixed photon speed.
    pub fn with_direction(mut self, angle: f32) -> Self {
        self.velocity = Vec2::from_angle(angle) * PHOTON_SPEED;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn wavelength(&self) -> Wavelength {
        self.wavelength
    }

    /// Advance position by `velocity * dt`.
    pub fn step(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.position.distance(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_sets_fixed_speed() {
        let p = Photon::new(PhotonId(1), Wavelength::Visible, Vec2::ZERO)
            .with_direction(std::f32::consts::FRAC_PI_2);
        assert!((p.velocity.length() - PHOTON_SPEED).abs() < 1e-2);
        assert!(p.velocity.x.abs() < 1e-2);
        assert!(p.velocity.y > 0.0);
    }

    #[test]
    fn step_integrates_position() {
        let mut p = Photon::new(PhotonId(1), Wavelength::Infrared, Vec2::new(10.0, 0.0))
            .with_velocity(Vec2::new(100.0, -50.0));
        p.step(0.5);
        assert_eq!(p.position, Vec2::new(60.0, -25.0));
        assert_eq!(p.wavelength(), Wavelength::Infrared);
    }
}
