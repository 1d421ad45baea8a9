//! Photon absorption strategies.
//!
//! A molecule keeps a table of `StrategyKind` per wavelength. When a photon of
//! a listed wavelength is close enough, the kind decides whether to take it;
//! on acceptance it produces an active `AbsorptionStrategy`, which then drives
//! one energy flag on the molecule until it re-emits (or dissociates).

use serde::{Deserialize, Serialize};

use crate::components::photon::Photon;
use crate::components::wavelength::Wavelength;
use crate::core::rng::Rng;

/// Probability that a strategy accepts a photon it is offered.
pub const ABSORPTION_PROBABILITY: f32 = 0.5;
/// Shortest time a photon is held before re-emission, in seconds.
pub const MIN_PHOTON_HOLD_TIME: f32 = 0.6;
/// Longest time a photon is held before re-emission, in seconds.
pub const MAX_PHOTON_HOLD_TIME: f32 = MIN_PHOTON_HOLD_TIME * 2.0;

/// Reaction a molecule has to one wavelength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Vibration,
    Rotation,
    Excitation,
    BreakApart,
}

impl StrategyKind {
    /// Offer a photon. `None` means the photon was declined.
    pub fn query_and_absorb(self, photon: &Photon, rng: &mut Rng) -> Option<AbsorptionStrategy> {
        if !rng.chance(ABSORPTION_PROBABILITY) {
            return None;
        }
        let wavelength = photon.wavelength();
        let strategy = match self {
            StrategyKind::Vibration => AbsorptionStrategy::Vibration(PhotonHold::random(wavelength, rng)),
            StrategyKind::Rotation => AbsorptionStrategy::Rotation {
                hold: PhotonHold::random(wavelength, rng),
                clockwise: rng.next_bool(),
            },
            StrategyKind::Excitation => AbsorptionStrategy::Excitation(PhotonHold::random(wavelength, rng)),
            StrategyKind::BreakApart => AbsorptionStrategy::BreakApart,
        };
        Some(strategy)
    }
}

/// Countdown until a held photon is released again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhotonHold {
    pub wavelength: Wavelength,
    /// Seconds left before re-emission.
    pub remaining: f32,
}

impl PhotonHold {
    pub fn new(wavelength: Wavelength, duration: f32) -> Self {
        Self { wavelength, remaining: duration }
    }

    fn random(wavelength: Wavelength, rng: &mut Rng) -> Self {
        Self::new(wavelength, rng.range(MIN_PHOTON_HOLD_TIME, MAX_PHOTON_HOLD_TIME))
    }

    /// Advance the countdown. Returns true once it has run out.
    fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining <= 0.0
    }
}

/// Energy flags a strategy drives. At most one is set at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnergyState {
    pub vibrating: bool,
    pub rotating: bool,
    /// Rotation direction; meaningful while `rotating`.
    pub clockwise: bool,
    pub high_electronic_energy: bool,
}

impl EnergyState {
    pub fn clear(&mut self) {
        self.vibrating = false;
        self.rotating = false;
        self.high_electronic_energy = false;
    }

    /// Number of raised flags (rotation direction excluded).
    pub fn active_count(&self) -> usize {
        [self.vibrating, self.rotating, self.high_electronic_energy]
            .iter()
            .filter(|flag| **flag)
            .count()
    }
}

/// What the molecule must do after its strategy stepped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyAction {
    None,
    /// Release a photon of this wavelength.
    Emit(Wavelength),
    /// Dissociate.
    BreakApart,
}

/// The strategy currently holding a photon. `Null` is the ground state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsorptionStrategy {
    #[default]
    Null,
    Vibration(PhotonHold),
    Rotation { hold: PhotonHold, clockwise: bool },
    Excitation(PhotonHold),
    BreakApart,
}

impl AbsorptionStrategy {
    pub fn is_null(&self) -> bool {
        matches!(self, AbsorptionStrategy::Null)
    }

    pub fn kind(&self) -> Option<StrategyKind> {
        match self {
            AbsorptionStrategy::Null => None,
            AbsorptionStrategy::Vibration(_) => Some(StrategyKind::Vibration),
            AbsorptionStrategy::Rotation { .. } => Some(StrategyKind::Rotation),
            AbsorptionStrategy::Excitation(_) => Some(StrategyKind::Excitation),
            AbsorptionStrategy::BreakApart => Some(StrategyKind::BreakApart),
        }
    }

    /// Raise the flag this strategy owns. Called once, when it becomes active.
    pub fn on_absorbed(&self, energy: &mut EnergyState) {
        match *self {
            AbsorptionStrategy::Vibration(_) => energy.vibrating = true,
            AbsorptionStrategy::Rotation { clockwise, .. } => {
                energy.rotating = true;
                energy.clockwise = clockwise;
            }
            AbsorptionStrategy::Excitation(_) => energy.high_electronic_energy = true,
            AbsorptionStrategy::Null | AbsorptionStrategy::BreakApart => {}
        }
    }

    /// Advance by `dt`. Lowers the owned flag when the hold runs out.
    pub fn step(&mut self, dt: f32, energy: &mut EnergyState) -> StrategyAction {
        match self {
            AbsorptionStrategy::Null => StrategyAction::None,
            AbsorptionStrategy::Vibration(hold) => {
                if hold.tick(dt) {
                    energy.vibrating = false;
                    StrategyAction::Emit(hold.wavelength)
                } else {
                    StrategyAction::None
                }
            }
            AbsorptionStrategy::Rotation { hold, .. } => {
                if hold.tick(dt) {
                    energy.rotating = false;
                    StrategyAction::Emit(hold.wavelength)
                } else {
                    StrategyAction::None
                }
            }
            AbsorptionStrategy::Excitation(hold) => {
                if hold.tick(dt) {
                    energy.high_electronic_energy = false;
                    StrategyAction::Emit(hold.wavelength)
                } else {
                    StrategyAction::None
                }
            }
            AbsorptionStrategy::BreakApart => StrategyAction::BreakApart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::PhotonId;
    use glam::Vec2;

    fn photon(wavelength: Wavelength) -> Photon {
        Photon::new(PhotonId(1), wavelength, Vec2::ZERO)
    }

    /// Draw until the kind accepts, so tests do not depend on a particular seed.
    fn accepted(kind: StrategyKind, wavelength: Wavelength) -> AbsorptionStrategy {
        let mut rng = Rng::new(11);
        let p = photon(wavelength);
        (0..64)
            .find_map(|_| kind.query_and_absorb(&p, &mut rng))
            .expect("strategy never accepted in 64 draws")
    }

    #[test]
    fn null_strategy_is_inert() {
        let mut null = AbsorptionStrategy::Null;
        let mut energy = EnergyState::default();
        null.on_absorbed(&mut energy);
        assert!(null.kind().is_none());
        assert_eq!(null.step(10.0, &mut energy), StrategyAction::None);
        assert_eq!(energy, EnergyState::default());
    }

    #[test]
    fn acceptance_rate_is_roughly_half() {
        let mut rng = Rng::new(2024);
        let p = photon(Wavelength::Infrared);
        let hits = (0..2000)
            .filter(|_| StrategyKind::Vibration.query_and_absorb(&p, &mut rng).is_some())
            .count();
        assert!((800..1200).contains(&hits), "hits = {}", hits);
    }

    #[test]
    fn hold_time_within_bounds() {
        match accepted(StrategyKind::Excitation, Wavelength::Visible) {
            AbsorptionStrategy::Excitation(hold) => {
                assert!(hold.remaining >= MIN_PHOTON_HOLD_TIME);
                assert!(hold.remaining < MAX_PHOTON_HOLD_TIME);
                assert_eq!(hold.wavelength, Wavelength::Visible);
            }
            other => panic!("Expected Excitation, got {:?}", other),
        }
    }

    #[test]
    fn vibration_reemits_after_hold() {
        let mut strategy = AbsorptionStrategy::Vibration(PhotonHold::new(Wavelength::Infrared, 0.5));
        let mut energy = EnergyState::default();
        strategy.on_absorbed(&mut energy);
        assert!(energy.vibrating);

        assert_eq!(strategy.step(0.3, &mut energy), StrategyAction::None);
        assert!(energy.vibrating);
        assert_eq!(strategy.step(0.3, &mut energy), StrategyAction::Emit(Wavelength::Infrared));
        assert!(!energy.vibrating);
    }

    #[test]
    fn rotation_sets_direction() {
        let strategy = AbsorptionStrategy::Rotation {
            hold: PhotonHold::new(Wavelength::Microwave, 1.0),
            clockwise: true,
        };
        let mut energy = EnergyState::default();
        strategy.on_absorbed(&mut energy);
        assert!(energy.rotating && energy.clockwise);
        assert_eq!(energy.active_count(), 1);
    }

    #[test]
    fn break_apart_fires_on_first_step() {
        let mut strategy = accepted(StrategyKind::BreakApart, Wavelength::Ultraviolet);
        let mut energy = EnergyState::default();
        strategy.on_absorbed(&mut energy);
        assert_eq!(energy.active_count(), 0);
        assert_eq!(strategy.step(0.01, &mut energy), StrategyAction::BreakApart);
    }
}
