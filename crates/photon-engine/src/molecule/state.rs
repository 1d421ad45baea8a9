//! Save/restore snapshot of a molecule.
//!
//! Everything needed to resume, including the photon hold in progress.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::error::StateError;
use crate::components::atom::{AtomicBond, Element};
use crate::components::wavelength::Wavelength;
use crate::molecule::kinds::MoleculeKind;
use crate::molecule::strategy::{AbsorptionStrategy, PhotonHold, MIN_PHOTON_HOLD_TIME};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomState {
    pub element: Element,
    pub relaxed_offset: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoleculeState {
    pub id: u32,
    pub kind: MoleculeKind,
    pub high_electronic_energy: bool,
    pub center_of_gravity: Vec2,
    pub velocity: Vec2,
    pub absorption_hysteresis: f32,
    pub vibration_radians: f32,
    pub rotation_radians: f32,
    #[serde(default)]
    pub rotation_clockwise: bool,
    /// Strategy holding a photon when the snapshot was taken.
    #[serde(default)]
    pub active: AbsorptionStrategy,
    pub atoms: Vec<AtomState>,
    pub bonds: Vec<AtomicBond>,
}

impl MoleculeState {
    pub fn to_json(&self) -> Result<String, StateError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate a snapshot.
    pub fn from_json(json: &str) -> Result<Self, StateError> {
        let state: MoleculeState = serde_json::from_str(json)?;
        state.validate()?;
        Ok(state)
    }

    /// Check topology against the molecule kind.
    pub fn validate(&self) -> Result<(), StateError> {
        if self.atoms.is_empty() {
            return Err(StateError::EmptyMolecule);
        }
        let expected = self.kind.atom_count();
        if self.atoms.len() != expected {
            return Err(StateError::AtomCountMismatch {
                kind: self.kind,
                expected,
                found: self.atoms.len(),
            });
        }
        let atom_count = self.atoms.len();
        if let Some(bond) = self
            .bonds
            .iter()
            .position(|b| b.atom_a >= atom_count || b.atom_b >= atom_count)
        {
            return Err(StateError::BondOutOfRange { bond, atom_count });
        }
        if let Some(strategy) = self.active.kind() {
            let supported = match self.hold_wavelength() {
                Some(wavelength) => self.kind.strategies().get(wavelength) == Some(strategy),
                None => self.kind.fragments().is_some(),
            };
            if !supported {
                return Err(StateError::UnsupportedStrategy { kind: self.kind, strategy });
            }
        }
        Ok(())
    }

    /// Strategy to resume with. A glowing snapshot without a saved hold
    /// re-emits visible light after the shortest hold.
    pub fn resumed_strategy(&self) -> AbsorptionStrategy {
        if self.active.is_null() && self.high_electronic_energy {
            return AbsorptionStrategy::Excitation(PhotonHold::new(
                Wavelength::Visible,
                MIN_PHOTON_HOLD_TIME,
            ));
        }
        self.active
    }

    fn hold_wavelength(&self) -> Option<Wavelength> {
        match self.active {
            AbsorptionStrategy::Vibration(hold)
            | AbsorptionStrategy::Rotation { hold, .. }
            | AbsorptionStrategy::Excitation(hold) => Some(hold.wavelength),
            AbsorptionStrategy::Null | AbsorptionStrategy::BreakApart => None,
        }
    }
}
