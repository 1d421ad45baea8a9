use crate::api::types::{MoleculeId, PhotonId};
use crate::core::rng::Rng;

/// Shared mutable services handed to molecules while they step:
/// the single random source and id allocation.
#[derive(Debug, Clone)]
pub struct SimContext {
    pub rng: Rng,
    next_photon_id: u32,
    next_molecule_id: u32,
}

impl SimContext {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng::new(seed),
            next_photon_id: 1,
            next_molecule_id: 1,
        }
    }

    /// Generate the next unique photon ID.
    pub fn next_photon_id(&mut self) -> PhotonId {
        let id = PhotonId(self.next_photon_id);
        self.next_photon_id += 1;
        id
    }

    /// Generate the next unique molecule ID.
    pub fn next_molecule_id(&mut self) -> MoleculeId {
        let id = MoleculeId(self.next_molecule_id);
        self.next_molecule_id += 1;
        id
    }
}

impl Default for SimContext {
    fn default() -> Self {
        Self::new(42)
    }
}
