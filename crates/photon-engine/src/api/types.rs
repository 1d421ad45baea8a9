use crate::components::photon::Photon;
use crate::components::wavelength::Wavelength;

/// Unique identifier for a photon in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhotonId(pub u32);

/// Unique identifier for a molecule in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MoleculeId(pub u32);

/// Something the host (view, audio, accessibility) may want to react to.
/// Collected by `Simulation::step` and cleared at the start of every tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// A molecule captured a photon; the photon is gone from the world.
    PhotonAbsorbed { molecule: MoleculeId, photon: PhotonId, wavelength: Wavelength },
    /// A molecule released a photon (re-emission after a hold).
    PhotonEmitted { molecule: MoleculeId, photon: Photon },
    /// A photon was close enough to be evaluated and was not absorbed.
    PhotonPassedThrough { molecule: MoleculeId, photon: PhotonId },
    /// A molecule dissociated into two successors.
    BrokeApart { original: MoleculeId, first: MoleculeId, second: MoleculeId },
}

impl SimEvent {
    /// Molecule the event originated from.
    pub fn molecule(&self) -> MoleculeId {
        match self {
            SimEvent::PhotonAbsorbed { molecule, .. }
            | SimEvent::PhotonEmitted { molecule, .. }
            | SimEvent::PhotonPassedThrough { molecule, .. } => *molecule,
            SimEvent::BrokeApart { original, .. } => *original,
        }
    }
}
