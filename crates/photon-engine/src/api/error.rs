use thiserror::Error;

use crate::molecule::kinds::MoleculeKind;
use crate::molecule::strategy::StrategyKind;

/// Failure to restore a molecule from a saved snapshot.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Malformed molecule snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot has no atoms")]
    EmptyMolecule,

    #[error("{kind:?} expects {expected} atoms, snapshot has {found}")]
    AtomCountMismatch {
        kind: MoleculeKind,
        expected: usize,
        found: usize,
    },

    #[error("Bond {bond} references an atom outside 0..{atom_count}")]
    BondOutOfRange { bond: usize, atom_count: usize },

    #[error("{kind:?} cannot hold a photon with {strategy:?}")]
    UnsupportedStrategy { kind: MoleculeKind, strategy: StrategyKind },
}

/// Failure to load a simulation configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Malformed configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Fixed timestep must be positive and finite, got {0}")]
    InvalidTimestep(f32),

    #[error("World bounds must have positive width and height")]
    InvalidBounds,
}
