pub mod api;
pub mod core;
pub mod components;
pub mod molecule;
pub mod input;
pub mod bridge;
pub mod sim;

// Re-export key types at crate root for convenience
pub use api::config::SimConfig;
pub use api::context::SimContext;
pub use api::error::{ConfigError, StateError};
pub use api::types::{MoleculeId, PhotonId, SimEvent};
pub use components::atom::{Atom, AtomicBond, Element};
pub use components::light_source::LightSource;
pub use components::photon::{Photon, PHOTON_SPEED};
pub use components::wavelength::{Wavelength, WavelengthTable};
pub use self::core::ring::Ring;
pub use self::core::rng::Rng;
pub use self::core::time::SimClock;
pub use molecule::kinds::{MoleculeKind, VibrationMode};
pub use molecule::state::MoleculeState;
pub use molecule::strategy::{AbsorptionStrategy, EnergyState, StrategyKind};
pub use molecule::{Molecule, QueryOutcome, StepOutcome};
pub use input::queue::{Command, CommandQueue};
pub use bridge::protocol::{AtomInstance, EventRecord, FrameBuffers, PhotonInstance};
pub use sim::Simulation;
