//! Molecule model: geometry, kinematics and the photon absorption state machine.
//!
//! A molecule holds at most one photon at a time. While it holds one, the
//! active strategy drives exactly one of the vibrating / rotating /
//! high-electronic-energy flags and eventually re-emits the photon or breaks
//! the molecule apart. Outcomes are returned to the caller instead of being
//! broadcast, so the host decides when and how to react.

pub mod kinds;
pub mod state;
pub mod strategy;

use std::f32::consts::TAU;

use glam::Vec2;

use crate::api::context::SimContext;
use crate::api::error::StateError;
use crate::api::types::{MoleculeId, PhotonId};
use crate::components::atom::{Atom, AtomicBond};
use crate::components::photon::{Photon, PHOTON_SPEED};
use crate::components::wavelength::{Wavelength, WavelengthTable};
use crate::core::ring::Ring;
use crate::core::rng::Rng;

use kinds::{apply_vibration, mass_center, Fragment, MoleculeKind};
use state::{AtomState, MoleculeState};
use strategy::{AbsorptionStrategy, EnergyState, StrategyAction, StrategyKind};

/// Photons closer than this to the centre of gravity may be absorbed (pm).
/// The boundary itself is outside.
pub const PHOTON_ABSORPTION_DISTANCE: f32 = 100.0;
/// Cooldown after an emission during which nothing is absorbed (s).
pub const ABSORPTION_HYSTERESIS_TIME: f32 = 0.2;
/// Vibration cycles per second.
pub const VIBRATION_FREQUENCY: f32 = 5.0;
/// Revolutions per second while rotating.
pub const ROTATION_RATE: f32 = 1.1;
/// Declined photons remembered per molecule.
pub const PASS_THROUGH_CAPACITY: usize = 10;
/// Speed at which dissociation fragments separate (pm/s).
pub const BREAK_APART_SPEED: f32 = PHOTON_SPEED;

/// Result of offering a photon to a molecule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The photon was captured. The caller removes it from the world.
    Absorbed,
    /// The photon was evaluated and declined.
    PassedThrough,
    /// The photon was not evaluated (out of range, cooling down, or already declined).
    Ignored,
}

impl QueryOutcome {
    pub fn is_absorbed(self) -> bool {
        self == QueryOutcome::Absorbed
    }
}

/// Discrete event produced while a molecule steps.
#[derive(Debug, Clone)]
pub enum StepOutcome {
    /// A held photon was released.
    Emitted(Photon),
    /// The molecule dissociated. It is inert from now on.
    BrokeApart(Molecule, Molecule),
}

#[derive(Debug, Clone)]
pub struct Molecule {
    id: MoleculeId,
    kind: MoleculeKind,
    atoms: Vec<Atom>,
    bonds: Vec<AtomicBond>,
    center_of_gravity: Vec2,
    velocity: Vec2,
    rotation_radians: f32,
    vibration_radians: f32,
    energy: EnergyState,
    strategies: WavelengthTable<StrategyKind>,
    active: AbsorptionStrategy,
    /// Seconds until absorption is allowed again. Ready when <= 0.
    absorption_hysteresis: f32,
    passed_through: Ring<PhotonId, PASS_THROUGH_CAPACITY>,
    dissociated: bool,
}

impl Molecule {
    /// Create a molecule of `kind` at rest at the origin.
    pub fn new(id: MoleculeId, kind: MoleculeKind) -> Self {
        let (atoms, bonds) = kind.build();
        let mut molecule = Self {
            id,
            kind,
            atoms,
            bonds,
            center_of_gravity: Vec2::ZERO,
            velocity: Vec2::ZERO,
            rotation_radians: 0.0,
            vibration_radians: 0.0,
            energy: EnergyState::default(),
            strategies: kind.strategies(),
            active: AbsorptionStrategy::Null,
            absorption_hysteresis: 0.0,
            passed_through: Ring::new(),
            dissociated: false,
        };
        molecule.update_atom_positions();
        molecule
    }

    /// Create a molecule with an id drawn from the context.
    pub fn spawn(kind: MoleculeKind, ctx: &mut SimContext) -> Self {
        Self::new(ctx.next_molecule_id(), kind)
    }

    // -- Builder pattern --

    pub fn with_center_of_gravity(mut self, position: Vec2) -> Self {
        self.set_center_of_gravity(position);
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.set_rotation(radians);
        self
    }

    // -- Observable state --

    pub fn id(&self) -> MoleculeId {
        self.id
    }

    pub fn kind(&self) -> MoleculeKind {
        self.kind
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[AtomicBond] {
        &self.bonds
    }

    pub fn center_of_gravity(&self) -> Vec2 {
        self.center_of_gravity
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn rotation_radians(&self) -> f32 {
        self.rotation_radians
    }

    pub fn vibration_radians(&self) -> f32 {
        self.vibration_radians
    }

    pub fn is_vibrating(&self) -> bool {
        self.energy.vibrating
    }

    pub fn is_rotating(&self) -> bool {
        self.energy.rotating
    }

    pub fn rotation_direction_clockwise(&self) -> bool {
        self.energy.clockwise
    }

    pub fn is_high_electronic_energy(&self) -> bool {
        self.energy.high_electronic_energy
    }

    pub fn energy(&self) -> EnergyState {
        self.energy
    }

    /// Whether a photon is currently held by a non-null strategy.
    pub fn is_photon_absorbed(&self) -> bool {
        !self.active.is_null()
    }

    pub fn active_strategy(&self) -> &AbsorptionStrategy {
        &self.active
    }

    pub fn absorption_hysteresis(&self) -> f32 {
        self.absorption_hysteresis
    }

    /// Whether this molecule has already broken apart.
    pub fn is_dissociated(&self) -> bool {
        self.dissociated
    }

    /// Reaction to `wavelength`, if any.
    pub fn strategy_for(&self, wavelength: Wavelength) -> Option<StrategyKind> {
        self.strategies.get(wavelength)
    }

    /// Whether the photon is remembered as declined.
    pub fn has_passed_through(&self, photon: PhotonId) -> bool {
        self.passed_through.contains(&photon)
    }

    pub fn vibrates_by_stretching(&self) -> bool {
        self.atoms.len() <= 2
    }

    /// Current vibration offset of one atom.
    ///
    /// # Panics
    /// If `index` is not an atom of this molecule.
    pub fn atom_vibration_offset(&self, index: usize) -> Vec2 {
        assert!(
            index < self.atoms.len(),
            "atom {} is not part of {:?} ({} atoms)",
            index,
            self.kind,
            self.atoms.len()
        );
        self.atoms[index].vibration_offset
    }

    // -- Commands --

    /// Offer a photon. Evaluated only when the molecule is ready, the photon
    /// is strictly inside the absorption radius, and it was not declined before.
    pub fn query_absorb_photon(&mut self, photon: &Photon, rng: &mut Rng) -> QueryOutcome {
        if self.dissociated || self.absorption_hysteresis > 0.0 {
            return QueryOutcome::Ignored;
        }
        if photon.distance_to(self.center_of_gravity) >= PHOTON_ABSORPTION_DISTANCE {
            return QueryOutcome::Ignored;
        }
        if self.passed_through.contains(&photon.id) {
            return QueryOutcome::Ignored;
        }

        let accepted = match self.strategies.get(photon.wavelength()) {
            Some(kind) if self.active.is_null() => kind.query_and_absorb(photon, rng),
            _ => None,
        };
        match accepted {
            Some(strategy) => {
                strategy.on_absorbed(&mut self.energy);
                self.active = strategy;
                log::debug!(
                    "{:?} {:?} absorbed {:?} photon {:?}",
                    self.kind,
                    self.id,
                    photon.wavelength(),
                    photon.id
                );
                QueryOutcome::Absorbed
            }
            None => {
                self.passed_through.push(photon.id);
                QueryOutcome::PassedThrough
            }
        }
    }

    /// Advance by `dt` seconds: active strategy, hysteresis, vibration,
    /// rotation and drift, in that order.
    pub fn step(&mut self, dt: f32, ctx: &mut SimContext) -> Option<StepOutcome> {
        if self.dissociated {
            return None;
        }

        let outcome = match self.active.step(dt, &mut self.energy) {
            StrategyAction::None => None,
            StrategyAction::Emit(wavelength) => Some(StepOutcome::Emitted(self.emit_photon(wavelength, ctx))),
            StrategyAction::BreakApart => {
                let (first, second) = self.break_apart(ctx);
                return Some(StepOutcome::BrokeApart(first, second));
            }
        };

        if self.absorption_hysteresis >= 0.0 {
            self.absorption_hysteresis -= dt;
        }
        if self.energy.vibrating {
            self.vibration_radians += dt * VIBRATION_FREQUENCY * TAU;
            apply_vibration(self.kind.vibration_mode(), self.vibration_radians, &mut self.atoms);
        }
        if self.energy.rotating {
            let delta = dt * ROTATION_RATE * TAU;
            self.rotation_radians += if self.energy.clockwise { -delta } else { delta };
        }
        self.center_of_gravity += self.velocity * dt;
        self.update_atom_positions();

        outcome
    }

    /// Release a photon from the centre of gravity in a random direction.
    /// Ends any held photon and starts the absorption cooldown.
    pub fn emit_photon(&mut self, wavelength: Wavelength, ctx: &mut SimContext) -> Photon {
        self.release();
        self.absorption_hysteresis = ABSORPTION_HYSTERESIS_TIME;
        let photon = Photon::new(ctx.next_photon_id(), wavelength, self.center_of_gravity)
            .with_direction(ctx.rng.next_angle());
        log::debug!("{:?} {:?} emitted {:?} photon {:?}", self.kind, self.id, wavelength, photon.id);
        photon
    }

    /// Split into the two dissociation fragments. This molecule becomes inert.
    ///
    /// # Panics
    /// If the kind has no dissociation products, or it already broke apart.
    pub fn break_apart(&mut self, ctx: &mut SimContext) -> (Molecule, Molecule) {
        assert!(!self.dissociated, "{:?} {:?} already broke apart", self.kind, self.id);
        let Some((first, second)) = self.kind.fragments() else {
            panic!("{:?} cannot break apart", self.kind);
        };

        let mut a = self.fragment(first, ctx);
        let mut b = self.fragment(second, ctx);
        let axis = (b.center_of_gravity - a.center_of_gravity)
            .try_normalize()
            .unwrap_or(Vec2::X);
        a.velocity = self.velocity - axis * BREAK_APART_SPEED;
        b.velocity = self.velocity + axis * BREAK_APART_SPEED;

        self.release();
        self.absorption_hysteresis = ABSORPTION_HYSTERESIS_TIME;
        self.dissociated = true;
        log::debug!(
            "{:?} {:?} broke apart into {:?} {:?} and {:?} {:?}",
            self.kind,
            self.id,
            a.kind,
            a.id,
            b.kind,
            b.id
        );
        (a, b)
    }

    /// Return all dynamic state to ground. Position, velocity and topology stay.
    pub fn reset(&mut self) {
        self.active = AbsorptionStrategy::Null;
        self.energy = EnergyState::default();
        self.absorption_hysteresis = 0.0;
        self.rotation_radians = 0.0;
        self.passed_through.clear();
        self.set_vibration(0.0);
    }

    // -- Geometry --

    /// Recompute absolute atom positions:
    /// `rotate(relaxed + vibration, rotation) + centre_of_gravity`.
    pub fn update_atom_positions(&mut self) {
        let rotation = Vec2::from_angle(self.rotation_radians);
        for atom in self.atoms.iter_mut() {
            atom.position = rotation.rotate(atom.local_offset()) + self.center_of_gravity;
        }
    }

    /// Set the vibration phase and move atoms accordingly.
    pub fn set_vibration(&mut self, radians: f32) {
        self.vibration_radians = radians;
        apply_vibration(self.kind.vibration_mode(), radians, &mut self.atoms);
        self.update_atom_positions();
    }

    pub fn set_rotation(&mut self, radians: f32) {
        self.rotation_radians = radians;
        self.update_atom_positions();
    }

    pub fn set_center_of_gravity(&mut self, position: Vec2) {
        self.center_of_gravity = position;
        self.update_atom_positions();
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    // -- Persistence --

    pub fn to_state(&self) -> MoleculeState {
        MoleculeState {
            id: self.id.0,
            kind: self.kind,
            high_electronic_energy: self.energy.high_electronic_energy,
            center_of_gravity: self.center_of_gravity,
            velocity: self.velocity,
            absorption_hysteresis: self.absorption_hysteresis,
            vibration_radians: self.vibration_radians,
            rotation_radians: self.rotation_radians,
            rotation_clockwise: self.energy.clockwise,
            atoms: self
                .atoms
                .iter()
                .map(|atom| AtomState {
                    element: atom.element,
                    relaxed_offset: atom.relaxed_offset(),
                })
                .collect(),
            bonds: self.bonds.clone(),
            active: self.active,
        }
    }

    /// Rebuild a molecule from a snapshot, resuming any photon hold.
    pub fn from_state(state: &MoleculeState) -> Result<Molecule, StateError> {
        state.validate()?;
        let active = state.resumed_strategy();
        let mut energy = EnergyState {
            clockwise: state.rotation_clockwise,
            ..EnergyState::default()
        };
        active.on_absorbed(&mut energy);
        let mut molecule = Self {
            id: MoleculeId(state.id),
            kind: state.kind,
            atoms: state
                .atoms
                .iter()
                .map(|atom| Atom::new(atom.element, atom.relaxed_offset))
                .collect(),
            bonds: state.bonds.clone(),
            center_of_gravity: state.center_of_gravity,
            velocity: state.velocity,
            rotation_radians: state.rotation_radians,
            vibration_radians: 0.0,
            energy,
            strategies: state.kind.strategies(),
            active,
            absorption_hysteresis: state.absorption_hysteresis,
            passed_through: Ring::new(),
            dissociated: false,
        };
        molecule.set_vibration(state.vibration_radians);
        Ok(molecule)
    }

    pub fn to_json(&self) -> Result<String, StateError> {
        self.to_state().to_json()
    }

    pub fn from_json(json: &str) -> Result<Molecule, StateError> {
        Self::from_state(&MoleculeState::from_json(json)?)
    }

    // -- Internals --

    /// Drop the held photon, lower every energy flag and relax the geometry.
    fn release(&mut self) {
        self.active = AbsorptionStrategy::Null;
        self.energy.clear();
        if self.vibration_radians != 0.0 {
            self.set_vibration(0.0);
        }
    }

    /// Build one fragment at the mass centre of the parent atoms it keeps.
    fn fragment(&self, fragment: Fragment, ctx: &mut SimContext) -> Molecule {
        let centre = mass_center(
            fragment
                .parent_atoms
                .iter()
                .map(|&i| (self.atoms[i].element, self.atoms[i].position)),
        );
        Molecule::spawn(fragment.kind, ctx)
            .with_rotation(self.rotation_radians)
            .with_center_of_gravity(centre)
    }
}
