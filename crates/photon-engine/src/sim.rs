//! Photon/molecule world.
//!
//! Owns the photons in flight, the molecules in the beam, the light source
//! and the shared random source, and runs one tick in a fixed order:
//! absorption queries against pre-step photon positions, molecule steps,
//! photon motion, culling, then new light-source photons.

use glam::Vec2;

use crate::api::config::SimConfig;
use crate::api::context::SimContext;
use crate::api::types::{MoleculeId, PhotonId, SimEvent};
use crate::components::light_source::LightSource;
use crate::components::photon::Photon;
use crate::components::wavelength::Wavelength;
use crate::input::queue::Command;
use crate::molecule::kinds::MoleculeKind;
use crate::molecule::{Molecule, QueryOutcome, StepOutcome};

pub struct Simulation {
    config: SimConfig,
    ctx: SimContext,
    molecules: Vec<Molecule>,
    photons: Vec<Photon>,
    source: LightSource,
    /// Events from the most recent tick.
    events: Vec<SimEvent>,
    paused: bool,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let mut sim = Self {
            ctx: SimContext::new(config.seed),
            source: config.light_source.clone(),
            molecules: Vec::new(),
            photons: Vec::with_capacity(config.max_photons),
            events: Vec::new(),
            paused: false,
            config,
        };
        sim.set_target(sim.config.initial_target);
        log::info!(
            "simulation: {} in a {:?} beam, seed {}",
            sim.config.initial_target.name(),
            sim.source.wavelength,
            sim.config.seed
        );
        sim
    }

    // -- Accessors --

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn molecules(&self) -> &[Molecule] {
        &self.molecules
    }

    pub fn molecule(&self, id: MoleculeId) -> Option<&Molecule> {
        self.molecules.iter().find(|m| m.id() == id)
    }

    pub fn photons(&self) -> &[Photon] {
        &self.photons
    }

    pub fn source(&self) -> &LightSource {
        &self.source
    }

    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    /// Events produced by the most recent `step`.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    // -- Commands --

    /// Replace everything in the beam with one molecule of `kind`.
    /// Photons in flight are discarded with it.
    pub fn set_target(&mut self, kind: MoleculeKind) {
        self.molecules.clear();
        self.photons.clear();
        self.spawn_molecule(kind, self.config.target_position);
        log::info!("simulation: target is now {}", kind.name());
    }

    pub fn spawn_molecule(&mut self, kind: MoleculeKind, position: Vec2) -> MoleculeId {
        let molecule = Molecule::spawn(kind, &mut self.ctx).with_center_of_gravity(position);
        let id = molecule.id();
        self.molecules.push(molecule);
        id
    }

    pub fn set_wavelength(&mut self, wavelength: Wavelength) {
        self.source.set_wavelength(wavelength);
    }

    pub fn set_emission_rate(&mut self, rate: f32) {
        self.source.set_emission_rate(rate);
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Launch a photon from an arbitrary point along `direction` (radians).
    pub fn fire_photon(&mut self, wavelength: Wavelength, position: Vec2, direction: f32) -> PhotonId {
        let photon = Photon::new(self.ctx.next_photon_id(), wavelength, position).with_direction(direction);
        let id = photon.id;
        self.photons.push(photon);
        id
    }

    /// Back to the configured initial state, with the random source reseeded.
    pub fn reset(&mut self) {
        self.ctx = SimContext::new(self.config.seed);
        self.source = self.config.light_source.clone();
        self.paused = false;
        self.events.clear();
        self.set_target(self.config.initial_target);
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SetWavelength(w) => self.set_wavelength(w),
            Command::SetTarget(kind) => self.set_target(kind),
            Command::SetEmissionRate(rate) => self.set_emission_rate(rate),
            Command::SetPaused(paused) => self.set_paused(paused),
            Command::StepOnce => {
                if self.paused {
                    self.events.clear();
                    self.advance(self.config.fixed_dt);
                }
            }
            Command::Reset => self.reset(),
        }
    }

    /// Advance the world by `dt` seconds. Does nothing while paused.
    pub fn step(&mut self, dt: f32) {
        self.events.clear();
        if self.paused {
            return;
        }
        self.advance(dt);
    }

    // -- Tick --

    fn advance(&mut self, dt: f32) {
        self.query_absorptions();
        let emitted = self.step_molecules(dt);

        for photon in self.photons.iter_mut() {
            photon.step(dt);
        }
        let config = &self.config;
        self.photons.retain(|p| config.contains(p.position));
        self.molecules.retain(|m| config.contains(m.center_of_gravity()));

        // Re-emissions always enter the world; only the lamp is capped.
        self.photons.extend(emitted);
        for _ in 0..self.source.tick(dt) {
            let photon = self.source.fire(self.ctx.next_photon_id());
            self.push_source_photon(photon);
        }
    }

    /// Offer every photon to every molecule, using positions from the start of the tick.
    fn query_absorptions(&mut self) {
        let molecules = &mut self.molecules;
        let rng = &mut self.ctx.rng;
        let events = &mut self.events;
        self.photons.retain(|photon| {
            for molecule in molecules.iter_mut() {
                match molecule.query_absorb_photon(photon, rng) {
                    QueryOutcome::Absorbed => {
                        events.push(SimEvent::PhotonAbsorbed {
                            molecule: molecule.id(),
                            photon: photon.id,
                            wavelength: photon.wavelength(),
                        });
                        return false;
                    }
                    QueryOutcome::PassedThrough => events.push(SimEvent::PhotonPassedThrough {
                        molecule: molecule.id(),
                        photon: photon.id,
                    }),
                    QueryOutcome::Ignored => {}
                }
            }
            true
        });
    }

    /// Step molecules; swap dissociated ones for their fragments.
    /// Returns re-emitted photons.
    fn step_molecules(&mut self, dt: f32) -> Vec<Photon> {
        let mut emitted = Vec::new();
        let mut fragments = Vec::new();
        for molecule in self.molecules.iter_mut() {
            match molecule.step(dt, &mut self.ctx) {
                Some(StepOutcome::Emitted(photon)) => {
                    self.events.push(SimEvent::PhotonEmitted {
                        molecule: molecule.id(),
                        photon,
                    });
                    emitted.push(photon);
                }
                Some(StepOutcome::BrokeApart(first, second)) => {
                    self.events.push(SimEvent::BrokeApart {
                        original: molecule.id(),
                        first: first.id(),
                        second: second.id(),
                    });
                    fragments.push(first);
                    fragments.push(second);
                }
                None => {}
            }
        }
        self.molecules.retain(|m| !m.is_dissociated());
        self.molecules.extend(fragments);
        emitted
    }

    fn push_source_photon(&mut self, photon: Photon) {
        if self.photons.len() >= self.config.max_photons {
            log::debug!("simulation: photon cap {} reached, dropping {:?}", self.config.max_photons, photon.id);
            return;
        }
        self.photons.push(photon);
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}
