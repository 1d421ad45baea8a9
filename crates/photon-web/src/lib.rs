//! `#[wasm_bindgen]` exports for the molecule/light simulation.
//!
//! The host calls `sim_init` once, `sim_tick` every animation frame, and
//! reads the photon, atom and event sections through the pointer + count
//! accessors. UI controls go through `sim_command` or the typed setters.

pub mod runner;

pub use runner::SimRunner;

use std::cell::RefCell;

use photon_engine::{Command, MoleculeKind, SimConfig, Wavelength};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SimRunner>> = const { RefCell::new(None) };
}

fn with_runner<R>(f: impl FnOnce(&mut SimRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Simulation not initialized. Call sim_init() first.");
        f(runner)
    })
}

/// Build the simulation from a JSON configuration (`""` or `"{}"` for defaults).
/// A seed of 0 asks for a random seed.
#[wasm_bindgen]
pub fn sim_init(config_json: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let json = if config_json.trim().is_empty() { "{}" } else { config_json };
    let mut config = match SimConfig::from_json(json) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("photon-web: bad config ({err}), using defaults");
            SimConfig::default()
        }
    };
    if config.seed == 0 {
        config.seed = (js_sys::Math::random() * u32::MAX as f64) as u64 | 1;
    }

    let runner = SimRunner::new(config);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("photon-web: initialized");
}

#[wasm_bindgen]
pub fn sim_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

/// Queue a command in numeric form. Returns false if it was not understood.
#[wasm_bindgen]
pub fn sim_command(kind: u32, value: f32) -> bool {
    match Command::decode(kind, value) {
        Some(command) => {
            with_runner(|r| r.push_command(command));
            true
        }
        None => {
            log::warn!("photon-web: ignoring command {kind} ({value})");
            false
        }
    }
}

// ---- Typed commands ----

#[wasm_bindgen]
pub fn sim_set_wavelength(index: u32) {
    match Wavelength::from_index(index as usize) {
        Some(w) => with_runner(|r| r.push_command(Command::SetWavelength(w))),
        None => log::warn!("photon-web: no wavelength band {index}"),
    }
}

#[wasm_bindgen]
pub fn sim_set_target(code: u32) {
    match MoleculeKind::from_code(code) {
        Some(kind) => with_runner(|r| r.push_command(Command::SetTarget(kind))),
        None => log::warn!("photon-web: no molecule kind {code}"),
    }
}

#[wasm_bindgen]
pub fn sim_set_emission_rate(rate: f32) {
    with_runner(|r| r.push_command(Command::SetEmissionRate(rate)));
}

#[wasm_bindgen]
pub fn sim_set_paused(paused: bool) {
    with_runner(|r| r.push_command(Command::SetPaused(paused)));
}

#[wasm_bindgen]
pub fn sim_step_once() {
    with_runner(|r| r.push_command(Command::StepOnce));
}

#[wasm_bindgen]
pub fn sim_reset() {
    with_runner(|r| r.push_command(Command::Reset));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_photons_ptr() -> *const f32 {
    with_runner(|r| r.photons_ptr())
}

#[wasm_bindgen]
pub fn get_photon_count() -> u32 {
    with_runner(|r| r.photon_count())
}

#[wasm_bindgen]
pub fn get_atoms_ptr() -> *const f32 {
    with_runner(|r| r.atoms_ptr())
}

#[wasm_bindgen]
pub fn get_atom_count() -> u32 {
    with_runner(|r| r.atom_count())
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr())
}

#[wasm_bindgen]
pub fn get_event_count() -> u32 {
    with_runner(|r| r.event_count())
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(|r| r.world_width())
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(|r| r.world_height())
}

#[wasm_bindgen]
pub fn get_max_photons() -> u32 {
    with_runner(|r| r.max_photons())
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events())
}

#[wasm_bindgen]
pub fn get_protocol_version() -> f32 {
    photon_engine::bridge::protocol::PROTOCOL_VERSION
}

/// JSON snapshot of the molecule at `index`, or an empty string.
#[wasm_bindgen]
pub fn get_molecule_json(index: u32) -> String {
    with_runner(|r| {
        let Some(molecule) = r.simulation().molecules().get(index as usize) else {
            return String::new();
        };
        match molecule.to_json() {
            Ok(json) => json,
            Err(err) => {
                log::error!("photon-web: snapshot of {:?} failed: {err}", molecule.id());
                String::new()
            }
        }
    })
}
