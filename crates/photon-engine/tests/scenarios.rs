//! End-to-end scenarios through the public API.

use glam::Vec2;
use photon_engine::{
    Molecule, MoleculeKind, Photon, PhotonId, QueryOutcome, SimConfig, SimContext, SimEvent,
    Simulation, StepOutcome, Wavelength,
};

const DT: f32 = 1.0 / 60.0;

/// Offer fresh photons at the centre until one is absorbed.
fn force_absorb(molecule: &mut Molecule, ctx: &mut SimContext, wavelength: Wavelength) {
    for _ in 0..200 {
        let photon = Photon::new(ctx.next_photon_id(), wavelength, molecule.center_of_gravity());
        if molecule.query_absorb_photon(&photon, &mut ctx.rng).is_absorbed() {
            return;
        }
    }
    panic!("{:?} never absorbed {:?}", molecule.kind(), wavelength);
}

/// Step until the molecule re-emits. Returns the photon and the elapsed time.
fn step_until_emitted(molecule: &mut Molecule, ctx: &mut SimContext) -> (Photon, f32) {
    let mut elapsed = 0.0;
    for _ in 0..200 {
        elapsed += DT;
        if let Some(StepOutcome::Emitted(photon)) = molecule.step(DT, ctx) {
            return (photon, elapsed);
        }
    }
    panic!("{:?} never re-emitted", molecule.kind());
}

#[test]
fn carbon_monoxide_vibrates_then_reemits_infrared() {
    let mut ctx = SimContext::new(3);
    let mut co = Molecule::spawn(MoleculeKind::CO, &mut ctx);
    assert!(!co.is_vibrating());

    force_absorb(&mut co, &mut ctx, Wavelength::Infrared);
    assert!(co.is_vibrating());
    assert!(co.is_photon_absorbed());

    let (photon, elapsed) = step_until_emitted(&mut co, &mut ctx);
    assert_eq!(photon.wavelength(), Wavelength::Infrared);
    assert_eq!(photon.position, co.center_of_gravity());
    assert!((0.6..=1.25).contains(&elapsed), "held for {elapsed}");
    assert!(!co.is_vibrating());
    assert!(!co.is_photon_absorbed());
    // Relaxed geometry after release.
    for i in 0..co.atoms().len() {
        assert_eq!(co.atom_vibration_offset(i), Vec2::ZERO);
    }
}

#[test]
fn water_rotates_under_microwaves_without_vibrating() {
    let mut ctx = SimContext::new(8);
    let mut water = Molecule::spawn(MoleculeKind::H2O, &mut ctx);
    force_absorb(&mut water, &mut ctx, Wavelength::Microwave);
    assert!(water.is_rotating());
    assert!(!water.is_vibrating());

    let start = water.rotation_radians();
    water.step(DT, &mut ctx);
    let moved = water.rotation_radians() - start;
    if water.rotation_direction_clockwise() {
        assert!(moved < 0.0);
    } else {
        assert!(moved > 0.0);
    }

    let (photon, _) = step_until_emitted(&mut water, &mut ctx);
    assert_eq!(photon.wavelength(), Wavelength::Microwave);
    assert!(!water.is_rotating());
}

#[test]
fn nitrogen_dioxide_glows_under_visible_light() {
    let mut ctx = SimContext::new(5);
    let mut no2 = Molecule::spawn(MoleculeKind::NO2, &mut ctx);
    force_absorb(&mut no2, &mut ctx, Wavelength::Visible);
    assert!(no2.is_high_electronic_energy());
    let (photon, _) = step_until_emitted(&mut no2, &mut ctx);
    assert_eq!(photon.wavelength(), Wavelength::Visible);
    assert!(!no2.is_high_electronic_energy());
}

#[test]
fn hysteresis_rejects_photons_at_every_distance() {
    let mut ctx = SimContext::new(21);
    let mut co = Molecule::spawn(MoleculeKind::CO, &mut ctx);
    force_absorb(&mut co, &mut ctx, Wavelength::Infrared);
    step_until_emitted(&mut co, &mut ctx);
    assert!(co.absorption_hysteresis() > 0.0);

    let mut offered = Vec::new();
    while co.absorption_hysteresis() > 0.0 {
        for distance in [0.0, 50.0, 99.0] {
            let id = ctx.next_photon_id();
            let photon = Photon::new(id, Wavelength::Infrared, co.center_of_gravity() + Vec2::new(distance, 0.0));
            assert_eq!(co.query_absorb_photon(&photon, &mut ctx.rng), QueryOutcome::Ignored);
            offered.push(id);
        }
        co.step(0.05, &mut ctx);
    }
    // Photons ignored during the cooldown were never evaluated.
    assert!(offered.iter().all(|id| !co.has_passed_through(*id)));

    let photon = Photon::new(ctx.next_photon_id(), Wavelength::Infrared, co.center_of_gravity());
    assert_ne!(co.query_absorb_photon(&photon, &mut ctx.rng), QueryOutcome::Ignored);
}

#[test]
fn ultraviolet_beam_breaks_nitrogen_dioxide_once() {
    let mut config = SimConfig {
        initial_target: MoleculeKind::NO2,
        ..SimConfig::default()
    };
    config.light_source.wavelength = Wavelength::Ultraviolet;
    config.light_source.emission_rate = 20.0;
    let mut sim = Simulation::new(config);
    let original = sim.molecules()[0].id();

    let mut broke = Vec::new();
    for _ in 0..(60 * 5) {
        sim.step(DT);
        for event in sim.events() {
            if let SimEvent::BrokeApart { original, first, second } = event {
                broke.push((*original, *first, *second));
            }
        }
    }

    assert_eq!(broke.len(), 1);
    let (gone, first, second) = broke[0];
    assert_eq!(gone, original);
    assert!(sim.molecule(original).is_none());
    assert_ne!(first, second);
    assert_ne!(first, original);
}

#[test]
fn fragments_fly_apart_along_the_bond() {
    let mut ctx = SimContext::new(1);
    let mut ozone = Molecule::spawn(MoleculeKind::O3, &mut ctx);
    let (a, b) = ozone.break_apart(&mut ctx);
    assert!(ozone.is_dissociated());

    let kinds = [a.kind(), b.kind()];
    assert!(kinds.contains(&MoleculeKind::O2));
    assert!(kinds.contains(&MoleculeKind::O));
    // Opposite velocities from a resting parent.
    assert!((a.velocity() + b.velocity()).length() < 1e-3);
    assert!(a.velocity().length() > 0.0);

    // Inert once dissociated.
    let photon = Photon::new(PhotonId(999), Wavelength::Ultraviolet, ozone.center_of_gravity());
    assert_eq!(ozone.query_absorb_photon(&photon, &mut ctx.rng), QueryOutcome::Ignored);
    assert!(ozone.step(DT, &mut ctx).is_none());
}

#[test]
fn transparent_molecule_lets_photons_through() {
    let mut ctx = SimContext::default();
    let mut n2 = Molecule::spawn(MoleculeKind::N2, &mut ctx);
    for wavelength in Wavelength::ALL {
        let photon = Photon::new(ctx.next_photon_id(), wavelength, n2.center_of_gravity());
        assert_eq!(n2.query_absorb_photon(&photon, &mut ctx.rng), QueryOutcome::PassedThrough);
        assert!(n2.has_passed_through(photon.id));
        // Asked again: already declined.
        assert_eq!(n2.query_absorb_photon(&photon, &mut ctx.rng), QueryOutcome::Ignored);
    }
}

#[test]
fn snapshot_resumes_the_held_photon() {
    let mut ctx = SimContext::new(13);
    let mut no2 = Molecule::spawn(MoleculeKind::NO2, &mut ctx)
        .with_center_of_gravity(Vec2::new(120.0, -40.0))
        .with_rotation(0.7);
    force_absorb(&mut no2, &mut ctx, Wavelength::Visible);
    no2.step(DT, &mut ctx);

    let json = no2.to_json().unwrap();
    let mut restored = Molecule::from_json(&json).unwrap();
    assert_eq!(restored.id(), no2.id());
    assert_eq!(restored.kind(), MoleculeKind::NO2);
    assert!(restored.is_high_electronic_energy());
    assert!(restored.is_photon_absorbed());
    assert_eq!(restored.center_of_gravity(), no2.center_of_gravity());
    for (a, b) in restored.atoms().iter().zip(no2.atoms()) {
        assert!(a.position.distance(b.position) < 1e-3);
    }

    // The hold resumes and the glow clears on re-emission.
    let (photon, _) = step_until_emitted(&mut restored, &mut ctx);
    assert_eq!(photon.wavelength(), Wavelength::Visible);
    assert!(!restored.is_high_electronic_energy());
    assert!(!restored.is_photon_absorbed());

    // Ready again: one band at a time.
    for _ in 0..30 {
        restored.step(DT, &mut ctx);
    }
    force_absorb(&mut restored, &mut ctx, Wavelength::Infrared);
    assert!(restored.is_vibrating());
    assert_eq!(restored.energy().active_count(), 1);
}

#[test]
fn same_seed_same_history() {
    let run = || {
        let mut config = SimConfig {
            seed: 77,
            initial_target: MoleculeKind::O3,
            ..SimConfig::default()
        };
        config.light_source.wavelength = Wavelength::Microwave;
        config.light_source.emission_rate = 12.0;
        let mut sim = Simulation::new(config);
        let mut log = Vec::new();
        for _ in 0..300 {
            sim.step(DT);
            log.extend_from_slice(sim.events());
        }
        log
    };
    assert_eq!(run(), run());
}
