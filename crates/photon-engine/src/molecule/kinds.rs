//! Per-molecule-type data: relaxed geometry, bonds, absorption table,
//! vibration mode and dissociation products.
//!
//! All distances are in picometres. Geometry is built in a convenient frame
//! and then shifted so the mass-weighted centre sits at the origin.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::atom::{Atom, AtomicBond, Element};
use crate::components::wavelength::{Wavelength, WavelengthTable};
use crate::molecule::strategy::StrategyKind;

const CARBON_OXYGEN_DISTANCE: f32 = 170.0;
const CO2_CARBON_OXYGEN_DISTANCE: f32 = 170.0;
const NITROGEN_NITROGEN_DISTANCE: f32 = 170.0;
const OXYGEN_OXYGEN_DISTANCE: f32 = 170.0;
const NITROGEN_OXYGEN_DISTANCE: f32 = 170.0;
const WATER_OXYGEN_HYDROGEN_DISTANCE: f32 = 130.0;
const METHANE_CARBON_HYDROGEN_DISTANCE: f32 = 130.0;
/// Half of the angle between the two outer atoms of a bent molecule.
const WATER_HALF_ANGLE: f32 = 52.25 * std::f32::consts::PI / 180.0;
const NO2_HALF_ANGLE: f32 = 67.0 * std::f32::consts::PI / 180.0;
const O3_HALF_ANGLE: f32 = 58.9 * std::f32::consts::PI / 180.0;

/// Peak displacement along the bond for stretching diatomics.
const STRETCH_AMPLITUDE: f32 = 3.0;
/// Peak displacement of the centre atom of a bending molecule.
const BEND_AMPLITUDE: f32 = 20.0;
/// Peak tangential swing of methane hydrogens.
const METHANE_SWING_AMPLITUDE: f32 = 12.0;

/// Every molecule the simulation can hold, including dissociation fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoleculeKind {
    CO,
    N2,
    O2,
    CO2,
    H2O,
    NO2,
    O3,
    CH4,
    NO,
    O,
}

/// How a vibration angle is turned into atom offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VibrationMode {
    None,
    /// Both atoms move along the bond axis in opposite directions.
    Stretch,
    /// The centre atom (index 0) moves on y, the outer atoms the other way.
    Bend,
    /// Hydrogens swing tangentially in alternating directions.
    Swing,
}

/// One half of a dissociation: fragment kind plus the parent atoms it keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub kind: MoleculeKind,
    pub parent_atoms: &'static [usize],
}

impl MoleculeKind {
    /// The molecules a user can pick as the photon target.
    pub const SELECTABLE: [MoleculeKind; 8] = [
        MoleculeKind::CH4,
        MoleculeKind::CO,
        MoleculeKind::N2,
        MoleculeKind::O2,
        MoleculeKind::CO2,
        MoleculeKind::H2O,
        MoleculeKind::NO2,
        MoleculeKind::O3,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MoleculeKind::CO => "carbon monoxide",
            MoleculeKind::N2 => "nitrogen",
            MoleculeKind::O2 => "oxygen",
            MoleculeKind::CO2 => "carbon dioxide",
            MoleculeKind::H2O => "water",
            MoleculeKind::NO2 => "nitrogen dioxide",
            MoleculeKind::O3 => "ozone",
            MoleculeKind::CH4 => "methane",
            MoleculeKind::NO => "nitric oxide",
            MoleculeKind::O => "oxygen atom",
        }
    }

    /// Wire code for frame buffers and the host command channel.
    pub fn code(self) -> u32 {
        match self {
            MoleculeKind::CO => 0,
            MoleculeKind::N2 => 1,
            MoleculeKind::O2 => 2,
            MoleculeKind::CO2 => 3,
            MoleculeKind::H2O => 4,
            MoleculeKind::NO2 => 5,
            MoleculeKind::O3 => 6,
            MoleculeKind::CH4 => 7,
            MoleculeKind::NO => 8,
            MoleculeKind::O => 9,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        let kind = match code {
            0 => MoleculeKind::CO,
            1 => MoleculeKind::N2,
            2 => MoleculeKind::O2,
            3 => MoleculeKind::CO2,
            4 => MoleculeKind::H2O,
            5 => MoleculeKind::NO2,
            6 => MoleculeKind::O3,
            7 => MoleculeKind::CH4,
            8 => MoleculeKind::NO,
            9 => MoleculeKind::O,
            _ => return None,
        };
        Some(kind)
    }

    /// Reaction to each wavelength. Fixed per kind.
    pub fn strategies(self) -> WavelengthTable<StrategyKind> {
        use StrategyKind::*;
        use Wavelength::*;
        let table = WavelengthTable::empty();
        match self {
            MoleculeKind::CO | MoleculeKind::H2O | MoleculeKind::NO => {
                table.with(Microwave, Rotation).with(Infrared, Vibration)
            }
            MoleculeKind::CO2 | MoleculeKind::CH4 => table.with(Infrared, Vibration),
            MoleculeKind::NO2 => table
                .with(Microwave, Rotation)
                .with(Infrared, Vibration)
                .with(Visible, Excitation)
                .with(Ultraviolet, BreakApart),
            MoleculeKind::O3 => table
                .with(Microwave, Rotation)
                .with(Infrared, Vibration)
                .with(Ultraviolet, BreakApart),
            MoleculeKind::N2 | MoleculeKind::O2 | MoleculeKind::O => table,
        }
    }

    pub fn vibration_mode(self) -> VibrationMode {
        match self {
            MoleculeKind::CO | MoleculeKind::NO => VibrationMode::Stretch,
            MoleculeKind::CO2 | MoleculeKind::H2O | MoleculeKind::NO2 | MoleculeKind::O3 => {
                VibrationMode::Bend
            }
            MoleculeKind::CH4 => VibrationMode::Swing,
            MoleculeKind::N2 | MoleculeKind::O2 | MoleculeKind::O => VibrationMode::None,
        }
    }

    /// Dissociation products, if this kind can break apart.
    pub fn fragments(self) -> Option<(Fragment, Fragment)> {
        match self {
            MoleculeKind::NO2 => Some((
                Fragment { kind: MoleculeKind::NO, parent_atoms: &[0, 1] },
                Fragment { kind: MoleculeKind::O, parent_atoms: &[2] },
            )),
            MoleculeKind::O3 => Some((
                Fragment { kind: MoleculeKind::O2, parent_atoms: &[0, 1] },
                Fragment { kind: MoleculeKind::O, parent_atoms: &[2] },
            )),
            _ => None,
        }
    }

    /// Relaxed atoms (centred on mass) and bonds.
    pub fn build(self) -> (Vec<Atom>, Vec<AtomicBond>) {
        use Element::*;
        let (raw, bonds): (Vec<(Element, Vec2)>, Vec<AtomicBond>) = match self {
            MoleculeKind::CO => diatomic(Carbon, Oxygen, CARBON_OXYGEN_DISTANCE, 3),
            MoleculeKind::N2 => diatomic(Nitrogen, Nitrogen, NITROGEN_NITROGEN_DISTANCE, 3),
            MoleculeKind::O2 => diatomic(Oxygen, Oxygen, OXYGEN_OXYGEN_DISTANCE, 2),
            MoleculeKind::NO => diatomic(Nitrogen, Oxygen, NITROGEN_OXYGEN_DISTANCE, 2),
            MoleculeKind::CO2 => (
                vec![
                    (Carbon, Vec2::ZERO),
                    (Oxygen, Vec2::new(CO2_CARBON_OXYGEN_DISTANCE, 0.0)),
                    (Oxygen, Vec2::new(-CO2_CARBON_OXYGEN_DISTANCE, 0.0)),
                ],
                vec![AtomicBond::new(0, 1, 2), AtomicBond::new(0, 2, 2)],
            ),
            MoleculeKind::H2O => bent(Oxygen, Hydrogen, WATER_OXYGEN_HYDROGEN_DISTANCE, WATER_HALF_ANGLE, 1),
            MoleculeKind::NO2 => bent(Nitrogen, Oxygen, NITROGEN_OXYGEN_DISTANCE, NO2_HALF_ANGLE, 2),
            MoleculeKind::O3 => bent(Oxygen, Oxygen, OXYGEN_OXYGEN_DISTANCE, O3_HALF_ANGLE, 2),
            MoleculeKind::CH4 => {
                let d = METHANE_CARBON_HYDROGEN_DISTANCE;
                (
                    vec![
                        (Carbon, Vec2::ZERO),
                        (Hydrogen, Vec2::new(d, 0.0)),
                        (Hydrogen, Vec2::new(0.0, d)),
                        (Hydrogen, Vec2::new(-d, 0.0)),
                        (Hydrogen, Vec2::new(0.0, -d)),
                    ],
                    (1..=4).map(|h| AtomicBond::new(0, h, 1)).collect(),
                )
            }
            MoleculeKind::O => (vec![(Oxygen, Vec2::ZERO)], Vec::new()),
        };
        let centre = mass_center(raw.iter().map(|(e, p)| (*e, *p)));
        let atoms = raw
            .into_iter()
            .map(|(element, pos)| Atom::new(element, pos - centre))
            .collect();
        (atoms, bonds)
    }

    /// Number of atoms in the relaxed template.
    pub fn atom_count(self) -> usize {
        match self {
            MoleculeKind::O => 1,
            MoleculeKind::CO | MoleculeKind::N2 | MoleculeKind::O2 | MoleculeKind::NO => 2,
            MoleculeKind::CO2 | MoleculeKind::H2O | MoleculeKind::NO2 | MoleculeKind::O3 => 3,
            MoleculeKind::CH4 => 5,
        }
    }
}

/// Write vibration offsets for `angle` into `atoms`, following `mode`.
/// Offsets keep the mass-weighted centre fixed.
pub fn apply_vibration(mode: VibrationMode, angle: f32, atoms: &mut [Atom]) {
    let s = angle.sin();
    match mode {
        VibrationMode::None => {
            for atom in atoms.iter_mut() {
                atom.vibration_offset = Vec2::ZERO;
            }
        }
        VibrationMode::Stretch => {
            let [a, b] = atoms else {
                panic!("stretch vibration needs exactly two atoms, got {}", atoms.len());
            };
            let axis = (b.relaxed_offset() - a.relaxed_offset()).normalize_or_zero();
            let total = a.element.mass() + b.element.mass();
            // Heavier atom moves less.
            a.vibration_offset = -axis * STRETCH_AMPLITUDE * s * (b.element.mass() / total);
            b.vibration_offset = axis * STRETCH_AMPLITUDE * s * (a.element.mass() / total);
        }
        VibrationMode::Bend => {
            let Some((centre, outer)) = atoms.split_first_mut() else {
                panic!("bend vibration needs a centre atom");
            };
            let outer_mass: f32 = outer.iter().map(|a| a.element.mass()).sum();
            centre.vibration_offset = Vec2::new(0.0, BEND_AMPLITUDE * s);
            let outer_dy = -BEND_AMPLITUDE * s * centre.element.mass() / outer_mass;
            for atom in outer.iter_mut() {
                atom.vibration_offset = Vec2::new(0.0, outer_dy);
            }
        }
        VibrationMode::Swing => {
            let Some((_, hydrogens)) = atoms.split_first_mut() else {
                panic!("swing vibration needs a centre atom");
            };
            for (i, atom) in hydrogens.iter_mut().enumerate() {
                let tangent = atom.relaxed_offset().normalize_or_zero().perp();
                let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
                atom.vibration_offset = tangent * METHANE_SWING_AMPLITUDE * s * sign;
            }
        }
    }
}

/// Mass-weighted centre of a set of atoms.
pub fn mass_center(atoms: impl Iterator<Item = (Element, Vec2)>) -> Vec2 {
    let (weighted, mass) = atoms.fold((Vec2::ZERO, 0.0), |(sum, m), (element, pos)| {
        (sum + pos * element.mass(), m + element.mass())
    });
    if mass > 0.0 {
        weighted / mass
    } else {
        Vec2::ZERO
    }
}

fn diatomic(a: Element, b: Element, distance: f32, order: u8) -> (Vec<(Element, Vec2)>, Vec<AtomicBond>) {
    (
        vec![(a, Vec2::ZERO), (b, Vec2::new(distance, 0.0))],
        vec![AtomicBond::new(0, 1, order)],
    )
}

/// Centre atom at the origin, two outer atoms below it at `half_angle` from vertical.
fn bent(
    centre: Element,
    outer: Element,
    distance: f32,
    half_angle: f32,
    order: u8,
) -> (Vec<(Element, Vec2)>, Vec<AtomicBond>) {
    let dx = distance * half_angle.sin();
    let dy = -distance * half_angle.cos();
    (
        vec![
            (centre, Vec2::ZERO),
            (outer, Vec2::new(dx, dy)),
            (outer, Vec2::new(-dx, dy)),
        ],
        vec![AtomicBond::new(0, 1, order), AtomicBond::new(0, 2, order)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [MoleculeKind; 10] = [
        MoleculeKind::CO,
        MoleculeKind::N2,
        MoleculeKind::O2,
        MoleculeKind::CO2,
        MoleculeKind::H2O,
        MoleculeKind::NO2,
        MoleculeKind::O3,
        MoleculeKind::CH4,
        MoleculeKind::NO,
        MoleculeKind::O,
    ];

    #[test]
    fn templates_are_mass_centred() {
        for kind in ALL {
            let (atoms, _) = kind.build();
            let centre = mass_center(atoms.iter().map(|a| (a.element, a.relaxed_offset())));
            assert!(centre.length() < 1e-3, "{:?} centre at {:?}", kind, centre);
            assert_eq!(atoms.len(), kind.atom_count(), "{:?}", kind);
        }
    }

    #[test]
    fn bonds_reference_existing_atoms() {
        for kind in ALL {
            let (atoms, bonds) = kind.build();
            for bond in bonds {
                assert!(bond.atom_a < atoms.len() && bond.atom_b < atoms.len(), "{:?}", kind);
            }
        }
    }

    #[test]
    fn codes_round_trip() {
        for kind in ALL {
            assert_eq!(MoleculeKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(MoleculeKind::from_code(42), None);
    }

    #[test]
    fn vibration_keeps_centre_of_mass() {
        for kind in ALL {
            let (mut atoms, _) = kind.build();
            apply_vibration(kind.vibration_mode(), 1.1, &mut atoms);
            let centre = mass_center(atoms.iter().map(|a| (a.element, a.local_offset())));
            assert!(centre.length() < 1e-3, "{:?} drifted to {:?}", kind, centre);
        }
    }

    #[test]
    fn fragments_cover_parent_atoms() {
        for kind in ALL {
            if let Some((first, second)) = kind.fragments() {
                assert_eq!(
                    first.parent_atoms.len() + second.parent_atoms.len(),
                    kind.atom_count()
                );
                assert_eq!(first.parent_atoms.len(), first.kind.atom_count());
                assert_eq!(second.parent_atoms.len(), second.kind.atom_count());
            }
        }
    }

    #[test]
    fn inert_gases_absorb_nothing() {
        assert!(MoleculeKind::N2.strategies().is_empty());
        assert!(MoleculeKind::O2.strategies().is_empty());
        assert_eq!(
            MoleculeKind::NO2.strategies().get(Wavelength::Ultraviolet),
            Some(StrategyKind::BreakApart)
        );
    }
}
