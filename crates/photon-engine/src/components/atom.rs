use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Chemical element of an atom. Only the elements the simulated molecules use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Hydrogen,
    Carbon,
    Nitrogen,
    Oxygen,
}

impl Element {
    /// Display radius in picometres.
    pub const fn radius(self) -> f32 {
        match self {
            Element::Hydrogen => 37.0,
            Element::Carbon => 77.0,
            Element::Nitrogen => 75.0,
            Element::Oxygen => 73.0,
        }
    }

    /// Atomic mass in amu.
    pub const fn mass(self) -> f32 {
        match self {
            Element::Hydrogen => 1.008,
            Element::Carbon => 12.011,
            Element::Nitrogen => 14.007,
            Element::Oxygen => 15.999,
        }
    }

    /// Wire code for frame buffers.
    pub const fn code(self) -> u32 {
        match self {
            Element::Hydrogen => 1,
            Element::Carbon => 6,
            Element::Nitrogen => 7,
            Element::Oxygen => 8,
        }
    }
}

/// An atom placed relative to its molecule's centre of gravity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atom {
    pub element: Element,
    /// Offset from the centre of gravity when the molecule is at rest.
    relaxed_offset: Vec2,
    /// Extra offset applied while the molecule vibrates.
    pub vibration_offset: Vec2,
    /// Absolute position, recomputed by `Molecule::update_atom_positions`.
    pub position: Vec2,
}

impl Atom {
    pub fn new(element: Element, relaxed_offset: Vec2) -> Self {
        Self {
            element,
            relaxed_offset,
            vibration_offset: Vec2::ZERO,
            position: relaxed_offset,
        }
    }

    pub fn relaxed_offset(&self) -> Vec2 {
        self.relaxed_offset
    }

    /// Offset from the centre of gravity before rotation.
    pub fn local_offset(&self) -> Vec2 {
        self.relaxed_offset + self.vibration_offset
    }
}

/// A bond between two atoms of the same molecule, by atom index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomicBond {
    pub atom_a: usize,
    pub atom_b: usize,
    /// Bond order: 1 single, 2 double, 3 triple.
    pub order: u8,
}

impl AtomicBond {
    pub const fn new(atom_a: usize, atom_b: usize, order: u8) -> Self {
        Self { atom_a, atom_b, order }
    }

    /// Check if this bond connects the given atoms (order-independent).
    pub fn connects(&self, a: usize, b: usize) -> bool {
        (self.atom_a == a && self.atom_b == b) || (self.atom_a == b && self.atom_b == a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_offset_adds_vibration() {
        let mut atom = Atom::new(Element::Carbon, Vec2::new(-50.0, 0.0));
        atom.vibration_offset = Vec2::new(3.0, 1.0);
        assert_eq!(atom.local_offset(), Vec2::new(-47.0, 1.0));
        assert_eq!(atom.relaxed_offset(), Vec2::new(-50.0, 0.0));
    }

    #[test]
    fn bond_connects_either_order() {
        let bond = AtomicBond::new(0, 2, 2);
        assert!(bond.connects(0, 2));
        assert!(bond.connects(2, 0));
        assert!(!bond.connects(0, 1));
    }

    #[test]
    fn hydrogen_is_smallest() {
        assert!(Element::Hydrogen.radius() < Element::Oxygen.radius());
        assert_eq!(Element::Oxygen.code(), 8);
    }
}
