//! Flat frame buffers read by the browser renderer.
//! Must stay in sync with the TypeScript `protocol.ts`.
//!
//! Each section is a contiguous array of `#[repr(C)]` f32 records:
//! ```text
//! [Photons: photon_count × 4 floats]   x, y, wavelength, pad
//! [Atoms:   atom_count × 8 floats]     x, y, element, radius, glow, molecule, pad×2
//! [Events:  event_count × 4 floats]    kind, a, b, c
//! ```
//! The host reads each section through its pointer + count accessor.

use bytemuck::{Pod, Zeroable};

use crate::api::types::SimEvent;
use crate::sim::Simulation;

/// Protocol version exposed to the host.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Event kind codes (`EventRecord::kind`).
pub mod event_kinds {
    /// a = molecule id, b = photon id, c = wavelength index.
    pub const PHOTON_ABSORBED: f32 = 1.0;
    /// a = molecule id, b = photon id, c = wavelength index.
    pub const PHOTON_EMITTED: f32 = 2.0;
    /// a = molecule id, b = photon id.
    pub const PHOTON_PASSED_THROUGH: f32 = 3.0;
    /// a = original molecule id, b = first fragment id, c = second fragment id.
    pub const BROKE_APART: f32 = 4.0;
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct PhotonInstance {
    pub x: f32,
    pub y: f32,
    /// `Wavelength::index()`.
    pub wavelength: f32,
    pub _pad: f32,
}

impl PhotonInstance {
    pub const FLOATS: usize = 4;
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct AtomInstance {
    pub x: f32,
    pub y: f32,
    /// `Element::code()` (atomic number).
    pub element: f32,
    /// Display radius in picometres.
    pub radius: f32,
    /// 1.0 while the owning molecule is in the high electronic energy state.
    pub glow: f32,
    /// Owning molecule id.
    pub molecule: f32,
    pub _pad: [f32; 2],
}

impl AtomInstance {
    pub const FLOATS: usize = 8;
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct EventRecord {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl EventRecord {
    pub const FLOATS: usize = 4;

    pub fn from_event(event: &SimEvent) -> Self {
        use self::event_kinds::*;
        match event {
            SimEvent::PhotonAbsorbed { molecule, photon, wavelength } => Self {
                kind: PHOTON_ABSORBED,
                a: molecule.0 as f32,
                b: photon.0 as f32,
                c: wavelength.index() as f32,
            },
            SimEvent::PhotonEmitted { molecule, photon } => Self {
                kind: PHOTON_EMITTED,
                a: molecule.0 as f32,
                b: photon.id.0 as f32,
                c: photon.wavelength().index() as f32,
            },
            SimEvent::PhotonPassedThrough { molecule, photon } => Self {
                kind: PHOTON_PASSED_THROUGH,
                a: molecule.0 as f32,
                b: photon.0 as f32,
                c: 0.0,
            },
            SimEvent::BrokeApart { original, first, second } => Self {
                kind: BROKE_APART,
                a: original.0 as f32,
                b: first.0 as f32,
                c: second.0 as f32,
            },
        }
    }
}

/// Per-frame buffers. Photons and atoms are rebuilt from scratch each frame;
/// events accumulate across the ticks of one frame up to `max_events`.
pub struct FrameBuffers {
    pub photons: Vec<PhotonInstance>,
    pub atoms: Vec<AtomInstance>,
    pub events: Vec<EventRecord>,
    max_events: usize,
}

impl FrameBuffers {
    pub fn new(max_photons: usize, max_events: usize) -> Self {
        Self {
            photons: Vec::with_capacity(max_photons),
            atoms: Vec::with_capacity(64),
            events: Vec::with_capacity(max_events),
            max_events,
        }
    }

    /// Start a new frame.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Append the events of the tick that just ran. Returns how many were dropped.
    pub fn push_events(&mut self, events: &[SimEvent]) -> usize {
        let room = self.max_events.saturating_sub(self.events.len());
        let taken = events.len().min(room);
        self.events
            .extend(events[..taken].iter().map(EventRecord::from_event));
        events.len() - taken
    }

    /// Rebuild the photon and atom sections from the current world.
    pub fn sync(&mut self, sim: &Simulation) {
        self.photons.clear();
        self.photons.extend(sim.photons().iter().map(|p| PhotonInstance {
            x: p.position.x,
            y: p.position.y,
            wavelength: p.wavelength().index() as f32,
            _pad: 0.0,
        }));

        self.atoms.clear();
        for molecule in sim.molecules() {
            let glow = if molecule.is_high_electronic_energy() { 1.0 } else { 0.0 };
            self.atoms.extend(molecule.atoms().iter().map(|atom| AtomInstance {
                x: atom.position.x,
                y: atom.position.y,
                element: atom.element.code() as f32,
                radius: atom.element.radius(),
                glow,
                molecule: molecule.id().0 as f32,
                _pad: [0.0; 2],
            }));
        }
    }

    pub fn photons_ptr(&self) -> *const f32 {
        self.photons.as_ptr() as *const f32
    }

    pub fn atoms_ptr(&self) -> *const f32 {
        self.atoms.as_ptr() as *const f32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.events.as_ptr() as *const f32
    }

    /// Flat f32 view of the event section.
    pub fn event_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.events)
    }
}
