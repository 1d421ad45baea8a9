use crate::components::wavelength::Wavelength;
use crate::molecule::kinds::MoleculeKind;

/// Commands the host UI can issue to the simulation.
/// Applied between ticks, never in the middle of one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Change the light source band.
    SetWavelength(Wavelength),
    /// Swap the molecule in the beam.
    SetTarget(MoleculeKind),
    /// Photons per second from the light source.
    SetEmissionRate(f32),
    SetPaused(bool),
    /// Advance one tick while paused.
    StepOnce,
    /// Return everything to the configured initial state.
    Reset,
}

impl Command {
    /// Decode a host command from its numeric form (`kind`, `value`).
    /// Returns `None` for unknown kinds or out-of-range values.
    pub fn decode(kind: u32, value: f32) -> Option<Self> {
        let command = match kind {
            1 => Command::SetWavelength(Wavelength::from_index(value as usize)?),
            2 => Command::SetTarget(MoleculeKind::from_code(value as u32)?),
            3 => Command::SetEmissionRate(value),
            4 => Command::SetPaused(value != 0.0),
            5 => Command::StepOnce,
            6 => Command::Reset,
            _ => return None,
        };
        Some(command)
    }
}

/// A queue of host commands.
/// JS pushes commands; the runner drains them before each frame's ticks.
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Drain all pending commands, oldest first.
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}
