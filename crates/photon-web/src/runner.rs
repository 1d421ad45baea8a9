use photon_engine::{Command, CommandQueue, FrameBuffers, SimClock, SimConfig, Simulation};

/// Wires the simulation to the browser frame loop.
///
/// Lives in a `thread_local!` in `lib.rs`, because wasm-bindgen
/// exports free functions, not stateful objects.
pub struct SimRunner {
    sim: Simulation,
    clock: SimClock,
    commands: CommandQueue,
    buffers: FrameBuffers,
    /// Events dropped this frame because the event section was full.
    dropped_events: usize,
}

impl SimRunner {
    pub fn new(config: SimConfig) -> Self {
        let clock = SimClock::new(config.fixed_dt);
        let buffers = FrameBuffers::new(config.max_photons, config.max_events);
        let sim = Simulation::new(config);
        let mut runner = Self {
            sim,
            clock,
            commands: CommandQueue::new(),
            buffers,
            dropped_events: 0,
        };
        runner.buffers.sync(&runner.sim);
        runner
    }

    pub fn push_command(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Run one frame: apply queued commands, run the fixed ticks the
    /// elapsed time allows, then refresh the host buffers.
    pub fn tick(&mut self, dt: f32) {
        self.buffers.clear_events();
        self.dropped_events = 0;

        for command in self.commands.drain() {
            self.sim.apply(command);
            match command {
                Command::Reset => self.clock.reset(),
                // A single step while paused still reports its events.
                Command::StepOnce if self.sim.is_paused() => self.collect_events(),
                _ => {}
            }
        }

        let steps = self.clock.accumulate(dt);
        for _ in 0..steps {
            self.sim.step(self.clock.dt());
            self.collect_events();
        }

        if self.dropped_events > 0 {
            log::debug!("runner: dropped {} events this frame", self.dropped_events);
        }
        self.buffers.sync(&self.sim);
    }

    fn collect_events(&mut self) {
        self.dropped_events += self.buffers.push_events(self.sim.events());
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    // ---- Pointer accessors for host reads ----

    pub fn photons_ptr(&self) -> *const f32 {
        self.buffers.photons_ptr()
    }

    pub fn photon_count(&self) -> u32 {
        self.buffers.photons.len() as u32
    }

    pub fn atoms_ptr(&self) -> *const f32 {
        self.buffers.atoms_ptr()
    }

    pub fn atom_count(&self) -> u32 {
        self.buffers.atoms.len() as u32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.buffers.events_ptr()
    }

    pub fn event_count(&self) -> u32 {
        self.buffers.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.sim.config().world_width
    }

    pub fn world_height(&self) -> f32 {
        self.sim.config().world_height
    }

    pub fn max_photons(&self) -> u32 {
        self.sim.config().max_photons as u32
    }

    pub fn max_events(&self) -> u32 {
        self.sim.config().max_events as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photon_engine::{MoleculeKind, Wavelength};

    fn runner() -> SimRunner {
        let mut config = SimConfig::default();
        config.initial_target = MoleculeKind::CO;
        config.light_source.emission_rate = 30.0;
        SimRunner::new(config)
    }

    #[test]
    fn new_runner_exposes_the_target() {
        let r = runner();
        assert_eq!(r.atom_count(), 2);
        assert_eq!(r.photon_count(), 0);
    }

    #[test]
    fn tick_runs_fixed_steps_and_fills_buffers() {
        let mut r = runner();
        for _ in 0..30 {
            r.tick(1.0 / 60.0);
        }
        assert!(r.photon_count() > 0);
    }

    #[test]
    fn commands_apply_before_stepping() {
        let mut r = runner();
        r.push_command(Command::SetTarget(MoleculeKind::CH4));
        r.push_command(Command::SetWavelength(Wavelength::Microwave));
        r.tick(0.0);
        assert_eq!(r.atom_count(), 5);
        assert_eq!(r.simulation().source().wavelength, Wavelength::Microwave);
    }

    #[test]
    fn paused_runner_holds_still() {
        let mut r = runner();
        r.push_command(Command::SetPaused(true));
        r.tick(1.0);
        assert_eq!(r.photon_count(), 0);
        assert_eq!(r.event_count(), 0);
    }
}
