/// Fixed-step simulation clock.
///
/// Frame deltas from the host are banked and paid out as whole simulation
/// ticks, so molecule countdowns (photon hold, hysteresis) always advance by
/// the same `dt` regardless of the browser's frame rate.
#[derive(Debug, Clone)]
pub struct SimClock {
    dt: f32,
    accumulator: f32,
    /// Upper bound on ticks paid out per frame.
    max_steps: u32,
    /// Total simulated time in seconds.
    elapsed: f64,
}

impl SimClock {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: 10,
            elapsed: 0.0,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Bank a frame delta and return the number of ticks to run now.
    /// A long stall (tab in background) is clamped to `max_steps` ticks.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator = (self.accumulator + frame_dt).min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        self.elapsed += steps as f64 * self.dt as f64;
        steps
    }

    /// Fraction of a tick left in the accumulator (0.0 to 1.0), for render interpolation.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut clock = SimClock::new(0.25);
        assert_eq!(clock.accumulate(0.25), 1);
        assert_eq!(clock.elapsed(), 0.25);
    }

    #[test]
    fn banks_partial_frames() {
        let mut clock = SimClock::new(1.0 / 60.0);
        assert_eq!(clock.accumulate(0.008), 0);
        assert_eq!(clock.accumulate(0.010), 1);
    }

    #[test]
    fn stall_is_capped() {
        let mut clock = SimClock::new(1.0 / 60.0).with_max_steps(4);
        assert_eq!(clock.accumulate(5.0), 4);
    }

    #[test]
    fn negative_frame_is_ignored() {
        let mut clock = SimClock::new(1.0 / 60.0);
        assert_eq!(clock.accumulate(-1.0), 0);
        assert_eq!(clock.alpha(), 0.0);
    }

    #[test]
    fn reset_clears_elapsed() {
        let mut clock = SimClock::new(0.5);
        clock.accumulate(1.2);
        assert!(clock.alpha() > 0.0);
        clock.reset();
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.alpha(), 0.0);
    }
}
