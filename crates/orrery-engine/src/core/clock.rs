/// Simulated and real time for the scene.
///
/// Simulated time advances by `real_dt × multiplier` and never goes backwards.
/// Real time always advances by `real_dt`; camera transitions run on it so they
/// keep their duration even while the simulation is paused.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    sim_time: f64,
    real_time: f64,
    multiplier: f64,
    frame: u64,
}

impl SimulationClock {
    /// Clock at time zero with the given rotation-speed multiplier.
    pub fn new(multiplier: f64) -> Self {
        Self {
            sim_time: 0.0,
            real_time: 0.0,
            multiplier: clamp_multiplier(multiplier),
            frame: 0,
        }
    }

    /// Set the rotation-speed multiplier, clamped to `[0, 1]`.
    /// Only the rate changes; accumulated time is kept.
    pub fn set_multiplier(&mut self, multiplier: f64) {
        self.multiplier = clamp_multiplier(multiplier);
    }

    /// Advance by one host frame. Negative or non-finite deltas are ignored
    /// (the frame counter still moves).
    pub fn advance(&mut self, real_dt: f64) {
        self.frame += 1;
        if !real_dt.is_finite() || real_dt <= 0.0 {
            return;
        }
        self.real_time += real_dt;
        self.sim_time += real_dt * self.multiplier;
    }

    #[inline]
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    #[inline]
    pub fn real_time(&self) -> f64 {
        self.real_time
    }

    #[inline]
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Number of `advance` calls so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_paused(&self) -> bool {
        self.multiplier == 0.0
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

fn clamp_multiplier(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_time_scales_with_multiplier() {
        let mut clock = SimulationClock::new(0.5);
        clock.advance(2.0);
        assert!((clock.sim_time() - 1.0).abs() < 1e-12);
        assert!((clock.real_time() - 2.0).abs() < 1e-12);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn pausing_freezes_sim_time_but_not_real_time() {
        let mut clock = SimulationClock::new(0.5);
        clock.advance(1.0);
        clock.set_multiplier(0.0);
        let frozen = clock.sim_time();
        for _ in 0..10 {
            clock.advance(1.0 / 60.0);
            assert_eq!(clock.sim_time(), frozen);
        }
        assert!(clock.is_paused());
        assert!(clock.real_time() > 1.1);
    }

    #[test]
    fn multiplier_is_clamped() {
        let mut clock = SimulationClock::default();
        clock.set_multiplier(3.0);
        assert_eq!(clock.multiplier(), 1.0);
        clock.set_multiplier(-1.0);
        assert_eq!(clock.multiplier(), 0.0);
        clock.set_multiplier(f64::NAN);
        assert_eq!(clock.multiplier(), 0.0);
    }

    #[test]
    fn bad_deltas_never_rewind() {
        let mut clock = SimulationClock::default();
        clock.advance(1.0);
        clock.advance(-5.0);
        clock.advance(f64::NAN);
        clock.advance(f64::INFINITY);
        assert_eq!(clock.sim_time(), 1.0);
        assert_eq!(clock.frame(), 4);
    }
}
