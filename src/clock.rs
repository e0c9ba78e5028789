use std::cell::Cell;
use std::time::Instant;

/// Source of elapsed time in seconds since the card was created.
pub trait Clock {
    fn elapsed(&self) -> f64;
}

/// Wall clock backed by [`Instant`].
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Clock driven by hand, for deterministic frame sequences.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, t: f64) {
        self.now.set(t);
    }

    pub fn advance(&self, dt: f64) -> f64 {
        let t = self.now.get() + dt;
        self.now.set(t);
        t
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new();
        assert_eq!(clock.elapsed(), 0.0);
        clock.advance(0.25);
        clock.advance(0.25);
        assert_eq!(clock.elapsed(), 0.5);
        clock.set(3.0);
        assert_eq!(clock.elapsed(), 3.0);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.elapsed();
        let b = clock.elapsed();
        assert!(b >= a);
    }
}
