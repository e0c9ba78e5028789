/// Display toggles driven from the keyboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewOptions {
    /// Show the debug overlay
    pub debug: bool,
    /// Draw mesh edges instead of shaded faces
    pub wireframe: bool,
}

/// Frames-per-second estimate refreshed about once a second.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frames_since_last_update: usize,
    last_calculation: f64,
    fps: f64,
}

impl FpsCounter {
    pub fn new(now: f64) -> Self {
        FpsCounter {
            frames_since_last_update: 0,
            last_calculation: now,
            fps: 0.0,
        }
    }

    /// Counts one rendered frame at elapsed time `now`.
    pub fn tick(&mut self, now: f64) {
        self.frames_since_last_update += 1;
        let duration = now - self.last_calculation;
        if duration >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration;
            self.frames_since_last_update = 0;
            self.last_calculation = now;
        }
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}
