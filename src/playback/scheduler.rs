// src/playback/scheduler.rs
//
// A cancellable repeating frame task. The host's display callback
// calls `advance` once per refresh; starting a new run drops the
// previous run's timing so a restart never inherits its delta.

#[derive(Debug, Default)]
pub struct FrameLoop {
    running: bool,
    last_tick: Option<f64>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any running loop and starts a new one.
    pub fn start(&mut self) {
        self.running = true;
        self.last_tick = None;
    }

    pub fn cancel(&mut self) {
        self.running = false;
        self.last_tick = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Milliseconds since the previous frame of this run, 0 on the
    /// first. `None` once cancelled.
    pub fn advance(&mut self, now: f64) -> Option<f64> {
        if !self.running {
            return None;
        }
        let dt = self.last_tick.map_or(0.0, |last| (now - last).max(0.0));
        self.last_tick = Some(now);
        Some(dt)
    }
}
