//! Render pacing: a timestamp-delta gate capping effective frame rate.

use std::time::Duration;

/// Default cap on effective frames per second.
pub const DEFAULT_MAX_FPS: f64 = 15.0;

/// Gates a recurring animation callback down to a maximum effective frame
/// rate. The caller drives it with monotonic timestamps (duration since an
/// arbitrary epoch); [`FrameGate::tick`] answers whether a render should be
/// issued for that tick.
///
/// Stopping clears the stored timestamp, so a later start is equivalent to
/// a fresh run.
#[derive(Debug, Clone)]
pub struct FrameGate {
    running: bool,
    last: Option<Duration>,
    min_interval: Duration,
}

impl FrameGate {
    /// Create a gate capped at [`DEFAULT_MAX_FPS`].
    pub fn new() -> Self {
        Self::with_max_fps(DEFAULT_MAX_FPS)
    }

    /// Create a gate capped at the given frames per second.
    pub fn with_max_fps(fps: f64) -> Self {
        Self {
            running: false,
            last: None,
            min_interval: Duration::from_secs_f64(1.0 / fps.max(f64::EPSILON)),
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.last = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance the gate to `now`. Returns true when enough time has passed
    /// since the last issued frame that a render should happen on this tick.
    /// The first tick after a start only primes the timestamp.
    pub fn tick(&mut self, now: Duration) -> bool {
        if !self.running {
            self.last = None;
            return false;
        }
        let Some(last) = self.last else {
            self.last = Some(now);
            return false;
        };
        if now.saturating_sub(last) > self.min_interval {
            self.last = Some(now);
            true
        } else {
            false
        }
    }
}

impl Default for FrameGate {
    fn default() -> Self {
        Self::new()
    }
}
