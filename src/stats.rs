use std::time::{Duration, Instant};

use crate::time_series::SpeedPoint;
use crate::util;

/// Characters per word used for wpm scaling, the typing-tutor convention.
const CHARS_PER_WORD: f64 = 5.0;

/// Derived session metrics: elapsed time, accuracy, and typing speed.
///
/// Accuracy is recomputed immediately whenever the session counters change
/// (`on_progress`); elapsed time and speed are refreshed only on `tick`,
/// which an external driver calls on its own cadence. The clock starts on
/// the first correct keystroke, not at construction.
#[derive(Debug, Clone)]
pub struct SessionStats {
    started_at: Option<Instant>,
    running: bool,
    progress: usize,
    mistakes: usize,
    accuracy: f64,
    elapsed: Duration,
    cps: f64,
    wpm: f64,
    samples: Vec<SpeedPoint>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            started_at: None,
            running: false,
            progress: 0,
            mistakes: 0,
            accuracy: 100.0,
            elapsed: Duration::ZERO,
            cps: 0.0,
            wpm: 0.0,
            samples: Vec::new(),
        }
    }

    /// Adopt the session's counters and recompute accuracy. Cheap and pure;
    /// call it on every counter change.
    pub fn on_progress(&mut self, progress: usize, mistakes: usize) {
        self.progress = progress;
        self.mistakes = mistakes;
        self.accuracy = Self::accuracy_for(progress, mistakes);
    }

    /// Record the timing baseline. Called once per session, when the cursor
    /// first reaches 1; calling it again after a stop starts a clean new
    /// baseline (elapsed, speed, and samples reset).
    pub fn on_session_start(&mut self) {
        self.started_at = Some(Instant::now());
        self.running = true;
        self.elapsed = Duration::ZERO;
        self.cps = 0.0;
        self.wpm = 0.0;
        self.samples.clear();
    }

    /// Refresh elapsed time and speed, and record one speed sample.
    ///
    /// A no-op until the session has started and after it has stopped.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        let Some(started_at) = self.started_at else {
            return;
        };

        self.elapsed = started_at.elapsed();
        let secs = self.elapsed.as_secs_f64();
        self.cps = if secs > 0.0 {
            self.progress as f64 / secs
        } else {
            0.0
        };
        self.wpm = self.cps * (60.0 / CHARS_PER_WORD);
        self.samples.push(SpeedPoint::new(secs, self.cps, self.wpm));
    }

    /// Halt metric refreshes. Idempotent; later `tick` calls change nothing.
    pub fn on_session_stop(&mut self) {
        self.running = false;
    }

    /// Percentage of first-try-correct characters among those resolved so
    /// far, rounded to two decimals. 100 while nothing has been resolved.
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Characters per second as of the last tick.
    pub fn cps(&self) -> f64 {
        self.cps
    }

    /// Words per minute as of the last tick.
    pub fn wpm(&self) -> f64 {
        self.wpm
    }

    pub fn progress(&self) -> usize {
        self.progress
    }

    pub fn mistakes(&self) -> usize {
        self.mistakes
    }

    pub fn samples(&self) -> &[SpeedPoint] {
        &self.samples
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Standard deviation of the sampled wpm values; None until two samples
    /// exist.
    pub fn consistency(&self) -> Option<f64> {
        if self.samples.len() < 2 {
            return None;
        }
        let wpms: Vec<f64> = self.samples.iter().map(|p| p.wpm).collect();
        util::std_dev(&wpms)
    }

    fn accuracy_for(progress: usize, mistakes: usize) -> f64 {
        if progress == 0 {
            return 100.0;
        }
        // The current, unresolved position can already carry a mistake, so
        // `mistakes` may exceed `progress`; accuracy never leaves [0, 100].
        let raw = 100.0 * (1.0 - mistakes as f64 / progress as f64);
        util::round2(raw.clamp(0.0, 100.0))
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}
