use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// Unified event type consumed by the trainer runner
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrainerEvent {
    Key(char),
    Tick,
    Stop,
}

/// Source of keystroke events for the trainer
pub trait TrainerEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<TrainerEvent, RecvTimeoutError>;
}

/// Event source replaying a fixed key script at a steady cadence
pub struct ScriptedKeys {
    rx: Receiver<TrainerEvent>,
}

impl ScriptedKeys {
    /// Spawns a sender thread that emits one `Key` per script character,
    /// `key_delay` apart, followed by a single `Stop`.
    pub fn new(script: &str, key_delay: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let keys: Vec<char> = script.chars().collect();

        thread::spawn(move || {
            for c in keys {
                thread::sleep(key_delay);
                if tx.send(TrainerEvent::Key(c)).is_err() {
                    return;
                }
            }
            let _ = tx.send(TrainerEvent::Stop);
        });

        Self { rx }
    }
}

impl TrainerEventSource for ScriptedKeys {
    fn recv_timeout(&self, timeout: Duration) -> Result<TrainerEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<TrainerEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TrainerEvent>) -> Self {
        Self { rx }
    }
}

impl TrainerEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TrainerEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the trainer one event/tick at a time
pub struct Runner<E: TrainerEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: TrainerEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> TrainerEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                TrainerEvent::Tick
            }
        }
    }
}
