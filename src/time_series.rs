/// One speed sample, recorded on a stats tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedPoint {
    /// Seconds since the session started.
    pub t: f64,
    /// Characters per second at this tick.
    pub cps: f64,
    /// Words per minute at this tick (5-character words).
    pub wpm: f64,
}

impl SpeedPoint {
    pub fn new(t: f64, cps: f64, wpm: f64) -> Self {
        Self { t, cps, wpm }
    }
}
