// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod config;
pub mod drills;
pub mod error;
pub mod report;
pub mod runtime;
pub mod session;
pub mod slide;
pub mod stats;
pub mod time_series;
pub mod trainer;
pub mod util;
