// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod clock;
pub mod config;
pub mod diff;
pub mod input;
pub mod metrics;
pub mod passage;
pub mod round;
pub mod runtime;
pub mod ui;
