//! telemetry/mod.rs
//! Caller-owned counters, stage timers, and immutable snapshots.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
