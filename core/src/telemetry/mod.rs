//! telemetry/mod.rs
//! Counters, stage timers and immutable snapshots for one stream run.
//!
//! Counters are owned by the chunk worker, so no atomics or locks. The
//! snapshot is taken once at finish and handed back inside `StreamReport`.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
