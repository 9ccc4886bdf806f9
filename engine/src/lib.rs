//! Stateful surveillance engine.
//!
//! Owns the per-security histories and the append-only alert log,
//! evaluates the detector set on every ingested batch, and serves
//! aggregated reports. A small async monitor drives `ingest` from any
//! [`SnapshotSource`] on a fixed poll period.

mod state;

pub mod counters;
pub mod engine;
pub mod error;
pub mod monitor;
pub mod source;

pub use engine::Engine;
pub use error::EngineError;
pub use source::SnapshotSource;
