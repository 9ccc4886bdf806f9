//! Anomaly detection over market snapshots: a config-driven detector
//! set, alert and report types, and a cross-sectional batch scan.
//!
//! The same detector functions serve both the streaming engine and
//! the stateless scan, so the two modes cannot drift apart.

pub mod alert;
pub mod config;
pub mod detector;
pub mod report;
pub mod scan;

pub(crate) mod stats;
