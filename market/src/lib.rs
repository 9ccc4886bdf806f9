//! Market data model: per-security feed snapshots, bounded rolling
//! histories keyed by ISIN, and batch-level session summaries.

pub mod history;
pub mod summary;
pub mod types;
