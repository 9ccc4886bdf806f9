use thiserror::Error;

/// Structural engine faults.
///
/// Business outcomes never land here: warm-up, malformed rows, and
/// thin statistics all surface as empty results or silent skips.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A detector evaluation worker could not be joined.
    #[error("evaluation worker pool failed: {0}")]
    WorkerPool(String),
}
