use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Minimal counters for operational visibility.
///
/// Monotonic for the life of the process; [`Engine::reset`] does not
/// touch them. Cloning shares the underlying counters.
///
/// [`Engine::reset`]: crate::Engine::reset
#[derive(Debug, Clone, Default)]
pub struct Counters {
    cycles: Arc<AtomicU64>,
    snapshots: Arc<AtomicU64>,
    alerts: Arc<AtomicU64>,
    eval_panics: Arc<AtomicU64>,
}

impl Counters {
    pub(crate) fn add_cycle(&self) {
        self.cycles.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_snapshots(&self, n: u64) {
        self.snapshots.fetch_add(n, Ordering::Relaxed);
    }

    pub(crate) fn add_alerts(&self, n: u64) {
        self.alerts.fetch_add(n, Ordering::Relaxed);
    }

    pub(crate) fn add_eval_panic(&self) {
        self.eval_panics.fetch_add(1, Ordering::Relaxed);
    }

    /// Ingest cycles accepted, warm-up included.
    pub fn cycles(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }

    /// Snapshots recorded into histories.
    pub fn snapshots(&self) -> u64 {
        self.snapshots.load(Ordering::Relaxed)
    }

    /// Alerts emitted by the detectors.
    pub fn alerts(&self) -> u64 {
        self.alerts.load(Ordering::Relaxed)
    }

    /// Detector evaluations aborted by a panic.
    pub fn eval_panics(&self) -> u64 {
        self.eval_panics.load(Ordering::Relaxed)
    }
}
