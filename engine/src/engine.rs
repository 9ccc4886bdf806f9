use std::panic::{self, AssertUnwindSafe};
use std::thread;

use parking_lot::RwLock;
use tracing::{debug, field, instrument, warn};

use detect::alert::Alert;
use detect::config::DetectionConfig;
use detect::detector;
use detect::report::{self, Report};
use market::types::Snapshot;

use crate::counters::Counters;
use crate::error::EngineError;
use crate::state::EngineState;

/// Batches at or below this size are evaluated on the calling thread.
const SEQUENTIAL_BATCH_MAX: usize = 16;

/// Stateful streaming engine: feed it snapshot batches, read alerts
/// and reports back.
///
/// All mutation (`ingest`, `reset`) serializes on one writer lock;
/// `report` takes the read side and may run concurrently with other
/// readers. A cycle is fully applied before the lock drops, so
/// readers never observe half of one.
pub struct Engine {
    cfg: DetectionConfig,
    state: RwLock<EngineState>,
    counters: Counters,
}

impl Engine {
    pub fn new(cfg: DetectionConfig) -> Self {
        let state = RwLock::new(EngineState::new(cfg.history_capacity));
        Self {
            cfg,
            state,
            counters: Counters::default(),
        }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.cfg
    }

    /// Shared handle onto the process-lifetime operational counters.
    pub fn counters(&self) -> Counters {
        self.counters.clone()
    }

    /// Ingest cycles since construction or the last `reset`.
    pub fn cycle_count(&self) -> u64 {
        self.state.read().cycles
    }

    /// Securities with at least one recorded snapshot.
    pub fn tracked_securities(&self) -> usize {
        self.state.read().histories.len()
    }

    /// Recorded history depth for one security; `0` when unknown.
    pub fn history_depth(&self, isin: &str) -> usize {
        self.state
            .read()
            .histories
            .get(isin)
            .map_or(0, |h| h.len())
    }

    /// Records one poll cycle's batch and returns the alerts it
    /// raised.
    ///
    /// Every snapshot is appended to its security's history first.
    /// Detectors run only once the engine has seen `min_history`
    /// cycles, and only for securities whose own history is that
    /// deep; the alerts they raise are appended to the engine's log
    /// and also handed back to the caller.
    #[instrument(
        skip(self, batch),
        target = "engine",
        fields(batch_len = batch.len(), alerts = field::Empty)
    )]
    pub fn ingest(&self, batch: &[Snapshot]) -> Result<Vec<Alert>, EngineError> {
        let mut state = self.state.write();

        state.cycles += 1;
        self.counters.add_cycle();
        self.counters.add_snapshots(batch.len() as u64);

        for snap in batch {
            state.histories.record(snap.clone());
        }

        if state.cycles < self.cfg.min_history as u64 {
            debug!(target: "engine", cycle = state.cycles, "warming up, detectors idle");
            return Ok(Vec::new());
        }

        let new_alerts = self.evaluate_batch(batch, &state)?;

        // Make the alert count available to logs emitted under this span.
        tracing::Span::current().record("alerts", new_alerts.len() as u64);

        self.counters.add_alerts(new_alerts.len() as u64);
        state.alerts.extend(new_alerts.iter().cloned());
        Ok(new_alerts)
    }

    /// Aggregated view over every alert since construction or the
    /// last `reset`.
    pub fn report(&self) -> Report {
        let state = self.state.read();
        report::aggregate(&state.alerts)
    }

    /// Clears histories, alerts, and the cycle counter in one swap.
    ///
    /// Serializes behind any in-flight `ingest`; when the two race,
    /// the last writer wins. Operational counters keep counting
    /// across resets.
    pub fn reset(&self) {
        let mut state = self.state.write();
        *state = EngineState::new(self.cfg.history_capacity);
    }

    /// Evaluates the detector set for every security in the batch,
    /// fanning out across threads for wide batches. Alerts come back
    /// in batch order.
    fn evaluate_batch(
        &self,
        batch: &[Snapshot],
        state: &EngineState,
    ) -> Result<Vec<Alert>, EngineError> {
        let workers = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        if workers == 1 || batch.len() <= SEQUENTIAL_BATCH_MAX {
            return Ok(self.evaluate_slice(batch, state));
        }

        let chunk_len = batch.len().div_ceil(workers);
        let mut merged = Vec::new();
        let mut worker_panicked = false;
        thread::scope(|scope| {
            let handles: Vec<_> = batch
                .chunks(chunk_len)
                .map(|chunk| scope.spawn(move || self.evaluate_slice(chunk, state)))
                .collect();
            for handle in handles {
                match handle.join() {
                    Ok(chunk_alerts) => merged.extend(chunk_alerts),
                    Err(_) => worker_panicked = true,
                }
            }
        });
        if worker_panicked {
            return Err(EngineError::WorkerPool("evaluation worker panicked".into()));
        }
        Ok(merged)
    }

    fn evaluate_slice(&self, snaps: &[Snapshot], state: &EngineState) -> Vec<Alert> {
        let mut alerts = Vec::new();
        for snap in snaps {
            let Some(history) = state.histories.get(&snap.isin) else {
                continue;
            };
            if history.len() < self.cfg.min_history {
                continue;
            }
            // One security's detector panic must not abort the cycle.
            match panic::catch_unwind(AssertUnwindSafe(|| {
                detector::run_all(snap, history, &self.cfg)
            })) {
                Ok(snap_alerts) => alerts.extend(snap_alerts),
                Err(_) => {
                    self.counters.add_eval_panic();
                    warn!(
                        target: "engine",
                        isin = %snap.isin,
                        "detector evaluation panicked; security skipped this cycle"
                    );
                }
            }
        }
        alerts
    }
}
