use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::Sender;
use tokio::time::{self, MissedTickBehavior};
use tracing::{info, warn};

use detect::alert::Alert;

use crate::engine::Engine;
use crate::source::SnapshotSource;

/// Drives an [`Engine`] from a [`SnapshotSource`] on a fixed period.
///
/// Fetch and ingest failures are logged and absorbed; the next tick
/// retries from scratch. New alerts are forwarded to `alert_tx` when
/// a channel is provided; a gone receiver does not stop the loop.
/// Runs until the owning task is dropped.
pub async fn run_monitor(
    engine: Arc<Engine>,
    source: Arc<dyn SnapshotSource>,
    poll_every: Duration,
    alert_tx: Option<Sender<Vec<Alert>>>,
) {
    let mut ticker = time::interval(poll_every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(
        target: "monitor",
        period_ms = poll_every.as_millis() as u64,
        "monitor started"
    );

    loop {
        ticker.tick().await;

        let batch = match source.fetch().await {
            Ok(batch) => batch,
            Err(err) => {
                warn!(target: "monitor", error = %err, "snapshot fetch failed; retrying next tick");
                continue;
            }
        };

        // Empty batches still count as a cycle: warm-up tracks polls,
        // not rows.
        let new_alerts = match engine.ingest(&batch) {
            Ok(alerts) => alerts,
            Err(err) => {
                warn!(target: "monitor", error = %err, "ingest failed; retrying next tick");
                continue;
            }
        };

        info!(
            target: "monitor",
            snapshots = batch.len(),
            alerts = new_alerts.len(),
            cycle = engine.cycle_count(),
            "cycle ingested"
        );

        if new_alerts.is_empty() {
            continue;
        }
        if let Some(tx) = &alert_tx {
            let _ = tx.send(new_alerts).await;
        }
    }
}
