
use std::sync::Arc;
use std::time::Duration;

use detect::alert::AnomalyKind;
use detect::config::DetectionConfig;
use engine::monitor::run_monitor;
use engine::{Engine, SnapshotSource};
use market::types::Snapshot;
use mock_source::{FlakySource, ScriptedSource};
use tokio::sync::mpsc;

const POLL: Duration = Duration::from_secs(30);

fn volume_batch(volume: u64) -> Vec<Snapshot> {
    vec![Snapshot {
        isin: "TN1".into(),
        name: "One".into(),
        volume,
        ..Snapshot::default()
    }]
}

fn spike_script() -> Vec<Vec<Snapshot>> {
    [1_000, 1_000, 1_000, 1_000, 50_000]
        .into_iter()
        .map(volume_batch)
        .collect()
}

fn price_batch() -> Vec<Snapshot> {
    vec![Snapshot {
        isin: "TN1".into(),
        name: "One".into(),
        reference: 10.0,
        last: 10.60,
        change_pct: 6.0,
        ..Snapshot::default()
    }]
}

#[tokio::test(start_paused = true)]
async fn polls_and_forwards_alerts() {
    let engine = Arc::new(Engine::new(DetectionConfig::default()));
    let source = Arc::new(ScriptedSource::new(spike_script()));
    let (tx, mut rx) = mpsc::channel(8);

    let monitor = tokio::spawn(run_monitor(
        Arc::clone(&engine),
        Arc::clone(&source) as Arc<dyn SnapshotSource>,
        POLL,
        Some(tx),
    ));

    let alerts = rx.recv().await.expect("monitor should forward the spike");

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AnomalyKind::VolumeSpike);
    assert_eq!(engine.cycle_count(), 5);
    assert_eq!(source.fetch_count(), 5);

    monitor.abort();
}

#[tokio::test(start_paused = true)]
async fn survives_fetch_failures() {
    let engine = Arc::new(Engine::new(DetectionConfig::default()));
    let source = Arc::new(FlakySource::new(3, spike_script()));
    let (tx, mut rx) = mpsc::channel(8);

    let monitor = tokio::spawn(run_monitor(
        Arc::clone(&engine),
        source as Arc<dyn SnapshotSource>,
        POLL,
        Some(tx),
    ));

    let alerts = rx.recv().await.expect("alerts should arrive once the feed recovers");

    assert_eq!(alerts[0].kind, AnomalyKind::VolumeSpike);
    // The three failed ticks never reached the engine.
    assert_eq!(engine.cycle_count(), 5);

    monitor.abort();
}

#[tokio::test(start_paused = true)]
async fn empty_batches_still_advance_cycles() {
    let engine = Arc::new(Engine::new(DetectionConfig::default()));
    let script = vec![
        Vec::new(),
        Vec::new(),
        price_batch(),
        price_batch(),
        price_batch(),
    ];
    let source = Arc::new(ScriptedSource::new(script));
    let (tx, mut rx) = mpsc::channel(8);

    let monitor = tokio::spawn(run_monitor(
        Arc::clone(&engine),
        source as Arc<dyn SnapshotSource>,
        POLL,
        Some(tx),
    ));

    let alerts = rx.recv().await.expect("price alert expected on the fifth cycle");

    // Two empty cycles still counted toward warm-up; the security's
    // own history reached depth 3 on cycle 5.
    assert_eq!(alerts[0].kind, AnomalyKind::PriceAnomaly);
    assert_eq!(engine.cycle_count(), 5);

    monitor.abort();
}

#[tokio::test(start_paused = true)]
async fn runs_without_a_channel() {
    let engine = Arc::new(Engine::new(DetectionConfig::default()));
    let source = Arc::new(ScriptedSource::new(spike_script()));

    let monitor = tokio::spawn(run_monitor(
        Arc::clone(&engine),
        source as Arc<dyn SnapshotSource>,
        POLL,
        None,
    ));

    // Five poll periods of virtual time cover the whole script.
    tokio::time::sleep(POLL * 5).await;

    assert_eq!(engine.report().total_alerts, 1);
    assert_eq!(engine.report().alerts[0].kind, AnomalyKind::VolumeSpike);

    monitor.abort();
}
