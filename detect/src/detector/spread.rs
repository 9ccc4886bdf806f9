//! Spread anomaly: the current quoted spread scored against the
//! security's own recent spreads.

use market::history::History;
use market::types::Snapshot;

use crate::alert::{Alert, AnomalyKind, Severity};
use crate::config::DetectionConfig;
use crate::stats;

/// Quoted spread percent, if the book is valid.
///
/// The venue publishes `bid` above `ask` for a normal book; an empty
/// side or an inverted quote yields no spread.
pub(crate) fn spread_pct(snap: &Snapshot) -> Option<f64> {
    if snap.ask > 0.0 && snap.bid > snap.ask {
        Some((snap.bid - snap.ask) / snap.ask * 100.0)
    } else {
        None
    }
}

/// Flags a current spread far outside the security's recent range.
/// Always informational severity.
pub fn detect_spread_anomaly(
    current: &Snapshot,
    history: &History,
    cfg: &DetectionConfig,
) -> Option<Alert> {
    let current_spread = spread_pct(current)?;

    // Baseline excludes the current snapshot, which sits at the back
    // of the history.
    let baseline: Vec<f64> = history
        .iter()
        .take(history.len().saturating_sub(1))
        .filter_map(spread_pct)
        .collect();
    if baseline.len() < cfg.min_history {
        return None;
    }

    let mean = stats::mean(&baseline);
    let stdev = stats::sample_stdev(&baseline);
    if stdev <= 0.0 {
        return None;
    }

    let z = (current_spread - mean) / stdev;
    if z <= cfg.spread_sigma {
        return None;
    }

    Some(Alert::new(
        current,
        AnomalyKind::SpreadAnomaly,
        Severity::Info,
        format!("Spread anormal: {current_spread:.2}% (z={z:.1}σ)"),
        current_spread,
        mean + cfg.spread_sigma * stdev,
        format!("Ask={:.2} Bid={:.2}", current.ask, current.bid),
    ))
}
