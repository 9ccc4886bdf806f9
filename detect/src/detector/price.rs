//! Price signals: deviation against the session reference, and rapid
//! movement between consecutive snapshots. Both may fire on the same
//! snapshot.

use market::history::History;
use market::types::Snapshot;

use crate::alert::{Alert, AnomalyKind, Severity};
use crate::config::DetectionConfig;

/// Flags a large percent change against the reference price.
///
/// Rows without a positive reference and last price are skipped.
pub fn detect_price_deviation(current: &Snapshot, cfg: &DetectionConfig) -> Option<Alert> {
    if current.reference <= 0.0 || current.last <= 0.0 {
        return None;
    }

    let pct = current.change_pct.abs();
    if pct < cfg.price_change_pct {
        return None;
    }

    let direction = if current.change_pct > 0.0 { "HAUSSE" } else { "BAISSE" };
    let severity = if pct >= cfg.critical_price_change_pct {
        Severity::Critical
    } else {
        Severity::Warning
    };

    Some(Alert::new(
        current,
        AnomalyKind::PriceAnomaly,
        severity,
        format!("Prix anormal: {direction} de {pct:.2}%"),
        pct,
        cfg.price_change_pct,
        format!("Réf={:.2} Dernier={:.2}", current.reference, current.last),
    ))
}

/// Flags a rapid move between the two most recent snapshots.
pub fn detect_rapid_move(
    current: &Snapshot,
    history: &History,
    cfg: &DetectionConfig,
) -> Option<Alert> {
    let prev = history.prev()?;
    if prev.last <= 0.0 || current.last <= 0.0 {
        return None;
    }

    let moved = (current.last - prev.last).abs() / prev.last * 100.0;
    if moved < cfg.rapid_move_pct {
        return None;
    }

    Some(Alert::new(
        current,
        AnomalyKind::RapidPriceMove,
        Severity::Warning,
        format!("Mouvement rapide: {moved:.2}% entre 2 relevés"),
        moved,
        cfg.rapid_move_pct,
        format!("Avant={:.2} Après={:.2}", prev.last, current.last),
    ))
}
