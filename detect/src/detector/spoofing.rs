//! Spoofing-like order-quantity jumps: a resting quantity multiplying
//! by an order of magnitude between two consecutive snapshots.

use market::history::History;
use market::types::Snapshot;

use crate::alert::{Alert, AnomalyKind, Severity};
use crate::config::DetectionConfig;
use crate::detector::thousands;

/// Flags sudden order-quantity jumps on either side of the book.
///
/// The sides are checked independently and may both fire. Jumps below
/// `spoof_min_qty` stay silent regardless of ratio.
pub fn detect_spoofing(current: &Snapshot, history: &History, cfg: &DetectionConfig) -> Vec<Alert> {
    let Some(prev) = history.prev() else {
        return Vec::new();
    };

    let sides = [
        ("ACHAT", current.ask_qty, prev.ask_qty),
        ("VENTE", current.bid_qty, prev.bid_qty),
    ];

    let mut alerts = Vec::new();
    for (side, curr_qty, prev_qty) in sides {
        if prev_qty == 0 || curr_qty == 0 {
            continue;
        }
        let ratio = curr_qty as f64 / prev_qty as f64;
        if ratio > cfg.spoof_ratio && curr_qty > cfg.spoof_min_qty {
            alerts.push(Alert::new(
                current,
                AnomalyKind::PatternSuspect,
                Severity::Critical,
                format!("Spoofing potentiel côté {side}: x{ratio:.0}"),
                curr_qty as f64,
                prev_qty as f64 * cfg.spoof_ratio,
                format!("Avant={} Après={}", thousands(prev_qty), thousands(curr_qty)),
            ));
        }
    }
    alerts
}
