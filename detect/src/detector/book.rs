//! Order-book imbalance: one side's resting quantity dwarfing the
//! other.

use market::types::Snapshot;

use crate::alert::{Alert, AnomalyKind, Severity};
use crate::config::DetectionConfig;
use crate::detector::thousands;

/// Flags a lopsided book. At most one side fires per snapshot.
pub fn detect_order_imbalance(current: &Snapshot, cfg: &DetectionConfig) -> Option<Alert> {
    if current.ask_qty == 0 || current.bid_qty == 0 {
        return None;
    }

    let sell_ratio = current.bid_qty as f64 / current.ask_qty as f64;
    let buy_ratio = current.ask_qty as f64 / current.bid_qty as f64;

    let (pressure, ratio) = if sell_ratio > cfg.imbalance_ratio {
        ("VENTE", sell_ratio)
    } else if buy_ratio > cfg.imbalance_ratio {
        ("ACHAT", buy_ratio)
    } else {
        return None;
    };

    Some(Alert::new(
        current,
        AnomalyKind::OrderImbalance,
        Severity::Warning,
        format!("Déséquilibre ordres: pression {pressure} ({ratio:.1}x)"),
        ratio,
        cfg.imbalance_ratio,
        format!(
            "Qté.A={} Qté.V={}",
            thousands(current.ask_qty),
            thousands(current.bid_qty)
        ),
    ))
}
