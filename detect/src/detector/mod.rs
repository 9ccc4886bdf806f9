//! The detector set: pure functions of (current, history, config).
//!
//! Each detector validates its own inputs and stays silent rather
//! than failing: a snapshot missing the fields a signal needs is
//! skipped by that signal only, and statistical detectors are silent
//! until their window is warm.

pub mod book;
pub mod price;
pub mod spoofing;
pub mod spread;
pub mod volume;

use market::history::History;
use market::types::Snapshot;

use crate::alert::Alert;
use crate::config::DetectionConfig;

/// Runs every detector against one security's current snapshot and
/// history, in stable emission order.
pub fn run_all(current: &Snapshot, history: &History, cfg: &DetectionConfig) -> Vec<Alert> {
    let mut alerts = Vec::new();
    alerts.extend(volume::detect_volume_spike(current, history, cfg));
    alerts.extend(price::detect_price_deviation(current, cfg));
    alerts.extend(price::detect_rapid_move(current, history, cfg));
    alerts.extend(book::detect_order_imbalance(current, cfg));
    alerts.extend(spread::detect_spread_anomaly(current, history, cfg));
    alerts.extend(spoofing::detect_spoofing(current, history, cfg));
    alerts
}

/// Formats an integer with thousands separators for alert text.
pub(crate) fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
