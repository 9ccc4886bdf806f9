//! Cross-sectional scan over one full-market batch.
//!
//! Statistical baselines come from the whole batch at one instant
//! instead of one security's rolling history; the fixed-threshold
//! signals reuse the streaming detector functions unchanged. Only
//! securities that traded this session take part.

use market::types::Snapshot;

use crate::alert::{Alert, AnomalyKind, Severity};
use crate::config::DetectionConfig;
use crate::detector::{book, price, spread, thousands};
use crate::report::{self, Report};
use crate::stats;

/// Runs the cross-sectional detectors over one batch and aggregates
/// the result, independent of any streaming engine state.
pub fn scan_batch(batch: &[Snapshot], cfg: &DetectionConfig) -> Report {
    let active: Vec<&Snapshot> = batch.iter().filter(|s| s.volume > 0).collect();

    let mut alerts = Vec::new();
    alerts.extend(cross_sectional_volume(&active, cfg));
    for snap in &active {
        alerts.extend(price::detect_price_deviation(snap, cfg));
        alerts.extend(book::detect_order_imbalance(snap, cfg));
    }
    alerts.extend(cross_sectional_spread(&active, cfg));

    report::aggregate(&alerts)
}

/// Flags securities whose session volume is an outlier against the
/// whole batch.
fn cross_sectional_volume(active: &[&Snapshot], cfg: &DetectionConfig) -> Vec<Alert> {
    if active.len() < 2 {
        return Vec::new();
    }

    let volumes: Vec<f64> = active.iter().map(|s| s.volume as f64).collect();
    let mean = stats::mean(&volumes);
    let stdev = stats::sample_stdev(&volumes);
    if stdev <= 0.0 {
        return Vec::new();
    }
    let threshold = mean + cfg.volume_sigma * stdev;

    let mut alerts = Vec::new();
    for snap in active {
        let volume = snap.volume as f64;
        if volume <= threshold {
            continue;
        }
        let z = (volume - mean) / stdev;
        let severity = if z > cfg.critical_sigma {
            Severity::Critical
        } else {
            Severity::Warning
        };
        alerts.push(Alert::new(
            snap,
            AnomalyKind::VolumeSpike,
            severity,
            format!("Pic de volume: {} (z={z:.1}σ)", thousands(snap.volume)),
            volume,
            threshold,
            format!(
                "Moy={} Std={} Dernier={:.2}",
                thousands(mean.round() as u64),
                thousands(stdev.round() as u64),
                snap.last
            ),
        ));
    }
    alerts
}

/// Flags securities whose quoted spread is an outlier against the
/// whole batch.
fn cross_sectional_spread(active: &[&Snapshot], cfg: &DetectionConfig) -> Vec<Alert> {
    let quoted: Vec<(&Snapshot, f64)> = active
        .iter()
        .filter_map(|s| spread::spread_pct(s).map(|pct| (*s, pct)))
        .collect();
    if quoted.len() < cfg.min_history {
        return Vec::new();
    }

    let spreads: Vec<f64> = quoted.iter().map(|(_, pct)| *pct).collect();
    let mean = stats::mean(&spreads);
    let stdev = stats::sample_stdev(&spreads);
    if stdev <= 0.0 {
        return Vec::new();
    }

    let mut alerts = Vec::new();
    for (snap, pct) in quoted {
        let z = (pct - mean) / stdev;
        if z <= cfg.spread_sigma {
            continue;
        }
        alerts.push(Alert::new(
            snap,
            AnomalyKind::SpreadAnomaly,
            Severity::Info,
            format!("Spread anormal: {pct:.2}% (z={z:.1}σ)"),
            pct,
            mean + cfg.spread_sigma * stdev,
            format!("Achat={:.2} Vente={:.2}", snap.ask, snap.bid),
        ));
    }
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traded(isin: &str, volume: u64) -> Snapshot {
        Snapshot {
            isin: isin.into(),
            name: format!("Security {isin}"),
            volume,
            last: 10.0,
            ..Snapshot::default()
        }
    }

    #[test]
    fn flags_a_batch_volume_outlier() {
        // 15 quiet securities and one at 50_000: z = 3.75 exactly.
        let mut batch: Vec<Snapshot> =
            (0..15).map(|i| traded(&format!("TN{i:02}"), 100)).collect();
        batch.push(traded("TN99", 50_000));

        let report = scan_batch(&batch, &DetectionConfig::default());

        assert_eq!(report.total_alerts, 1);
        let alert = &report.alerts[0];
        assert_eq!(alert.kind, AnomalyKind::VolumeSpike);
        assert_eq!(alert.severity, Severity::Warning);
        assert_eq!(alert.isin, "TN99");
        assert!(alert.message.contains("Pic de volume"));
        assert!(alert.message.contains("50,000"));
    }

    #[test]
    fn extreme_batch_outlier_escalates() {
        let mut batch: Vec<Snapshot> =
            (0..30).map(|i| traded(&format!("TN{i:02}"), 100)).collect();
        batch.push(traded("TN99", 100_000));

        let report = scan_batch(&batch, &DetectionConfig::default());

        assert_eq!(report.total_alerts, 1);
        assert_eq!(report.alerts[0].severity, Severity::Critical);
    }

    #[test]
    fn reuses_the_fixed_threshold_checks() {
        let hot = Snapshot {
            isin: "TN1".into(),
            name: "One".into(),
            reference: 10.0,
            last: 10.6,
            change_pct: 6.0,
            volume: 10,
            ask_qty: 100,
            bid_qty: 600,
            ..Snapshot::default()
        };
        // Same extremes, but never traded: it must contribute nothing.
        let idle = Snapshot {
            isin: "TN2".into(),
            name: "Two".into(),
            volume: 0,
            ..hot.clone()
        };

        let report = scan_batch(&[hot, idle], &DetectionConfig::default());

        assert_eq!(report.total_alerts, 2);
        let kinds: Vec<AnomalyKind> = report.alerts.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AnomalyKind::PriceAnomaly, AnomalyKind::OrderImbalance]);
        assert!(report.alerts.iter().all(|a| a.isin == "TN1"));
    }

    #[test]
    fn idle_market_stays_quiet() {
        let batch: Vec<Snapshot> = (0..5)
            .map(|i| Snapshot {
                isin: format!("TN{i}"),
                change_pct: 50.0,
                reference: 10.0,
                last: 15.0,
                volume: 0,
                ..Snapshot::default()
            })
            .collect();

        let report = scan_batch(&batch, &DetectionConfig::default());
        assert_eq!(report.total_alerts, 0);
    }

    #[test]
    fn flags_a_batch_spread_outlier() {
        let mut batch: Vec<Snapshot> = (0..11)
            .map(|i| Snapshot {
                ask: 100.0,
                bid: 101.0,
                ..traded(&format!("TN{i:02}"), 10)
            })
            .collect();
        batch.push(Snapshot {
            ask: 100.0,
            bid: 108.0,
            ..traded("TN99", 10)
        });

        let report = scan_batch(&batch, &DetectionConfig::default());

        assert_eq!(report.total_alerts, 1);
        let alert = &report.alerts[0];
        assert_eq!(alert.kind, AnomalyKind::SpreadAnomaly);
        assert_eq!(alert.severity, Severity::Info);
        assert_eq!(alert.isin, "TN99");
        assert!(alert.details.contains("Achat=100.00"));
    }

    #[test]
    fn empty_batch_yields_an_empty_report() {
        let report = scan_batch(&[], &DetectionConfig::default());
        assert_eq!(report.total_alerts, 0);
        assert!(!report.generated_at.is_empty());
    }
}
