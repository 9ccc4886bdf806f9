//! Volume-spike detection.
//!
//! Session volume is cumulative, so the signal works on per-step
//! deltas: the current step's delta is scored against the mean and
//! sample deviation of the prior steps' deltas. Negative deltas are
//! feed glitches and are excluded from the baseline.

use market::history::History;
use market::types::Snapshot;

use crate::alert::{Alert, AnomalyKind, Severity};
use crate::config::DetectionConfig;
use crate::detector::thousands;
use crate::stats;

/// Flags an abnormal jump in per-step traded volume.
///
/// Silent until the security has `min_history + 2` snapshots: one
/// step for the current delta plus `min_history` baseline deltas.
pub fn detect_volume_spike(
    current: &Snapshot,
    history: &History,
    cfg: &DetectionConfig,
) -> Option<Alert> {
    if history.len() < cfg.min_history + 2 {
        return None;
    }

    let volumes: Vec<i64> = history.iter().map(|s| s.volume as i64).collect();

    let current_delta = volumes[volumes.len() - 1] - volumes[volumes.len() - 2];
    if current_delta <= 0 {
        return None;
    }

    let baseline: Vec<f64> = volumes[..volumes.len() - 1]
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|d| *d >= 0)
        .map(|d| d as f64)
        .collect();
    if baseline.len() < cfg.min_history {
        return None;
    }

    let mean = stats::mean(&baseline);
    let stdev = stats::sample_stdev(&baseline);
    let threshold = mean + cfg.volume_sigma * stdev;
    let delta = current_delta as f64;

    let (severity, label) = if stdev > 0.0 {
        let z = (delta - mean) / stdev;
        if z <= cfg.volume_sigma {
            return None;
        }
        let severity = if z > cfg.critical_sigma {
            Severity::Critical
        } else {
            Severity::Warning
        };
        (severity, format!("z={z:.1}σ"))
    } else {
        // Flat baseline: any delta above the flat level is off-scale.
        if delta <= threshold {
            return None;
        }
        (Severity::Critical, "flat baseline".to_string())
    };

    Some(Alert::new(
        current,
        AnomalyKind::VolumeSpike,
        severity,
        format!(
            "Volume spike: {} units ({label})",
            thousands(current_delta as u64)
        ),
        delta,
        threshold,
        format!(
            "Mean={} Std={} TotalVol={}",
            thousands(mean.round() as u64),
            thousands(stdev.round() as u64),
            thousands(current.volume)
        ),
    ))
}
