use std::str::FromStr;

/// Detection thresholds and window sizing.
///
/// Defaults carry the venue-tuned reference values; every knob can be
/// overridden through a `SURVEIL_*` environment variable for field
/// tuning without a redeploy.
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// Z-score above which a volume delta is flagged.
    pub volume_sigma: f64,
    /// Z-score above which a flagged volume delta escalates to CRITICAL.
    pub critical_sigma: f64,
    /// Absolute percent change against reference that flags a price.
    pub price_change_pct: f64,
    /// Percent change at which a price flag escalates to CRITICAL.
    pub critical_price_change_pct: f64,
    /// Percent move between two consecutive snapshots that flags.
    pub rapid_move_pct: f64,
    /// Book-quantity ratio above which one side dominates.
    pub imbalance_ratio: f64,
    /// Z-score above which the current spread is flagged.
    pub spread_sigma: f64,
    /// Order-quantity jump ratio treated as spoofing-like.
    pub spoof_ratio: f64,
    /// Minimum current quantity for a spoofing flag; suppresses noise
    /// on thin books.
    pub spoof_min_qty: u64,
    /// Snapshots required per security before detectors run.
    pub min_history: usize,
    /// Per-security history depth, in snapshots.
    pub history_capacity: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            volume_sigma: 3.0,
            critical_sigma: 5.0,
            price_change_pct: 5.0,
            critical_price_change_pct: 8.0,
            rapid_move_pct: 2.0,
            imbalance_ratio: 5.0,
            spread_sigma: 3.0,
            spoof_ratio: 10.0,
            spoof_min_qty: 1_000,
            min_history: 3,
            history_capacity: market::history::DEFAULT_CAPACITY,
        }
    }
}

impl DetectionConfig {
    /// Builds a config from the environment, falling back to the
    /// default for any unset or unparsable variable.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            volume_sigma: env_or("SURVEIL_VOLUME_SIGMA", d.volume_sigma),
            critical_sigma: env_or("SURVEIL_CRITICAL_SIGMA", d.critical_sigma),
            price_change_pct: env_or("SURVEIL_PRICE_CHANGE_PCT", d.price_change_pct),
            critical_price_change_pct: env_or(
                "SURVEIL_CRITICAL_PRICE_CHANGE_PCT",
                d.critical_price_change_pct,
            ),
            rapid_move_pct: env_or("SURVEIL_RAPID_MOVE_PCT", d.rapid_move_pct),
            imbalance_ratio: env_or("SURVEIL_IMBALANCE_RATIO", d.imbalance_ratio),
            spread_sigma: env_or("SURVEIL_SPREAD_SIGMA", d.spread_sigma),
            spoof_ratio: env_or("SURVEIL_SPOOF_RATIO", d.spoof_ratio),
            spoof_min_qty: env_or("SURVEIL_SPOOF_MIN_QTY", d.spoof_min_qty),
            min_history: env_or("SURVEIL_MIN_HISTORY", d.min_history),
            history_capacity: env_or("SURVEIL_HISTORY_CAPACITY", d.history_capacity),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
