use market::types::Snapshot;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of signals the detectors can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyKind {
    VolumeSpike,
    PriceAnomaly,
    RapidPriceMove,
    OrderImbalance,
    SpreadAnomaly,
    PatternSuspect,
}

impl AnomalyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyKind::VolumeSpike => "VOLUME_SPIKE",
            AnomalyKind::PriceAnomaly => "PRICE_ANOMALY",
            AnomalyKind::RapidPriceMove => "RAPID_PRICE_MOVE",
            AnomalyKind::OrderImbalance => "ORDER_IMBALANCE",
            AnomalyKind::SpreadAnomaly => "SPREAD_ANOMALY",
            AnomalyKind::PatternSuspect => "PATTERN_SUSPECT",
        }
    }
}

impl std::fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity tiers, ordered least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One emitted anomaly: what fired, on which security, how severe,
/// and the observed-versus-threshold numbers behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    /// Emission time, milliseconds since the Unix epoch.
    pub ts_ms: u64,
    pub isin: String,
    pub name: String,
    pub kind: AnomalyKind,
    pub severity: Severity,
    /// Human-readable line in the venue's reporting language.
    pub message: String,
    /// Measured value that tripped the detector.
    pub observed: f64,
    /// Threshold it was compared against.
    pub threshold: f64,
    /// Compact context behind the numbers.
    pub details: String,
}

impl Alert {
    /// Builds an alert against `snap`, stamping a fresh id and the
    /// emission wall clock.
    pub fn new(
        snap: &Snapshot,
        kind: AnomalyKind,
        severity: Severity,
        message: String,
        observed: f64,
        threshold: f64,
        details: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            ts_ms: common::time::now_ms(),
            isin: snap.isin.clone(),
            name: snap.name.clone(),
            kind,
            severity,
            message,
            observed,
            threshold,
            details,
        }
    }
}
