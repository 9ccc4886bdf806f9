use std::collections::HashMap;

use serde::Serialize;

use crate::alert::{Alert, AnomalyKind, Severity};

/// Most-flagged securities kept in a report.
pub const TOP_FLAGGED_LIMIT: usize = 10;

/// Alerts-per-security row of the top-flagged table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlaggedSecurity {
    pub name: String,
    pub count: u64,
}

/// Aggregated view over a set of alerts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub generated_at: String,
    pub total_alerts: usize,
    pub by_kind: HashMap<AnomalyKind, u64>,
    pub by_severity: HashMap<Severity, u64>,
    pub top_flagged: Vec<FlaggedSecurity>,
    pub alerts: Vec<Alert>,
}

/// Rolls a set of alerts up into a report.
///
/// `top_flagged` is ordered by count descending; securities tied on
/// count keep first-flagged order.
pub fn aggregate(alerts: &[Alert]) -> Report {
    let mut by_kind: HashMap<AnomalyKind, u64> = HashMap::new();
    let mut by_severity: HashMap<Severity, u64> = HashMap::new();
    let mut flagged: Vec<FlaggedSecurity> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for alert in alerts {
        *by_kind.entry(alert.kind).or_insert(0) += 1;
        *by_severity.entry(alert.severity).or_insert(0) += 1;

        match index.get(alert.name.as_str()).copied() {
            Some(i) => flagged[i].count += 1,
            None => {
                index.insert(alert.name.clone(), flagged.len());
                flagged.push(FlaggedSecurity {
                    name: alert.name.clone(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-flagged order within equal counts.
    flagged.sort_by(|a, b| b.count.cmp(&a.count));
    flagged.truncate(TOP_FLAGGED_LIMIT);

    Report {
        generated_at: common::time::format_ts(common::time::now_ms()),
        total_alerts: alerts.len(),
        by_kind,
        by_severity,
        top_flagged: flagged,
        alerts: alerts.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market::types::Snapshot;

    fn alert(name: &str, kind: AnomalyKind, severity: Severity) -> Alert {
        let snap = Snapshot {
            isin: format!("TN-{name}"),
            name: name.into(),
            ..Snapshot::default()
        };
        Alert::new(&snap, kind, severity, "m".into(), 1.0, 0.5, "d".into())
    }

    #[test]
    fn totals_are_consistent() {
        let alerts = vec![
            alert("AAA", AnomalyKind::VolumeSpike, Severity::Critical),
            alert("AAA", AnomalyKind::PriceAnomaly, Severity::Warning),
            alert("BBB", AnomalyKind::OrderImbalance, Severity::Warning),
            alert("CCC", AnomalyKind::SpreadAnomaly, Severity::Info),
        ];

        let report = aggregate(&alerts);

        assert_eq!(report.total_alerts, 4);
        assert_eq!(report.alerts.len(), 4);
        assert_eq!(report.by_kind.values().sum::<u64>(), 4);
        assert_eq!(report.by_severity.values().sum::<u64>(), 4);
        assert_eq!(report.by_kind[&AnomalyKind::VolumeSpike], 1);
        assert_eq!(report.by_severity[&Severity::Warning], 2);
    }

    #[test]
    fn top_flagged_orders_by_count_then_first_seen() {
        let alerts = vec![
            alert("AAA", AnomalyKind::VolumeSpike, Severity::Warning),
            alert("BBB", AnomalyKind::VolumeSpike, Severity::Warning),
            alert("AAA", AnomalyKind::PriceAnomaly, Severity::Warning),
            alert("BBB", AnomalyKind::PriceAnomaly, Severity::Warning),
            alert("CCC", AnomalyKind::SpreadAnomaly, Severity::Info),
        ];

        let report = aggregate(&alerts);
        let order: Vec<(&str, u64)> = report
            .top_flagged
            .iter()
            .map(|f| (f.name.as_str(), f.count))
            .collect();

        // AAA and BBB tie at 2; AAA was flagged first.
        assert_eq!(order, vec![("AAA", 2), ("BBB", 2), ("CCC", 1)]);
    }

    #[test]
    fn top_flagged_truncates_to_ten() {
        let mut alerts = Vec::new();
        for i in 0..12 {
            alerts.push(alert(
                &format!("SEC{i:02}"),
                AnomalyKind::OrderImbalance,
                Severity::Warning,
            ));
        }
        // A second alert pushes SEC07 to the front.
        alerts.push(alert("SEC07", AnomalyKind::VolumeSpike, Severity::Critical));

        let report = aggregate(&alerts);

        assert_eq!(report.top_flagged.len(), TOP_FLAGGED_LIMIT);
        assert_eq!(report.top_flagged[0].name, "SEC07");
        assert_eq!(report.top_flagged[0].count, 2);
    }

    #[test]
    fn empty_input_yields_an_empty_report() {
        let report = aggregate(&[]);

        assert_eq!(report.total_alerts, 0);
        assert!(report.alerts.is_empty());
        assert!(report.by_kind.is_empty());
        assert!(report.by_severity.is_empty());
        assert!(report.top_flagged.is_empty());
        assert!(!report.generated_at.is_empty());
    }

    #[test]
    fn report_serializes_with_wire_keys() {
        let alerts = vec![
            alert("AAA", AnomalyKind::VolumeSpike, Severity::Critical),
            alert("AAA", AnomalyKind::VolumeSpike, Severity::Warning),
        ];

        let value = serde_json::to_value(aggregate(&alerts)).unwrap();

        assert_eq!(value["total_alerts"], 2);
        assert_eq!(value["by_kind"]["VOLUME_SPIKE"], 2);
        assert_eq!(value["by_severity"]["CRITICAL"], 1);
        assert_eq!(value["top_flagged"][0]["name"], "AAA");
    }
}
