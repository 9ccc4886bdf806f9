use serde::Serialize;

use crate::types::Snapshot;

/// One row of the top gainers/losers tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopMover {
    pub name: String,
    pub ticker: String,
    pub reference: f64,
    pub last: f64,
    pub change_pct: f64,
    pub volume: u64,
    pub market_cap: f64,
}

impl TopMover {
    fn from_snapshot(snap: &Snapshot) -> Self {
        Self {
            name: snap.name.clone(),
            ticker: snap.ticker.clone(),
            reference: snap.reference,
            last: snap.last,
            change_pct: snap.change_pct,
            volume: snap.volume,
            market_cap: snap.market_cap,
        }
    }
}

/// Session breadth counts over one batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketSummary {
    pub advancers: usize,
    pub decliners: usize,
    pub unchanged: usize,
    /// Securities that traded this session (`volume > 0`).
    pub active: usize,
    pub total: usize,
    /// Summed market capitalization of the batch.
    pub total_cap: f64,
}

/// Gainer/loser tables plus breadth counts for one snapshot batch.
#[derive(Debug, Clone, Serialize)]
pub struct MarketAnalysis {
    pub generated_at: String,
    pub top_gainers: Vec<TopMover>,
    pub top_losers: Vec<TopMover>,
    pub summary: MarketSummary,
}

/// Ranks movers and counts session breadth over one batch.
///
/// Only securities that traded this session and moved against their
/// reference are ranked; the breadth counts cover the whole batch.
pub fn analyze_market(batch: &[Snapshot], top_n: usize) -> MarketAnalysis {
    let mut movers: Vec<&Snapshot> = batch
        .iter()
        .filter(|s| s.volume > 0 && s.change_pct != 0.0)
        .collect();
    movers.sort_by(|a, b| b.change_pct.total_cmp(&a.change_pct));

    let top_gainers: Vec<TopMover> = movers
        .iter()
        .take(top_n)
        .map(|s| TopMover::from_snapshot(s))
        .collect();
    let top_losers: Vec<TopMover> = movers
        .iter()
        .rev()
        .take(top_n)
        .map(|s| TopMover::from_snapshot(s))
        .collect();

    let summary = MarketSummary {
        advancers: batch.iter().filter(|s| s.change_pct > 0.0).count(),
        decliners: batch.iter().filter(|s| s.change_pct < 0.0).count(),
        unchanged: batch.iter().filter(|s| s.change_pct == 0.0).count(),
        active: batch.iter().filter(|s| s.volume > 0).count(),
        total: batch.len(),
        total_cap: batch.iter().map(|s| s.market_cap).sum(),
    };

    MarketAnalysis {
        generated_at: common::time::format_ts(common::time::now_ms()),
        top_gainers,
        top_losers,
        summary,
    }
}
