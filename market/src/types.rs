use serde::{Deserialize, Serialize};

/// One feed row: one security at one instant.
///
/// Snapshots arrive in batches (one row per tracked security) on every
/// poll cycle and are immutable once built. `volume` is the
/// session-cumulative traded quantity, so within a session it only
/// grows; detectors work on deltas between consecutive snapshots of
/// the same `isin`. The venue publishes `bid` above `ask` for a
/// normal book, so the quoted spread is `(bid - ask) / ask`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Feed timestamp, milliseconds since the Unix epoch.
    pub ts_ms: u64,
    /// Security identifier; the history key.
    pub isin: String,
    /// Issuer name as published by the venue.
    pub name: String,
    /// Trading mnemonic.
    pub ticker: String,
    /// Last traded price.
    pub last: f64,
    /// Session reference (previous close) price.
    pub reference: f64,
    /// Percent change of `last` against `reference`, as published.
    pub change_pct: f64,
    /// Session-cumulative traded quantity.
    pub volume: u64,
    /// Market capitalization.
    pub market_cap: f64,
    /// Best ask price; `0.0` when that side of the book is empty.
    pub ask: f64,
    /// Quantity resting at the best ask.
    pub ask_qty: u64,
    /// Order count at the best ask.
    pub ask_orders: u32,
    /// Best bid price; `0.0` when that side of the book is empty.
    pub bid: f64,
    /// Quantity resting at the best bid.
    pub bid_qty: u64,
    /// Order count at the best bid.
    pub bid_orders: u32,
    /// Session high price.
    pub high: f64,
    /// Session low price.
    pub low: f64,
    /// Venue trading status code (open, halted, ...).
    pub status: String,
}
