use detect::alert::Alert;
use market::history::HistoryStore;

/// Everything `reset` swaps out in one move.
#[derive(Debug)]
pub(crate) struct EngineState {
    pub histories: HistoryStore,
    /// Ingest cycles since construction or the last reset.
    pub cycles: u64,
    /// Append-only alert log; cleared only by reset.
    pub alerts: Vec<Alert>,
}

impl EngineState {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            histories: HistoryStore::new(history_capacity),
            cycles: 0,
            alerts: Vec::new(),
        }
    }
}
