use async_trait::async_trait;
use market::types::Snapshot;

/// Where the monitor pulls snapshot batches from on every poll tick.
///
/// Implementations wrap whatever transport feeds the venue data.
/// Errors are absorbed by the monitor and retried on the next tick.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch(&self) -> anyhow::Result<Vec<Snapshot>>;
}
