// Source trait for loading call records
use crate::domain::record::Record;
use async_trait::async_trait;

#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Read every record once, with derived columns filled in.
    async fn load_records(&self) -> anyhow::Result<Vec<Record>>;
}
