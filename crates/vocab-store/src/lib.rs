pub mod data;
pub mod file;
pub mod memory;

use chrono::NaiveDate;
use vocab_types::TrainingUnit;

pub use data::HistoryDay;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Durable storage for lookup history and saved training units
#[async_trait::async_trait]
pub trait Persistence: Send + Sync {
    /// Record a looked-up term for review on `date`. Repeats of the same
    /// (user, date, term) are ignored.
    async fn append_lookup_history(
        &self,
        user_id: i64,
        term: &str,
        date: NaiveDate,
    ) -> Result<(), StoreError>;

    /// Lookup history of a user, oldest review date first
    async fn lookup_history(&self, user_id: i64) -> Result<Vec<HistoryDay>, StoreError>;

    async fn count_saved_units(&self, user_id: i64) -> Result<usize, StoreError>;

    /// Saved units in save order, at most `limit`
    async fn list_saved_units(
        &self,
        user_id: i64,
        limit: usize,
    ) -> Result<Vec<TrainingUnit>, StoreError>;

    /// Persist a unit. Saving the same sense of the same item again replaces it.
    async fn save_unit(&self, user_id: i64, unit: TrainingUnit) -> Result<(), StoreError>;
}
