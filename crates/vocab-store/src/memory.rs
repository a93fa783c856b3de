use chrono::NaiveDate;
use tokio::sync::Mutex;
use vocab_types::TrainingUnit;

use crate::data::StoreData;
use crate::{HistoryDay, Persistence, StoreError};

/// Process-local store, for tests and runs without a store path
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<StoreData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Persistence for MemoryStore {
    async fn append_lookup_history(
        &self,
        user_id: i64,
        term: &str,
        date: NaiveDate,
    ) -> Result<(), StoreError> {
        self.data.lock().await.append_lookup(user_id, term, date);
        Ok(())
    }

    async fn lookup_history(&self, user_id: i64) -> Result<Vec<HistoryDay>, StoreError> {
        Ok(self.data.lock().await.history_of(user_id))
    }

    async fn count_saved_units(&self, user_id: i64) -> Result<usize, StoreError> {
        Ok(self.data.lock().await.count_units(user_id))
    }

    async fn list_saved_units(
        &self,
        user_id: i64,
        limit: usize,
    ) -> Result<Vec<TrainingUnit>, StoreError> {
        Ok(self.data.lock().await.units_of(user_id, limit))
    }

    async fn save_unit(&self, user_id: i64, unit: TrainingUnit) -> Result<(), StoreError> {
        self.data.lock().await.upsert_unit(user_id, unit);
        Ok(())
    }
}
