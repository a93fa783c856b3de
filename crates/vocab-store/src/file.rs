use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tokio::sync::Mutex;
use vocab_types::TrainingUnit;

use crate::data::StoreData;
use crate::{HistoryDay, Persistence, StoreError};

/// Store backed by a single JSON file, rewritten on every change
pub struct JsonFileStore {
    path: PathBuf,
    data: Mutex<StoreData>,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file doesn't exist yet
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "Store file not found, starting empty");
                StoreData::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write through a temp file so a crash never leaves half a document
    async fn persist(&self, data: &StoreData) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(data)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl Persistence for JsonFileStore {
    async fn append_lookup_history(
        &self,
        user_id: i64,
        term: &str,
        date: NaiveDate,
    ) -> Result<(), StoreError> {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        if !next.append_lookup(user_id, term, date) {
            tracing::debug!(user_id, term, %date, "lookup already in history");
            return Ok(());
        }
        self.persist(&next).await?;
        *data = next;
        tracing::debug!(user_id, term, %date, "stored lookup");
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
        let mut data = self.data.lock().await;
        let item = unit.item.clone();
        // memory only changes once the file has
        let mut next = data.clone();
        next.upsert_unit(user_id, unit);
        self.persist(&next).await?;
        *data = next;
        tracing::info!(user_id, item = %item, "saved training unit");
        Ok(())
    }
}
