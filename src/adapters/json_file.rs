use crate::adapters::memory::query_snapshot;
use crate::domain::model::{RestaurantSnapshot, TableAvailability};
use crate::domain::ports::{AvailabilitySource, TableQuery};
use crate::utils::error::{AssignError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Snapshot stored as a JSON file, re-read on every query so each call sees
/// the file as it is at that moment.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub async fn read_snapshot(&self) -> Result<RestaurantSnapshot> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AssignError::source(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        let snapshot: RestaurantSnapshot = serde_json::from_str(&content)?;
        snapshot.validate()?;

        tracing::debug!(
            "📂 Loaded snapshot {}: {} areas, {} tables, {} reservations, {} maintenance records",
            self.path.display(),
            snapshot.areas.len(),
            snapshot.tables.len(),
            snapshot.reservations.len(),
            snapshot.maintenance.len()
        );
        Ok(snapshot)
    }
}

#[async_trait]
impl AvailabilitySource for JsonSnapshotStore {
    async fn load_tables(&self, query: &TableQuery) -> Result<Vec<TableAvailability>> {
        let snapshot = self.read_snapshot().await?;
        Ok(query_snapshot(&snapshot, query))
    }
}
