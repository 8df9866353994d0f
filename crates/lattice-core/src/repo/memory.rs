//! Repositorio en memoria (tests, demos y prototipos).
//!
//! Resúmenes y registros de almacenamiento viven en mapas separados para
//! poder modelar runs con sólo uno de los dos.
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::types::{StorageRecordRepository, SummaryRepository};
use crate::errors::{CoreError, RepositoryError};
use crate::model::{DispatchId, LatticeSummary, StorageRecord};

#[derive(Clone, Default)]
pub struct InMemoryLatticeStore {
    summaries: Arc<DashMap<DispatchId, LatticeSummary>>,
    records: Arc<DashMap<DispatchId, StorageRecord>>,
}

impl InMemoryLatticeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserta un resumen validado. A lo sumo uno por dispatch.
    pub fn insert_summary(&self, summary: LatticeSummary) -> Result<(), CoreError> {
        summary.validate()?;
        match self.summaries.entry(summary.dispatch_id) {
            Entry::Occupied(_) => Err(CoreError::DuplicateSummary(summary.dispatch_id)),
            Entry::Vacant(slot) => {
                slot.insert(summary);
                Ok(())
            }
        }
    }

    /// Registra (o reemplaza) el registro de almacenamiento de un dispatch.
    pub fn insert_storage_record(&self, record: StorageRecord) {
        self.records.insert(record.dispatch_id, record);
    }

    pub fn summary_count(&self) -> usize {
        self.summaries.len()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty() && self.records.is_empty()
    }
}

impl SummaryRepository for InMemoryLatticeStore {
    fn get_summary(&self, dispatch_id: DispatchId) -> Result<Option<LatticeSummary>, RepositoryError> {
        Ok(self.summaries.get(&dispatch_id).map(|s| s.value().clone()))
    }
}

impl StorageRecordRepository for InMemoryLatticeStore {
    fn get_storage_record(&self, dispatch_id: DispatchId) -> Result<Option<StorageRecord>, RepositoryError> {
        Ok(self.records.get(&dispatch_id).map(|r| r.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArtifactFilenames, LatticeStatus};
    use chrono::Utc;
    use std::path::PathBuf;
    use std::time::Duration;

    fn summary(id: DispatchId, total: u32, completed: u32) -> LatticeSummary {
        LatticeSummary { dispatch_id: id,
                         status: LatticeStatus::Completed,
                         total_electrons: total,
                         total_electrons_completed: completed,
                         started_at: Utc::now(),
                         ended_at: None,
                         directory: PathBuf::from("/tmp/run"),
                         runtime: Duration::from_secs(1) }
    }

    #[test]
    fn at_most_one_summary_per_dispatch() {
        let store = InMemoryLatticeStore::new();
        let id = DispatchId::new_v4();
        store.insert_summary(summary(id, 2, 2)).unwrap();
        assert_eq!(store.insert_summary(summary(id, 3, 1)), Err(CoreError::DuplicateSummary(id)));
        assert_eq!(store.get_summary(id).unwrap().unwrap().total_electrons, 2);
    }

    #[test]
    fn invalid_summary_is_not_stored() {
        let store = InMemoryLatticeStore::new();
        let id = DispatchId::new_v4();
        assert!(store.insert_summary(summary(id, 1, 2)).is_err());
        assert_eq!(store.get_summary(id), Ok(None));
    }

    #[test]
    fn summary_and_record_are_independent() {
        let store = InMemoryLatticeStore::new();
        let id = DispatchId::new_v4();
        store.insert_storage_record(StorageRecord { dispatch_id: id,
                                                    directory: PathBuf::from("/tmp/run"),
                                                    filenames: ArtifactFilenames::default(),
                                                    executor_name: "local".into(),
                                                    workflow_executor_name: "local".into() });
        assert_eq!(store.get_summary(id), Ok(None));
        assert!(store.get_storage_record(id).unwrap().is_some());
        // los clones comparten estado
        let clone = store.clone();
        assert!(clone.get_storage_record(id).unwrap().is_some());
    }

    #[test]
    fn counts_agree_with_emptiness() {
        let store = InMemoryLatticeStore::new();
        assert!(store.is_empty());
        let id = DispatchId::new_v4();
        store.insert_storage_record(StorageRecord { dispatch_id: id,
                                                    directory: PathBuf::from("/tmp/run"),
                                                    filenames: ArtifactFilenames::default(),
                                                    executor_name: "local".into(),
                                                    workflow_executor_name: "local".into() });
        assert!(!store.is_empty());
        assert_eq!(store.summary_count(), 0);
        assert_eq!(store.record_count(), 1);
        store.insert_summary(summary(id, 1, 1)).unwrap();
        assert_eq!(store.summary_count(), 1);
    }
}
