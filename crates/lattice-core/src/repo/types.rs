//! Contratos de repositorio.
//!
//! Ambos repositorios buscan por `DispatchId` de forma independiente: un run
//! puede tener resumen sin registro de almacenamiento (o al revés) durante
//! estados transitorios.
//!
//! Contrato común:
//! - `Ok(None)`: el dispatch no existe (señal de ausencia, no error).
//! - `Err(_)`: el backend falló; la fachada lo propaga tal cual.
//! - Sin efectos secundarios; cualquier sesión/conexión adquirida se libera
//!   en todas las salidas.
use std::sync::Arc;

use crate::errors::RepositoryError;
use crate::model::{DispatchId, LatticeSummary, StorageRecord};

pub trait SummaryRepository: Send + Sync {
    fn get_summary(&self, dispatch_id: DispatchId) -> Result<Option<LatticeSummary>, RepositoryError>;
}

pub trait StorageRecordRepository: Send + Sync {
    fn get_storage_record(&self, dispatch_id: DispatchId) -> Result<Option<StorageRecord>, RepositoryError>;
}

impl<T: SummaryRepository + ?Sized> SummaryRepository for Arc<T> {
    fn get_summary(&self, dispatch_id: DispatchId) -> Result<Option<LatticeSummary>, RepositoryError> {
        (**self).get_summary(dispatch_id)
    }
}

impl<T: SummaryRepository + ?Sized> SummaryRepository for &T {
    fn get_summary(&self, dispatch_id: DispatchId) -> Result<Option<LatticeSummary>, RepositoryError> {
        (**self).get_summary(dispatch_id)
    }
}

impl<T: StorageRecordRepository + ?Sized> StorageRecordRepository for Arc<T> {
    fn get_storage_record(&self, dispatch_id: DispatchId) -> Result<Option<StorageRecord>, RepositoryError> {
        (**self).get_storage_record(dispatch_id)
    }
}

impl<T: StorageRecordRepository + ?Sized> StorageRecordRepository for &T {
    fn get_storage_record(&self, dispatch_id: DispatchId) -> Result<Option<StorageRecord>, RepositoryError> {
        (**self).get_storage_record(dispatch_id)
    }
}
