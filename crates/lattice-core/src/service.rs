//! Fachada de consultas: resumen de un dispatch y artifacts de su run.
//!
//! Es el único punto que traduce resultados internos (ausencia, archivo
//! faltante, decodificación) al `QueryError` visible para el transporte.

use log::{debug, warn};
use rayon::prelude::*;

use crate::codec::ArtifactCodec;
use crate::config::ReadLimits;
use crate::dispatcher::ArtifactDispatcher;
use crate::errors::QueryError;
use crate::model::{ArtifactKind, ArtifactName, ArtifactResponse, DispatchId, LatticeSummary};
use crate::reader::ArtifactFileReader;
use crate::repo::{StorageRecordRepository, SummaryRepository};

pub struct QueryService<S, R, C>
    where S: SummaryRepository,
          R: StorageRecordRepository,
          C: ArtifactCodec
{
    summaries: S,
    records: R,
    dispatcher: ArtifactDispatcher<C>,
}

impl<S, R, C> QueryService<S, R, C>
    where S: SummaryRepository,
          R: StorageRecordRepository,
          C: ArtifactCodec
{
    pub fn new(summaries: S, records: R, codec: C) -> Self {
        Self::with_limits(summaries, records, codec, ReadLimits::unbounded())
    }

    pub fn with_limits(summaries: S, records: R, codec: C, limits: ReadLimits) -> Self {
        Self { summaries,
               records,
               dispatcher: ArtifactDispatcher::new(ArtifactFileReader::with_limits(codec, limits)) }
    }

    pub fn get_summary(&self, dispatch_id: DispatchId) -> Result<LatticeSummary, QueryError> {
        debug!("get_summary:start dispatch_id={dispatch_id}");
        let summary = self.summaries
                          .get_summary(dispatch_id)?
                          .ok_or(QueryError::DispatchNotFound(dispatch_id))?;
        debug!("get_summary:done dispatch_id={dispatch_id} status={}", summary.status);
        Ok(summary)
    }

    pub fn get_artifact(&self, dispatch_id: DispatchId, name: &ArtifactName) -> Result<ArtifactResponse, QueryError> {
        debug!("get_artifact:start dispatch_id={dispatch_id} name={name}");
        let record = self.records
                         .get_storage_record(dispatch_id)?
                         .ok_or(QueryError::DispatchNotFound(dispatch_id))?;
        self.dispatcher.build_response(name, &record).map_err(|e| {
                                                         warn!("get_artifact:failed dispatch_id={dispatch_id} err={e}");
                                                         QueryError::from(e)
                                                     })
    }

    /// Varios kinds del mismo dispatch con una sola búsqueda del registro.
    /// Los archivos se leen en paralelo sobre ese mismo registro; cada kind
    /// falla o tiene éxito por separado y el orden de `kinds` se conserva.
    pub fn get_artifacts(&self,
                         dispatch_id: DispatchId,
                         kinds: &[ArtifactKind])
                         -> Result<Vec<(ArtifactKind, Result<ArtifactResponse, QueryError>)>, QueryError> {
        let record = self.records
                         .get_storage_record(dispatch_id)?
                         .ok_or(QueryError::DispatchNotFound(dispatch_id))?;
        debug!("get_artifacts:start dispatch_id={dispatch_id} kinds={}", kinds.len());
        Ok(kinds.par_iter()
                .map(|kind| {
                    let resp = self.dispatcher
                                   .build_response(&ArtifactName::Known(*kind), &record)
                                   .map_err(QueryError::from);
                    (*kind, resp)
                })
                .collect())
    }
}
