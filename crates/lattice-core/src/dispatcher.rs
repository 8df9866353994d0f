//! Tabla de despacho (kind de artifact → archivo, lector y forma de respuesta).
//!
//! | kind              | archivo                   | lector  | respuesta        |
//! |-------------------|---------------------------|---------|------------------|
//! | result            | results                   | objeto  | `{data}`         |
//! | inputs            | inputs                    | objeto  | `{data}`         |
//! | function_string   | function_string           | texto   | `{data}`         |
//! | executor          | executor_data             | objeto  | `{name, details}`|
//! | workflow_executor | workflow_executor_data    | objeto  | `{name, details}`|
//! | error             | error                     | texto   | `{data}`         |
//! | function          | function                  | objeto  | `{data}`         |
//! | transport_graph   | transport_graph           | objeto  | `{data}`         |
//!
//! Un nombre fuera de la tabla NO es error: responde `{"data": null}`.

use std::path::{Component, Path, PathBuf};

use log::debug;
use serde_json::Value;

use crate::codec::ArtifactCodec;
use crate::errors::{ArtifactError, DispatchError};
use crate::model::{ArtifactFormat, ArtifactKind, ArtifactName, ArtifactResponse, StorageRecord};
use crate::reader::ArtifactFileReader;

pub struct ArtifactDispatcher<C: ArtifactCodec> {
    reader: ArtifactFileReader<C>,
}

impl<C: ArtifactCodec> ArtifactDispatcher<C> {
    pub fn new(reader: ArtifactFileReader<C>) -> Self {
        Self { reader }
    }

    pub fn reader(&self) -> &ArtifactFileReader<C> {
        &self.reader
    }

    pub fn build_response(&self, name: &ArtifactName, record: &StorageRecord) -> Result<ArtifactResponse, DispatchError> {
        let kind = match name {
            ArtifactName::Known(kind) => *kind,
            ArtifactName::Unrecognized(raw) => {
                debug!("build_response:unrecognized dispatch_id={} name={raw}", record.dispatch_id);
                return Ok(ArtifactResponse::empty());
            }
        };
        self.build_kind(kind, record)
            .map_err(|source| DispatchError { kind, source })
    }

    fn build_kind(&self, kind: ArtifactKind, record: &StorageRecord) -> Result<ArtifactResponse, ArtifactError> {
        match kind {
            ArtifactKind::Result
            | ArtifactKind::Inputs
            | ArtifactKind::FunctionString
            | ArtifactKind::Error
            | ArtifactKind::Function
            | ArtifactKind::TransportGraph => self.load(kind, record).map(ArtifactResponse::data),
            ArtifactKind::Executor => {
                let details = self.load(kind, record)?;
                Ok(ArtifactResponse::Executor { name: record.executor_name.clone(),
                                                details })
            }
            ArtifactKind::WorkflowExecutor => {
                let details = self.load(kind, record)?;
                Ok(ArtifactResponse::WorkflowExecutor { name: record.workflow_executor_name.clone(),
                                                        details })
            }
        }
    }

    fn load(&self, kind: ArtifactKind, record: &StorageRecord) -> Result<Value, ArtifactError> {
        let path = resolve(kind, record)?;
        debug!("load:start dispatch_id={} kind={kind} path={}", record.dispatch_id, path.display());
        match kind.format() {
            ArtifactFormat::Text => self.reader.read_text(&path).map(Value::String),
            ArtifactFormat::Object => self.reader.read_object(&path),
        }
    }
}

/// Ruta del archivo de `kind` dentro del directorio del registro. Rechaza
/// nombres vacíos, absolutos o con componentes que salgan del directorio.
pub fn resolve(kind: ArtifactKind, record: &StorageRecord) -> Result<PathBuf, ArtifactError> {
    let filename = record.filenames.get(kind).ok_or(ArtifactError::NotRecorded(kind))?;
    let relative = Path::new(filename);
    let contained = !filename.is_empty() && relative.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !contained {
        return Err(ArtifactError::InvalidFilename { kind,
                                                    filename: filename.to_string() });
    }
    Ok(record.directory.join(relative))
}
