//! Errores del core: validación de modelo, lectura de artifacts y fachada de
//! consultas.
//!
//! Sólo `QueryError` cruza hacia la capa de transporte; el resto son
//! resultados distinguibles de cada componente.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{ArtifactKind, DispatchId};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CoreError {
    #[error("invalid dispatch id: {0}")] InvalidDispatchId(String),
    #[error("invalid lattice status: {0}")] InvalidStatus(String),
    #[error("invalid lattice summary: {0}")] InvalidSummary(String),
    #[error("duplicate summary for dispatch id {0}")] DuplicateSummary(DispatchId),
    #[error("invalid configuration: {0}")] Config(String),
}

/// Fallos al localizar o decodificar un archivo de artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact file {} does not exist", .0.display())]
    MissingFile(PathBuf),
    #[error("no {0} file is recorded for this dispatch")]
    NotRecorded(ArtifactKind),
    #[error("artifact filename {filename:?} for {kind} escapes the storage directory")]
    InvalidFilename { kind: ArtifactKind, filename: String },
    #[error("artifact file {} could not be decoded: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },
    #[error("artifact file {} is {size} bytes, above the {limit} byte limit", .path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
    #[error("io error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ArtifactError {
    /// El archivo no existe (o nunca se registró): típico de un run en curso.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::MissingFile(_) | Self::NotRecorded(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    fn type_tag(&self) -> &'static str {
        match self {
            Self::MissingFile(_) | Self::NotRecorded(_) => "missing_file",
            Self::InvalidFilename { .. } => "invalid_filename",
            Self::Decode { .. } => "decode_error",
            Self::TooLarge { .. } => "too_large",
            Self::Io { .. } => "io_error",
        }
    }
}

/// Falla al construir la respuesta de un kind concreto.
#[derive(Debug, Error)]
#[error("could not load {kind} artifact: {source}")]
pub struct DispatchError {
    pub kind: ArtifactKind,
    #[source]
    pub source: ArtifactError,
}

/// Falla del backend de un repositorio (distinta de "no existe").
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RepositoryError {
    #[error("storage backend unavailable: {0}")] Backend(String),
    #[error("stored record is corrupt: {0}")] Corrupt(String),
}

/// Error visible para clientes de `QueryService`.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Dispatch ID {0} does not exist")]
    DispatchNotFound(DispatchId),
    #[error(transparent)]
    Artifact(#[from] DispatchError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl QueryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DispatchNotFound(_))
    }

    pub fn is_missing_file(&self) -> bool {
        matches!(self, Self::Artifact(e) if e.source.is_missing())
    }

    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::Artifact(e) if e.source.is_decode())
    }

    /// Forma estructurada del error para la capa de transporte.
    pub fn detail(&self) -> ErrorDetail {
        match self {
            Self::DispatchNotFound(_) => ErrorDetail { location: vec!["path".into(), "dispatch_id".into()],
                                                       message: self.to_string(),
                                                       kind: None },
            Self::Artifact(e) => ErrorDetail { location: vec!["path".into(), "name".into()],
                                               message: self.to_string(),
                                               kind: Some(e.source.type_tag().to_string()) },
            Self::Repository(_) => ErrorDetail { location: vec![],
                                                 message: self.to_string(),
                                                 kind: Some("storage_error".to_string()) },
        }
    }
}

/// `{"loc": [...], "msg": "...", "type": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "loc")]
    pub location: Vec<String>,
    #[serde(rename = "msg")]
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}
