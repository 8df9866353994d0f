//! Codecs de artifacts serializados.
//!
//! Los artifacts de tipo objeto (resultados, inputs, executors, grafo de
//! transporte, ...) se guardan con un formato versionado independiente del
//! lenguaje que los produjo. `ArtifactCodec` abstrae ese formato para que el
//! lector no dependa de una implementación concreta.

pub mod envelope;

use serde_json::Value;
use thiserror::Error;

pub use envelope::EnvelopeCodec;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CodecError {
    #[error("malformed artifact: {0}")]
    Malformed(String),
    #[error("unknown artifact format tag {0:?}")]
    UnknownFormat(String),
    #[error("unsupported artifact format version {found} (supported <= {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
    #[error("checksum mismatch: expected {expected}, computed {actual}")]
    ChecksumMismatch { expected: String, actual: String },
}

/// Formato de serialización de artifacts de tipo objeto.
pub trait ArtifactCodec: Send + Sync {
    /// Versión del formato que escribe `encode`.
    fn version(&self) -> u32;
    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError>;
    fn decode(&self, bytes: &[u8]) -> Result<Value, CodecError>;
}

impl<C: ArtifactCodec + ?Sized> ArtifactCodec for &C {
    fn version(&self) -> u32 {
        (**self).version()
    }
    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        (**self).encode(value)
    }
    fn decode(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        (**self).decode(bytes)
    }
}
