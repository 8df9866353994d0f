//! Envelope JSON versionado (formato v1).
//!
//! ```text
//! {"format":"lattice-artifact","version":1,"checksum":"<blake3 hex>","payload":<valor>}
//! ```
//!
//! `checksum` es blake3 sobre el JSON canónico de `payload`; detecta archivos
//! truncados o editados a mano.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ArtifactCodec, CodecError};
use crate::constants::{ARTIFACT_FORMAT_TAG, ARTIFACT_FORMAT_VERSION};
use crate::hashing::checksum_value;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    format: String,
    version: u32,
    checksum: String,
    payload: Value,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeCodec;

impl EnvelopeCodec {
    pub fn new() -> Self {
        Self
    }

    fn checksum(payload: &Value) -> Result<String, CodecError> {
        checksum_value(payload).map_err(|e| CodecError::Malformed(e.to_string()))
    }
}

impl ArtifactCodec for EnvelopeCodec {
    fn version(&self) -> u32 {
        ARTIFACT_FORMAT_VERSION
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        let envelope = Envelope { format: ARTIFACT_FORMAT_TAG.to_string(),
                                  version: ARTIFACT_FORMAT_VERSION,
                                  checksum: Self::checksum(value)?,
                                  payload: value.clone() };
        serde_json::to_vec(&envelope).map_err(|e| CodecError::Malformed(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        let envelope: Envelope = serde_json::from_slice(bytes).map_err(|e| CodecError::Malformed(e.to_string()))?;
        if envelope.format != ARTIFACT_FORMAT_TAG {
            return Err(CodecError::UnknownFormat(envelope.format));
        }
        if envelope.version == 0 || envelope.version > ARTIFACT_FORMAT_VERSION {
            return Err(CodecError::UnsupportedVersion { found: envelope.version,
                                                        supported: ARTIFACT_FORMAT_VERSION });
        }
        let actual = Self::checksum(&envelope.payload)?;
        if actual != envelope.checksum {
            return Err(CodecError::ChecksumMismatch { expected: envelope.checksum,
                                                      actual });
        }
        Ok(envelope.payload)
    }
}
