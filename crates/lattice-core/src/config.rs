//! Límites de lectura de artifacts.

use std::env;

use crate::constants::ARTIFACT_MAX_BYTES_ENV;
use crate::errors::CoreError;

/// Cota de tamaño aplicada antes de leer un archivo. `None` = sin límite
/// (comportamiento histórico).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadLimits {
    pub max_bytes: Option<u64>,
}

impl ReadLimits {
    pub fn unbounded() -> Self {
        Self { max_bytes: None }
    }

    pub fn with_max_bytes(max_bytes: u64) -> Self {
        Self { max_bytes: Some(max_bytes) }
    }

    /// Lee `LATTICE_ARTIFACT_MAX_BYTES`; ausente o vacío = sin límite.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::parse(env::var(ARTIFACT_MAX_BYTES_ENV).ok().as_deref())
    }

    pub fn parse(raw: Option<&str>) -> Result<Self, CoreError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::unbounded()),
            Some(v) => v.parse::<u64>()
                        .map(Self::with_max_bytes)
                        .map_err(|_| CoreError::Config(format!("{ARTIFACT_MAX_BYTES_ENV}={v} is not a byte count"))),
        }
    }
}
