//! Resumen de ejecución de un lattice (estado, tiempos y conteo de electrons).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DispatchId;
use crate::errors::CoreError;

/// Estado de un run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LatticeStatus {
    NewObject,
    Dispatching,
    Running,
    Completed,
    Failed,
    Cancelled,
    Postprocessing,
    PendingPostprocessing,
    PostprocessingFailed,
}

impl LatticeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewObject => "NEW_OBJECT",
            Self::Dispatching => "DISPATCHING",
            Self::Running => "RUNNING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
            Self::Postprocessing => "POSTPROCESSING",
            Self::PendingPostprocessing => "PENDING_POSTPROCESSING",
            Self::PostprocessingFailed => "POSTPROCESSING_FAILED",
        }
    }

    /// El run ya no producirá más archivos.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled | Self::PostprocessingFailed)
    }
}

impl fmt::Display for LatticeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LatticeStatus {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "NEW_OBJECT" => Self::NewObject,
            "DISPATCHING" => Self::Dispatching,
            "RUNNING" => Self::Running,
            "COMPLETED" => Self::Completed,
            "FAILED" => Self::Failed,
            "CANCELLED" => Self::Cancelled,
            "POSTPROCESSING" => Self::Postprocessing,
            "PENDING_POSTPROCESSING" => Self::PendingPostprocessing,
            "POSTPROCESSING_FAILED" => Self::PostprocessingFailed,
            other => return Err(CoreError::InvalidStatus(other.to_string())),
        })
    }
}

/// Resumen de un dispatch.
///
/// Invariantes (ver `validate`):
/// - `total_electrons_completed <= total_electrons`.
/// - `ended_at`, si existe, no es anterior a `started_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatticeSummary {
    pub dispatch_id: DispatchId,
    pub status: LatticeStatus,
    pub total_electrons: u32,
    pub total_electrons_completed: u32,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub directory: PathBuf,
    #[serde(with = "runtime_millis")]
    pub runtime: Duration,
}

impl LatticeSummary {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.total_electrons_completed > self.total_electrons {
            return Err(CoreError::InvalidSummary(format!("{}: total_electrons_completed ({}) exceeds total_electrons ({})",
                                                         self.dispatch_id,
                                                         self.total_electrons_completed,
                                                         self.total_electrons)));
        }
        if let Some(ended_at) = self.ended_at {
            if ended_at < self.started_at {
                return Err(CoreError::InvalidSummary(format!("{}: ended_at precedes started_at",
                                                             self.dispatch_id)));
            }
        }
        Ok(())
    }

    /// Consume y devuelve el resumen sólo si cumple sus invariantes.
    pub fn validated(self) -> Result<Self, CoreError> {
        self.validate()?;
        Ok(self)
    }

    /// Duración de un run: hasta `ended_at` si terminó, si no hasta `now`.
    /// Nunca negativa (relojes desfasados se recortan a cero).
    pub fn runtime_until(started_at: DateTime<Utc>, ended_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Duration {
        let end = ended_at.unwrap_or(now);
        (end - started_at).to_std().unwrap_or(Duration::ZERO)
    }
}

/// `runtime` viaja como milisegundos enteros.
mod runtime_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
