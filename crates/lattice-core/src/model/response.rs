//! Respuestas por tipo de artifact.

use serde::Serialize;
use serde_json::Value;

/// Payload devuelto por `QueryService::get_artifact`.
///
/// - `Data`: kinds simples y nombres no reconocidos (`data: null`).
/// - `Executor` / `WorkflowExecutor`: nombre del executor registrado más su
///   configuración decodificada.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArtifactResponse {
    Executor { name: String, details: Value },
    WorkflowExecutor { name: String, details: Value },
    Data { data: Option<Value> },
}

impl ArtifactResponse {
    pub fn data(value: Value) -> Self {
        Self::Data { data: Some(value) }
    }

    /// Respuesta para nombres fuera de la tabla de despacho.
    pub fn empty() -> Self {
        Self::Data { data: None }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Data { data: None })
    }
}
