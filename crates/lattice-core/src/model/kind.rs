//! Tipos de artifact consultables por dispatch.
//!
//! `ArtifactKind` es cerrado; cualquier otro nombre que deje pasar el
//! transporte llega como `ArtifactName::Unrecognized` y se responde con
//! `{"data": null}` (ver `dispatcher`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Result,
    Inputs,
    FunctionString,
    Executor,
    WorkflowExecutor,
    Error,
    Function,
    TransportGraph,
}

/// Codificación en disco de un artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    /// Texto UTF-8 plano.
    Text,
    /// Objeto serializado con el `ArtifactCodec`.
    Object,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 8] = [Self::Result,
                                        Self::Inputs,
                                        Self::FunctionString,
                                        Self::Executor,
                                        Self::WorkflowExecutor,
                                        Self::Error,
                                        Self::Function,
                                        Self::TransportGraph];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Result => "result",
            Self::Inputs => "inputs",
            Self::FunctionString => "function_string",
            Self::Executor => "executor",
            Self::WorkflowExecutor => "workflow_executor",
            Self::Error => "error",
            Self::Function => "function",
            Self::TransportGraph => "transport_graph",
        }
    }

    pub fn format(&self) -> ArtifactFormat {
        match self {
            Self::FunctionString | Self::Error => ArtifactFormat::Text,
            Self::Result
            | Self::Inputs
            | Self::Executor
            | Self::WorkflowExecutor
            | Self::Function
            | Self::TransportGraph => ArtifactFormat::Object,
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter()
                 .find(|k| k.as_str() == s)
                 .ok_or_else(|| s.to_string())
    }
}

/// Nombre de artifact tal como llega del transporte.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArtifactName {
    Known(ArtifactKind),
    Unrecognized(String),
}

impl ArtifactName {
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<ArtifactKind>() {
            Ok(kind) => Self::Known(kind),
            Err(other) => Self::Unrecognized(other),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(kind) => kind.as_str(),
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<ArtifactKind> for ArtifactName {
    fn from(kind: ArtifactKind) -> Self {
        Self::Known(kind)
    }
}

impl From<&str> for ArtifactName {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
