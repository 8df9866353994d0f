//! Registro de almacenamiento de un run: directorio y nombres de archivo por
//! tipo de artifact.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{ArtifactKind, DispatchId};

/// Nombres de archivo (relativos a `StorageRecord::directory`). `None` cuando
/// el run aún no registró ese artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactFilenames {
    pub results: Option<String>,
    pub inputs: Option<String>,
    pub function_string: Option<String>,
    pub executor_data: Option<String>,
    pub workflow_executor_data: Option<String>,
    pub error: Option<String>,
    pub function: Option<String>,
    pub transport_graph: Option<String>,
}

impl ArtifactFilenames {
    pub fn get(&self, kind: ArtifactKind) -> Option<&str> {
        match kind {
            ArtifactKind::Result => self.results.as_deref(),
            ArtifactKind::Inputs => self.inputs.as_deref(),
            ArtifactKind::FunctionString => self.function_string.as_deref(),
            ArtifactKind::Executor => self.executor_data.as_deref(),
            ArtifactKind::WorkflowExecutor => self.workflow_executor_data.as_deref(),
            ArtifactKind::Error => self.error.as_deref(),
            ArtifactKind::Function => self.function.as_deref(),
            ArtifactKind::TransportGraph => self.transport_graph.as_deref(),
        }
    }

    pub fn set(&mut self, kind: ArtifactKind, filename: impl Into<String>) {
        let slot = match kind {
            ArtifactKind::Result => &mut self.results,
            ArtifactKind::Inputs => &mut self.inputs,
            ArtifactKind::FunctionString => &mut self.function_string,
            ArtifactKind::Executor => &mut self.executor_data,
            ArtifactKind::WorkflowExecutor => &mut self.workflow_executor_data,
            ArtifactKind::Error => &mut self.error,
            ArtifactKind::Function => &mut self.function,
            ArtifactKind::TransportGraph => &mut self.transport_graph,
        };
        *slot = Some(filename.into());
    }

    /// Nombres por defecto con los que un run escribe sus artifacts.
    pub fn conventional() -> Self {
        Self { results: Some("results.json".into()),
               inputs: Some("inputs.json".into()),
               function_string: Some("function_string.txt".into()),
               executor_data: Some("executor_data.json".into()),
               workflow_executor_data: Some("workflow_executor_data.json".into()),
               error: Some("error.log".into()),
               function: Some("function.json".into()),
               transport_graph: Some("transport_graph.json".into()) }
    }
}

/// Registro inmutable de almacenamiento de un dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageRecord {
    pub dispatch_id: DispatchId,
    pub directory: PathBuf,
    pub filenames: ArtifactFilenames,
    pub executor_name: String,
    pub workflow_executor_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_per_kind() {
        let mut names = ArtifactFilenames::default();
        for kind in ArtifactKind::ALL {
            assert_eq!(names.get(kind), None);
            names.set(kind, format!("{kind}.bin"));
        }
        for kind in ArtifactKind::ALL {
            assert_eq!(names.get(kind), Some(format!("{kind}.bin").as_str()));
        }
    }

    #[test]
    fn conventional_names_cover_every_kind() {
        let names = ArtifactFilenames::conventional();
        assert!(ArtifactKind::ALL.iter().all(|k| names.get(*k).is_some()));
        assert_eq!(names.get(ArtifactKind::Executor), Some("executor_data.json"));
    }
}
