//! Modelos del dominio de consulta: identificador de dispatch, resumen del
//! lattice, registro de almacenamiento y tipos de artifact/respuesta.

pub mod dispatch;
pub mod kind;
pub mod response;
pub mod storage;
pub mod summary;

pub use dispatch::DispatchId;
pub use kind::{ArtifactFormat, ArtifactKind, ArtifactName};
pub use response::ArtifactResponse;
pub use storage::{ArtifactFilenames, StorageRecord};
pub use summary::{LatticeStatus, LatticeSummary};
