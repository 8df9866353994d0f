//! lattice-core: consulta de metadatos y artifacts de runs de lattices.
//!
//! Flujo: transporte → `QueryService` → { `SummaryRepository` |
//! `StorageRecordRepository` → `ArtifactDispatcher` → `ArtifactFileReader` }.
pub mod codec;
pub mod config;
pub mod constants;
pub mod dispatcher;
pub mod errors;
pub mod hashing;
pub mod model;
pub mod reader;
pub mod repo;
pub mod service;

pub use codec::{ArtifactCodec, CodecError, EnvelopeCodec};
pub use config::ReadLimits;
pub use dispatcher::ArtifactDispatcher;
pub use errors::{ArtifactError, CoreError, DispatchError, ErrorDetail, QueryError, RepositoryError};
pub use model::{ArtifactFilenames, ArtifactFormat, ArtifactKind, ArtifactName, ArtifactResponse, DispatchId, LatticeStatus, LatticeSummary, StorageRecord};
pub use reader::ArtifactFileReader;
pub use repo::{InMemoryLatticeStore, StorageRecordRepository, SummaryRepository};
pub use service::QueryService;
