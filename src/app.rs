//! Cableado del `QueryService` sobre Postgres o sobre el store en memoria, y
//! un run de demostración para el modo en memoria.

use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use lattice_core::{ArtifactCodec, ArtifactFilenames, ArtifactFormat, ArtifactKind, DispatchId, EnvelopeCodec,
                   InMemoryLatticeStore, LatticeStatus, LatticeSummary, QueryService, ReadLimits, StorageRecord};
use lattice_persistence::{build_pool, build_query_service, DbConfig, PgQueryService};
use log::debug;
use serde_json::{json, Value};

use crate::errors::AppError;

pub type MemoryQueryService = QueryService<InMemoryLatticeStore, InMemoryLatticeStore, EnvelopeCodec>;

pub fn open_pg_service(db: &DbConfig, limits: ReadLimits) -> Result<PgQueryService, AppError> {
    let pool = build_pool(&db.url, db.min_connections, db.max_connections)?;
    Ok(build_query_service(pool, limits))
}

pub fn memory_service(store: &InMemoryLatticeStore, limits: ReadLimits) -> MemoryQueryService {
    QueryService::with_limits(store.clone(), store.clone(), EnvelopeCodec::new(), limits)
}

fn demo_payload(kind: ArtifactKind) -> Value {
    match kind {
        ArtifactKind::Result => json!({"value": 42}),
        ArtifactKind::Inputs => json!({"args": [41], "kwargs": {}}),
        ArtifactKind::FunctionString => json!("@ct.lattice\ndef workflow(x):\n    return add(x, 1)\n"),
        ArtifactKind::Executor => json!({"cores": 2}),
        ArtifactKind::WorkflowExecutor => json!({"workdir": "/tmp"}),
        ArtifactKind::Error => json!(""),
        ArtifactKind::Function => json!({"name": "workflow", "module": "__main__"}),
        ArtifactKind::TransportGraph => json!({
            "nodes": [{"id": 0, "name": "add"}],
            "links": []
        }),
    }
}

/// Escribe los ocho artifacts de un run completado en `directory` y registra
/// su resumen y su registro de almacenamiento en `store`.
pub fn seed_demo_run<C: ArtifactCodec>(store: &InMemoryLatticeStore,
                                       directory: &Path,
                                       codec: &C)
                                       -> Result<DispatchId, AppError> {
    let dispatch_id = DispatchId::new_v4();
    let filenames = ArtifactFilenames::conventional();
    for kind in ArtifactKind::ALL {
        let Some(name) = filenames.get(kind) else { continue };
        let payload = demo_payload(kind);
        let bytes = match (kind.format(), &payload) {
            (ArtifactFormat::Text, Value::String(s)) => s.clone().into_bytes(),
            (ArtifactFormat::Text, other) => other.to_string().into_bytes(),
            (ArtifactFormat::Object, v) => codec.encode(v)?,
        };
        std::fs::write(directory.join(name), bytes)?;
    }

    let ended_at = Utc::now();
    let runtime = Duration::from_millis(1_500);
    let started_at = ended_at - chrono::Duration::milliseconds(1_500);
    store.insert_summary(LatticeSummary { dispatch_id,
                                          status: LatticeStatus::Completed,
                                          total_electrons: 1,
                                          total_electrons_completed: 1,
                                          started_at,
                                          ended_at: Some(ended_at),
                                          directory: directory.to_path_buf(),
                                          runtime })?;
    store.insert_storage_record(StorageRecord { dispatch_id,
                                                directory: directory.to_path_buf(),
                                                filenames,
                                                executor_name: "local".into(),
                                                workflow_executor_name: "local".into() });
    debug!("seed_demo_run:done dispatch_id={dispatch_id} dir={}", directory.display());
    Ok(dispatch_id)
}
