mod test_support;

use lattice_core::{ArtifactCodec, ArtifactFilenames, ArtifactKind, ArtifactName, ArtifactResponse, DispatchId,
                   EnvelopeCodec, ReadLimits, StorageRecordRepository};
use lattice_persistence::pg::{build_query_service, PgStorageRecordRepository, PoolProvider};
use serde_json::json;
use test_support::{completed_lattice, insert, with_pool};

#[test]
fn storage_record_carries_every_filename() {
    with_pool(|pool| {
        let id = DispatchId::new_v4();
        let mut row = completed_lattice(id, "/results/record");
        row.error_filename = None;
        insert(pool, &row);
        let repo = PgStorageRecordRepository::new(PoolProvider { pool: pool.clone() });

        let rec = repo.get_storage_record(id).unwrap().expect("record");
        assert_eq!(rec.dispatch_id, id);
        assert_eq!(rec.directory.to_str(), Some("/results/record"));
        assert_eq!(rec.executor_name, "dask");
        assert_eq!(rec.workflow_executor_name, "local");
        assert_eq!(rec.filenames.get(ArtifactKind::Error), None);
        let mut expected = ArtifactFilenames::conventional();
        expected.error = None;
        assert_eq!(rec.filenames, expected);
        assert!(repo.get_storage_record(DispatchId::new_v4()).unwrap().is_none());
    });
}

#[test]
fn query_service_reads_artifacts_from_recorded_directory() {
    with_pool(|pool| {
        let dir = tempfile::tempdir().unwrap();
        let codec = EnvelopeCodec::new();
        let executor_data = json!({"scheduler_address": "tcp://127.0.0.1:8786"});
        std::fs::write(dir.path().join("executor_data.json"), codec.encode(&executor_data).unwrap()).unwrap();
        std::fs::write(dir.path().join("function_string.txt"), "def f(x):\n    return x\n").unwrap();

        let id = DispatchId::new_v4();
        insert(pool, &completed_lattice(id, dir.path().to_str().unwrap()));
        let service = build_query_service(pool.clone(), ReadLimits::unbounded());

        let summary = service.get_summary(id).unwrap();
        assert_eq!(summary.directory, dir.path());

        let exec = service.get_artifact(id, &ArtifactName::Known(ArtifactKind::Executor)).unwrap();
        assert_eq!(exec,
                   ArtifactResponse::Executor { name: "dask".into(),
                                                details: executor_data });
        let src = service.get_artifact(id, &ArtifactName::parse("function_string")).unwrap();
        assert_eq!(src, ArtifactResponse::data(json!("def f(x):\n    return x\n")));

        let missing = service.get_artifact(id, &ArtifactName::Known(ArtifactKind::Result)).unwrap_err();
        assert!(missing.is_missing_file());
        let unknown = service.get_artifact(DispatchId::new_v4(), &ArtifactName::parse("result")).unwrap_err();
        assert!(unknown.is_not_found());
    });
}
