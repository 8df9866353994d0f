use lattice_core::{ArtifactKind, DispatchId, EnvelopeCodec, InMemoryLatticeStore, QueryService, StorageRecordRepository,
                   SummaryRepository};
use lattice_view::{memory_service, open_pg_service, seed_demo_run, AppConfig, AppError};

/// Imprime el resumen y todos los artifacts de un dispatch.
fn print_run<S, R>(service: &QueryService<S, R, EnvelopeCodec>, dispatch_id: DispatchId) -> Result<(), AppError>
    where S: SummaryRepository,
          R: StorageRecordRepository
{
    let summary = service.get_summary(dispatch_id)?;
    println!("summary: {}", serde_json::to_string_pretty(&summary).unwrap_or_default());
    for (kind, res) in service.get_artifacts(dispatch_id, &ArtifactKind::ALL)? {
        match res {
            Ok(resp) => println!("{kind}: {}", serde_json::to_string(&resp).unwrap_or_default()),
            Err(e) => println!("{kind}: error {}", serde_json::to_string(&e.detail()).unwrap_or_default()),
        }
    }
    Ok(())
}

fn run() -> Result<(), AppError> {
    let cfg = AppConfig::from_env()?;
    // Con DATABASE_URL y un id como argumento se consulta el backend real.
    if let (Some(db), Some(raw)) = (cfg.database.as_ref(), std::env::args().nth(1)) {
        let dispatch_id = DispatchId::parse(&raw)?;
        let service = open_pg_service(db, cfg.limits)?;
        return print_run(&service, dispatch_id);
    }

    println!("modo demo en memoria");
    let dir = std::env::temp_dir().join(format!("lattice-demo-{}", std::process::id()));
    std::fs::create_dir_all(&dir)?;
    let store = InMemoryLatticeStore::new();
    let dispatch_id = seed_demo_run(&store, &dir, &EnvelopeCodec::new())?;
    let result = print_run(&memory_service(&store, cfg.limits), dispatch_id);
    std::fs::remove_dir_all(&dir)?;
    result
}

fn main() {
    if let Err(e) = run() {
        eprintln!("[main-core] {e}");
        std::process::exit(e.exit_code());
    }
}
