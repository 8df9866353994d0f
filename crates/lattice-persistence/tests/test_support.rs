#![allow(dead_code)]
//! Soporte común para tests de persistencia (se omiten si no hay DATABASE_URL).

use chrono::{DateTime, TimeZone, Utc};
use diesel::prelude::*;
use lattice_core::DispatchId;
use lattice_persistence::config::DbConfig;
use lattice_persistence::pg::{build_pool_with_migrations, PgPool};
use lattice_persistence::schema::lattices;
use once_cell::sync::Lazy;

pub static TEST_POOL: Lazy<Option<PgPool>> = Lazy::new(|| {
    let cfg = match DbConfig::from_env() {
        Ok(cfg) => cfg,
        Err(_) => return None,
    };
    match build_pool_with_migrations(&cfg.url, 1, 2) {
        Ok(p) => Some(p),
        Err(e) => {
            eprintln!("No se pudo construir pool de test: {e}");
            None
        }
    }
});

pub fn with_pool<F, R>(f: F) -> Option<R>
    where F: FnOnce(&PgPool) -> R
{
    TEST_POOL.as_ref().map(|p| f(p))
}

/// Fila completa tal como la escribe el dispatcher de workflows.
#[derive(Insertable, Clone)]
#[diesel(table_name = lattices)]
pub struct NewLattice {
    pub dispatch_id: uuid::Uuid,
    pub name: String,
    pub status: String,
    pub electron_num: i32,
    pub completed_electron_num: i32,
    pub storage_path: String,
    pub results_filename: Option<String>,
    pub inputs_filename: Option<String>,
    pub function_string_filename: Option<String>,
    pub executor: String,
    pub executor_data_filename: Option<String>,
    pub workflow_executor: String,
    pub workflow_executor_data_filename: Option<String>,
    pub error_filename: Option<String>,
    pub function_filename: Option<String>,
    pub transport_graph_filename: Option<String>,
    pub is_active: bool,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

pub fn started_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap()
}

/// Run completado 5/5 con los nombres de archivo convencionales.
pub fn completed_lattice(dispatch_id: DispatchId, storage_path: &str) -> NewLattice {
    NewLattice { dispatch_id: *dispatch_id.as_uuid(),
                 name: "workflow".into(),
                 status: "COMPLETED".into(),
                 electron_num: 5,
                 completed_electron_num: 5,
                 storage_path: storage_path.into(),
                 results_filename: Some("results.json".into()),
                 inputs_filename: Some("inputs.json".into()),
                 function_string_filename: Some("function_string.txt".into()),
                 executor: "dask".into(),
                 executor_data_filename: Some("executor_data.json".into()),
                 workflow_executor: "local".into(),
                 workflow_executor_data_filename: Some("workflow_executor_data.json".into()),
                 error_filename: Some("error.log".into()),
                 function_filename: Some("function.json".into()),
                 transport_graph_filename: Some("transport_graph.json".into()),
                 is_active: true,
                 started_at: started_at(),
                 completed_at: Some(started_at() + chrono::Duration::milliseconds(12_345)) }
}

pub fn insert(pool: &PgPool, row: &NewLattice) {
    let mut conn = pool.get().expect("conn");
    diesel::insert_into(lattices::table).values(row)
                                        .execute(&mut conn)
                                        .expect("insert lattice");
}
