//! Implementaciones Postgres (Diesel) de los repositorios del core.
//!
//! - `PgSummaryRepository`: resumen de un dispatch (estado, conteos, tiempos).
//! - `PgStorageRecordRepository`: directorio y nombres de archivo del run.
//!
//! Ambos consultan la tabla `lattices` con búsquedas independientes por clave
//! primaria y sólo ven filas con `is_active = true`.
//!
//! Alcance de sesión: cada llamada toma una conexión del pool y abre una
//! transacción READ ONLY. La `PooledConnection` vuelve al pool en su `Drop`,
//! así que se libera en todas las salidas (éxito, ausencia o error).

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use lattice_core::{ArtifactFilenames, DispatchId, EnvelopeCodec, LatticeStatus, LatticeSummary, QueryService, ReadLimits,
                   RepositoryError, StorageRecord, StorageRecordRepository, SummaryRepository};
use log::{debug, warn};
use uuid::Uuid;

use crate::error::PersistenceError;
use crate::migrations::run_pending_migrations;
use crate::schema::lattices;

/// Alias de tipo para el pool r2d2 de conexiones Postgres.
pub type PgPool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// Servicio de consultas respaldado por Postgres y el codec por defecto.
pub type PgQueryService = QueryService<PgSummaryRepository<PoolProvider>, PgStorageRecordRepository<PoolProvider>, EnvelopeCodec>;

/// Proveedor abstracto de conexiones.
///
/// Contrato:
/// - Debe devolver una conexión válida o `PersistenceError::TransientIo`.
pub trait ConnectionProvider: Send + Sync + 'static {
    fn connection(&self) -> Result<r2d2::PooledConnection<ConnectionManager<PgConnection>>, PersistenceError>;
}

/// Implementación concreta de `ConnectionProvider` respaldada por un `PgPool`.
#[derive(Clone)]
pub struct PoolProvider {
    pub pool: PgPool,
}
impl ConnectionProvider for PoolProvider {
    fn connection(&self) -> Result<r2d2::PooledConnection<ConnectionManager<PgConnection>>, PersistenceError> {
        self.pool
            .get()
            .map_err(|e| PersistenceError::TransientIo(format!("pool error: {e}")))
    }
}

/// Proyección de `lattices` para el resumen.
#[derive(Queryable, Debug)]
pub struct SummaryRow {
    pub dispatch_id: Uuid,
    pub status: String,
    pub electron_num: i32,
    pub completed_electron_num: i32,
    pub storage_path: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl SummaryRow {
    /// `runtime` se deriva de los timestamps: hasta `completed_at`, o hasta
    /// `now` mientras el run no haya terminado.
    pub fn into_summary(self, now: DateTime<Utc>) -> Result<LatticeSummary, PersistenceError> {
        let status = self.status
                         .parse::<LatticeStatus>()
                         .map_err(|e| PersistenceError::Corrupt(format!("{}: {e}", self.dispatch_id)))?;
        let summary = LatticeSummary { dispatch_id: DispatchId::from(self.dispatch_id),
                                       status,
                                       total_electrons: to_count(self.dispatch_id, "electron_num", self.electron_num)?,
                                       total_electrons_completed: to_count(self.dispatch_id,
                                                                           "completed_electron_num",
                                                                           self.completed_electron_num)?,
                                       started_at: self.started_at,
                                       ended_at: self.completed_at,
                                       directory: PathBuf::from(self.storage_path),
                                       runtime: LatticeSummary::runtime_until(self.started_at, self.completed_at, now) };
        summary.validated().map_err(|e| PersistenceError::Corrupt(e.to_string()))
    }
}

/// Proyección de `lattices` para el registro de almacenamiento.
#[derive(Queryable, Debug)]
pub struct StorageRow {
    pub dispatch_id: Uuid,
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
}

impl From<StorageRow> for StorageRecord {
    fn from(row: StorageRow) -> Self {
        StorageRecord { dispatch_id: DispatchId::from(row.dispatch_id),
                        directory: PathBuf::from(row.storage_path),
                        filenames: ArtifactFilenames { results: row.results_filename,
                                                       inputs: row.inputs_filename,
                                                       function_string: row.function_string_filename,
                                                       executor_data: row.executor_data_filename,
                                                       workflow_executor_data: row.workflow_executor_data_filename,
                                                       error: row.error_filename,
                                                       function: row.function_filename,
                                                       transport_graph: row.transport_graph_filename },
                        executor_name: row.executor,
                        workflow_executor_name: row.workflow_executor }
    }
}

fn to_count(dispatch_id: Uuid, column: &str, value: i32) -> Result<u32, PersistenceError> {
    u32::try_from(value).map_err(|_| PersistenceError::Corrupt(format!("{dispatch_id}: {column}={value} is negative")))
}

/// Determina si un error es transitorio (recomendado reintentar).
fn is_retryable(e: &PersistenceError) -> bool {
    match e {
        PersistenceError::SerializationConflict => true,
        PersistenceError::TransientIo(_) => true,
        PersistenceError::Unknown(msg) => {
            let m = msg.to_lowercase();
            m.contains("terminating connection due to administrator command")
            || m.contains("connection closed")
            || m.contains("connection refused")
            || m.contains("timeout")
        }
        _ => false,
    }
}

/// Retry con backoff corto (hasta 3 reintentos: 15ms, 30ms, 45ms).
/// Sólo repite la unidad de trabajo `f`; los errores no transitorios salen
/// en el primer intento.
fn with_retry<F, T>(mut f: F) -> Result<T, PersistenceError>
    where F: FnMut() -> Result<T, PersistenceError>
{
    let mut attempts = 0;
    loop {
        match f() {
            Err(e) if is_retryable(&e) && attempts < 3 => {
                let delay_ms = 15 * ((attempts + 1) as u64);
                warn!("retryable error (attempt {}): {:?} -> sleeping {}ms", attempts + 1, e, delay_ms);
                std::thread::sleep(std::time::Duration::from_millis(delay_ms));
                attempts += 1;
            }
            r => return r,
        }
    }
}

/// Resúmenes de dispatch sobre Postgres.
pub struct PgSummaryRepository<P: ConnectionProvider> {
    pub provider: P,
}

impl<P: ConnectionProvider> PgSummaryRepository<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn find(&self, dispatch_id: DispatchId) -> Result<Option<LatticeSummary>, PersistenceError> {
        debug!("find_summary:start dispatch_id={dispatch_id}");
        let key = *dispatch_id.as_uuid();
        let row: Option<SummaryRow> = with_retry(|| {
            let mut conn = self.provider.connection()?;
            conn.build_transaction()
                .read_only()
                .run(|tx| {
                    lattices::table.filter(lattices::dispatch_id.eq(key))
                                   .filter(lattices::is_active.eq(true))
                                   .select((lattices::dispatch_id,
                                            lattices::status,
                                            lattices::electron_num,
                                            lattices::completed_electron_num,
                                            lattices::storage_path,
                                            lattices::started_at,
                                            lattices::completed_at))
                                   .first::<SummaryRow>(tx)
                                   .optional()
                })
                .map_err(PersistenceError::from)
        })?;
        let summary = row.map(|r| r.into_summary(Utc::now())).transpose()?;
        debug!("find_summary:done dispatch_id={dispatch_id} found={}", summary.is_some());
        Ok(summary)
    }
}

impl<P: ConnectionProvider> SummaryRepository for PgSummaryRepository<P> {
    fn get_summary(&self, dispatch_id: DispatchId) -> Result<Option<LatticeSummary>, RepositoryError> {
        self.find(dispatch_id).map_err(RepositoryError::from)
    }
}

/// Registros de almacenamiento sobre Postgres.
pub struct PgStorageRecordRepository<P: ConnectionProvider> {
    pub provider: P,
}

impl<P: ConnectionProvider> PgStorageRecordRepository<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn find(&self, dispatch_id: DispatchId) -> Result<Option<StorageRecord>, PersistenceError> {
        debug!("find_storage_record:start dispatch_id={dispatch_id}");
        let key = *dispatch_id.as_uuid();
        let row: Option<StorageRow> = with_retry(|| {
            let mut conn = self.provider.connection()?;
            conn.build_transaction()
                .read_only()
                .run(|tx| {
                    lattices::table.filter(lattices::dispatch_id.eq(key))
                                   .filter(lattices::is_active.eq(true))
                                   .select((lattices::dispatch_id,
                                            lattices::storage_path,
                                            lattices::results_filename,
                                            lattices::inputs_filename,
                                            lattices::function_string_filename,
                                            lattices::executor,
                                            lattices::executor_data_filename,
                                            lattices::workflow_executor,
                                            lattices::workflow_executor_data_filename,
                                            lattices::error_filename,
                                            lattices::function_filename,
                                            lattices::transport_graph_filename))
                                   .first::<StorageRow>(tx)
                                   .optional()
                })
                .map_err(PersistenceError::from)
        })?;
        debug!("find_storage_record:done dispatch_id={dispatch_id} found={}", row.is_some());
        Ok(row.map(StorageRecord::from))
    }
}

impl<P: ConnectionProvider> StorageRecordRepository for PgStorageRecordRepository<P> {
    fn get_storage_record(&self, dispatch_id: DispatchId) -> Result<Option<StorageRecord>, RepositoryError> {
        self.find(dispatch_id).map_err(RepositoryError::from)
    }
}

/// Construye un pool Postgres r2d2 a partir de URL.
///
/// - Si `min_size > max_size`, usa `min_size = max_size`.
/// - No toca el esquema: la tabla `lattices` pertenece al dispatcher de
///   workflows y este servicio sólo lee.
pub fn build_pool(database_url: &str, min_size: u32, max_size: u32) -> Result<PgPool, PersistenceError> {
    let validated_min = min_size.max(1);
    let validated_max = max_size.max(1);
    if validated_min > validated_max {
        warn!("build_pool: min_size > max_size ({validated_min} > {validated_max}), ajustando min=max");
    }
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    r2d2::Pool::builder().min_idle(Some(validated_min.min(validated_max)))
                         .max_size(validated_max)
                         .build(manager)
                         .map_err(|e| PersistenceError::TransientIo(format!("pool build: {e}")))
}

/// Como `build_pool`, y además aplica las migraciones embebidas. Sólo para
/// bases propias (tests, entornos de desarrollo vacíos).
pub fn build_pool_with_migrations(database_url: &str, min_size: u32, max_size: u32) -> Result<PgPool, PersistenceError> {
    let pool = build_pool(database_url, min_size, max_size)?;
    {
        let mut conn = pool.get()
                           .map_err(|e| PersistenceError::TransientIo(format!("pool get for migrations: {e}")))?;
        run_pending_migrations(&mut conn)?;
    }
    Ok(pool)
}

/// Helper: carga `.env`, lee `DbConfig` y construye el pool (sin migrar).
pub fn build_dev_pool_from_env() -> Result<PgPool, PersistenceError> {
    crate::config::init_dotenv();
    let cfg = crate::config::DbConfig::from_env()?;
    build_pool(&cfg.url, cfg.min_connections, cfg.max_connections)
}

/// Ensambla el `QueryService` sobre un pool ya construido. Ambos repositorios
/// comparten el pool pero consultan por separado.
pub fn build_query_service(pool: PgPool, limits: ReadLimits) -> PgQueryService {
    let provider = PoolProvider { pool };
    QueryService::with_limits(PgSummaryRepository::new(provider.clone()),
                              PgStorageRecordRepository::new(provider),
                              EnvelopeCodec::new(),
                              limits)
}
