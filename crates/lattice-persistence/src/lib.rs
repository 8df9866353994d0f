//! lattice-persistence
//!
//! Implementaciones Postgres (Diesel + r2d2) de los repositorios de
//! `lattice-core`. Sólo lectura: los runs los escribe el dispatcher de
//! workflows, este crate únicamente consulta.
//!
//! Módulos:
//! - `pg`: repositorios de resumen y de registro de almacenamiento.
//! - `migrations`: runner embebido de migraciones Diesel (opt-in, ver
//!   `build_pool_with_migrations`).
//! - `config`: carga de configuración desde .env.
//! - `schema`: tablas Diesel declaradas para compilar queries.

pub mod config;
pub mod error;
pub mod migrations;
pub mod pg;
pub mod schema;

pub use config::{init_dotenv, DbConfig};
pub use error::PersistenceError;
pub use pg::{build_dev_pool_from_env, build_pool, build_pool_with_migrations, build_query_service, ConnectionProvider, PgPool,
             PgQueryService, PgStorageRecordRepository, PgSummaryRepository, PoolProvider};
