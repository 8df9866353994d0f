//! lattice-view
//!
//! Aplicación de consulta de runs de workflows:
//! - `config`: `AppConfig` desde entorno (.env).
//! - `errors`: `AppError`, que envuelve los errores de core y persistencia.
//! - `app`: cableado del `QueryService` (Postgres o memoria) y run de demo.

pub mod app;
pub mod config;
pub mod errors;

pub use app::{memory_service, open_pg_service, seed_demo_run, MemoryQueryService};
pub use config::AppConfig;
pub use errors::AppError;
