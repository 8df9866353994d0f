//! Configuración central de la aplicación.
//! Junta la configuración de base de datos (opcional: sin `DATABASE_URL` la
//! aplicación trabaja sólo en memoria) y los límites de lectura de artifacts.

use std::env;

use lattice_core::ReadLimits;
use lattice_persistence::{init_dotenv, DbConfig};

use crate::errors::AppError;

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `None` cuando no hay `DATABASE_URL`.
    pub database: Option<DbConfig>,
    pub limits: ReadLimits,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        init_dotenv();
        let database = match env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => Some(DbConfig::from_env()?),
            _ => None,
        };
        let limits = ReadLimits::from_env()?;
        Ok(Self { database, limits })
    }

    /// Variante en memoria, útil para demos y tests.
    pub fn in_memory(limits: ReadLimits) -> Self {
        Self { database: None, limits }
    }
}
