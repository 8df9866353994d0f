//! Configuración de conexión desde variables de entorno.
//! Convención `DATABASE_URL` más tamaños opcionales de pool.

use std::env;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

use crate::error::PersistenceError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

const DEFAULT_MIN_CONNECTIONS: u32 = 2;
const DEFAULT_MAX_CONNECTIONS: u32 = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
}

impl DbConfig {
    pub fn from_env() -> Result<Self, PersistenceError> {
        Lazy::force(&DOTENV_LOADED);
        Self::from_vars(env::var("DATABASE_URL").ok(),
                        env::var("DATABASE_MIN_CONNECTIONS").ok(),
                        env::var("DATABASE_MAX_CONNECTIONS").ok())
    }

    pub fn from_vars(url: Option<String>, min: Option<String>, max: Option<String>) -> Result<Self, PersistenceError> {
        let url = url.filter(|u| !u.trim().is_empty())
                     .ok_or_else(|| PersistenceError::Config("DATABASE_URL no definido".into()))?;
        let min_connections = parse_size("DATABASE_MIN_CONNECTIONS", min, DEFAULT_MIN_CONNECTIONS)?;
        let max_connections = parse_size("DATABASE_MAX_CONNECTIONS", max, DEFAULT_MAX_CONNECTIONS)?;
        Ok(Self { url,
                  min_connections,
                  max_connections })
    }
}

fn parse_size(name: &str, raw: Option<String>, default: u32) -> Result<u32, PersistenceError> {
    match raw {
        None => Ok(default),
        Some(v) => v.trim()
                    .parse()
                    .map_err(|_| PersistenceError::Config(format!("{name}={v} no es un entero válido"))),
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
