use lattice_core::{CodecError, CoreError, QueryError};
use lattice_persistence::PersistenceError;
use thiserror::Error;

/// Errores de la aplicación (cableado, configuración y consultas).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de configuración: {0}")]
    Config(#[from] CoreError),
    #[error("Error de persistencia: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("Error de consulta: {0}")]
    Query(#[from] QueryError),
    #[error("Error de codificación: {0}")]
    Codec(#[from] CodecError),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Código de salida para binarios: 4 para ausencias, 5 para el resto.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Query(e) if e.is_not_found() || e.is_missing_file() => 4,
            _ => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_core::DispatchId;

    #[test]
    fn test_query_variant_format() {
        let id = DispatchId::parse("00000000-0000-0000-0000-000000000000").unwrap();
        let err: AppError = QueryError::DispatchNotFound(id).into();
        assert_eq!(err.to_string(),
                   "Error de consulta: Dispatch ID 00000000-0000-0000-0000-000000000000 does not exist");
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_io_variant_from() {
        let err: AppError = std::io::Error::other("falló IO").into();
        assert_eq!(err.to_string(), "Error en IO: falló IO");
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_config_variant_format() {
        let err: AppError = PersistenceError::Config("DATABASE_URL no definido".into()).into();
        assert_eq!(err.to_string(), "Error de persistencia: configuration error: DATABASE_URL no definido");
    }
}
