//! Constantes del formato de artifacts.
//!
//! `ARTIFACT_FORMAT_TAG` y `ARTIFACT_FORMAT_VERSION` forman parte del wire
//! format escrito en disco: cambiarlos invalida la lectura de runs previos.

/// Etiqueta fija del envelope de artifacts serializados.
pub const ARTIFACT_FORMAT_TAG: &str = "lattice-artifact";

/// Versión actual del envelope. Un lector sólo acepta versiones `<=` a esta.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Variable de entorno que acota el tamaño máximo (bytes) de un artifact leído.
pub const ARTIFACT_MAX_BYTES_ENV: &str = "LATTICE_ARTIFACT_MAX_BYTES";
