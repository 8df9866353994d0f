//! Lectura de archivos de artifact.
//!
//! El lector no resuelve directorios: recibe rutas ya construidas y
//! validadas por `ArtifactDispatcher`. Nunca modifica el archivo leído.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use log::debug;
use serde_json::Value;

use crate::codec::ArtifactCodec;
use crate::config::ReadLimits;
use crate::errors::ArtifactError;

pub struct ArtifactFileReader<C: ArtifactCodec> {
    codec: C,
    limits: ReadLimits,
}

impl<C: ArtifactCodec> ArtifactFileReader<C> {
    pub fn new(codec: C) -> Self {
        Self { codec,
               limits: ReadLimits::unbounded() }
    }

    pub fn with_limits(codec: C, limits: ReadLimits) -> Self {
        Self { codec, limits }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn limits(&self) -> ReadLimits {
        self.limits
    }

    /// Texto UTF-8 (código fuente de la función, traza de error).
    pub fn read_text(&self, path: &Path) -> Result<String, ArtifactError> {
        let bytes = self.read_bytes(path)?;
        String::from_utf8(bytes).map_err(|e| ArtifactError::Decode { path: path.to_path_buf(),
                                                                     reason: format!("invalid utf-8: {e}") })
    }

    /// Objeto serializado, decodificado con el codec configurado.
    pub fn read_object(&self, path: &Path) -> Result<Value, ArtifactError> {
        let bytes = self.read_bytes(path)?;
        self.codec
            .decode(&bytes)
            .map_err(|e| ArtifactError::Decode { path: path.to_path_buf(),
                                                 reason: e.to_string() })
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, ArtifactError> {
        let file = File::open(path).map_err(|e| io_error(path, e))?;
        let meta = file.metadata().map_err(|e| io_error(path, e))?;
        if !meta.is_file() {
            return Err(ArtifactError::MissingFile(path.to_path_buf()));
        }
        let bytes = match self.limits.max_bytes {
            None => {
                let mut buf = Vec::new();
                (&file).read_to_end(&mut buf).map_err(|e| io_error(path, e))?;
                buf
            }
            Some(limit) => {
                // Rechazo temprano por metadata; el tope real lo pone `take`.
                if meta.len() > limit {
                    return Err(ArtifactError::TooLarge { path: path.to_path_buf(),
                                                         size: meta.len(),
                                                         limit });
                }
                read_bounded(&file, limit).map_err(|e| match e {
                                              BoundedRead::Io(source) => io_error(path, source),
                                              BoundedRead::Exceeded(size) => {
                                                  ArtifactError::TooLarge { path: path.to_path_buf(),
                                                                            size,
                                                                            limit }
                                              }
                                          })?
            }
        };
        debug!("read_bytes:done path={} len={}", path.display(), bytes.len());
        Ok(bytes)
    }
}

enum BoundedRead {
    Io(std::io::Error),
    /// Bytes vistos al cortar (al menos `limit + 1`).
    Exceeded(u64),
}

/// Lee como máximo `limit` bytes; un archivo que crece después del chequeo
/// de metadata se corta en `limit + 1`.
fn read_bounded<R: Read>(source: R, limit: u64) -> Result<Vec<u8>, BoundedRead> {
    let mut buf = Vec::new();
    source.take(limit.saturating_add(1))
          .read_to_end(&mut buf)
          .map_err(BoundedRead::Io)?;
    let seen = buf.len() as u64;
    if seen > limit {
        return Err(BoundedRead::Exceeded(seen));
    }
    Ok(buf)
}

fn io_error(path: &Path, source: std::io::Error) -> ArtifactError {
    match source.kind() {
        ErrorKind::NotFound => ArtifactError::MissingFile(path.to_path_buf()),
        _ => ArtifactError::Io { path: path.to_path_buf(),
                                 source },
    }
}
