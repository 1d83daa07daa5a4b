// crates/gamus-core/src/errors.rs
use thiserror::Error;

use crate::ports::StoreError;

/// Error genérico del núcleo de Gamus.
///
/// Las capas superiores (servidor HTTP, herramientas de importación) deberían
/// mapear este error a respuestas o logs. No se distingue entre fallos
/// transitorios y permanentes: todos terminan la petición en curso.
#[derive(Debug, Error)]
pub enum CoreError {
  #[error("store error: {0}")]
  Store(#[from] StoreError),

  /// Un documento existe pero le falta un campo sin el cual no se puede seguir.
  #[error("invalid document {collection}/{id}: {reason}")]
  InvalidDocument { collection: String, id: String, reason: String },
}
