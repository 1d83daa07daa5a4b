use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gamus_core::CoreError;
use thiserror::Error;

/// Error de un handler.
///
/// Todos se responden con 500 y el texto del error en el cuerpo, sin sobre
/// JSON: el cliente sólo distingue éxito (`{status: 200, data}`) de fallo.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Falta un parámetro obligatorio (o llegó vacío). Lleva la etiqueta que se publica.
  #[error("{0} undefined")]
  MissingParameter(&'static str),

  #[error("invalid query string: {0}")]
  InvalidQuery(String),

  #[error(transparent)]
  Core(#[from] CoreError),
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self {
    ApiError::InvalidQuery(rejection.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match &self {
      ApiError::Core(err) => tracing::error!(error = %err, "request failed"),
      other => tracing::debug!(error = %other, "rejected request"),
    }

    (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
  }
}
