use axum::Json;
use serde::Serialize;

use crate::error::ApiError;

/// Sobre de las respuestas correctas: `{"status": 200, "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
  pub status: u16,
  pub data: T,
}

pub type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
  Ok(Json(Envelope { status: 200, data }))
}
