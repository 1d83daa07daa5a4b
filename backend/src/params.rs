use std::collections::HashMap;

use axum::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use crate::error::ApiError;

/// Parámetro de query obligatorio: nombre en la URL y etiqueta del error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
  pub name: &'static str,
  pub label: &'static str,
}

impl Param {
  pub const fn new(name: &'static str, label: &'static str) -> Self {
    Self { name, label }
  }
}

pub const USER_ID: Param = Param::new("userId", "userId");
pub const SUBJECT: Param = Param::new("subject", "subject");
pub const COLLECTION: Param = Param::new("collection", "collection");
pub const ARTIST_ID: Param = Param::new("id", "artist id");
pub const SONG_ID: Param = Param::new("songId", "songId");
pub const FAVORITE_ID: Param = Param::new("id", "id");

/// Parámetros de query de la petición, todos como texto.
///
/// Un parámetro ausente vale `""`, igual que uno enviado vacío. Los handlers
/// piden los obligatorios en orden con [`QueryParams::require`]; el primero
/// que falta corta la petición antes de tocar el almacén.
#[derive(Debug, Clone, Default)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
  pub fn get(&self, name: &str) -> &str {
    self.0.get(name).map_or("", String::as_str)
  }

  pub fn require(&self, param: Param) -> Result<String, ApiError> {
    match self.get(param.name) {
      "" => Err(ApiError::MissingParameter(param.label)),
      value => Ok(value.to_owned()),
    }
  }
}

impl From<HashMap<String, String>> for QueryParams {
  fn from(map: HashMap<String, String>) -> Self {
    QueryParams(map)
  }
}

#[async_trait]
impl<S> FromRequestParts<S> for QueryParams
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
    let Query(map) = Query::<HashMap<String, String>>::from_request_parts(parts, state).await?;
    Ok(QueryParams(map))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn params(pairs: &[(&str, &str)]) -> QueryParams {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect::<HashMap<_, _>>().into()
  }

  #[test]
  fn absent_and_empty_are_both_missing() {
    let p = params(&[("subject", "")]);

    assert!(matches!(p.require(USER_ID), Err(ApiError::MissingParameter("userId"))));
    assert!(matches!(p.require(SUBJECT), Err(ApiError::MissingParameter("subject"))));
  }

  #[test]
  fn artist_id_uses_its_own_label() {
    let p = params(&[("userId", "u1")]);

    assert_eq!(p.require(USER_ID).unwrap(), "u1");
    assert_eq!(p.require(ARTIST_ID).unwrap_err().to_string(), "artist id undefined");
    assert_eq!(p.require(FAVORITE_ID).unwrap_err().to_string(), "id undefined");
  }
}
