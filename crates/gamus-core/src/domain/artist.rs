use serde::Serialize;

use crate::document::{Document, fields};
use crate::domain::ids::ArtistId;

/// Representa a un artista dentro del catálogo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artist {
  /// Identificador único del artista.
  pub id: ArtistId,

  /// Nombre principal (canónico) del artista.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,

  /// Información biográfica opcional del artista.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,

  #[serde(rename = "imagePath", skip_serializing_if = "Option::is_none")]
  pub image_path: Option<String>,
}

impl Artist {
  pub fn from_document(doc: &Document) -> Self {
    Artist {
      id: ArtistId::new(doc.id.as_str()),
      name: doc.get_string(fields::NAME),
      description: doc.get_string(fields::DESCRIPTION),
      image_path: doc.get_string(fields::IMAGE_PATH),
    }
  }
}
