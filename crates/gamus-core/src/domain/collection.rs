use serde::Serialize;

use crate::document::{Document, fields};
use crate::domain::ids::{ArtistId, CollectionId};

/// Una colección publicada: álbum, EP, single, recopilatorio…
///
/// El tipo se guarda como texto libre y se publica tal cual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collection {
  pub id: CollectionId,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  /// Artista dueño de la colección, sacado de la referencia `Artist`.
  #[serde(rename = "artist", skip_serializing_if = "Option::is_none")]
  pub artist_id: Option<ArtistId>,
  #[serde(rename = "artistName", skip_serializing_if = "Option::is_none")]
  pub artist_name: Option<String>,
  #[serde(rename = "imagePath", skip_serializing_if = "Option::is_none")]
  pub image_path: Option<String>,
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub kind: Option<String>,
}

impl Collection {
  pub fn from_document(doc: &Document) -> Self {
    let artist_id = doc.get_ref(fields::ARTIST_REF).and_then(|r| r.id().map(ArtistId::from));

    Collection {
      id: CollectionId::new(doc.id.as_str()),
      name: doc.get_string(fields::NAME),
      artist_id,
      artist_name: doc.get_string(fields::ARTIST_NAME),
      image_path: doc.get_string(fields::IMAGE_PATH),
      kind: doc.get_string(fields::TYPE),
    }
  }
}
