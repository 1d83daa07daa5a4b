use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::document::{Document, fields};
use crate::domain::ids::{ArtistId, CollectionId, FavoriteId, SongId};

/// Valor que se publica como `artistName` cuando el documento no lo trae.
pub const UNKNOWN_ARTIST_NAME: &str = "undefined";

/// La Canción (Song) tal como la ve un usuario concreto.
///
/// Además de los datos del documento de `Music`, lleva el favorito del
/// usuario que hizo la petición (si lo hay). Los campos opcionales ausentes
/// no aparecen en el JSON resultante.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Song {
  pub id: SongId,
  #[serde(rename = "collection", skip_serializing_if = "Option::is_none")]
  pub collection_id: Option<CollectionId>,
  #[serde(rename = "artist", skip_serializing_if = "Option::is_none")]
  pub artist_id: Option<ArtistId>,
  #[serde(rename = "artistName")]
  pub artist_name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  /// Duración tal como esté guardada (número de segundos o texto).
  #[serde(skip_serializing_if = "Option::is_none")]
  pub length: Option<Value>,
  #[serde(rename = "path", skip_serializing_if = "Option::is_none")]
  pub file_path: Option<String>,
  #[serde(rename = "imagePath", skip_serializing_if = "Option::is_none")]
  pub image_path: Option<String>,
  /// Registro de favorito del usuario; se publica como `""` si no existe.
  #[serde(rename = "fav", serialize_with = "serialize_favorite")]
  pub favorite_id: Option<FavoriteId>,
}

impl Song {
  /// Proyecta un documento de `Music`. El favorito lo resuelve el llamador.
  pub fn from_document(doc: &Document, favorite_id: Option<FavoriteId>) -> Self {
    Song {
      id: SongId::new(doc.id.as_str()),
      collection_id: doc.get_str(fields::COLLECTION_ID).map(CollectionId::from),
      artist_id: doc.get_str(fields::ARTIST_ID).map(ArtistId::from),
      artist_name: doc.get_str_or(fields::ARTIST_NAME, UNKNOWN_ARTIST_NAME),
      name: doc.get_string(fields::NAME),
      length: doc.get_value(fields::LENGTH),
      file_path: doc.get_string(fields::FILE_PATH),
      image_path: doc.get_string(fields::IMAGE_PATH),
      favorite_id,
    }
  }
}

fn serialize_favorite<S: Serializer>(favorite: &Option<FavoriteId>, s: S) -> Result<S::Ok, S::Error> {
  s.serialize_str(favorite.as_ref().map_or("", FavoriteId::as_str))
}
