use serde_json::Value;

use crate::document::{Document, Fields, fields};
use crate::domain::ids::{FavoriteId, SongId, UserId};

/// Registro de favorito: un usuario marcó una canción con un corazón.
///
/// No hay restricción de unicidad sobre el par (usuario, canción); marcar
/// dos veces crea dos registros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
  pub id: FavoriteId,
  pub song_id: Option<SongId>,
}

impl Favorite {
  pub fn from_document(doc: &Document) -> Self {
    Favorite {
      id: FavoriteId::new(doc.id.as_str()),
      song_id: doc.get_str(fields::SONG_ID).map(SongId::from),
    }
  }

  /// Campos del documento que se inserta al marcar una canción.
  pub fn new_fields(user_id: &UserId, song_id: &SongId) -> Fields {
    let mut f = Fields::new();
    f.insert(fields::USER_ID.to_owned(), Value::String(user_id.to_string()));
    f.insert(fields::SONG_ID.to_owned(), Value::String(song_id.to_string()));
    f
  }
}
