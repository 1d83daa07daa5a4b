//! Modelo de documento del almacén.
//!
//! El almacén es *schemaless*: cada documento es un mapa de campos JSON más
//! un identificador opaco asignado por el propio almacén. Las proyecciones
//! del dominio nunca acceden al mapa directamente, sino a través de lecturas
//! tipadas que devuelven `Option` y dejan al llamador elegir el valor por
//! defecto.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Campos de un documento tal como los guarda el almacén.
pub type Fields = Map<String, Value>;

/// Nombres de las colecciones del catálogo.
pub mod collections {
  pub const SONGS: &str = "Music";
  pub const ARTISTS: &str = "Artists";
  pub const COLLECTIONS: &str = "Collection";
  pub const FAVORITES: &str = "FavSongs";
}

/// Nombres de los campos almacenados.
pub mod fields {
  pub const NAME: &str = "Name";
  pub const COLLECTION_ID: &str = "CollectionId";
  pub const ARTIST_ID: &str = "ArtistId";
  pub const ARTIST_NAME: &str = "ArtistName";
  pub const ARTIST_REF: &str = "Artist";
  pub const LENGTH: &str = "Length";
  pub const FILE_PATH: &str = "FilePath";
  pub const IMAGE_PATH: &str = "ImagePath";
  pub const DESCRIPTION: &str = "Description";
  pub const TYPE: &str = "Type";
  pub const USER_ID: &str = "UserId";
  pub const SONG_ID: &str = "SongId";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
  pub id: String,
  #[serde(flatten)]
  pub fields: Fields,
}

impl Document {
  pub fn new(id: impl Into<String>, fields: Fields) -> Self {
    Self { id: id.into(), fields }
  }

  /// Documento sin campos.
  ///
  /// Es lo que se proyecta cuando una búsqueda por id no encuentra nada:
  /// sólo se conoce el identificador y todo lo demás queda ausente.
  pub fn stub(id: impl Into<String>) -> Self {
    Self::new(id, Fields::new())
  }

  /// Valor crudo de un campo. `null` cuenta como ausente.
  pub fn get(&self, field: &str) -> Option<&Value> {
    self.fields.get(field).filter(|v| !v.is_null())
  }

  pub fn get_value(&self, field: &str) -> Option<Value> {
    self.get(field).cloned()
  }

  /// Lee un campo de texto. Un campo con otro tipo se trata como ausente.
  pub fn get_str(&self, field: &str) -> Option<&str> {
    self.get(field).and_then(Value::as_str)
  }

  pub fn get_string(&self, field: &str) -> Option<String> {
    self.get_str(field).map(str::to_owned)
  }

  pub fn get_str_or(&self, field: &str, default: &str) -> String {
    self.get_str(field).unwrap_or(default).to_owned()
  }

  pub fn get_ref(&self, field: &str) -> Option<DocumentRef> {
    self.get(field).and_then(DocumentRef::from_value)
  }
}

/// Referencia a otro documento, expresada como ruta `"<colección>/<id>"`.
///
/// En el almacén aparece como un objeto `{"path": "Artists/abc"}` o
/// directamente como la cadena de la ruta. El identificador referenciado es
/// siempre el segmento de índice 1; una ruta con un solo segmento no
/// referencia ningún documento concreto.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
  path: String,
}

impl DocumentRef {
  pub fn new(path: impl Into<String>) -> Self {
    Self { path: path.into() }
  }

  pub fn from_value(value: &Value) -> Option<Self> {
    match value {
      Value::String(path) => Some(Self::new(path.as_str())),
      Value::Object(map) => map.get("path").and_then(Value::as_str).map(Self::new),
      _ => None,
    }
  }

  pub fn id(&self) -> Option<&str> {
    self.segment(1)
  }

  fn segment(&self, index: usize) -> Option<&str> {
    self.path.split('/').nth(index).filter(|s| !s.is_empty())
  }
}
