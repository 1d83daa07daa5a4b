use serde::{Deserialize, Serialize};
use std::fmt;

/// Declara un identificador opaco asignado por el almacén.
///
/// Todos comparten la misma forma: un `String` envuelto que se serializa de
/// forma transparente. El tipo evita confundir, por ejemplo, un `SongId` con
/// el `FavoriteId` del registro que lo marca como favorito.
macro_rules! string_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct $name(String);

    impl $name {
      pub fn new(id: impl Into<String>) -> Self {
        $name(id.into())
      }

      pub fn as_str(&self) -> &str {
        &self.0
      }

      pub fn into_string(self) -> String {
        self.0
      }
    }

    impl From<String> for $name {
      fn from(s: String) -> Self {
        $name(s)
      }
    }

    impl From<&str> for $name {
      fn from(s: &str) -> Self {
        $name(s.to_owned())
      }
    }

    impl From<$name> for String {
      fn from(id: $name) -> Self {
        id.0
      }
    }

    impl AsRef<str> for $name {
      fn as_ref(&self) -> &str {
        &self.0
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
      }
    }
  };
}

string_id! {
  /// Identificador de una canción (documento de `Music`).
  SongId
}

string_id! {
  /// Identificador de un artista (documento de `Artists`).
  ArtistId
}

string_id! {
  /// Identificador de una colección: álbum, EP, single…
  CollectionId
}

string_id! {
  /// Identificador de un registro de favorito (documento de `FavSongs`).
  ///
  /// Es lo que el cliente envía para quitar el corazón, no el par
  /// usuario/canción.
  FavoriteId
}

string_id! {
  /// Identificador de usuario tal como lo envía el cliente. No se verifica.
  UserId
}
