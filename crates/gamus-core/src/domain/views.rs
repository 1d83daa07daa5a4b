use serde::Serialize;

use crate::domain::{Artist, Collection, Song};

/// Una colección con sus canciones ya proyectadas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionSongs {
  pub collection: Collection,
  pub songs: Vec<Song>,
}

/// Ficha de artista con todas sus colecciones anidadas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistDetail {
  pub artist: Artist,
  pub collections: Vec<CollectionSongs>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SearchResults {
  pub songs: Vec<Song>,
  pub artists: Vec<Artist>,
  pub collections: Vec<Collection>,
}
