use futures::stream::{self, StreamExt, TryStreamExt};
use futures::try_join;
use tracing::debug;

use crate::document::{Document, collections, fields};
use crate::domain::{
  Artist, ArtistDetail, ArtistId, Collection, CollectionId, CollectionSongs, Favorite, FavoriteId,
  SearchResults, Song, SongId, UserId,
};
use crate::errors::CoreError;
use crate::ports::{DocumentStore, FieldFilter};

/// Servicio de consulta del catálogo.
///
/// El almacén no hace joins, así que cada consulta compuesta se arma aquí:
/// se leen los documentos, se proyectan y, para cada canción, se resuelve
/// el favorito del usuario que pregunta. Las búsquedas de favoritos de un
/// mismo listado son independientes entre sí y se lanzan a la vez, con como
/// mucho `fan_out` en curso; el resultado conserva el orden en que el
/// almacén devolvió las canciones.
///
/// No guarda estado entre llamadas.
pub struct CatalogService<S>
where
  S: DocumentStore,
{
  store: S,
  fan_out: usize,
}

/// Lecturas simultáneas por petición si no se indica otra cosa.
pub const DEFAULT_FAN_OUT: usize = 8;

impl<S> CatalogService<S>
where
  S: DocumentStore,
{
  pub fn new(store: S) -> Self {
    Self { store, fan_out: DEFAULT_FAN_OUT }
  }

  /// Limita las lecturas simultáneas de un mismo fan-out.
  ///
  /// Conviene que no supere las conexiones que el almacén puede atender a
  /// la vez. Un límite de 0 se toma como 1.
  pub fn with_fan_out(mut self, limit: usize) -> Self {
    self.fan_out = limit.max(1);
    self
  }

  pub fn fan_out(&self) -> usize {
    self.fan_out
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  // -------- FAVORITOS --------

  /// Devuelve el primer registro de favorito del par (usuario, canción).
  ///
  /// Si hay duplicados se usa el primero que devuelva el almacén.
  pub async fn check_favorite(&self, user_id: &UserId, song_id: &SongId) -> Result<Option<FavoriteId>, CoreError> {
    let filters =
      [FieldFilter::eq(fields::USER_ID, user_id.as_str()), FieldFilter::eq(fields::SONG_ID, song_id.as_str())];
    let matches = self.store.query(collections::FAVORITES, &filters).await?;

    Ok(matches.into_iter().next().map(|doc| FavoriteId::new(doc.id)))
  }

  pub async fn heart_song(&self, user_id: &UserId, song_id: &SongId) -> Result<FavoriteId, CoreError> {
    let id = self.store.insert(collections::FAVORITES, Favorite::new_fields(user_id, song_id)).await?;
    debug!(%user_id, %song_id, favorite_id = %id, "song hearted");
    Ok(FavoriteId::new(id))
  }

  /// Quita un favorito por el id del registro, no por el par usuario/canción.
  pub async fn unheart_song(&self, favorite_id: &FavoriteId) -> Result<(), CoreError> {
    self.store.delete(collections::FAVORITES, favorite_id.as_str()).await?;
    debug!(%favorite_id, "song unhearted");
    Ok(())
  }

  // -------- PROYECCIONES --------

  pub async fn project_song(&self, doc: &Document, user_id: &UserId) -> Result<Song, CoreError> {
    let favorite_id = self.check_favorite(user_id, &SongId::new(doc.id.as_str())).await?;
    Ok(Song::from_document(doc, favorite_id))
  }

  pub async fn project_songs(&self, docs: &[Document], user_id: &UserId) -> Result<Vec<Song>, CoreError> {
    let projections: Vec<_> = docs.iter().map(|doc| self.project_song(doc, user_id)).collect();
    stream::iter(projections).buffered(self.fan_out).try_collect().await
  }

  // -------- CONSULTAS --------

  pub async fn list_songs(&self, user_id: &UserId) -> Result<Vec<Song>, CoreError> {
    let docs = self.store.scan(collections::SONGS).await?;
    self.project_songs(&docs, user_id).await
  }

  pub async fn songs_by_collection(
    &self,
    collection_id: &CollectionId,
    user_id: &UserId,
  ) -> Result<Vec<Song>, CoreError> {
    let filter = FieldFilter::eq(fields::COLLECTION_ID, collection_id.as_str());
    let docs = self.store.query(collections::SONGS, &[filter]).await?;
    self.project_songs(&docs, user_id).await
  }

  pub async fn songs_by_artist(&self, artist_id: &ArtistId, user_id: &UserId) -> Result<Vec<Song>, CoreError> {
    let filter = FieldFilter::eq(fields::ARTIST_ID, artist_id.as_str());
    let docs = self.store.query(collections::SONGS, &[filter]).await?;
    self.project_songs(&docs, user_id).await
  }

  /// Ficha de artista: el artista, sus colecciones y las canciones de cada una.
  ///
  /// Es el fan-out más profundo: una lectura del artista, una consulta de
  /// colecciones y una consulta de canciones por colección, más la búsqueda
  /// de favorito de cada canción. No hay paginación.
  ///
  /// Un artista inexistente se proyecta a partir de su id, sin más campos.
  pub async fn artist_detail(&self, artist_id: &ArtistId, user_id: &UserId) -> Result<ArtistDetail, CoreError> {
    let artist_doc = self
      .store
      .get(collections::ARTISTS, artist_id.as_str())
      .await?
      .unwrap_or_else(|| Document::stub(artist_id.as_str()));
    let artist = Artist::from_document(&artist_doc);

    let filter = FieldFilter::eq(fields::ARTIST_ID, artist_id.as_str());
    let collection_docs = self.store.query(collections::COLLECTIONS, &[filter]).await?;
    debug!(%artist_id, collections = collection_docs.len(), "loading artist collections");

    // Una colección tras otra; dentro de cada una, las canciones ya se
    // proyectan en paralelo hasta `fan_out`.
    let mut collections = Vec::with_capacity(collection_docs.len());
    for doc in &collection_docs {
      let collection = Collection::from_document(doc);
      let songs = self.songs_by_collection(&collection.id, user_id).await?;
      collections.push(CollectionSongs { collection, songs });
    }

    Ok(ArtistDetail { artist, collections })
  }

  /// Canciones marcadas por el usuario, en el orden de sus registros.
  ///
  /// Cada canción vuelve a pasar por la búsqueda de favorito, así que con
  /// registros duplicados `fav` puede apuntar a otro registro del mismo par.
  pub async fn favorite_songs(&self, user_id: &UserId) -> Result<Vec<Song>, CoreError> {
    let filter = FieldFilter::eq(fields::USER_ID, user_id.as_str());
    let favorites = self.store.query(collections::FAVORITES, &[filter]).await?;

    let projections: Vec<_> = favorites
      .iter()
      .map(|doc| async move {
        let favorite = Favorite::from_document(doc);
        let song_id = favorite.song_id.ok_or_else(|| CoreError::InvalidDocument {
          collection: collections::FAVORITES.to_owned(),
          id: favorite.id.into_string(),
          reason: format!("missing {}", fields::SONG_ID),
        })?;

        let song_doc = self
          .store
          .get(collections::SONGS, song_id.as_str())
          .await?
          .unwrap_or_else(|| Document::stub(song_id.as_str()));

        self.project_song(&song_doc, user_id).await
      })
      .collect();

    stream::iter(projections)
      .buffered(self.fan_out)
      .try_collect()
      .await
  }

  /// Búsqueda por subcadena del nombre, sin distinguir mayúsculas.
  ///
  /// Recorre las tres colecciones completas en cada llamada.
  pub async fn search(&self, subject: &str, user_id: &UserId) -> Result<SearchResults, CoreError> {
    let needle = subject.to_lowercase();

    let (song_docs, artist_docs, collection_docs) = try_join!(
      self.scan_matching(collections::SONGS, &needle),
      self.scan_matching(collections::ARTISTS, &needle),
      self.scan_matching(collections::COLLECTIONS, &needle),
    )?;
    debug!(
      subject,
      songs = song_docs.len(),
      artists = artist_docs.len(),
      collections = collection_docs.len(),
      "search matches"
    );

    Ok(SearchResults {
      songs: self.project_songs(&song_docs, user_id).await?,
      artists: artist_docs.iter().map(Artist::from_document).collect(),
      collections: collection_docs.iter().map(Collection::from_document).collect(),
    })
  }

  async fn scan_matching(&self, collection: &str, needle: &str) -> Result<Vec<Document>, CoreError> {
    let docs = self.store.scan(collection).await?;
    Ok(docs.into_iter().filter(|doc| name_contains(doc, needle)).collect())
  }
}

/// `needle` ya viene en minúsculas. Sin nombre de texto no hay coincidencia.
fn name_contains(doc: &Document, needle: &str) -> bool {
  doc.get_str(fields::NAME).is_some_and(|name| name.to_lowercase().contains(needle))
}
