use axum::extract::State;
use gamus_core::domain::{ArtistId, CollectionId, Song, UserId};

use crate::params::{self, QueryParams};
use crate::response::{ApiResult, ok};
use crate::state::AppState;

/// `/getAllSongs?userId=`
pub async fn get_all_songs(State(state): State<AppState>, params: QueryParams) -> ApiResult<Vec<Song>> {
  let user_id = UserId::new(params.require(params::USER_ID)?);

  ok(state.catalog.list_songs(&user_id).await?)
}

/// `/getSongsByCollectionId?userId=&collection=`
pub async fn get_songs_by_collection(
  State(state): State<AppState>,
  params: QueryParams,
) -> ApiResult<Vec<Song>> {
  let user_id = UserId::new(params.require(params::USER_ID)?);
  let collection_id = CollectionId::new(params.require(params::COLLECTION)?);

  ok(state.catalog.songs_by_collection(&collection_id, &user_id).await?)
}

/// `/getSongsByArtist?userId=&id=`
pub async fn get_songs_by_artist(State(state): State<AppState>, params: QueryParams) -> ApiResult<Vec<Song>> {
  let user_id = UserId::new(params.require(params::USER_ID)?);
  let artist_id = ArtistId::new(params.require(params::ARTIST_ID)?);

  ok(state.catalog.songs_by_artist(&artist_id, &user_id).await?)
}
