use axum::extract::State;
use gamus_core::domain::{FavoriteId, Song, SongId, UserId};

use crate::params::{self, QueryParams};
use crate::response::{ApiResult, ok};
use crate::state::AppState;

/// `/heartSong?userId=&songId=`
///
/// Crea siempre un registro nuevo, aunque ya exista uno para el mismo par.
pub async fn heart_song(State(state): State<AppState>, params: QueryParams) -> ApiResult<bool> {
  let user_id = UserId::new(params.require(params::USER_ID)?);
  let song_id = SongId::new(params.require(params::SONG_ID)?);

  state.catalog.heart_song(&user_id, &song_id).await?;

  ok(true)
}

/// `/unheartSong?id=`, donde `id` es el del registro de favorito.
pub async fn unheart_song(State(state): State<AppState>, params: QueryParams) -> ApiResult<bool> {
  let favorite_id = FavoriteId::new(params.require(params::FAVORITE_ID)?);

  state.catalog.unheart_song(&favorite_id).await?;

  ok(true)
}

/// `/getHeartedSongs?userId=`
pub async fn get_hearted_songs(State(state): State<AppState>, params: QueryParams) -> ApiResult<Vec<Song>> {
  let user_id = UserId::new(params.require(params::USER_ID)?);

  ok(state.catalog.favorite_songs(&user_id).await?)
}
