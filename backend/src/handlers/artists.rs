use axum::extract::State;
use gamus_core::domain::{ArtistDetail, ArtistId, UserId};

use crate::params::{self, QueryParams};
use crate::response::{ApiResult, ok};
use crate::state::AppState;

/// `/getArtistById?userId=&id=`
///
/// Devuelve el artista con todas sus colecciones y, dentro de cada una, sus
/// canciones. Un id inexistente produce una ficha vacía con ese id.
pub async fn get_artist_by_id(State(state): State<AppState>, params: QueryParams) -> ApiResult<ArtistDetail> {
  let user_id = UserId::new(params.require(params::USER_ID)?);
  let artist_id = ArtistId::new(params.require(params::ARTIST_ID)?);

  ok(state.catalog.artist_detail(&artist_id, &user_id).await?)
}
