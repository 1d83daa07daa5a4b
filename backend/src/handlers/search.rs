use axum::extract::State;
use gamus_core::domain::{SearchResults, UserId};

use crate::params::{self, QueryParams};
use crate::response::{ApiResult, ok};
use crate::state::AppState;

/// `/search?userId=&subject=`
pub async fn search(State(state): State<AppState>, params: QueryParams) -> ApiResult<SearchResults> {
  let user_id = UserId::new(params.require(params::USER_ID)?);
  let subject = params.require(params::SUBJECT)?;

  ok(state.catalog.search(&subject, &user_id).await?)
}
