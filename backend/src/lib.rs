//! Servidor HTTP del catálogo de música.
//!
//! Cada endpoint lee sus parámetros de la query string, acepta cualquier
//! método HTTP y responde `{"status": 200, "data": ...}` o un 500 con el
//! error en texto plano.

pub mod config;
pub mod error;
pub mod handlers;
mod infrastructure;
pub mod params;
pub mod response;
pub mod state;

use axum::Router;
use axum::routing::{any, get};
use gamus_storage::SqliteDocumentStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::{LogConfig, ServerConfig};
use crate::handlers::{artists, favorites, health, search, songs};
pub use crate::state::AppState;

pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/getAllSongs", any(songs::get_all_songs))
    .route("/search", any(search::search))
    .route("/getSongsByCollectionId", any(songs::get_songs_by_collection))
    .route("/getArtistById", any(artists::get_artist_by_id))
    .route("/heartSong", any(favorites::heart_song))
    .route("/unheartSong", any(favorites::unheart_song))
    .route("/getSongsByArtist", any(songs::get_songs_by_artist))
    .route("/getHeartedSongs", any(favorites::get_hearted_songs))
    .route("/health", get(health::health))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
  let log = LogConfig::load()?;
  infrastructure::telemetry::init(&log.filter)?;

  let server = ServerConfig::load()?;

  // --- Dependency Injection ---
  let store = SqliteDocumentStore::new_from_config()?;
  let app = router(AppState::new(store));

  let listener = TcpListener::bind(&server.bind_addr).await?;
  tracing::info!(addr = %listener.local_addr()?, "catalog server listening");

  axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

  tracing::info!("catalog server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(err) = tokio::signal::ctrl_c().await {
    tracing::warn!(error = %err, "failed to listen for ctrl-c");
  }
}
