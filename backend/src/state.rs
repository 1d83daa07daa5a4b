use std::sync::Arc;

use gamus_core::services::CatalogService;
use gamus_storage::SqliteDocumentStore;

/// Servicio concreto que usa el servidor.
pub type ConcreteCatalogService = CatalogService<SqliteDocumentStore>;

/// Estado compartido por todos los handlers.
#[derive(Clone)]
pub struct AppState {
  pub catalog: Arc<ConcreteCatalogService>,
}

impl AppState {
  /// Cada petición lanza como mucho tantas lecturas a la vez como
  /// conexiones tenga el pool del almacén.
  pub fn new(store: SqliteDocumentStore) -> Self {
    let fan_out = store.max_connections() as usize;
    Self { catalog: Arc::new(CatalogService::new(store).with_fan_out(fan_out)) }
  }
}
