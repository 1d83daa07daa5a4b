pub mod config;
pub mod models;
pub mod schema;

use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError};
use diesel::sql_types::Text;
use diesel::sqlite::{Sqlite, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use gamus_config::ConfigError;
use gamus_core::document::{Document, Fields};
use gamus_core::ports::{DocumentStore, FieldFilter, StoreError};

pub use crate::config::StorageConfig;
use crate::models::{DocumentRow, NewDocumentRow};
use crate::schema::documents;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

#[derive(Debug, Error)]
pub enum StorageError {
  #[error("database error: {0}")]
  Database(#[from] diesel::result::Error),

  #[error("pool error: {0}")]
  Pool(#[from] PoolError),

  #[error("migration error: {0}")]
  Migration(String),

  #[error("invalid field name: {0:?}")]
  InvalidField(String),

  #[error("invalid document body {collection}/{id}: {source}")]
  Body {
    collection: String,
    id: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("blocking task failed: {0}")]
  Join(#[from] tokio::task::JoinError),

  #[error("config error: {0}")]
  Config(#[from] ConfigError),
}

impl From<StorageError> for StoreError {
  fn from(err: StorageError) -> Self {
    match err {
      StorageError::Database(e) => StoreError::Query(e.to_string()),
      StorageError::Pool(e) => StoreError::Connection(e.to_string()),
      StorageError::Body { collection, id, source } => {
        StoreError::Malformed { collection, id, reason: source.to_string() }
      }
      other => StoreError::Internal(other.to_string()),
    }
  }
}

/// PRAGMAs que se aplican a cada conexión nueva del pool.
#[derive(Debug)]
struct ConnectionOptions {
  journal_mode: Option<String>,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
  fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
    if let Some(mode) = &self.journal_mode {
      conn.batch_execute(&format!("PRAGMA journal_mode = {mode};")).map_err(diesel::r2d2::Error::QueryError)?;
    }
    conn.batch_execute("PRAGMA busy_timeout = 5000;").map_err(diesel::r2d2::Error::QueryError)
  }
}

/// Almacén de documentos sobre SQLite.
///
/// Cada documento es una fila `(collection, id, body)` con los campos en JSON.
/// Los filtros de igualdad se resuelven en SQLite con `json_extract`; el
/// orden de resultados es el de inserción.
///
/// Diesel es bloqueante, así que cada operación toma una conexión del pool
/// dentro de `spawn_blocking`.
#[derive(Clone)]
pub struct SqliteDocumentStore {
  pool: DbPool,
}

impl SqliteDocumentStore {
  pub fn open(database_url: &str, journal_mode: Option<String>, pool_size: u32) -> Result<Self, StorageError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
      .max_size(pool_size.max(1))
      .connection_customizer(Box::new(ConnectionOptions { journal_mode }))
      .build(manager)?;

    Self::from_pool(pool)
  }

  /// Conecta con la base definida en la sección `[storage]` de la config.
  pub fn new_from_config() -> Result<Self, StorageError> {
    let cfg = StorageConfig::load()?;
    info!(db_path = %cfg.db_path.display(), pool_size = cfg.pool_size, "opening document store");
    Self::open(&cfg.database_url(), cfg.journal_mode, cfg.pool_size)
  }

  /// Base en memoria para tests.
  ///
  /// Cada conexión a `:memory:` es una base distinta, así que el pool se
  /// limita a una conexión que nunca se recicla.
  pub fn in_memory() -> Result<Self, StorageError> {
    let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
    let pool = Pool::builder().max_size(1).idle_timeout(None).max_lifetime(None).build(manager)?;

    Self::from_pool(pool)
  }

  fn from_pool(pool: DbPool) -> Result<Self, StorageError> {
    {
      let mut conn = pool.get()?;
      conn.run_pending_migrations(MIGRATIONS).map_err(|e| StorageError::Migration(e.to_string()))?;
    }
    Ok(Self { pool })
  }

  /// Conexiones que el pool puede tener abiertas a la vez.
  ///
  /// Es el techo útil de lecturas simultáneas: por encima de él, las
  /// operaciones esperan conexión bloqueando un hilo cada una.
  pub fn max_connections(&self) -> u32 {
    self.pool.max_size()
  }

  async fn run<T, F>(&self, f: F) -> Result<T, StorageError>
  where
    F: FnOnce(&mut SqliteConnection) -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
  {
    let pool = self.pool.clone();
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      f(&mut conn)
    })
    .await?
  }

  /// Inserta o reemplaza un documento conservando su id.
  ///
  /// Lo usa la importación de volcados; la API sólo inserta con ids nuevos.
  pub async fn upsert(&self, collection: &str, doc: Document) -> Result<(), StorageError> {
    let collection = collection.to_owned();
    self
      .run(move |conn| {
        let body = encode_body(&collection, &doc)?;
        let row = NewDocumentRow { collection: &collection, id: &doc.id, body };

        diesel::insert_into(documents::table)
          .values(&row)
          .on_conflict((documents::collection, documents::id))
          .do_update()
          .set(documents::body.eq(&row.body))
          .execute(conn)?;
        Ok(())
      })
      .await
  }

  pub async fn count(&self, collection: &str) -> Result<i64, StorageError> {
    let collection = collection.to_owned();
    self
      .run(move |conn| {
        Ok(documents::table.filter(documents::collection.eq(&collection)).count().get_result::<i64>(conn)?)
      })
      .await
  }
}

fn encode_body(collection: &str, doc: &Document) -> Result<String, StorageError> {
  serde_json::to_string(&doc.fields).map_err(|source| StorageError::Body {
    collection: collection.to_owned(),
    id: doc.id.clone(),
    source,
  })
}

fn decode_row(row: DocumentRow) -> Result<Document, StorageError> {
  match serde_json::from_str::<Fields>(&row.body) {
    Ok(fields) => Ok(Document::new(row.id, fields)),
    Err(source) => Err(StorageError::Body { collection: row.collection, id: row.id, source }),
  }
}

fn decode_rows(rows: Vec<DocumentRow>) -> Result<Vec<Document>, StorageError> {
  rows.into_iter().map(decode_row).collect()
}

/// Los nombres de campo van dentro de la ruta JSON, no como parámetro.
fn json_path(field: &str) -> Result<String, StorageError> {
  if field.is_empty() || field.contains(['"', '\'', '\\']) {
    return Err(StorageError::InvalidField(field.to_owned()));
  }
  Ok(format!("'$.\"{field}\"'"))
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
  async fn scan(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
    let name = collection.to_owned();
    let docs = self
      .run(move |conn| {
        let rows = documents::table
          .filter(documents::collection.eq(&name))
          .order(documents::seq.asc())
          .select(DocumentRow::as_select())
          .load(conn)?;
        decode_rows(rows)
      })
      .await?;

    debug!(collection, found = docs.len(), "scan");
    Ok(docs)
  }

  async fn query(&self, collection: &str, filters: &[FieldFilter<'_>]) -> Result<Vec<Document>, StoreError> {
    let mut sql = String::from("SELECT id, collection, body FROM documents WHERE collection = ?");
    let mut values = Vec::with_capacity(filters.len());
    for filter in filters {
      sql.push_str(&format!(" AND json_extract(body, {}) = ?", json_path(filter.field)?));
      values.push(filter.value.to_owned());
    }
    sql.push_str(" ORDER BY seq");

    let name = collection.to_owned();
    let docs = self
      .run(move |conn| {
        let mut query = diesel::sql_query(sql).into_boxed::<Sqlite>().bind::<Text, _>(name);
        for value in values {
          query = query.bind::<Text, _>(value);
        }
        decode_rows(query.load::<DocumentRow>(conn)?)
      })
      .await?;

    debug!(collection, filters = ?filters, found = docs.len(), "query");
    Ok(docs)
  }

  async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
    let (name, key) = (collection.to_owned(), id.to_owned());
    let doc = self
      .run(move |conn| {
        let row = documents::table
          .filter(documents::collection.eq(&name))
          .filter(documents::id.eq(&key))
          .select(DocumentRow::as_select())
          .first(conn)
          .optional()?;
        row.map(decode_row).transpose()
      })
      .await?;

    debug!(collection, id, found = doc.is_some(), "get");
    Ok(doc)
  }

  async fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
    let name = collection.to_owned();
    let doc = Document::new(Uuid::new_v4().simple().to_string(), fields);

    let id = self
      .run(move |conn| {
        let body = encode_body(&name, &doc)?;
        let row = NewDocumentRow { collection: &name, id: &doc.id, body };

        Ok(diesel::insert_into(documents::table).values(&row).returning(documents::id).get_result::<String>(conn)?)
      })
      .await?;

    debug!(collection, %id, "insert");
    Ok(id)
  }

  async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
    let (name, key) = (collection.to_owned(), id.to_owned());
    let deleted = self
      .run(move |conn| {
        let target = documents::table.filter(documents::collection.eq(&name)).filter(documents::id.eq(&key));
        Ok(diesel::delete(target).execute(conn)?)
      })
      .await?;

    debug!(collection, id, deleted, "delete");
    Ok(())
  }
}
