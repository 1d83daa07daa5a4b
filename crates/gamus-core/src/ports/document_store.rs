use async_trait::async_trait;

use crate::document::{Document, Fields};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("connection error: {0}")]
  Connection(String),

  #[error("query error: {0}")]
  Query(String),

  #[error("malformed document {collection}/{id}: {reason}")]
  Malformed { collection: String, id: String, reason: String },

  #[error("internal error: {0}")]
  Internal(String),
}

/// Filtro de igualdad sobre un campo de texto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldFilter<'a> {
  pub field: &'a str,
  pub value: &'a str,
}

impl<'a> FieldFilter<'a> {
  pub fn eq(field: &'a str, value: &'a str) -> Self {
    Self { field, value }
  }

  pub fn matches(&self, doc: &Document) -> bool {
    doc.get_str(self.field) == Some(self.value)
  }
}

/// Port del almacén de documentos.
///
/// Es todo lo que el catálogo necesita de la base de datos: recorrer una
/// colección entera, filtrar por igualdad de campos, buscar por id, insertar
/// y borrar. No hay joins; el orden de los resultados lo decide el adapter.
///
/// Las implementaciones se comparten entre peticiones concurrentes, por eso
/// se exige `Send + Sync`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
  async fn scan(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

  /// Documentos que cumplen todos los filtros a la vez.
  async fn query(&self, collection: &str, filters: &[FieldFilter<'_>]) -> Result<Vec<Document>, StoreError>;

  async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

  /// Inserta un documento nuevo y devuelve el id que le asignó el almacén.
  async fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

  /// Borra por id. Borrar algo que no existe no es un error.
  async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
pub(crate) mod memory {
  use std::collections::BTreeMap;
  use std::sync::Mutex;
  use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

  use super::*;

  /// Almacén en memoria para los tests del núcleo.
  ///
  /// Conserva el orden de inserción y cuenta las consultas para poder
  /// comprobar el fan-out. Las lecturas ceden el turno una vez, así que las
  /// que se lanzan a la vez llegan a solaparse y `peak_in_flight` lo registra.
  #[derive(Default)]
  pub(crate) struct MemoryStore {
    collections: Mutex<BTreeMap<String, Vec<Document>>>,
    next_id: AtomicUsize,
    queries: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    failing: AtomicBool,
  }

  impl MemoryStore {
    pub(crate) fn with(mut self, collection: &str, docs: Vec<Document>) -> Self {
      self.collections.get_mut().unwrap().entry(collection.to_owned()).or_default().extend(docs);
      self
    }

    pub(crate) fn fail_from_now_on(&self) {
      self.failing.store(true, Ordering::SeqCst);
    }

    pub(crate) fn query_count(&self) -> usize {
      self.queries.load(Ordering::SeqCst)
    }

    /// Máximo de lecturas simultáneas observado.
    pub(crate) fn peak_in_flight(&self) -> usize {
      self.peak.load(Ordering::SeqCst)
    }

    pub(crate) fn docs(&self, collection: &str) -> Vec<Document> {
      self.collections.lock().unwrap().get(collection).cloned().unwrap_or_default()
    }

    fn check(&self) -> Result<(), StoreError> {
      self.queries.fetch_add(1, Ordering::SeqCst);
      if self.failing.load(Ordering::SeqCst) {
        return Err(StoreError::Connection("store unavailable".into()));
      }
      Ok(())
    }

    async fn read<T>(&self, f: impl FnOnce() -> T) -> T {
      let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
      self.peak.fetch_max(now, Ordering::SeqCst);
      tokio::task::yield_now().await;
      let out = f();
      self.in_flight.fetch_sub(1, Ordering::SeqCst);
      out
    }
  }

  #[async_trait]
  impl DocumentStore for MemoryStore {
    async fn scan(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
      self.check()?;
      Ok(self.read(|| self.docs(collection)).await)
    }

    async fn query(&self, collection: &str, filters: &[FieldFilter<'_>]) -> Result<Vec<Document>, StoreError> {
      self.check()?;
      Ok(self.read(|| self.docs(collection).into_iter().filter(|d| filters.iter().all(|f| f.matches(d))).collect()).await)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
      self.check()?;
      Ok(self.read(|| self.docs(collection).into_iter().find(|d| d.id == id)).await)
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
      self.check()?;
      let id = format!("mem-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
      let mut map = self.collections.lock().unwrap();
      map.entry(collection.to_owned()).or_default().push(Document::new(id.as_str(), fields));
      Ok(id)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
      self.check()?;
      if let Some(docs) = self.collections.lock().unwrap().get_mut(collection) {
        docs.retain(|d| d.id != id);
      }
      Ok(())
    }
  }
}
