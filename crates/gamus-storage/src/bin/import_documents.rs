//! Carga un volcado JSON del catálogo en la base SQLite.
//!
//! Formato: `{"Music": [{"id": "...", "Name": "..."}], "Artists": [...]}`.
//! Los documentos con `id` se reemplazan si ya existían; los que no lo
//! traen reciben uno nuevo.
//!
//! Uso: `import_documents catalog.json`. La base sale de `DATABASE_URL`
//! (también desde `.env`) o, si no está, de la sección `[storage]`.

use std::collections::BTreeMap;

use anyhow::{Context, bail};
use gamus_core::document::{Document, Fields};
use gamus_core::ports::DocumentStore;
use gamus_storage::{SqliteDocumentStore, StorageConfig};
use serde_json::Value;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  let Some(path) = std::env::args().nth(1) else {
    bail!("usage: import_documents <catalog.json>");
  };

  let store = match std::env::var("DATABASE_URL") {
    Ok(url) => SqliteDocumentStore::open(&url, Some("WAL".to_string()), 1)?,
    Err(_) => {
      let cfg = StorageConfig::load()?;
      SqliteDocumentStore::open(&cfg.database_url(), cfg.journal_mode, 1)?
    }
  };

  let raw = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
  let dump: BTreeMap<String, Vec<Fields>> =
    serde_json::from_str(&raw).with_context(|| format!("parsing {path}"))?;

  for (collection, docs) in dump {
    let total = docs.len();
    for mut fields in docs {
      match fields.remove("id") {
        Some(Value::String(id)) => store.upsert(&collection, Document::new(id, fields)).await?,
        Some(other) => bail!("{collection}: document id must be a string, got {other}"),
        None => {
          store.insert(&collection, fields).await?;
        }
      }
    }
    println!("{collection}: {total} documents imported ({} stored)", store.count(&collection).await?);
  }

  Ok(())
}
