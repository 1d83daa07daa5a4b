use gamus_config::{ConfigBackend, ConfigError, config_backend, paths};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StorageConfig {
  #[serde(default = "default_db_path")]
  pub db_path: PathBuf,
  pub journal_mode: Option<String>,
  /// Conexiones simultáneas a SQLite.
  #[serde(default = "default_pool_size")]
  pub pool_size: u32,
}

fn default_pool_size() -> u32 {
  8
}

/// `<data_dir>/gamus.db`; sin paths resolubles, relativo al directorio actual.
fn default_db_path() -> PathBuf {
  paths().map(|p| p.data_dir.join("gamus.db")).unwrap_or_else(|_| PathBuf::from("gamus.db"))
}

impl Default for StorageConfig {
  fn default() -> Self {
    StorageConfig {
      db_path: default_db_path(),
      journal_mode: Some("WAL".to_string()),
      pool_size: default_pool_size(),
    }
  }
}

impl StorageConfig {
  pub fn load() -> Result<Self, ConfigError> {
    config_backend()?.load_or_init_section("storage")
  }

  /// Variante para tests: inyectar un backend distinto.
  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    backend.load_section("storage")
  }

  pub fn save(&self) -> Result<(), ConfigError> {
    config_backend()?.save_section("storage", self)
  }

  pub fn database_url(&self) -> String {
    self.db_path.to_string_lossy().into_owned()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use gamus_config::{GamusPaths, TomlConfigBackend};
  use tempfile::tempdir;

  #[test]
  fn pool_size_defaults_when_missing_from_file() {
    let tmp = tempdir().unwrap();
    let backend = TomlConfigBackend::new(GamusPaths::from_base(tmp.path().to_path_buf()).unwrap());
    std::fs::write(backend.paths().config_file(), "[storage]\ndb_path = \"/tmp/x.db\"\n").unwrap();

    let cfg = StorageConfig::load_from(&backend).unwrap();

    assert_eq!(cfg.db_path, PathBuf::from("/tmp/x.db"));
    assert_eq!(cfg.journal_mode, None);
    assert_eq!(cfg.pool_size, 8);
    assert_eq!(cfg.database_url(), "/tmp/x.db");
  }

  #[test]
  fn db_path_defaults_when_missing_from_file() {
    let tmp = tempdir().unwrap();
    let backend = TomlConfigBackend::new(GamusPaths::from_base(tmp.path().to_path_buf()).unwrap());
    std::fs::write(backend.paths().config_file(), "[storage]\npool_size = 2\n").unwrap();

    let cfg = StorageConfig::load_from(&backend).unwrap();

    assert_eq!(cfg.db_path, default_db_path());
    assert_eq!(cfg.pool_size, 2);
  }
}
