use gamus_config::{ConfigError, config_backend};
use serde::{Deserialize, Serialize};

/// Sección `[server]` de `gamus.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
  /// Dirección de escucha, `host:puerto`.
  #[serde(default = "default_bind_addr")]
  pub bind_addr: String,
}

fn default_bind_addr() -> String {
  "127.0.0.1:5001".to_string()
}

impl Default for ServerConfig {
  fn default() -> Self {
    ServerConfig { bind_addr: default_bind_addr() }
  }
}

impl ServerConfig {
  pub fn load() -> Result<Self, ConfigError> {
    config_backend()?.load_or_init_section("server")
  }
}

/// Sección `[log]`. `RUST_LOG`, si está definida, tiene prioridad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
  #[serde(default = "default_filter")]
  pub filter: String,
}

fn default_filter() -> String {
  "info".to_string()
}

impl Default for LogConfig {
  fn default() -> Self {
    LogConfig { filter: default_filter() }
  }
}

impl LogConfig {
  pub fn load() -> Result<Self, ConfigError> {
    config_backend()?.load_or_init_section("log")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use gamus_config::{GamusPaths, TomlConfigBackend};
  use tempfile::tempdir;

  #[test]
  fn partial_sections_fill_in_defaults() {
    let tmp = tempdir().unwrap();
    let backend = TomlConfigBackend::new(GamusPaths::from_base(tmp.path().to_path_buf()).unwrap());
    std::fs::write(backend.paths().config_file(), "[server]\n\n[log]\nfilter = \"gamus=debug\"\n").unwrap();

    let server: ServerConfig = backend.load_section_with_default("server").unwrap();
    let log: LogConfig = backend.load_section_with_default("log").unwrap();

    assert_eq!(server, ServerConfig::default());
    assert_eq!(log.filter, "gamus=debug");
  }
}
