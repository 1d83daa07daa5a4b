mod backend;
mod io;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use io::atomic_write_str;
pub use paths::{ConfigError, GamusPaths};

use once_cell::sync::OnceCell;

static PATHS: OnceCell<GamusPaths> = OnceCell::new();
static CONFIG_BACKEND: OnceCell<TomlConfigBackend> = OnceCell::new();

/// Paths de la instalación (portable con `GAMUS_BASE_DIR` o del sistema).
///
/// Se resuelven una sola vez; si falla, el siguiente intento vuelve a probar.
pub fn paths() -> Result<&'static GamusPaths, ConfigError> {
  PATHS.get_or_try_init(GamusPaths::detect)
}

/// Backend de configuración sobre `gamus.toml`, compartido por todas las secciones.
pub fn config_backend() -> Result<&'static TomlConfigBackend, ConfigError> {
  CONFIG_BACKEND.get_or_try_init(|| paths().map(|p| TomlConfigBackend::new(p.clone())))
}
