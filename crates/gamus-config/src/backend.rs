use crate::io::atomic_write_str;
use crate::paths::{ConfigError, GamusPaths};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;

// toml_edit para escribir preservando comentarios del usuario
use toml_edit::{DocumentMut, Item};

pub trait ConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError>;
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;
}

#[derive(Debug, Clone)]
pub struct TomlConfigBackend {
  paths: GamusPaths,
}

impl TomlConfigBackend {
  pub fn new(paths: GamusPaths) -> Self {
    Self { paths }
  }

  pub fn paths(&self) -> &GamusPaths {
    &self.paths
  }

  pub fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    let path = self.paths.config_file();
    let content = match fs::read_to_string(&path) {
      Ok(c) => c,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        return Ok(T::default());
      }
      Err(e) => return Err(e.into()),
    };

    let toml_val: toml::Value = toml::from_str(&content)?;

    let Some(table) = toml_val.get(section) else {
      return Ok(T::default());
    };

    table.clone().try_into().map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
  }

  /// Carga la sección (o sus valores por defecto) y la vuelve a escribir.
  ///
  /// Así `gamus.toml` siempre muestra todas las opciones que existen, aunque
  /// el usuario no las haya tocado nunca.
  pub fn load_or_init_section<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Serialize + Default,
  {
    let cfg = self.load_section_with_default(section)?;
    self.save_section(section, &cfg)?;
    Ok(cfg)
  }
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
    let path = self.paths.config_file();
    let content = fs::read_to_string(&path)?;
    let toml_val: toml::Value = toml::from_str(&content)?;

    let table = toml_val
      .get(section)
      .ok_or_else(|| ConfigError::Other(format!("missing section [{section}] in {:?}", path)))?;

    table.clone().try_into().map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
  }

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    let path = self.paths.config_file();

    // 1) Leer config actual como DocumentMut o crear doc vacío si no existe.
    let mut doc: DocumentMut = match fs::read_to_string(&path) {
      Ok(content) => {
        content.parse::<DocumentMut>().map_err(|e| ConfigError::Other(format!("parse toml_edit doc: {e}")))?
      }
      Err(e) if e.kind() == ErrorKind::NotFound => DocumentMut::new(),
      Err(e) => return Err(e.into()),
    };

    // 2) Serializar la sección con `toml` normal y re-parsearla como tabla.
    let section_str =
      toml::to_string(value).map_err(|e| ConfigError::Other(format!("encode section [{section}]: {e}")))?;

    let section_item: Item = section_str
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse section as doc: {e}")))?
      .into_item();

    // 3) Reemplazar sólo esa sección; el resto del documento queda intacto.
    doc[section] = section_item;

    atomic_write_str(&path, &doc.to_string())?;

    Ok(())
  }
}
