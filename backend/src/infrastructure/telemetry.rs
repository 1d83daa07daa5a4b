use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Instala el subscriber global de `tracing`.
///
/// El filtro sale de `RUST_LOG` y, si no está, del que venga de la config.
pub fn init(default_filter: &str) -> anyhow::Result<()> {
  let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;

  tracing_subscriber::registry().with(filter).with(fmt::layer().with_target(false)).try_init()?;

  Ok(())
}
