//! Tracing initialisation shared by the classifier binaries.
//!
//! Logs go to stderr so stdout stays machine-readable.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over `level`; repeated calls are ignored.
pub fn init_tracing(json: bool, level: Level) {
  let env_filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

  if json {
    tracing_subscriber::registry()
      .with(env_filter)
      .with(fmt::layer().with_target(false).with_writer(std::io::stderr).json())
      .try_init()
      .ok();
  } else {
    tracing_subscriber::registry()
      .with(env_filter)
      .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
      .try_init()
      .ok();
  }
}
