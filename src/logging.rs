//! Tracing subscriber setup
//!
//! `RUST_LOG` wins over the configured level. Output goes to stderr so that `--json`
//! output on stdout stays machine-readable.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::{PackwiseError, Result};

pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("packwise={}", config.level)))
        .map_err(|e| PackwiseError::config(format!("Invalid log filter: {e}")))?;

    let json = config.format == "json";
    let json_layer = json.then(|| fmt::layer().json().with_writer(std::io::stderr));
    let pretty_layer = (!json).then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(pretty_layer)
        .try_init()
        .map_err(|e| PackwiseError::config(format!("Logging already initialized: {e}")))
}
