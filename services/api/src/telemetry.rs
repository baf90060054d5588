use std::fmt;

use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

/// Install the global tracing subscriber. `RUST_LOG` wins over the configured
/// level so operators can override verbosity without editing the environment
/// file.
pub(crate) fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::EnvFilter {
            value: config.log_level.clone(),
            source,
        })
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(|_| TelemetryError::Subscriber)?;

    Ok(())
}

#[derive(Debug)]
pub(crate) enum TelemetryError {
    EnvFilter {
        value: String,
        source: tracing_subscriber::filter::ParseError,
    },
    Subscriber,
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(f, "invalid log filter {value:?}")
            }
            TelemetryError::Subscriber => write!(f, "a global tracing subscriber is already set"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber => None,
        }
    }
}
