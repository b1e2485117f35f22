//! Tracing subscriber setup.
use anyhow::{anyhow, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, Settings};

/// Filter directives: `RUST_LOG` when set, otherwise the configured level
/// with `tower_http` request spans at the same level.
pub fn env_filter(settings: &Settings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = settings.log_level.to_ascii_lowercase();
        EnvFilter::new(format!("{level},tower_http={level}"))
    })
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_tracing(settings: &Settings) -> Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(settings));

    match settings.log_format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    }
    .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscriber_installs_once() {
        let settings = Settings {
            log_format: LogFormat::Json,
            ..Settings::default()
        };
        assert!(init_tracing(&settings).is_ok());
        assert!(init_tracing(&settings).is_err());
    }
}
