use anyhow::Result;
use prometheus::Registry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogFormat;
use crate::metrics;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "tour_api=debug";

pub struct Observability {
    pub registry: Registry,
}

impl Observability {
    /// Build the metrics registry and install the global tracing subscriber
    pub fn init(log_format: LogFormat) -> Result<Self> {
        let registry = new_registry()?;

        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

        let subscriber = tracing_subscriber::registry().with(env_filter);
        match log_format {
            LogFormat::Json => subscriber
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?,
            LogFormat::Pretty => subscriber
                .with(tracing_subscriber::fmt::layer())
                .try_init()?,
        }

        tracing::info!(?log_format, "Observability stack initialized (Prometheus + tracing)");
        Ok(Self { registry })
    }
}

/// Registry with every application metric registered under the `tourbook` prefix
pub fn new_registry() -> Result<Registry> {
    let registry = Registry::new_custom(Some("tourbook".into()), None)?;
    metrics::register_all(&registry)?;
    Ok(registry)
}
