use prometheus::Registry;
use std::sync::Arc;
use std::time::Instant;

use crate::config::ApiConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub started_at: Instant,
    pub config: Arc<ApiConfig>,
    pub registry: Registry,
}

impl AppState {
    pub fn new(config: ApiConfig, registry: Registry) -> Self {
        Self {
            started_at: Instant::now(),
            config: Arc::new(config),
            registry,
        }
    }
}
