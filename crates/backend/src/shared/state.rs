use std::sync::Arc;

use super::config::Config;
use super::marketplaces::CatalogClient;

/// Общее неизменяемое состояние HTTP-сервера
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<dyn CatalogClient>,
}

impl AppState {
    pub fn new(config: Config, catalog: Arc<dyn CatalogClient>) -> Self {
        Self {
            config: Arc::new(config),
            catalog,
        }
    }
}
