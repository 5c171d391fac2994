pub mod admin;
pub mod api;
pub mod carousel;
pub mod config;
pub mod engine;
pub mod logging;
pub mod mock_store;
pub mod model;
pub mod store;

use std::sync::Arc;

use crate::admin::metadata::MetadataClient;
use crate::admin::push::PushGateway;
use crate::config::config_manager::ConfigManager;
use crate::store::client::DocumentStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ConfigManager>,
    pub store: Arc<dyn DocumentStore>,
    pub metadata: Arc<MetadataClient>,
    pub push: Arc<PushGateway>,
}
