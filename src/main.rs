// src/main.rs

use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tokio::time::{sleep, Duration};
use tracing::info;

use streamads::admin::metadata::MetadataClient;
use streamads::admin::push::PushGateway;
use streamads::api;
use streamads::config::adapters::{FileSeedAdapter, SeedAdapter};
use streamads::config::config_manager::{ConfigManager, Settings};
use streamads::logging;
use streamads::mock_store;
use streamads::store::client::{DocumentStore, HttpDocumentStore};
use streamads::AppState;

#[derive(Parser, Debug)]
#[command(version = "1.0", about = "Ad placement & sequencing server for the streaming site")]
struct CliArgs {
    #[arg(short, long, default_value_t = 8080)]
    port: u16,
    #[arg(long, default_value = "logs")]
    log_dir: String,
    /// Port for the embedded mock document store.
    #[arg(long, default_value_t = 9001)]
    store_port: u16,
    #[arg(long, default_value = "static/seed_ads.json")]
    seed_ads: String,
    #[arg(long, default_value = "static/seed_featured.json")]
    seed_featured: String,
    /// Global ad kill switch.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    ads_enabled: bool,
    #[arg(long, default_value_t = 5500)]
    auto_slide_interval_ms: u64,
    #[arg(long, default_value = "https://api.themoviedb.org/3")]
    metadata_url: String,
    #[arg(long, default_value = "")]
    metadata_api_key: String,
    #[arg(long, default_value = "")]
    push_endpoint: String,
    #[arg(long, default_value = "")]
    push_token: String,
}

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let _log_guard = logging::init(&args.log_dir);
    info!("streamads server starting on port {}", args.port);

    // Embedded stand-in for the external document store.
    let seeds = FileSeedAdapter::new(&args.seed_ads, &args.seed_featured);
    let mock_store_server = tokio::spawn({
        let seed_ads = seeds.seed_ads();
        let seed_featured = seeds.seed_featured();
        let store_port = args.store_port;
        async move {
            mock_store::start_mock_store_server(store_port, seed_ads, seed_featured).await;
        }
    });

    let settings = Settings {
        ads_enabled: args.ads_enabled,
        auto_slide_interval_ms: args.auto_slide_interval_ms,
        store_url: format!("http://127.0.0.1:{}", args.store_port),
        metadata_base_url: args.metadata_url.clone(),
        metadata_api_key: args.metadata_api_key.clone(),
        push_endpoint: args.push_endpoint.clone(),
        push_token: args.push_token.clone(),
    };

    let store: Arc<dyn DocumentStore> = Arc::new(HttpDocumentStore::new(&settings.store_url));
    let metadata = Arc::new(MetadataClient::new(
        &settings.metadata_base_url,
        &settings.metadata_api_key,
    ));
    let push = Arc::new(PushGateway::new(&settings.push_endpoint, &settings.push_token));
    let config = Arc::new(ConfigManager::new(settings));

    // Let the mock store bind before the initial fetch.
    sleep(Duration::from_millis(200)).await;
    let snapshot = store.refresh().await;
    info!(
        "catalog loaded: {} ads, {} featured items",
        snapshot.ads.len(),
        snapshot.featured.len()
    );
    config.update_catalog(snapshot.ads, snapshot.featured);

    let state = Arc::new(AppState {
        config,
        store,
        metadata,
        push,
    });

    let ad_server = tokio::spawn({
        let state = state.clone();
        let port = args.port;
        async move {
            let app = api::router(state);
            let addr = format!("0.0.0.0:{}", port);
            info!("ad server running at http://{}", addr);
            let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
            axum::serve(listener, app).await.unwrap();
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down gracefully...");
        }
    }

    ad_server.abort();
    mock_store_server.abort();
    info!("streamads server shut down.");
}
