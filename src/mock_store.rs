// src/mock_store.rs

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{serve, Json, Router};
use rand::Rng;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::time::{sleep, Duration};
use tracing::info;

use crate::model::content::HeroItem;

/// In-memory document store standing in for the real backing store.
/// Document order is insertion order, which is what gives the resolver its
/// first-match priority.
#[derive(Clone, Default)]
struct MockStoreState {
    ads: Arc<RwLock<Vec<Value>>>,
    featured: Arc<RwLock<Vec<HeroItem>>>,
}

async fn simulated_latency() {
    let delay_ms = rand::thread_rng().gen_range(5..40);
    sleep(Duration::from_millis(delay_ms)).await;
}

async fn list_ads(State(state): State<MockStoreState>) -> Json<Vec<Value>> {
    simulated_latency().await;
    Json(state.ads.read().await.clone())
}

async fn upsert_ad(State(state): State<MockStoreState>, Json(doc): Json<Value>) -> StatusCode {
    simulated_latency().await;
    let id = doc.get("id").and_then(Value::as_str).map(String::from);
    let mut ads = state.ads.write().await;
    match id.and_then(|id| {
        ads.iter()
            .position(|d| d.get("id").and_then(Value::as_str) == Some(id.as_str()))
    }) {
        Some(pos) => ads[pos] = doc,
        None => ads.push(doc),
    }
    StatusCode::OK
}

async fn delete_ad(State(state): State<MockStoreState>, Path(id): Path<String>) -> StatusCode {
    simulated_latency().await;
    state
        .ads
        .write()
        .await
        .retain(|d| d.get("id").and_then(Value::as_str) != Some(id.as_str()));
    StatusCode::NO_CONTENT
}

async fn list_featured(State(state): State<MockStoreState>) -> Json<Vec<HeroItem>> {
    simulated_latency().await;
    Json(state.featured.read().await.clone())
}

/// Starts the mock store on the given port, pre-populated with the seed
/// documents. Runs until the process exits.
pub async fn start_mock_store_server(
    port: u16,
    seed_ads: Vec<Value>,
    seed_featured: Vec<HeroItem>,
) {
    let state = MockStoreState {
        ads: Arc::new(RwLock::new(seed_ads)),
        featured: Arc::new(RwLock::new(seed_featured)),
    };

    let app = Router::new()
        .route("/documents/ads", get(list_ads).post(upsert_ad))
        .route("/documents/ads/{id}", delete(delete_ad))
        .route("/documents/featured", get(list_featured))
        .with_state(state);

    let addr = format!("0.0.0.0:{}", port);
    info!("mock document store running at http://{}", addr);
    let listener = TcpListener::bind(&addr).await.unwrap();
    serve(listener, app).await.unwrap();
}
