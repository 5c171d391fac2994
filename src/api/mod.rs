pub mod handlers;

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/placement/{slot}", get(handlers::get_placement))
        .route("/featured", get(handlers::get_featured))
        .route(
            "/admin/ads",
            get(handlers::list_ads).post(handlers::upsert_ad),
        )
        .route("/admin/ads/{id}", delete(handlers::delete_ad))
        .route("/admin/refresh", post(handlers::refresh_catalog))
        .route("/admin/metadata/search", get(handlers::search_metadata))
        .route("/admin/metadata/{id}", get(handlers::lookup_metadata))
        .route("/admin/notify", post(handlers::send_notification))
        .with_state(state)
}
