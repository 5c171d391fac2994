// src/api/handlers.rs

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::admin::push::Notification;
use crate::engine::banner::{render_banner, BannerView};
use crate::engine::resolver::{resolve, resolve_trigger};
use crate::logging::decision_log::DecisionLog;
use crate::model::ad::{Ad, AdKind, PlacementSlot, TriggerTarget};
use crate::model::device::DeviceClass;
use crate::store::normalize::{normalize, RawAdRecord};
use crate::AppState;

#[derive(Deserialize, Debug)]
pub struct PlacementQuery {
    /// Client viewport width in px; decides the device class.
    pub width: Option<u32>,
    /// Firing affordance, only meaningful for the popunder slot.
    pub trigger: Option<TriggerTarget>,
    /// Per-request placement switch. Can only narrow: the operator's global
    /// kill switch still wins when it is off.
    pub enabled: Option<bool>,
}

/// What the page renders for a resolved ad. Code ads carry the raw markup
/// for the client-side injector; banner ads carry only attributes.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlacementView {
    Code {
        id: String,
        markup: String,
        countdown_seconds: u32,
    },
    Banner {
        id: String,
        #[serde(flatten)]
        view: BannerView,
        countdown_seconds: u32,
    },
}

pub fn view_for(ad: &Ad) -> Option<PlacementView> {
    match ad.kind {
        AdKind::Code => {
            if ad.markup.is_empty() {
                return None;
            }
            Some(PlacementView::Code {
                id: ad.id.clone(),
                markup: ad.markup.clone(),
                countdown_seconds: ad.countdown_seconds,
            })
        }
        AdKind::Banner => render_banner(ad).map(|view| PlacementView::Banner {
            id: ad.id.clone(),
            view,
            countdown_seconds: ad.countdown_seconds,
        }),
    }
}

/// Resolves one placement slot. 204 when nothing qualifies: the page
/// renders nothing, never a placeholder.
pub async fn get_placement(
    State(state): State<Arc<AppState>>,
    Path(slot): Path<String>,
    Query(query): Query<PlacementQuery>,
) -> Response {
    let slot: PlacementSlot = match slot.parse() {
        Ok(slot) => slot,
        Err(e) => return (StatusCode::NOT_FOUND, e).into_response(),
    };
    let device = DeviceClass::from_viewport_width(query.width.unwrap_or(1024));
    let enabled = state.config.ads_enabled() && query.enabled.unwrap_or(true);
    let ads = state.config.ads();

    let mut decision = DecisionLog::new(slot, device, enabled, ads.len());
    let hit = match (slot, query.trigger) {
        (PlacementSlot::Popunder, Some(trigger)) => {
            resolve_trigger(&ads, trigger, enabled, device)
        }
        _ => resolve(&ads, slot, enabled, device),
    };
    let view = hit.and_then(view_for);
    if view.is_some() {
        if let Some(ad) = hit {
            decision.set_filled(ad);
        }
    }
    decision.emit();

    match view {
        Some(view) => (StatusCode::OK, Json(view)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

pub async fn list_ads(State(state): State<Arc<AppState>>) -> Json<Vec<Ad>> {
    Json((*state.config.ads()).clone())
}

/// Whole-record upsert keyed by id. Accepts any legacy record shape; a
/// record that cannot be normalized is rejected.
pub async fn upsert_ad(
    State(state): State<Arc<AppState>>,
    Json(raw): Json<RawAdRecord>,
) -> Response {
    let Some(mut ad) = normalize(raw) else {
        return (StatusCode::BAD_REQUEST, "unrecognized ad record shape").into_response();
    };
    ad.updated_at = Utc::now();

    match state.store.upsert_ad(&ad).await {
        Ok(()) => {
            refresh(&state).await;
            (StatusCode::OK, Json(ad)).into_response()
        }
        Err(e) => {
            error!(ad_id = %ad.id, error = %e, "ad upsert failed");
            StatusCode::BAD_GATEWAY.into_response()
        }
    }
}

pub async fn delete_ad(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    match state.store.delete_ad(&id).await {
        Ok(()) => {
            refresh(&state).await;
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(ad_id = %id, error = %e, "ad delete failed");
            StatusCode::BAD_GATEWAY.into_response()
        }
    }
}

pub async fn refresh_catalog(State(state): State<Arc<AppState>>) -> Response {
    let (ads, featured) = refresh(&state).await;
    (
        StatusCode::OK,
        Json(json!({ "ads": ads, "featured": featured })),
    )
        .into_response()
}

async fn refresh(state: &AppState) -> (usize, usize) {
    let snapshot = state.store.refresh().await;
    let counts = (snapshot.ads.len(), snapshot.featured.len());
    state.config.update_catalog(snapshot.ads, snapshot.featured);
    counts
}

/// Everything the home page hero needs: the featured items plus the
/// autoplay cadence the carousel should run at.
#[derive(Serialize, Debug)]
pub struct HeroView {
    pub items: Vec<crate::model::content::HeroItem>,
    pub auto_slide_interval_ms: u64,
}

pub async fn get_featured(State(state): State<Arc<AppState>>) -> Json<HeroView> {
    Json(HeroView {
        items: (*state.config.featured()).clone(),
        auto_slide_interval_ms: state.config.settings().auto_slide_interval_ms,
    })
}

#[derive(Deserialize, Debug)]
pub struct SearchQuery {
    pub q: String,
}

pub async fn search_metadata(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<crate::model::content::HeroItem>> {
    Json(state.metadata.search(&query.q).await)
}

pub async fn lookup_metadata(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Response {
    match state.metadata.lookup(id).await {
        Some(item) => (StatusCode::OK, Json(item)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn send_notification(
    State(state): State<Arc<AppState>>,
    Json(notification): Json<Notification>,
) -> Response {
    match state.push.send(&notification).await {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(e) => {
            error!(error = %e, "notification send failed");
            (StatusCode::BAD_GATEWAY, e).into_response()
        }
    }
}
