// src/logging/decision_log.rs

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::model::ad::{Ad, AdKind, PlacementSlot};
use crate::model::device::DeviceClass;

/// One placement decision, emitted per resolve pass.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DecisionLog {
    pub timestamp: String,
    pub log_type: String,
    pub slot: PlacementSlot,
    pub device: DeviceClass,
    pub enabled: bool,
    /// Size of the ad list the resolver scanned.
    pub candidates: usize,
    pub outcome: String,
    pub ad_id: Option<String>,
    pub ad_kind: Option<AdKind>,
}

impl DecisionLog {
    /// Starts as `no_fill`; updated if the resolver picks an ad.
    pub fn new(slot: PlacementSlot, device: DeviceClass, enabled: bool, candidates: usize) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            log_type: "placement_decision".to_string(),
            slot,
            device,
            enabled,
            candidates,
            outcome: "no_fill".to_string(),
            ad_id: None,
            ad_kind: None,
        }
    }

    pub fn set_filled(&mut self, ad: &Ad) {
        self.outcome = "filled".to_string();
        self.ad_id = Some(ad.id.clone());
        self.ad_kind = Some(ad.kind);
    }

    pub fn emit(&self) {
        if let Ok(line) = serde_json::to_string(self) {
            info!(target: "decision", "{}", line);
        }
    }
}
