// src/model/ad.rs

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::device::{DeviceClass, TargetDevice};

/// What an ad record carries: injectable markup or an image+link pair.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdKind {
    Code,
    Banner,
}

/// Status: 1 = active, 2 = disabled (store encodes it numerically).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "u8", into = "u8")]
pub enum AdStatus {
    Active = 1,
    Disabled = 2,
}

impl TryFrom<u8> for AdStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(AdStatus::Active),
            2 => Ok(AdStatus::Disabled),
            _ => Err(format!("Invalid value for AdStatus: {}", value)),
        }
    }
}

impl From<AdStatus> for u8 {
    fn from(status: AdStatus) -> Self {
        status as u8
    }
}

/// Named logical position where one ad may be displayed per render pass.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementSlot {
    #[serde(rename = "home-top")]
    HomeTop,
    #[serde(rename = "home-bottom")]
    HomeBottom,
    #[serde(rename = "watch-preroll")]
    WatchPreroll,
    #[serde(rename = "watch-bottom")]
    WatchBottom,
    #[serde(rename = "action_download")]
    ActionDownload,
    #[serde(rename = "action_next_episode")]
    ActionNextEpisode,
    #[serde(rename = "popunder")]
    Popunder,
}

impl PlacementSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            PlacementSlot::HomeTop => "home-top",
            PlacementSlot::HomeBottom => "home-bottom",
            PlacementSlot::WatchPreroll => "watch-preroll",
            PlacementSlot::WatchBottom => "watch-bottom",
            PlacementSlot::ActionDownload => "action_download",
            PlacementSlot::ActionNextEpisode => "action_next_episode",
            PlacementSlot::Popunder => "popunder",
        }
    }
}

impl fmt::Display for PlacementSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlacementSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home-top" => Ok(PlacementSlot::HomeTop),
            "home-bottom" => Ok(PlacementSlot::HomeBottom),
            "watch-preroll" => Ok(PlacementSlot::WatchPreroll),
            "watch-bottom" => Ok(PlacementSlot::WatchBottom),
            "action_download" => Ok(PlacementSlot::ActionDownload),
            "action_next_episode" => Ok(PlacementSlot::ActionNextEpisode),
            "popunder" => Ok(PlacementSlot::Popunder),
            other => Err(format!("Unknown placement slot: {}", other)),
        }
    }
}

/// Which UI affordance activates a popunder-slot ad.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TriggerTarget {
    Download,
    NextEpisode,
    Play,
}

/// One advertisement unit as the rest of the system sees it. Raw store
/// documents are mapped into this shape once, at the store boundary
/// (see `store::normalize`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Ad {
    pub id: String,
    pub kind: AdKind,
    /// Raw HTML/JS for `code` ads. Operator-supplied, trusted, not sanitized.
    #[serde(default)]
    pub markup: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub destination_url: String,
    pub placement_slot: PlacementSlot,
    pub status: AdStatus,
    pub target_device: TargetDevice,
    /// Only meaningful for the popunder slot.
    #[serde(default)]
    pub trigger_target: Option<TriggerTarget>,
    /// > 0 gates the associated action behind an N-second wait.
    #[serde(default)]
    pub countdown_seconds: u32,
    pub updated_at: DateTime<Utc>,
}

impl Ad {
    pub fn is_active(&self) -> bool {
        self.status == AdStatus::Active
    }

    pub fn matches_device(&self, device: DeviceClass) -> bool {
        self.target_device.matches(device)
    }

    /// A code ad with empty markup and a banner ad with an empty image
    /// render nothing.
    pub fn is_renderable(&self) -> bool {
        match self.kind {
            AdKind::Code => !self.markup.is_empty(),
            AdKind::Banner => !self.image_url.is_empty(),
        }
    }

    /// Trigger matching for the popunder slot: an ad without an explicit
    /// trigger target fires on any affordance.
    pub fn matches_trigger(&self, trigger: TriggerTarget) -> bool {
        match self.trigger_target {
            None => true,
            Some(t) => t == trigger,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_u8() {
        assert_eq!(AdStatus::try_from(1u8), Ok(AdStatus::Active));
        assert_eq!(AdStatus::try_from(2u8), Ok(AdStatus::Disabled));
        assert!(AdStatus::try_from(0u8).is_err());
        assert_eq!(u8::from(AdStatus::Disabled), 2);
    }

    #[test]
    fn slot_parses_from_path_segment() {
        assert_eq!(
            "watch-preroll".parse::<PlacementSlot>(),
            Ok(PlacementSlot::WatchPreroll)
        );
        assert_eq!(
            "action_download".parse::<PlacementSlot>(),
            Ok(PlacementSlot::ActionDownload)
        );
        assert!("sidebar".parse::<PlacementSlot>().is_err());
    }

    #[test]
    fn empty_content_is_not_renderable() {
        let mut ad = test_support::ad("a", PlacementSlot::HomeTop);
        ad.markup = String::new();
        assert!(!ad.is_renderable());

        ad.kind = AdKind::Banner;
        assert!(!ad.is_renderable());
        ad.image_url = "https://cdn.example/banner.png".to_string();
        assert!(ad.is_renderable());
    }

    #[test]
    fn missing_trigger_target_fires_on_any_affordance() {
        let mut ad = test_support::ad("p", PlacementSlot::Popunder);
        assert!(ad.matches_trigger(TriggerTarget::Download));
        assert!(ad.matches_trigger(TriggerTarget::Play));

        ad.trigger_target = Some(TriggerTarget::NextEpisode);
        assert!(ad.matches_trigger(TriggerTarget::NextEpisode));
        assert!(!ad.matches_trigger(TriggerTarget::Download));
    }
}
