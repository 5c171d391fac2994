// src/store/normalize.rs

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::model::ad::{Ad, AdKind, AdStatus, PlacementSlot, TriggerTarget};
use crate::model::device::TargetDevice;

/// An ad document as it actually lives in the store: several generations of
/// field names, optional everything. Mapped to the canonical [`Ad`] exactly
/// once, here at the boundary; nothing past this module ever sees a raw
/// record.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct RawAdRecord {
    pub id: Option<String>,
    #[serde(alias = "type")]
    pub kind: Option<String>,
    /// Legacy records used `code` or `scriptCode` for the markup field.
    #[serde(alias = "code", alias = "scriptCode")]
    pub markup: Option<String>,
    #[serde(alias = "image", alias = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(alias = "url", alias = "link", alias = "destinationUrl")]
    pub destination_url: Option<String>,
    #[serde(alias = "position", alias = "slot", alias = "placementSlot")]
    pub placement_slot: Option<String>,
    pub status: Option<RawStatus>,
    #[serde(alias = "device", alias = "targetDevice")]
    pub target_device: Option<String>,
    #[serde(alias = "trigger", alias = "triggerTarget")]
    pub trigger_target: Option<String>,
    #[serde(alias = "countdown", alias = "countdownSeconds", alias = "timer")]
    pub countdown_seconds: Option<u32>,
    #[serde(alias = "updatedAt")]
    pub updated_at: Option<RawTimestamp>,
}

/// Older records store status as a bool or a bare string.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum RawStatus {
    Code(u8),
    Flag(bool),
    Text(String),
}

/// Epoch milliseconds in old records, RFC 3339 in new ones.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum RawTimestamp {
    Millis(i64),
    Text(String),
}

/// Maps a raw store document to the canonical shape. Records without a
/// recognizable slot or kind are dropped (logged, not fatal).
pub fn normalize(raw: RawAdRecord) -> Option<Ad> {
    let slot_str = raw.placement_slot?;
    let placement_slot: PlacementSlot = match slot_str.parse() {
        Ok(slot) => slot,
        Err(e) => {
            warn!(error = %e, "dropping ad document");
            return None;
        }
    };

    let kind = match raw.kind.as_deref() {
        Some("code") | Some("script") => AdKind::Code,
        Some("banner") | Some("image") => AdKind::Banner,
        // Records predating the kind field are inferred from their content.
        None if raw.markup.is_some() => AdKind::Code,
        None if raw.image_url.is_some() => AdKind::Banner,
        other => {
            warn!(kind = ?other, "dropping ad document with unknown kind");
            return None;
        }
    };

    let status = match raw.status {
        None => AdStatus::Active,
        Some(RawStatus::Code(n)) => AdStatus::try_from(n).unwrap_or(AdStatus::Disabled),
        Some(RawStatus::Flag(true)) => AdStatus::Active,
        Some(RawStatus::Flag(false)) => AdStatus::Disabled,
        Some(RawStatus::Text(s)) if s == "active" => AdStatus::Active,
        Some(RawStatus::Text(_)) => AdStatus::Disabled,
    };

    let target_device = match raw.target_device.as_deref() {
        None | Some("all") => TargetDevice::All,
        Some("mobile") => TargetDevice::Mobile,
        Some("desktop") => TargetDevice::Desktop,
        Some(other) => {
            warn!(target_device = other, "unknown device target, defaulting to all");
            TargetDevice::All
        }
    };

    let trigger_target = match raw.trigger_target.as_deref() {
        Some("download") => Some(TriggerTarget::Download),
        Some("next_episode") | Some("nextEpisode") => Some(TriggerTarget::NextEpisode),
        Some("play") => Some(TriggerTarget::Play),
        _ => None,
    };

    let id = raw
        .id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let updated_at = raw.updated_at.and_then(parse_timestamp).unwrap_or_else(Utc::now);

    Some(Ad {
        id,
        kind,
        markup: raw.markup.unwrap_or_default(),
        image_url: raw.image_url.unwrap_or_default(),
        destination_url: raw.destination_url.unwrap_or_default(),
        placement_slot,
        status,
        target_device,
        trigger_target,
        countdown_seconds: raw.countdown_seconds.unwrap_or(0),
        updated_at,
    })
}

fn parse_timestamp(raw: RawTimestamp) -> Option<DateTime<Utc>> {
    match raw {
        RawTimestamp::Millis(ms) => Utc.timestamp_millis_opt(ms).single(),
        RawTimestamp::Text(s) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
    }
}

/// Parses the store's ad-list payload. A malformed payload degrades to an
/// empty list; individual bad records are dropped by [`normalize`].
pub fn parse_ads(mut payload: Vec<u8>) -> Vec<Ad> {
    let raws: Vec<RawAdRecord> = match simd_json::serde::from_slice(&mut payload) {
        Ok(raws) => raws,
        Err(e) => {
            warn!(error = %e, "failed to parse ad documents");
            return Vec::new();
        }
    };
    raws.into_iter().filter_map(normalize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_json(doc: &str) -> RawAdRecord {
        serde_json::from_str(doc).unwrap()
    }

    #[test]
    fn legacy_script_code_field_maps_to_markup() {
        let ad = normalize(from_json(
            r#"{"id":"x","scriptCode":"<script>a()</script>","position":"home-top"}"#,
        ))
        .unwrap();
        assert_eq!(ad.kind, AdKind::Code);
        assert_eq!(ad.markup, "<script>a()</script>");
        assert_eq!(ad.placement_slot, PlacementSlot::HomeTop);
        assert_eq!(ad.status, AdStatus::Active);
        assert_eq!(ad.target_device, TargetDevice::All);
    }

    #[test]
    fn banner_inferred_from_image_only_record() {
        let ad = normalize(from_json(
            r#"{"image":"https://cdn.example/b.png","link":"https://adv.example","slot":"home-bottom","device":"mobile"}"#,
        ))
        .unwrap();
        assert_eq!(ad.kind, AdKind::Banner);
        assert_eq!(ad.destination_url, "https://adv.example");
        assert_eq!(ad.target_device, TargetDevice::Mobile);
        assert!(!ad.id.is_empty());
    }

    #[test]
    fn status_variants_all_map() {
        let base = r#"{"kind":"code","code":"<b>x</b>","slot":"home-top","status":STATUS}"#;
        for (raw, expected) in [
            ("1", AdStatus::Active),
            ("2", AdStatus::Disabled),
            ("9", AdStatus::Disabled),
            ("true", AdStatus::Active),
            ("false", AdStatus::Disabled),
            (r#""active""#, AdStatus::Active),
            (r#""disabled""#, AdStatus::Disabled),
        ] {
            let ad = normalize(from_json(&base.replace("STATUS", raw))).unwrap();
            assert_eq!(ad.status, expected, "status {}", raw);
        }
    }

    #[test]
    fn unknown_slot_is_dropped() {
        assert!(normalize(from_json(r#"{"kind":"code","code":"x","slot":"sidebar"}"#)).is_none());
        assert!(normalize(from_json(r#"{"kind":"code","code":"x"}"#)).is_none());
    }

    #[test]
    fn canonical_shape_round_trips_through_the_raw_record() {
        let original = {
            let mut a = crate::model::ad::test_support::ad("keep-id", PlacementSlot::Popunder);
            a.trigger_target = Some(TriggerTarget::Download);
            a.countdown_seconds = 7;
            a
        };
        let doc = serde_json::to_vec(&vec![original.clone()]).unwrap();
        let parsed = parse_ads(doc);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, "keep-id");
        assert_eq!(parsed[0].trigger_target, Some(TriggerTarget::Download));
        assert_eq!(parsed[0].countdown_seconds, 7);
    }

    #[test]
    fn millisecond_timestamps_are_understood() {
        let ad = normalize(from_json(
            r#"{"kind":"code","code":"x","slot":"home-top","updatedAt":1700000000000}"#,
        ))
        .unwrap();
        assert_eq!(ad.updated_at.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn malformed_payload_degrades_to_empty() {
        assert!(parse_ads(b"not json at all".to_vec()).is_empty());
        assert!(parse_ads(b"{}".to_vec()).is_empty());
    }
}
