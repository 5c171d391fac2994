// End-to-end run over the shipped seed catalog: raw documents in, placement
// decisions and gate behavior out.

use streamads::engine::gate::{CountdownGate, GateEffect, GateState};
use streamads::engine::resolver::{resolve, resolve_trigger};
use streamads::model::ad::{Ad, AdStatus, PlacementSlot, TriggerTarget};
use streamads::model::device::DeviceClass;
use streamads::store::normalize::parse_ads;

fn seeded_ads() -> Vec<Ad> {
    let payload = std::fs::read("static/seed_ads.json").expect("seed file present");
    parse_ads(payload)
}

#[test]
fn seed_catalog_normalizes_completely() {
    let ads = seeded_ads();
    assert_eq!(ads.len(), 6);

    // The legacy-shaped record came through the aliases.
    let legacy = ads.iter().find(|a| a.id == "home-top-mobile").unwrap();
    assert!(legacy.markup.contains("mobile-tag.js"));
    assert_eq!(legacy.placement_slot, PlacementSlot::HomeTop);

    let retired = ads.iter().find(|a| a.id == "retired-preroll").unwrap();
    assert_eq!(retired.status, AdStatus::Disabled);
}

#[test]
fn home_top_respects_device_class() {
    let ads = seeded_ads();

    let desktop = resolve(&ads, PlacementSlot::HomeTop, true, DeviceClass::Desktop);
    assert_eq!(desktop.map(|a| a.id.as_str()), Some("home-top-network"));

    let mobile = resolve(&ads, PlacementSlot::HomeTop, true, DeviceClass::Mobile);
    assert_eq!(mobile.map(|a| a.id.as_str()), Some("home-top-mobile"));

    assert!(resolve(&ads, PlacementSlot::HomeTop, false, DeviceClass::Desktop).is_none());
}

#[test]
fn disabled_preroll_means_no_fill() {
    let ads = seeded_ads();
    assert!(resolve(&ads, PlacementSlot::WatchPreroll, true, DeviceClass::Desktop).is_none());
    assert!(resolve(&ads, PlacementSlot::WatchPreroll, true, DeviceClass::Mobile).is_none());
}

#[test]
fn download_flow_runs_through_the_gate() {
    let ads = seeded_ads();
    let hit = resolve(&ads, PlacementSlot::ActionDownload, true, DeviceClass::Desktop);
    assert_eq!(hit.map(|a| a.countdown_seconds), Some(5));

    let mut gate = CountdownGate::new();
    let effects = gate.trigger(hit);
    assert!(effects.contains(&GateEffect::StartTimer));

    for _ in 0..4 {
        gate.tick();
        assert!(matches!(gate.state(), GateState::Counting { .. }));
    }
    let effects = gate.tick();
    assert!(effects.contains(&GateEffect::ShowSkip));
    assert_eq!(gate.skip(), vec![GateEffect::RunAction, GateEffect::Close]);
}

#[test]
fn gate_is_bypassed_when_the_placement_is_off() {
    let ads = seeded_ads();
    let hit = resolve(&ads, PlacementSlot::ActionDownload, false, DeviceClass::Desktop);
    assert!(hit.is_none());

    let mut gate = CountdownGate::new();
    assert_eq!(gate.trigger(hit), vec![GateEffect::RunAction]);
}

#[test]
fn popunder_fires_only_on_its_trigger() {
    let ads = seeded_ads();

    let on_play = resolve_trigger(&ads, TriggerTarget::Play, true, DeviceClass::Desktop);
    assert_eq!(on_play.map(|a| a.id.as_str()), Some("popunder-play"));
    assert_eq!(on_play.map(|a| a.countdown_seconds), Some(3));

    assert!(resolve_trigger(&ads, TriggerTarget::Download, true, DeviceClass::Desktop).is_none());
}
