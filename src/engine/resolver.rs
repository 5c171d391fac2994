// src/engine/resolver.rs

use crate::model::ad::{Ad, PlacementSlot, TriggerTarget};
use crate::model::device::DeviceClass;

/// Picks at most one ad for a slot.
///
/// First-match over list order: no ranking, no auction. Callers needing a
/// different priority pre-sort the input. Disabled ads are never eligible;
/// `enabled == false` switches the placement off entirely. Pure lookup,
/// re-evaluated on every render pass.
pub fn resolve<'a>(
    ads: &'a [Ad],
    slot: PlacementSlot,
    enabled: bool,
    device: DeviceClass,
) -> Option<&'a Ad> {
    if !enabled {
        return None;
    }
    ads.iter().find(|ad| {
        ad.placement_slot == slot && ad.is_active() && ad.matches_device(device)
    })
}

/// Popunder variant: additionally matches the firing affordance against the
/// ad's trigger target.
pub fn resolve_trigger<'a>(
    ads: &'a [Ad],
    trigger: TriggerTarget,
    enabled: bool,
    device: DeviceClass,
) -> Option<&'a Ad> {
    if !enabled {
        return None;
    }
    ads.iter().find(|ad| {
        ad.placement_slot == PlacementSlot::Popunder
            && ad.is_active()
            && ad.matches_device(device)
            && ad.matches_trigger(trigger)
    })
}
