// src/model/device.rs

use serde::{Deserialize, Serialize};

/// Viewport widths below this are treated as mobile.
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

/// The viewport class of the requesting client.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

impl DeviceClass {
    pub fn from_viewport_width(px: u32) -> Self {
        if px < MOBILE_BREAKPOINT_PX {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }
}

/// Device targeting carried on an ad record.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TargetDevice {
    All,
    Mobile,
    Desktop,
}

impl TargetDevice {
    /// `All` matches both classes; `Mobile`/`Desktop` match only their own.
    pub fn matches(self, device: DeviceClass) -> bool {
        match self {
            TargetDevice::All => true,
            TargetDevice::Mobile => device == DeviceClass::Mobile,
            TargetDevice::Desktop => device == DeviceClass::Desktop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_is_exclusive_at_768() {
        assert_eq!(DeviceClass::from_viewport_width(767), DeviceClass::Mobile);
        assert_eq!(DeviceClass::from_viewport_width(768), DeviceClass::Desktop);
        assert_eq!(DeviceClass::from_viewport_width(320), DeviceClass::Mobile);
        assert_eq!(DeviceClass::from_viewport_width(1920), DeviceClass::Desktop);
    }

    #[test]
    fn all_matches_both_classes() {
        assert!(TargetDevice::All.matches(DeviceClass::Mobile));
        assert!(TargetDevice::All.matches(DeviceClass::Desktop));
        assert!(!TargetDevice::Mobile.matches(DeviceClass::Desktop));
        assert!(!TargetDevice::Desktop.matches(DeviceClass::Mobile));
    }
}
