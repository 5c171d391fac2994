// src/engine/banner.rs

use serde::{Deserialize, Serialize};

use crate::model::ad::{Ad, AdKind};

/// Rendered form of a banner ad: a hyperlinked image. Only `src` and `href`
/// attributes are ever set, so no arbitrary markup reaches the page through
/// this path.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BannerView {
    pub src: String,
    pub href: String,
    pub target: String,
    pub rel: String,
}

/// Pure rendering, no injection. An empty image URL renders nothing.
pub fn render_banner(ad: &Ad) -> Option<BannerView> {
    if ad.kind != AdKind::Banner || ad.image_url.is_empty() {
        return None;
    }
    let href = if ad.destination_url.is_empty() {
        "#".to_string()
    } else {
        ad.destination_url.clone()
    };
    Some(BannerView {
        src: ad.image_url.clone(),
        href,
        target: "_blank".to_string(),
        rel: "noopener noreferrer nofollow".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ad::test_support::ad;
    use crate::model::ad::PlacementSlot;

    fn banner(image: &str, dest: &str) -> Ad {
        let mut a = ad("b", PlacementSlot::HomeBottom);
        a.kind = AdKind::Banner;
        a.markup = String::new();
        a.image_url = image.to_string();
        a.destination_url = dest.to_string();
        a
    }

    #[test]
    fn renders_linked_image_in_new_tab() {
        let view = render_banner(&banner("https://cdn.example/a.png", "https://adv.example"))
            .unwrap();
        assert_eq!(view.src, "https://cdn.example/a.png");
        assert_eq!(view.href, "https://adv.example");
        assert_eq!(view.target, "_blank");
        assert_eq!(view.rel, "noopener noreferrer nofollow");
    }

    #[test]
    fn missing_destination_defaults_to_hash() {
        let view = render_banner(&banner("https://cdn.example/a.png", "")).unwrap();
        assert_eq!(view.href, "#");
    }

    #[test]
    fn empty_image_renders_nothing() {
        assert!(render_banner(&banner("", "https://adv.example")).is_none());
    }

    #[test]
    fn code_ads_never_go_through_the_banner_path() {
        let a = ad("c", PlacementSlot::HomeTop);
        assert!(render_banner(&a).is_none());
    }
}
