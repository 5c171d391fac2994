// src/config/config_manager.rs

use std::sync::{Arc, PoisonError, RwLock};

use crate::model::ad::Ad;
use crate::model::content::HeroItem;

/// Operator-facing settings, fixed at startup.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Global ad kill switch: off means every placement resolves to nothing.
    pub ads_enabled: bool,
    pub auto_slide_interval_ms: u64,
    pub store_url: String,
    pub metadata_base_url: String,
    pub metadata_api_key: String,
    pub push_endpoint: String,
    pub push_token: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ads_enabled: true,
            auto_slide_interval_ms: crate::carousel::machine::DEFAULT_AUTO_SLIDE_INTERVAL_MS,
            store_url: "http://127.0.0.1:9001".to_string(),
            metadata_base_url: "https://api.themoviedb.org/3".to_string(),
            metadata_api_key: String::new(),
            push_endpoint: String::new(),
            push_token: String::new(),
        }
    }
}

/// Holds the settings plus the current catalog snapshot. The snapshot is
/// replaced wholesale on refresh; readers get a cheap `Arc` handle.
#[derive(Debug)]
pub struct ConfigManager {
    settings: Settings,
    ads: RwLock<Arc<Vec<Ad>>>,
    featured: RwLock<Arc<Vec<HeroItem>>>,
}

impl ConfigManager {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ads: RwLock::new(Arc::new(Vec::new())),
            featured: RwLock::new(Arc::new(Vec::new())),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn ads_enabled(&self) -> bool {
        self.settings.ads_enabled
    }

    // The guarded value is swapped wholesale; a poisoned lock still holds a
    // complete snapshot, which the accessors recover.
    pub fn update_catalog(&self, ads: Vec<Ad>, featured: Vec<HeroItem>) {
        *self.ads.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(ads);
        *self
            .featured
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(featured);
    }

    pub fn ads(&self) -> Arc<Vec<Ad>> {
        self.ads
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn featured(&self) -> Arc<Vec<HeroItem>> {
        self.featured
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ad::test_support::ad;
    use crate::model::ad::PlacementSlot;

    #[test]
    fn catalog_updates_replace_the_snapshot() {
        let config = ConfigManager::new(Settings::default());
        assert!(config.ads().is_empty());

        let before = config.ads();
        config.update_catalog(vec![ad("1", PlacementSlot::HomeTop)], Vec::new());
        assert_eq!(config.ads().len(), 1);
        // Handles taken before the update still see the old snapshot.
        assert!(before.is_empty());
    }

    #[test]
    fn poisoned_lock_still_serves_and_accepts_snapshots() {
        let config = Arc::new(ConfigManager::new(Settings::default()));
        config.update_catalog(vec![ad("1", PlacementSlot::HomeTop)], Vec::new());

        let poisoner = Arc::clone(&config);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.ads.write().unwrap();
            panic!("poisoning the catalog lock");
        })
        .join();

        assert_eq!(config.ads().len(), 1);
        config.update_catalog(Vec::new(), Vec::new());
        assert!(config.ads().is_empty());
    }
}
