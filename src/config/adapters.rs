// src/config/adapters.rs

use std::fs;

use serde_json::Value;

use crate::model::content::HeroItem;

/// Source of the seed documents loaded into the mock store at startup.
pub trait SeedAdapter: Send + Sync {
    fn seed_ads(&self) -> Vec<Value>;
    fn seed_featured(&self) -> Vec<HeroItem>;
}

/// Reads seed documents from JSON files; missing or unreadable files yield
/// empty seeds.
pub struct FileSeedAdapter {
    pub ads_file: String,
    pub featured_file: String,
}

impl FileSeedAdapter {
    pub fn new(ads_file: &str, featured_file: &str) -> Self {
        Self {
            ads_file: ads_file.to_string(),
            featured_file: featured_file.to_string(),
        }
    }
}

impl SeedAdapter for FileSeedAdapter {
    fn seed_ads(&self) -> Vec<Value> {
        let content = fs::read_to_string(&self.ads_file).unwrap_or_else(|_| "[]".to_string());
        serde_json::from_str(&content).unwrap_or_default()
    }

    fn seed_featured(&self) -> Vec<HeroItem> {
        let content = fs::read_to_string(&self.featured_file).unwrap_or_else(|_| "[]".to_string());
        serde_json::from_str(&content).unwrap_or_default()
    }
}
