// src/store/client.rs

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use tracing::warn;

use crate::model::ad::Ad;
use crate::model::content::HeroItem;
use crate::store::normalize::parse_ads;

/// Shared HTTP client for every outbound call the process makes.
pub(crate) static HTTP: Lazy<Client> = Lazy::new(Client::new);

/// One full read of the store: the ad list and the featured content list.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub ads: Vec<Ad>,
    pub featured: Vec<HeroItem>,
}

/// The document-store boundary. Reads are whole-list fetches once per page
/// load or on explicit refresh; writes are whole-record upserts keyed by id.
/// Read failures degrade to empty lists and are retried only on the next
/// natural refresh.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn fetch_ads(&self) -> Vec<Ad>;
    async fn fetch_featured(&self) -> Vec<HeroItem>;
    async fn upsert_ad(&self, ad: &Ad) -> Result<(), String>;
    async fn delete_ad(&self, id: &str) -> Result<(), String>;

    /// Both lists, fetched concurrently.
    async fn refresh(&self) -> CatalogSnapshot {
        let (ads, featured) = futures::join!(self.fetch_ads(), self.fetch_featured());
        CatalogSnapshot { ads, featured }
    }
}

/// Client for the external document store over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    base_url: String,
}

impl HttpDocumentStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn fetch_ads(&self) -> Vec<Ad> {
        let url = format!("{}/documents/ads", self.base_url);
        match get_bytes(&url).await {
            Ok(payload) => parse_ads(payload),
            Err(e) => {
                warn!(url = %url, error = %e, "ad fetch failed, rendering nothing");
                Vec::new()
            }
        }
    }

    async fn fetch_featured(&self) -> Vec<HeroItem> {
        let url = format!("{}/documents/featured", self.base_url);
        let result = async {
            HTTP.get(&url)
                .send()
                .await
                .map_err(|e| e.to_string())?
                .error_for_status()
                .map_err(|e| e.to_string())?
                .json::<Vec<HeroItem>>()
                .await
                .map_err(|e| e.to_string())
        }
        .await;
        match result {
            Ok(items) => items,
            Err(e) => {
                warn!(url = %url, error = %e, "featured fetch failed, using empty list");
                Vec::new()
            }
        }
    }

    async fn upsert_ad(&self, ad: &Ad) -> Result<(), String> {
        let url = format!("{}/documents/ads", self.base_url);
        HTTP.post(&url)
            .json(ad)
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    async fn delete_ad(&self, id: &str) -> Result<(), String> {
        let url = format!("{}/documents/ads/{}", self.base_url, id);
        HTTP.delete(&url)
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}

/// In-memory store, same contract, no network. Backs handler tests and any
/// embedder that manages the catalog itself.
#[derive(Debug, Default)]
pub struct MemoryStore {
    ads: RwLock<Vec<Ad>>,
    featured: RwLock<Vec<HeroItem>>,
}

impl MemoryStore {
    pub fn seeded(ads: Vec<Ad>, featured: Vec<HeroItem>) -> Self {
        Self {
            ads: RwLock::new(ads),
            featured: RwLock::new(featured),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn fetch_ads(&self) -> Vec<Ad> {
        self.ads
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn fetch_featured(&self) -> Vec<HeroItem> {
        self.featured
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn upsert_ad(&self, ad: &Ad) -> Result<(), String> {
        let mut ads = self.ads.write().unwrap_or_else(PoisonError::into_inner);
        match ads.iter_mut().find(|existing| existing.id == ad.id) {
            Some(existing) => *existing = ad.clone(),
            None => ads.push(ad.clone()),
        }
        Ok(())
    }

    async fn delete_ad(&self, id: &str) -> Result<(), String> {
        self.ads
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|ad| ad.id != id);
        Ok(())
    }
}

async fn get_bytes(url: &str) -> Result<Vec<u8>, String> {
    let response = HTTP
        .get(url)
        .send()
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?;
    let bytes = response.bytes().await.map_err(|e| e.to_string())?;
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ad::test_support::ad;
    use crate::model::ad::PlacementSlot;

    #[tokio::test]
    async fn memory_store_upserts_by_id_and_keeps_order() {
        let store = MemoryStore::seeded(
            vec![ad("1", PlacementSlot::HomeTop), ad("2", PlacementSlot::HomeBottom)],
            Vec::new(),
        );

        let mut replacement = ad("1", PlacementSlot::HomeTop);
        replacement.markup = "<b>new</b>".to_string();
        store.upsert_ad(&replacement).await.unwrap();

        let ads = store.fetch_ads().await;
        assert_eq!(ads.len(), 2);
        assert_eq!(ads[0].markup, "<b>new</b>");
        assert_eq!(ads[1].id, "2");

        store.delete_ad("1").await.unwrap();
        assert_eq!(store.fetch_ads().await.len(), 1);
    }

    #[tokio::test]
    async fn refresh_joins_both_lists() {
        let store = MemoryStore::seeded(vec![ad("1", PlacementSlot::HomeTop)], Vec::new());
        let snapshot = store.refresh().await;
        assert_eq!(snapshot.ads.len(), 1);
        assert!(snapshot.featured.is_empty());
    }
}
