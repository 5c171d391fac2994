// src/admin/metadata.rs

use serde::Deserialize;
use tracing::warn;

use crate::model::content::HeroItem;
use crate::store::client::HTTP;

const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";

/// Read-only client for the external metadata API. Used only by the admin
/// content editor; never by the ad engine.
#[derive(Debug, Clone)]
pub struct MetadataClient {
    base_url: String,
    api_key: String,
}

#[derive(Deserialize, Debug)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<MetadataRecord>,
}

#[derive(Deserialize, Debug)]
struct MetadataRecord {
    id: u64,
    /// Movies use `title`, series use `name`.
    #[serde(default, alias = "name")]
    title: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
}

fn into_hero(record: MetadataRecord) -> HeroItem {
    HeroItem {
        id: record.id,
        title: record.title.unwrap_or_default(),
        poster_url: record
            .poster_path
            .map(|path| format!("{}{}", POSTER_BASE, path))
            .unwrap_or_default(),
        trailer: None,
    }
}

impl MetadataClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Text search over the catalog. Failures log and return an empty list.
    pub async fn search(&self, query: &str) -> Vec<HeroItem> {
        let url = format!("{}/search/multi", self.base_url);
        let result = async {
            HTTP.get(&url)
                .query(&[("api_key", self.api_key.as_str()), ("query", query)])
                .send()
                .await
                .map_err(|e| e.to_string())?
                .error_for_status()
                .map_err(|e| e.to_string())?
                .json::<SearchResponse>()
                .await
                .map_err(|e| e.to_string())
        }
        .await;
        match result {
            Ok(response) => response.results.into_iter().map(into_hero).collect(),
            Err(e) => {
                warn!(url = %url, error = %e, "metadata search failed");
                Vec::new()
            }
        }
    }

    /// Lookup by numeric id. None on any failure.
    pub async fn lookup(&self, id: u64) -> Option<HeroItem> {
        let url = format!("{}/movie/{}", self.base_url, id);
        let result = async {
            HTTP.get(&url)
                .query(&[("api_key", self.api_key.as_str())])
                .send()
                .await
                .map_err(|e| e.to_string())?
                .error_for_status()
                .map_err(|e| e.to_string())?
                .json::<MetadataRecord>()
                .await
                .map_err(|e| e.to_string())
        }
        .await;
        match result {
            Ok(record) => Some(into_hero(record)),
            Err(e) => {
                warn!(url = %url, error = %e, "metadata lookup failed");
                None
            }
        }
    }
}
