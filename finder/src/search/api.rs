//! Google Custom Search client.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::error::{FinderError, Result};
use crate::models::{ItemType, SearchCandidate};

const CLOTHING_SITES: &[&str] = &[
    "zalando.fr",
    "zalando.be",
    "laredoute.fr",
    "asos.fr",
    "galerieslafayette.com",
    "zara.com",
    "hm.com",
    "mango.com",
    "uniqlo.com",
    "celio.com",
    "jules.com",
    "bershka.com",
    "nastygal.com",
    "ralphlauren.fr",
    "lacoste.com",
    "monoprix.fr",
    "kiabi.com",
    "promod.fr",
];

const SHOE_SITES: &[&str] = &[
    "sarenza.com",
    "spartoo.com",
    "zalando.fr",
    "jdsports.fr",
    "courir.com",
    "nike.com",
    "adidas.fr",
    "puma.com",
    "clarks.fr",
    "footlocker.fr",
    "timberland.fr",
    "geox.com",
    "drmartens.com",
    "scholl-shoes.com",
    "bocage.fr",
    "andre.fr",
    "minelli.fr",
];

const BAG_SITES: &[&str] = &[
    "zalando.fr",
    "galerieslafayette.com",
    "louisvuitton.com",
    "michaelkors.fr",
    "longchamp.com",
    "eastpak.com",
    "kipling.com",
    "samsonite.fr",
    "lacoste.com",
    "fossil.com",
    "desigual.com",
    "lestropeziennes.fr",
    "lancaster.fr",
    "printemps.com",
    "sezane.com",
    "lancel.com",
];

const SHOPPING_TERMS: &str = "acheter prix boutique vente produit";

/// Merchants searched for an item type.
pub fn trusted_sites(item_type: ItemType) -> &'static [&'static str] {
    match item_type {
        ItemType::Chaussure => SHOE_SITES,
        ItemType::Sac => BAG_SITES,
        ItemType::Vetement | ItemType::Default => CLOTHING_SITES,
    }
}

/// Wrap a query with `site:` filters and shopping terms.
pub fn shopping_query(query: &str, item_type: ItemType) -> String {
    let sites = trusted_sites(item_type)
        .iter()
        .map(|site| format!("site:{site}"))
        .collect::<Vec<_>>()
        .join(" OR ");
    format!("({}) ({sites}) {SHOPPING_TERMS}", query.trim())
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    display_link: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    pagemap: Option<PageMap>,
}

#[derive(Debug, Default, Deserialize)]
struct PageMap {
    #[serde(default)]
    cse_image: Vec<ImageRef>,
    #[serde(default)]
    cse_thumbnail: Vec<ImageRef>,
}

#[derive(Debug, Deserialize)]
struct ImageRef {
    #[serde(default)]
    src: Option<String>,
}

impl From<SearchItem> for SearchCandidate {
    fn from(item: SearchItem) -> Self {
        let raw_image = item.pagemap.and_then(|pagemap| {
            pagemap
                .cse_image
                .into_iter()
                .chain(pagemap.cse_thumbnail)
                .find_map(|image| image.src.filter(|src| !src.trim().is_empty()))
        });

        SearchCandidate {
            title: item.title,
            raw_link: item.link,
            display_domain: item.display_link,
            snippet: item.snippet,
            raw_image,
        }
    }
}

#[derive(Clone)]
pub struct CustomSearchClient {
    client: Client,
    config: SearchConfig,
}

impl CustomSearchClient {
    pub fn new(config: SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FinderError::Search(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub async fn search(&self, query: &str, item_type: ItemType) -> Result<Vec<SearchCandidate>> {
        if query.trim().is_empty() {
            return Err(FinderError::Validation("Search query is empty".to_string()));
        }

        let url = format!("{}/customsearch/v1", self.config.base_url.trim_end_matches('/'));
        let q = shopping_query(query, item_type);
        let num = self.config.num_results.clamp(1, 10).to_string();
        let params = [
            ("key", self.config.api_key.as_str()),
            ("cx", self.config.engine_id.as_str()),
            ("q", q.as_str()),
            ("num", num.as_str()),
            ("lr", self.config.language.as_str()),
            ("safe", "active"),
        ];

        let mut last_error = None;
        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay = Duration::from_millis(100 * 2_u64.pow(attempt - 1));
                tokio::time::sleep(delay).await;
            }

            let response = self.client.get(&url).query(&params).send().await;

            match response {
                Ok(resp) => {
                    let status = resp.status();

                    if status.is_success() {
                        let body: SearchResponse = resp.json().await.map_err(|e| {
                            FinderError::Search(format!("Failed to parse response: {e}"))
                        })?;
                        let candidates: Vec<SearchCandidate> =
                            body.items.into_iter().map(SearchCandidate::from).collect();
                        info!(query, item_type = %item_type, results = candidates.len(), "Search completed");
                        return Ok(candidates);
                    }

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|s| s.parse().ok());
                        last_error = Some(FinderError::ApiRateLimit { retry_after });
                        continue;
                    }

                    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                        let body = resp.text().await.unwrap_or_default();
                        return Err(FinderError::ApiAuth(body));
                    }

                    if status.is_server_error() {
                        let body = resp.text().await.unwrap_or_default();
                        debug!(%status, attempt, "Search server error");
                        last_error = Some(FinderError::Search(format!(
                            "Server error {status}: {body}"
                        )));
                        continue;
                    }

                    let body = resp.text().await.unwrap_or_default();
                    return Err(FinderError::Search(format!("API error {status}: {body}")));
                }
                Err(e) => {
                    last_error = Some(FinderError::Search(format!("Request failed: {e}")));
                    continue;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| FinderError::Search("Unknown error".to_string())))
    }
}
