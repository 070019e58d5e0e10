//! Wire types for the HTTP surface that have no domain counterpart.

use serde::{Deserialize, Serialize};

use crate::models::{ItemType, ResolvedCandidate};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub item_type: ItemType,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    pub item_type: ItemType,
    pub results: Vec<ResolvedCandidate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClearCacheResponse {
    pub cleared: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    /// True when search credentials are missing and results come from
    /// curated data only.
    pub degraded: bool,
}
