use std::env;

use crate::ranking::MAX_RESULTS;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Read a non-empty string variable. Blank values count as unset.
fn env_non_empty(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Keep the result count within what curated padding can fill.
fn bounded_result_count(raw: usize) -> usize {
    let bounded = raw.clamp(1, MAX_RESULTS);
    if bounded != raw {
        tracing::warn!(
            "RESULT_COUNT {} outside 1..={}. Using {}.",
            raw,
            MAX_RESULTS,
            bounded
        );
    }
    bounded
}

pub const DEFAULT_SEARCH_BASE_URL: &str = "https://www.googleapis.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    /// `None` when credentials are missing; the pipeline then runs in
    /// degraded mode on curated data.
    pub search: Option<SearchConfig>,
    pub query: QueryConfig,
    pub ranking: RankingConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Google Custom Search credentials and request shaping.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub api_key: String,
    pub engine_id: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub num_results: u32,
    pub language: String,
}

#[derive(Debug, Clone)]
pub struct QueryConfig {
    pub max_words: usize,
    pub fallback_query: String,
    pub commercial_suffix: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_words: 8,
            fallback_query: "vêtement mode acheter".to_string(),
            commercial_suffix: "acheter".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RankingConfig {
    pub result_count: usize,
    pub min_filtered: usize,
    pub verify_top_n: usize,
    pub verify_concurrency: usize,
    pub verify_timeout_secs: u64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            result_count: 5,
            min_filtered: 5,
            verify_top_n: 10,
            verify_concurrency: 5,
            verify_timeout_secs: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub max_size: usize,
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: 100,
            ttl_secs: 3600,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let query_defaults = QueryConfig::default();
        let ranking_defaults = RankingConfig::default();
        let cache_defaults = CacheConfig::default();

        Self {
            server: ServerConfig {
                host: env::var("FINDER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("FINDER_PORT", 5000),
            },
            search: match (
                env_non_empty("GOOGLE_CUSTOM_SEARCH_API_KEY"),
                env_non_empty("GOOGLE_CUSTOM_SEARCH_ENGINE_ID"),
            ) {
                (Some(api_key), Some(engine_id)) => Some(SearchConfig {
                    api_key,
                    engine_id,
                    base_url: env::var("SEARCH_BASE_URL")
                        .unwrap_or_else(|_| DEFAULT_SEARCH_BASE_URL.to_string()),
                    timeout_secs: parse_env_or("SEARCH_TIMEOUT", 10),
                    max_retries: parse_env_or("SEARCH_MAX_RETRIES", 1),
                    num_results: parse_env_or("SEARCH_NUM_RESULTS", 10),
                    language: env::var("SEARCH_LANGUAGE").unwrap_or_else(|_| "lang_fr".to_string()),
                }),
                _ => None,
            },
            query: QueryConfig {
                max_words: parse_env_or("QUERY_MAX_WORDS", query_defaults.max_words),
                fallback_query: env_non_empty("QUERY_FALLBACK")
                    .unwrap_or(query_defaults.fallback_query),
                commercial_suffix: env_non_empty("QUERY_COMMERCIAL_SUFFIX")
                    .unwrap_or(query_defaults.commercial_suffix),
            },
            ranking: RankingConfig {
                result_count: bounded_result_count(parse_env_or(
                    "RESULT_COUNT",
                    ranking_defaults.result_count,
                )),
                min_filtered: parse_env_or(
                    "MIN_FILTERED_CANDIDATES",
                    ranking_defaults.min_filtered,
                ),
                verify_top_n: parse_env_or("VERIFY_TOP_N", ranking_defaults.verify_top_n),
                verify_concurrency: parse_env_or(
                    "VERIFY_CONCURRENCY",
                    ranking_defaults.verify_concurrency,
                ),
                verify_timeout_secs: parse_env_or(
                    "VERIFY_TIMEOUT_SECS",
                    ranking_defaults.verify_timeout_secs,
                ),
            },
            cache: CacheConfig {
                max_size: parse_env_or("CACHE_MAX_SIZE", cache_defaults.max_size),
                ttl_secs: parse_env_or("CACHE_TTL_SECS", cache_defaults.ttl_secs),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }

    /// True when the search collaborator has no credentials.
    pub fn is_degraded(&self) -> bool {
        self.search.is_none()
    }
}
