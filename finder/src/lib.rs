//! Image-to-product matching: turns image-analysis output into a bounded
//! search query, and raw search hits into a fixed-size list of verified
//! product deep links.

pub mod api;
pub mod cache;
pub mod color;
pub mod config;
pub mod degrade;
pub mod error;
pub mod links;
pub mod models;
pub mod query;
pub mod ranking;
pub mod search;
pub mod services;
pub mod taxonomy;

pub use error::{FinderError, Result};
pub use services::MatchingPipeline;
