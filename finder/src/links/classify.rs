//! Product page versus listing page classification.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::domain::{domain_matches, has_path, resolve_domain};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Listing,
    Product,
}

lazy_static::lazy_static! {
    /// Search, category, cart and account pages, in English and French.
    static ref NON_PRODUCT: Vec<Regex> = [
        r"(?i)/search\b",
        r"(?i)/recherche\b",
        r"(?i)[?&](q|query|search)=",
        r"(?i)/categor(y|ie|ies)/",
        r"(?i)/collections?/",
        r"(?i)/cat/",
        r"(?i)/(cart|panier)\b",
        r"(?i)/(account|compte|mon-compte)\b",
        r"(?i)/(login|connexion|signin)\b",
        r"(?i)/(nouveautes|soldes|sale)/",
        r"(?i)/(homme|femme|enfant)/",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    static ref PRODUCT: Vec<Regex> = [
        r"(?i)/p/",
        r"(?i)/products?/",
        r"(?i)/article/",
        r"(?i)/prd/",
        r"(?i)productpage\.",
        r"/dp/[A-Z0-9]{10}",
        r"[0-9]{5,}",
        r"(?i)\.html(?:$|[?#])",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();
}

/// Single-category shops whose deep pages are product pages.
const SPECIALTY_RETAILERS: &[&str] = &[
    "sarenza.com",
    "spartoo.com",
    "drmartens.com",
    "clarks.fr",
    "timberland.fr",
    "redwingshoes.com",
    "longchamp.com",
    "lancaster.fr",
    "letanneur.com",
    "thebridgeonlineshop.com",
];

pub fn classify(url: &str) -> PageKind {
    let url = url.trim();
    if url.is_empty() {
        return PageKind::Listing;
    }

    if is_listing_page(url) {
        return PageKind::Listing;
    }

    if PRODUCT.iter().any(|re| re.is_match(url)) {
        return PageKind::Product;
    }

    let domain = resolve_domain(url);
    if SPECIALTY_RETAILERS
        .iter()
        .any(|key| domain_matches(&domain, key))
        && has_path(url)
    {
        return PageKind::Product;
    }

    PageKind::Listing
}

/// True when the URL matches a search, category, cart or account pattern.
pub fn is_listing_page(url: &str) -> bool {
    NON_PRODUCT.iter().any(|re| re.is_match(url))
}

/// True when the URL most likely lands on a single product.
pub fn is_product_link(url: &str) -> bool {
    classify(url) == PageKind::Product
}
