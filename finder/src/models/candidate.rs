use serde::{Deserialize, Serialize};
use std::fmt;

/// One raw search engine hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCandidate {
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "link")]
    pub raw_link: String,
    #[serde(default, alias = "displayLink")]
    pub display_domain: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default, alias = "image", skip_serializing_if = "Option::is_none")]
    pub raw_image: Option<String>,
}

impl SearchCandidate {
    /// True when the candidate carries an image distinct from its own link.
    pub fn has_usable_image(&self) -> bool {
        match self.raw_image.as_deref().map(str::trim) {
            Some(image) if !image.is_empty() => image != self.raw_link,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Usd,
    Gbp,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Usd => "$",
            Currency::Gbp => "£",
        }
    }
}

/// A price actually found in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Decimal amount with a dot separator, e.g. "159.95".
    pub amount: String,
    pub currency: Currency,
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.currency.symbol(), self.amount)
    }
}

/// Typical price bracket for a product type. Never presented as a real price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
    pub currency: Currency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reachability {
    Reachable,
    Unreachable,
    #[default]
    Unknown,
}

impl Reachability {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Reachability::Reachable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSource {
    #[default]
    Search,
    Curated,
}

/// A search candidate after link resolution (and, later, verification).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCandidate {
    #[serde(flatten)]
    pub candidate: SearchCandidate,
    pub canonical_link: String,
    pub is_direct_product_link: bool,
    #[serde(default)]
    pub reachability: Reachability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_range: Option<PriceRange>,
    #[serde(default)]
    pub source: CandidateSource,
}

impl ResolvedCandidate {
    pub fn title(&self) -> &str {
        &self.candidate.title
    }

    pub fn is_reachable(&self) -> bool {
        self.reachability.is_reachable()
    }

    pub fn has_price(&self) -> bool {
        self.price.is_some()
    }
}
