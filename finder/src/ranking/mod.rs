mod curated;
mod price;
mod ranker;
mod verify;

pub use curated::CuratedSet;
pub use price::{estimated_range, extract_price};
pub use ranker::{CandidateRanker, MAX_RESULTS};
pub use verify::{HttpLinkVerifier, LinkVerifier, StaticVerifier};

use crate::links::{canonicalize, is_product_link};
use crate::models::{CandidateSource, Reachability, ResolvedCandidate, SearchCandidate};

/// Attach link and price information to a raw search hit. Reachability is
/// left `Unknown` until the ranker verifies it.
pub fn resolve_candidate(candidate: SearchCandidate) -> ResolvedCandidate {
    let canonical_link = canonicalize(&candidate.raw_link);
    let is_direct_product_link =
        is_product_link(&candidate.raw_link) || is_product_link(&canonical_link);

    let price = extract_price(&candidate.title, &candidate.snippet);
    let estimated_range = match price {
        Some(_) => None,
        None => Some(estimated_range(&candidate.title, &candidate.snippet)),
    };

    ResolvedCandidate {
        candidate,
        canonical_link,
        is_direct_product_link,
        reachability: Reachability::Unknown,
        price,
        estimated_range,
        source: CandidateSource::Search,
    }
}
