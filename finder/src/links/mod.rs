//! URL classification and canonicalization. Nothing here fails: unparseable
//! input classifies as a listing and canonicalizes to itself.

mod classify;
mod domain;
mod patterns;

pub use classify::{classify, is_listing_page, is_product_link, PageKind};
pub use domain::{domain_matches, resolve_domain};
pub use patterns::{alternative_link, canonicalize};
