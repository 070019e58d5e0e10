//! Fallback combinators.
//!
//! Every place in the pipeline that can degrade (search errors, filters
//! that leave too little behind, verification misses) goes through one of
//! these so the degradation is logged the same way everywhere.

use std::fmt::Display;

/// Return the primary value, or the fallback when the primary failed.
pub fn with_fallback<T, E: Display>(
    label: &str,
    primary: Result<T, E>,
    fallback: impl FnOnce() -> T,
) -> T {
    match primary {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(stage = label, error = %e, "Falling back");
            fallback()
        }
    }
}

/// Keep `value` when `is_usable` accepts it, otherwise use the fallback.
pub fn unless<T>(
    label: &str,
    value: T,
    is_usable: impl FnOnce(&T) -> bool,
    fallback: impl FnOnce() -> T,
) -> T {
    if is_usable(&value) {
        value
    } else {
        tracing::warn!(stage = label, "Primary value not usable, falling back");
        fallback()
    }
}

/// Walk an ordered list of attempts and return the first accepted one.
///
/// Attempts are lazy; later ones never run once an earlier one succeeds.
pub async fn first_success<T, F, Fut>(attempts: impl IntoIterator<Item = F>) -> Option<T>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Option<T>>,
{
    for attempt in attempts {
        if let Some(value) = attempt().await {
            return Some(value);
        }
    }
    None
}
