//! Price extraction from search snippets.
//!
//! Only prices present in the text are reported. Candidates without one get
//! a typical range for their product type, kept apart from the price.

use regex::Regex;

use crate::models::{Currency, Money, PriceRange};

/// An amount with optional thousands grouping and two decimals.
const AMOUNT: &str = r"\d{1,3}(?:[.,\x{a0}\x{202f} ]\d{3})+(?:[.,]\d{2})?|\d+(?:[.,]\d{2})?";

lazy_static::lazy_static! {
    static ref EUR_FIRST: Regex =
        Regex::new(&format!(r"(?i)(€|\bEUR\b|\beuros?\b)[\s.]?({AMOUNT})")).unwrap();
    static ref USD_FIRST: Regex =
        Regex::new(&format!(r"(?i)(\$|\bUSD\b|\bdollars?\b)[\s.]?({AMOUNT})")).unwrap();
    static ref GBP_FIRST: Regex =
        Regex::new(&format!(r"(?i)(£|\bGBP\b|\blivres?\b)[\s.]?({AMOUNT})")).unwrap();
    static ref AMOUNT_FIRST: Regex =
        Regex::new(&format!(r"(?i)({AMOUNT})[\s.]?(€|EUR\b|USD\b|\$|£|GBP\b)")).unwrap();
    static ref AMOUNT_EURO: Regex = Regex::new(&format!(r"({AMOUNT})\s?€")).unwrap();
}

/// Drop grouping separators and write the decimal separator as a dot.
/// A separator counts as decimal only when exactly two digits follow it.
fn normalize_amount(raw: &str) -> String {
    let decimal_at = raw
        .rfind(['.', ','])
        .filter(|&i| raw.len() - i - 1 == 2);

    raw.char_indices()
        .filter_map(|(i, ch)| {
            if ch.is_ascii_digit() {
                Some(ch)
            } else if Some(i) == decimal_at {
                Some('.')
            } else {
                None
            }
        })
        .collect()
}

fn money(amount: &str, currency: Currency) -> Money {
    Money {
        amount: normalize_amount(amount),
        currency,
    }
}

fn currency_of(token: &str) -> Option<Currency> {
    match token.to_uppercase().as_str() {
        "€" | "EUR" => Some(Currency::Eur),
        "$" | "USD" => Some(Currency::Usd),
        "£" | "GBP" => Some(Currency::Gbp),
        _ => None,
    }
}

/// First price found in `title` then `snippet`, trying EUR, USD and GBP
/// prefixes before amount-first forms.
pub fn extract_price(title: &str, snippet: &str) -> Option<Money> {
    let combined = format!("{title} {snippet}");

    let prefixed = [
        (&*EUR_FIRST, Currency::Eur),
        (&*USD_FIRST, Currency::Usd),
        (&*GBP_FIRST, Currency::Gbp),
    ];
    for (pattern, currency) in prefixed {
        if let Some(amount) = pattern.captures(&combined).and_then(|c| c.get(2)) {
            return Some(money(amount.as_str(), currency));
        }
    }

    if let Some(captures) = AMOUNT_FIRST.captures(&combined) {
        if let (Some(amount), Some(currency)) = (
            captures.get(1),
            captures.get(2).and_then(|c| currency_of(c.as_str())),
        ) {
            return Some(money(amount.as_str(), currency));
        }
    }

    AMOUNT_EURO
        .captures(&combined)
        .and_then(|c| c.get(1))
        .map(|amount| money(amount.as_str(), Currency::Eur))
}

/// Typical price bracket for the product described by `title` and `snippet`.
pub fn estimated_range(title: &str, snippet: &str) -> PriceRange {
    let combined = format!("{title} {snippet}").to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| combined.contains(w));

    let (min, max) = if has(&["chaussure", "shoe", "boot", "bottine", "basket", "sneaker"]) {
        (80, 229)
    } else if has(&["sac", "bag", "sacoche", "bandoulière"]) {
        (100, 199)
    } else if has(&["veste", "jacket", "manteau", "coat", "blouson"]) {
        (100, 299)
    } else {
        (30, 79)
    };

    PriceRange {
        min,
        max,
        currency: Currency::Eur,
    }
}
