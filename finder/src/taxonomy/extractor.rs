use crate::models::{FashionTaxonomy, FashionTerm, Label, TermCategory};

use super::dictionary::{self, DictionaryEntry};

const BRAND_BOOST: f32 = 1.2;
const DERIVED_WEIGHT: f32 = 0.8;

fn normalize(description: &str) -> String {
    description
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn clean_word(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric() && c != '-')
}

fn term_from(entry: &DictionaryEntry, confidence: f32, derived_from: Option<&str>) -> FashionTerm {
    FashionTerm {
        term: entry.key.to_string(),
        category: entry.category,
        confidence: confidence.clamp(0.0, 1.0),
        translation: entry.translation.to_string(),
        derived_from: derived_from.map(str::to_string),
    }
}

/// Classify raw vision labels into the fashion taxonomy.
///
/// The whole description and each of its words are matched separately, so
/// "chelsea boot" yields both "chelsea boot" and "boot". Brands are only
/// recognised as whole tokens. Labels that match nothing are ignored.
pub fn extract(labels: &[Label]) -> FashionTaxonomy {
    let mut taxonomy = FashionTaxonomy::default();

    for label in labels {
        let text = normalize(&label.description);
        if text.is_empty() {
            continue;
        }

        for brand in dictionary::brands_in(&text) {
            taxonomy.push(FashionTerm {
                term: brand.to_lowercase(),
                category: TermCategory::Brands,
                confidence: (label.score * BRAND_BOOST).min(1.0),
                translation: brand.to_string(),
                derived_from: None,
            });
        }

        let words: Vec<&str> = text
            .split(' ')
            .map(clean_word)
            .filter(|w| !w.is_empty())
            .collect();

        let mut candidates: Vec<&str> = Vec::with_capacity(words.len() + 1);
        if words.len() > 1 {
            candidates.push(text.as_str());
        }
        candidates.extend(words.iter().copied());

        for candidate in candidates {
            if let Some((entry, kind)) = dictionary::lookup(candidate) {
                tracing::trace!(label = %text, term = entry.key, ?kind, "Matched fashion term");
                taxonomy.push(term_from(entry, label.score * kind.weight(), None));
            }
        }
    }

    expand_compound_items(&mut taxonomy);
    taxonomy.normalize();
    taxonomy
}

/// Add the terms implied by recognised compound items, tagged with the
/// compound they came from.
pub fn expand_compound_items(taxonomy: &mut FashionTaxonomy) {
    let derived: Vec<FashionTerm> = taxonomy
        .iter()
        .filter_map(|parent| {
            dictionary::compound_expansion(&parent.term).map(|keys| (parent, keys))
        })
        .flat_map(|(parent, keys)| {
            keys.iter().filter_map(move |key| {
                dictionary::entry(key).map(|entry| {
                    term_from(
                        entry,
                        parent.confidence * DERIVED_WEIGHT,
                        Some(parent.term.as_str()),
                    )
                })
            })
        })
        .collect();

    for term in derived {
        taxonomy.push(term);
    }
}
