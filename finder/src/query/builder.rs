use std::collections::HashSet;

use crate::config::QueryConfig;
use crate::degrade;
use crate::models::{ClassifiedColor, FashionTaxonomy, FashionTerm, ItemType, SearchQuery, TermCategory};

const MAX_ITEM_TERMS: usize = 3;
const MAX_BRANDS: usize = 1;
const MAX_MATERIALS: usize = 2;
const MAX_COLORS: usize = 2;
const MAX_STYLES: usize = 2;
/// Below this pixel fraction the dominant colour may yield to a larger one.
const MIN_DOMINANT_FRACTION: f32 = 0.1;

/// Accumulates query words under a hard cap, dropping repeated tokens.
struct WordBudget {
    cap: usize,
    seen: HashSet<String>,
    terms: Vec<String>,
}

impl WordBudget {
    fn new(cap: usize) -> Self {
        Self {
            cap,
            seen: HashSet::new(),
            terms: Vec::new(),
        }
    }

    fn used(&self) -> usize {
        self.seen.len()
    }

    /// Add the unseen tokens of `phrase` while room is left.
    fn push(&mut self, phrase: &str) {
        let mut kept = Vec::new();
        for token in phrase.split_whitespace() {
            if self.used() >= self.cap {
                break;
            }
            if self.seen.insert(token.to_lowercase()) {
                kept.push(token);
            }
        }
        if !kept.is_empty() {
            self.terms.push(kept.join(" "));
        }
    }
}

#[derive(Debug, Clone)]
pub struct QueryBuilder {
    config: QueryConfig,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(QueryConfig::default())
    }
}

impl QueryBuilder {
    pub fn new(config: QueryConfig) -> Self {
        Self { config }
    }

    fn max_words(&self) -> usize {
        self.config.max_words.max(1)
    }

    /// Category among shoes, bags and clothing with the most confident term.
    /// Ties go to shoes, then bags.
    pub fn dominant_category(taxonomy: &FashionTaxonomy) -> Option<TermCategory> {
        let mut best: Option<(TermCategory, f32)> = None;
        for category in [TermCategory::Shoes, TermCategory::Bags, TermCategory::Clothing] {
            if let Some(top) = taxonomy.get(category).first() {
                if best.map_or(true, |(_, confidence)| top.confidence > confidence) {
                    best = Some((category, top.confidence));
                }
            }
        }
        best.map(|(category, _)| category)
    }

    pub fn build(&self, taxonomy: &FashionTaxonomy, colors: &[ClassifiedColor]) -> SearchQuery {
        let color_tag = Self::ordered_colors(colors)
            .first()
            .map(|c| c.name_local.clone());

        let built = Self::dominant_category(taxonomy)
            .map(|category| self.compose(taxonomy, category, colors, color_tag.clone()));

        degrade::unless(
            "query.build",
            built,
            |q| q.as_ref().is_some_and(|q| !q.terms.is_empty()),
            || Some(self.fallback(color_tag.clone())),
        )
        .unwrap_or_else(|| self.fallback(color_tag))
    }

    fn compose(
        &self,
        taxonomy: &FashionTaxonomy,
        category: TermCategory,
        colors: &[ClassifiedColor],
        color_tag: Option<String>,
    ) -> SearchQuery {
        let cap = self.max_words();
        let suffix = self.config.commercial_suffix.trim();
        let reserved = usize::from(!suffix.is_empty() && cap > 1);
        let mut budget = WordBudget::new(cap - reserved);

        for term in Self::item_terms(taxonomy.get(category)) {
            budget.push(&term.translation);
        }
        for brand in taxonomy.brands.iter().take(MAX_BRANDS) {
            budget.push(&brand.translation);
        }
        for material in taxonomy.materials.iter().take(MAX_MATERIALS) {
            budget.push(&material.translation);
        }
        for color in Self::ordered_colors(colors).iter().take(MAX_COLORS) {
            budget.push(&color.name_local.to_lowercase());
        }
        for style in taxonomy.styles.iter().take(MAX_STYLES) {
            budget.push(&style.translation);
        }

        budget.cap = cap;
        budget.push(suffix);

        let query = SearchQuery {
            terms: budget.terms,
            item_type: match category {
                TermCategory::Shoes => ItemType::Chaussure,
                TermCategory::Bags => ItemType::Sac,
                _ => ItemType::Vetement,
            },
            color: color_tag,
        };
        tracing::debug!(query = %query, item_type = %query.item_type, "Built search query");
        query
    }

    /// Up to three terms; multi-word and derived "details" come before
    /// single-word "type" terms.
    fn item_terms(terms: &[FashionTerm]) -> Vec<&FashionTerm> {
        let (details, types): (Vec<&FashionTerm>, Vec<&FashionTerm>) = terms
            .iter()
            .partition(|t| t.is_multi_word() || t.derived_from.is_some());
        details
            .into_iter()
            .chain(types)
            .take(MAX_ITEM_TERMS)
            .collect()
    }

    /// Colours in query order. A tiny dominant colour yields to the
    /// secondary with the largest pixel fraction when that one is bigger.
    fn ordered_colors(colors: &[ClassifiedColor]) -> Vec<&ClassifiedColor> {
        let mut ordered: Vec<&ClassifiedColor> = colors.iter().collect();
        let Some(dominant) = ordered.first().copied() else {
            return ordered;
        };

        if dominant.pixel_fraction < MIN_DOMINANT_FRACTION {
            let larger = ordered
                .iter()
                .enumerate()
                .skip(1)
                .filter(|(_, c)| c.pixel_fraction > dominant.pixel_fraction)
                .max_by(|(_, a), (_, b)| {
                    a.pixel_fraction
                        .partial_cmp(&b.pixel_fraction)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|(idx, _)| idx);
            if let Some(idx) = larger {
                let secondary = ordered.remove(idx);
                ordered.insert(0, secondary);
            }
        }
        ordered
    }

    fn fallback(&self, color: Option<String>) -> SearchQuery {
        let mut budget = WordBudget::new(self.max_words());
        budget.push(&self.config.fallback_query);
        SearchQuery {
            terms: budget.terms,
            item_type: ItemType::Default,
            color,
        }
    }
}
