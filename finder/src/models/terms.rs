use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermCategory {
    Clothing,
    Shoes,
    Bags,
    Accessories,
    Materials,
    Brands,
    Styles,
}

impl TermCategory {
    pub const ALL: [TermCategory; 7] = [
        TermCategory::Clothing,
        TermCategory::Shoes,
        TermCategory::Bags,
        TermCategory::Accessories,
        TermCategory::Materials,
        TermCategory::Brands,
        TermCategory::Styles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TermCategory::Clothing => "clothing",
            TermCategory::Shoes => "shoes",
            TermCategory::Bags => "bags",
            TermCategory::Accessories => "accessories",
            TermCategory::Materials => "materials",
            TermCategory::Brands => "brands",
            TermCategory::Styles => "styles",
        }
    }
}

/// A recognized fashion term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FashionTerm {
    /// Dictionary key (lower case).
    pub term: String,
    pub category: TermCategory,
    pub confidence: f32,
    /// Locale rendering used in search queries.
    pub translation: String,
    /// Compound item this term was inferred from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<String>,
}

impl FashionTerm {
    pub fn is_multi_word(&self) -> bool {
        self.term.split_whitespace().nth(1).is_some()
    }
}

/// Extracted terms grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FashionTaxonomy {
    pub clothing: Vec<FashionTerm>,
    pub shoes: Vec<FashionTerm>,
    pub bags: Vec<FashionTerm>,
    pub accessories: Vec<FashionTerm>,
    pub materials: Vec<FashionTerm>,
    pub brands: Vec<FashionTerm>,
    pub styles: Vec<FashionTerm>,
}

impl FashionTaxonomy {
    pub fn get(&self, category: TermCategory) -> &[FashionTerm] {
        match category {
            TermCategory::Clothing => &self.clothing,
            TermCategory::Shoes => &self.shoes,
            TermCategory::Bags => &self.bags,
            TermCategory::Accessories => &self.accessories,
            TermCategory::Materials => &self.materials,
            TermCategory::Brands => &self.brands,
            TermCategory::Styles => &self.styles,
        }
    }

    fn get_mut(&mut self, category: TermCategory) -> &mut Vec<FashionTerm> {
        match category {
            TermCategory::Clothing => &mut self.clothing,
            TermCategory::Shoes => &mut self.shoes,
            TermCategory::Bags => &mut self.bags,
            TermCategory::Accessories => &mut self.accessories,
            TermCategory::Materials => &mut self.materials,
            TermCategory::Brands => &mut self.brands,
            TermCategory::Styles => &mut self.styles,
        }
    }

    pub fn push(&mut self, term: FashionTerm) {
        self.get_mut(term.category).push(term);
    }

    pub fn is_empty(&self) -> bool {
        TermCategory::ALL.iter().all(|c| self.get(*c).is_empty())
    }

    pub fn len(&self) -> usize {
        TermCategory::ALL.iter().map(|c| self.get(*c).len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FashionTerm> {
        TermCategory::ALL.into_iter().flat_map(|c| self.get(c).iter())
    }

    /// Sort every category by descending confidence and keep the first
    /// (most confident) occurrence of each term.
    pub fn normalize(&mut self) {
        for category in TermCategory::ALL {
            let terms = self.get_mut(category);
            terms.sort_by(|a, b| {
                b.confidence
                    .partial_cmp(&a.confidence)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            let mut seen = HashSet::new();
            terms.retain(|t| seen.insert(t.term.clone()));
        }
    }
}
