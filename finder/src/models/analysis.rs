use serde::{Deserialize, Serialize};

use super::{ClassifiedColor, FashionTaxonomy, ItemType, SearchQuery};

/// Output of `analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub classified_colors: Vec<ClassifiedColor>,
    pub color_description: String,
    pub fashion_terms: FashionTaxonomy,
    pub search_query: SearchQuery,
    pub item_type: ItemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_object: Option<String>,
}

impl AnalysisResult {
    /// Locale name of the dominant colour, if any.
    pub fn primary_color(&self) -> Option<&str> {
        self.classified_colors
            .first()
            .map(|c| c.name_local.as_str())
    }
}
