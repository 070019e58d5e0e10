use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target item type, tagged with the words used in search queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Chaussure,
    Sac,
    Vetement,
    #[default]
    Default,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Chaussure => "chaussure",
            ItemType::Sac => "sac",
            ItemType::Vetement => "vetement",
            ItemType::Default => "default",
        }
    }

    /// Lenient parse of a free-form item type tag.
    ///
    /// Bag words are checked before shoe words, so "sacoche" never reads as
    /// anything but a bag.
    pub fn from_tag(raw: &str) -> Self {
        let tag = raw.trim().to_lowercase();
        if tag.is_empty() || tag == "default" {
            return ItemType::Default;
        }
        if ["sac", "sacoche", "bag", "handbag", "purse"]
            .iter()
            .any(|w| tag.contains(w))
        {
            return ItemType::Sac;
        }
        if ["bottine", "chaussure", "boot", "shoe", "sneaker", "basket"]
            .iter()
            .any(|w| tag.contains(w))
        {
            return ItemType::Chaussure;
        }
        if ["vetement", "vêtement", "robe", "dress", "veste", "clothing"]
            .iter()
            .any(|w| tag.contains(w))
        {
            return ItemType::Vetement;
        }
        ItemType::Default
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ItemType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|r| ItemType::from_tag(&r)).unwrap_or_default())
    }
}

/// Coarse colour grouping used to pick curated fallback sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFamily {
    Brown,
    Black,
    Blue,
    Gray,
    White,
    Red,
    Green,
    Other,
}

impl ColorFamily {
    /// Derive the family from a colour name in either locale.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim().to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| name.contains(w));

        if has(&[
            "marron", "brun", "brown", "chocolat", "chocolate", "cognac", "camel", "cuir",
            "leather", "châtaigne", "chestnut", "tan", "taupe",
        ]) {
            ColorFamily::Brown
        } else if has(&["bleu", "blue", "navy", "marine", "cyan", "turquoise"]) {
            ColorFamily::Blue
        } else if has(&["noir", "black"]) {
            ColorFamily::Black
        } else if has(&["gris", "gray", "grey", "anthracite"]) {
            ColorFamily::Gray
        } else if has(&["blanc", "white", "beige", "cappuccino"]) {
            ColorFamily::White
        } else if has(&["rouge", "red", "rose", "pink"]) {
            ColorFamily::Red
        } else if has(&["vert", "green"]) {
            ColorFamily::Green
        } else {
            ColorFamily::Other
        }
    }
}

/// A bounded search query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub terms: Vec<String>,
    pub item_type: ItemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl SearchQuery {
    pub fn text(&self) -> String {
        self.terms.join(" ")
    }

    pub fn word_count(&self) -> usize {
        self.terms
            .iter()
            .map(|t| t.split_whitespace().count())
            .sum()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
