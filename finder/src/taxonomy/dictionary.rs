//! Closed fashion vocabulary.
//!
//! Keys are lower case and singular; plural and compound forms are reached
//! through substring containment or the trailing-"s" fallback.

use std::collections::HashMap;

use crate::models::TermCategory;

/// Keys shorter than this never match by containment.
const MIN_CONTAINED_KEY_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub key: &'static str,
    pub category: TermCategory,
    /// French rendering used in queries.
    pub translation: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Contained,
    Singular,
}

impl MatchKind {
    /// Confidence multiplier applied to the label score.
    pub fn weight(&self) -> f32 {
        match self {
            MatchKind::Exact => 1.0,
            MatchKind::Contained | MatchKind::Singular => 0.85,
        }
    }
}

use TermCategory::{Accessories, Bags, Clothing, Materials, Shoes, Styles};

#[rustfmt::skip]
const ENTRIES: &[(&str, TermCategory, &str)] = &[
    // tops
    ("shirt", Clothing, "chemise"),
    ("t-shirt", Clothing, "t-shirt"),
    ("tshirt", Clothing, "t-shirt"),
    ("top", Clothing, "haut"),
    ("blouse", Clothing, "chemisier"),
    ("sweater", Clothing, "pull"),
    ("jumper", Clothing, "pull"),
    ("sweatshirt", Clothing, "sweat"),
    ("hoodie", Clothing, "sweat à capuche"),
    ("cardigan", Clothing, "gilet"),
    ("tank top", Clothing, "débardeur"),
    ("jersey", Clothing, "maillot"),
    // bottoms
    ("pants", Clothing, "pantalon"),
    ("trousers", Clothing, "pantalon"),
    ("jeans", Clothing, "jean"),
    ("shorts", Clothing, "short"),
    ("skirt", Clothing, "jupe"),
    ("leggings", Clothing, "legging"),
    // dresses
    ("dress", Clothing, "robe"),
    ("gown", Clothing, "robe de soirée"),
    ("cocktail dress", Clothing, "robe de cocktail"),
    ("jumpsuit", Clothing, "combinaison"),
    ("romper", Clothing, "combishort"),
    ("playsuit", Clothing, "combishort"),
    // outerwear
    ("jacket", Clothing, "veste"),
    ("coat", Clothing, "manteau"),
    ("trench coat", Clothing, "trench"),
    ("denim jacket", Clothing, "veste en jean"),
    ("leather jacket", Clothing, "veste en cuir"),
    ("blazer", Clothing, "blazer"),
    ("suit", Clothing, "costume"),
    ("raincoat", Clothing, "imperméable"),
    ("vest", Clothing, "gilet"),
    ("waistcoat", Clothing, "gilet"),
    ("poncho", Clothing, "poncho"),
    ("cape", Clothing, "cape"),
    // underwear
    ("underwear", Clothing, "sous-vêtements"),
    ("lingerie", Clothing, "lingerie"),
    ("boxer", Clothing, "boxer"),
    // french clothing words
    ("robe", Clothing, "robe"),
    ("veste", Clothing, "veste"),
    ("manteau", Clothing, "manteau"),
    ("chemise", Clothing, "chemise"),
    ("pantalon", Clothing, "pantalon"),
    ("jupe", Clothing, "jupe"),
    ("pull", Clothing, "pull"),
    // shoes
    ("shoe", Shoes, "chaussures"),
    ("footwear", Shoes, "chaussures"),
    ("sneaker", Shoes, "baskets"),
    ("boot", Shoes, "bottes"),
    ("ankle boot", Shoes, "bottines"),
    ("chelsea boot", Shoes, "chelsea boots"),
    ("desert boot", Shoes, "desert boots"),
    ("combat boot", Shoes, "rangers"),
    ("running shoe", Shoes, "chaussures de running"),
    ("high heel", Shoes, "escarpins"),
    ("heel", Shoes, "talons"),
    ("sandal", Shoes, "sandales"),
    ("loafer", Shoes, "mocassins"),
    ("slipper", Shoes, "chaussons"),
    ("espadrille", Shoes, "espadrilles"),
    ("chaussure", Shoes, "chaussures"),
    ("bottine", Shoes, "bottines"),
    ("botte", Shoes, "bottes"),
    ("basket", Shoes, "baskets"),
    // bags
    ("bag", Bags, "sac"),
    ("handbag", Bags, "sac à main"),
    ("purse", Bags, "sac à main"),
    ("backpack", Bags, "sac à dos"),
    ("briefcase", Bags, "porte-documents"),
    ("clutch", Bags, "pochette"),
    ("tote", Bags, "cabas"),
    ("satchel", Bags, "sacoche"),
    ("messenger bag", Bags, "sacoche"),
    ("crossbody bag", Bags, "sac bandoulière"),
    ("luggage", Bags, "bagage"),
    ("sac", Bags, "sac"),
    ("sacoche", Bags, "sacoche"),
    // accessories
    ("wallet", Accessories, "portefeuille"),
    ("belt", Accessories, "ceinture"),
    ("hat", Accessories, "chapeau"),
    ("cap", Accessories, "casquette"),
    ("scarf", Accessories, "écharpe"),
    ("glove", Accessories, "gants"),
    ("tie", Accessories, "cravate"),
    ("bow tie", Accessories, "nœud papillon"),
    ("watch", Accessories, "montre"),
    ("jewelry", Accessories, "bijoux"),
    ("necklace", Accessories, "collier"),
    ("bracelet", Accessories, "bracelet"),
    ("ring", Accessories, "bague"),
    ("earring", Accessories, "boucles d'oreilles"),
    ("sunglasses", Accessories, "lunettes de soleil"),
    // materials
    ("leather", Materials, "cuir"),
    ("cotton", Materials, "coton"),
    ("wool", Materials, "laine"),
    ("silk", Materials, "soie"),
    ("denim", Materials, "denim"),
    ("linen", Materials, "lin"),
    ("polyester", Materials, "polyester"),
    ("nylon", Materials, "nylon"),
    ("suede", Materials, "daim"),
    ("velvet", Materials, "velours"),
    ("satin", Materials, "satin"),
    ("cashmere", Materials, "cachemire"),
    ("canvas", Materials, "toile"),
    ("cuir", Materials, "cuir"),
    ("daim", Materials, "daim"),
    // styles and patterns
    ("formal", Styles, "formel"),
    ("casual", Styles, "décontracté"),
    ("sportswear", Styles, "sport"),
    ("athletic", Styles, "sport"),
    ("elegant", Styles, "élégant"),
    ("vintage", Styles, "vintage"),
    ("retro", Styles, "rétro"),
    ("minimalist", Styles, "minimaliste"),
    ("bohemian", Styles, "bohème"),
    ("boho", Styles, "bohème"),
    ("streetwear", Styles, "streetwear"),
    ("chic", Styles, "chic"),
    ("preppy", Styles, "preppy"),
    ("punk", Styles, "punk"),
    ("striped", Styles, "rayé"),
    ("plaid", Styles, "écossais"),
    ("floral", Styles, "fleuri"),
    ("polka dot", Styles, "à pois"),
    ("animal print", Styles, "imprimé animal"),
];

/// Brand keys and their display form.
#[rustfmt::skip]
const BRANDS: &[(&str, &str)] = &[
    ("nike", "Nike"), ("adidas", "Adidas"), ("puma", "Puma"), ("converse", "Converse"),
    ("vans", "Vans"), ("clarks", "Clarks"), ("timberland", "Timberland"),
    ("dr. martens", "Dr. Martens"), ("dr martens", "Dr. Martens"), ("red wing", "Red Wing"),
    ("ugg", "UGG"), ("geox", "Geox"), ("zara", "Zara"), ("h&m", "H&M"), ("mango", "Mango"),
    ("lacoste", "Lacoste"), ("ralph lauren", "Ralph Lauren"), ("tommy hilfiger", "Tommy Hilfiger"),
    ("levi's", "Levi's"), ("longchamp", "Longchamp"), ("fossil", "Fossil"),
    ("michael kors", "Michael Kors"), ("louis vuitton", "Louis Vuitton"), ("gucci", "Gucci"),
    ("prada", "Prada"), ("chanel", "Chanel"), ("lancaster", "Lancaster"),
    ("le tanneur", "Le Tanneur"), ("eastpak", "Eastpak"), ("kipling", "Kipling"),
];

/// Compound items and the dictionary keys they imply.
#[rustfmt::skip]
const COMPOUND_ITEMS: &[(&str, &[&str])] = &[
    ("chelsea boot", &["ankle boot", "leather", "elegant"]),
    ("desert boot", &["ankle boot", "suede", "casual"]),
    ("combat boot", &["boot", "leather", "punk"]),
    ("running shoe", &["sneaker", "athletic"]),
    ("messenger bag", &["satchel", "leather", "casual"]),
    ("crossbody bag", &["bag", "casual"]),
    ("trench coat", &["coat", "elegant"]),
    ("denim jacket", &["jacket", "denim", "casual"]),
    ("leather jacket", &["jacket", "leather", "streetwear"]),
    ("cocktail dress", &["dress", "elegant", "chic"]),
];

lazy_static::lazy_static! {
    static ref DICTIONARY: HashMap<&'static str, DictionaryEntry> = ENTRIES
        .iter()
        .map(|(key, category, translation)| {
            (*key, DictionaryEntry { key: *key, category: *category, translation: *translation })
        })
        .collect();

    /// Containment candidates, longest first so the most specific key wins.
    static ref CONTAINMENT_ORDER: Vec<&'static DictionaryEntry> = {
        let mut entries: Vec<&'static DictionaryEntry> = DICTIONARY
            .values()
            .filter(|e| e.key.chars().count() >= MIN_CONTAINED_KEY_LEN)
            .collect();
        entries.sort_by(|a, b| {
            b.key.chars().count().cmp(&a.key.chars().count()).then(a.key.cmp(b.key))
        });
        entries
    };
}

pub fn entry(key: &str) -> Option<&'static DictionaryEntry> {
    DICTIONARY.get(key)
}

/// Match a normalized (lower case, trimmed) string against the dictionary.
pub fn lookup(text: &str) -> Option<(&'static DictionaryEntry, MatchKind)> {
    if text.is_empty() {
        return None;
    }

    if let Some(found) = DICTIONARY.get(text) {
        return Some((found, MatchKind::Exact));
    }

    if let Some(found) = CONTAINMENT_ORDER.iter().find(|e| text.contains(e.key)) {
        return Some((found, MatchKind::Contained));
    }

    text.strip_suffix('s')
        .and_then(|singular| DICTIONARY.get(singular))
        .map(|found| (found, MatchKind::Singular))
}

/// Brands named in `text` as whole tokens, with their display form.
pub fn brands_in(text: &str) -> Vec<&'static str> {
    let padded = format!(" {text} ");
    BRANDS
        .iter()
        .filter(|(key, _)| padded.contains(&format!(" {key} ")))
        .map(|(_, display)| *display)
        .fold(Vec::new(), |mut acc, display| {
            if !acc.contains(&display) {
                acc.push(display);
            }
            acc
        })
}

/// Keys implied by a compound item, if `key` is one.
pub fn compound_expansion(key: &str) -> Option<&'static [&'static str]> {
    COMPOUND_ITEMS
        .iter()
        .find(|(compound, _)| *compound == key)
        .map(|(_, derived)| *derived)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let (found, kind) = lookup("boot").unwrap();
        assert_eq!(found.category, TermCategory::Shoes);
        assert_eq!(kind, MatchKind::Exact);
    }

    #[test]
    fn test_containment_prefers_longest_key() {
        let (found, kind) = lookup("brown chelsea boots").unwrap();
        assert_eq!(found.key, "chelsea boot");
        assert_eq!(kind, MatchKind::Contained);

        let (found, _) = lookup("handbags").unwrap();
        assert_eq!(found.key, "handbag");
    }

    #[test]
    fn test_short_keys_only_match_exactly_or_singular() {
        assert!(lookup("chat").is_none(), "'hat' must not match by containment");
        let (found, kind) = lookup("sacs").unwrap();
        assert_eq!(found.key, "sac");
        assert_eq!(kind, MatchKind::Singular);
    }

    #[test]
    fn test_unknown_text() {
        assert!(lookup("").is_none());
        assert!(lookup("mountain").is_none());
    }

    #[test]
    fn test_brands_need_token_boundaries() {
        assert_eq!(brands_in("nike air max"), vec!["Nike"]);
        assert_eq!(brands_in("dr. martens 1460"), vec!["Dr. Martens"]);
        assert!(brands_in("vansittart road").is_empty());
        assert!(brands_in("mangoes").is_empty());
    }

    #[test]
    fn test_compound_expansions_point_at_dictionary_keys() {
        for (compound, derived) in COMPOUND_ITEMS {
            assert!(entry(compound).is_some(), "{compound} missing");
            for key in *derived {
                assert!(entry(key).is_some(), "{key} missing for {compound}");
            }
        }
    }

    #[test]
    fn test_dictionary_keys_are_unique() {
        assert_eq!(DICTIONARY.len(), ENTRIES.len());
    }
}
