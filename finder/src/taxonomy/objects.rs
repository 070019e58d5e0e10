//! Main-object selection over localized vision objects.

use crate::models::{DetectedObject, ItemType};

#[rustfmt::skip]
const FASHION_OBJECTS: &[&str] = &[
    // shoes
    "footwear", "shoe", "boot", "sneaker", "high heels", "sandal",
    // clothing
    "clothing", "outerwear", "dress", "coat", "jacket", "shirt", "t-shirt",
    "pants", "jeans", "skirt", "shorts", "trousers", "sweater", "hoodie",
    "suit", "top", "blouse",
    // bags
    "bag", "handbag", "backpack", "luggage", "briefcase", "wallet", "purse",
    // accessories
    "tie", "bow tie", "hat", "cap", "glasses", "sunglasses", "watch", "jewelry",
    "necklace", "bracelet", "ring", "earrings", "scarf", "glove", "belt",
];

const SHOE_WORDS: &[&str] = &["shoe", "footwear", "boot", "sneaker", "heel"];
const BAG_WORDS: &[&str] = &["bag", "purse", "handbag", "backpack"];

fn name_has(object: &DetectedObject, words: &[&str]) -> bool {
    let name = object.name.to_lowercase();
    words.iter().any(|w| name.contains(w))
}

fn by_score_desc(objects: &mut [&DetectedObject]) {
    objects.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Pick the object the image is most likely about.
///
/// Shoes win over bags, which win over any other fashion object. Without a
/// fashion object the highest-scoring object is returned.
pub fn find_main_object(objects: &[DetectedObject]) -> Option<&DetectedObject> {
    let mut fashion: Vec<&DetectedObject> = objects
        .iter()
        .filter(|o| name_has(o, FASHION_OBJECTS))
        .collect();

    if fashion.is_empty() {
        let mut all: Vec<&DetectedObject> = objects.iter().collect();
        by_score_desc(&mut all);
        return all.first().copied();
    }

    by_score_desc(&mut fashion);

    let chosen = fashion
        .iter()
        .find(|o| name_has(o, SHOE_WORDS))
        .or_else(|| fashion.iter().find(|o| name_has(o, BAG_WORDS)))
        .or_else(|| fashion.first())
        .copied();

    if let Some(object) = chosen {
        tracing::debug!(name = %object.name, score = object.score, "Selected main object");
    }
    chosen
}

/// Item type suggested by an object name.
pub fn item_type_hint(object: &DetectedObject) -> ItemType {
    if name_has(object, SHOE_WORDS) {
        ItemType::Chaussure
    } else if name_has(object, BAG_WORDS) {
        ItemType::Sac
    } else if name_has(object, FASHION_OBJECTS) {
        ItemType::Vetement
    } else {
        ItemType::Default
    }
}
