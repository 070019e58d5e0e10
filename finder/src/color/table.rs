//! Ordered table of named colour ranges.
//!
//! Ranges overlap. Classification walks the table in order and keeps the
//! first entry with the smallest distance, so reordering entries changes
//! results.

use serde::{Deserialize, Serialize};

use crate::error::{FinderError, Result};

const LIGHT_TEXT: &str = "#FFFFFF";
const DARK_TEXT: &str = "#000000";

/// One named RGB box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorRange {
    pub min: [u8; 3],
    pub max: [u8; 3],
    pub name_local: String,
    pub name_canonical: String,
    pub is_dark: bool,
    pub contrast_color: String,
}

impl ColorRange {
    pub fn new(
        min: [u8; 3],
        max: [u8; 3],
        name_local: &str,
        name_canonical: &str,
        is_dark: bool,
    ) -> Self {
        Self {
            min,
            max,
            name_local: name_local.to_string(),
            name_canonical: name_canonical.to_string(),
            is_dark,
            contrast_color: if is_dark { LIGHT_TEXT } else { DARK_TEXT }.to_string(),
        }
    }

    /// 0 inside the box, otherwise Euclidean distance to the nearest box point.
    pub fn distance(&self, rgb: [u8; 3]) -> f64 {
        let mut sum = 0.0;
        for channel in 0..3 {
            let value = rgb[channel] as f64;
            let nearest = value.clamp(self.min[channel] as f64, self.max[channel] as f64);
            sum += (value - nearest).powi(2);
        }
        sum.sqrt()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorTable {
    entries: Vec<ColorRange>,
}

impl ColorTable {
    pub fn new(entries: Vec<ColorRange>) -> Result<Self> {
        if entries.is_empty() {
            return Err(FinderError::Validation(
                "Colour table must contain at least one range".to_string(),
            ));
        }
        for entry in &entries {
            if (0..3).any(|c| entry.min[c] > entry.max[c]) {
                return Err(FinderError::Validation(format!(
                    "Colour range '{}' has min above max",
                    entry.name_canonical
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ColorRange] {
        &self.entries
    }

    /// First entry with the minimum distance, plus that distance.
    pub fn nearest(&self, rgb: [u8; 3]) -> (&ColorRange, f64) {
        let mut best = &self.entries[0];
        let mut best_distance = best.distance(rgb);
        for entry in &self.entries[1..] {
            let distance = entry.distance(rgb);
            if distance < best_distance {
                best = entry;
                best_distance = distance;
            }
        }
        (best, best_distance)
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        let entries = DEFAULT_RANGES
            .iter()
            .map(|(min, max, local, canonical, dark)| {
                ColorRange::new(*min, *max, local, canonical, *dark)
            })
            .collect();
        Self { entries }
    }
}

type RangeRow = ([u8; 3], [u8; 3], &'static str, &'static str, bool);

#[rustfmt::skip]
const DEFAULT_RANGES: &[RangeRow] = &[
    // browns
    ([80, 40, 0], [165, 100, 40], "Marron", "Brown", true),
    ([150, 90, 40], [180, 130, 80], "Marron clair", "Light brown", false),
    ([60, 30, 0], [100, 60, 30], "Marron foncé", "Dark brown", true),
    ([170, 120, 70], [210, 180, 130], "Beige", "Beige", false),
    ([210, 180, 140], [240, 220, 180], "Beige clair", "Light beige", false),
    ([160, 110, 60], [190, 140, 90], "Tan", "Tan", false),
    ([90, 50, 20], [130, 80, 40], "Chocolat", "Chocolate", true),
    ([180, 130, 80], [215, 175, 130], "Camel", "Camel", false),
    // greys
    ([0, 0, 0], [35, 35, 35], "Noir", "Black", true),
    ([36, 36, 36], [85, 85, 85], "Gris foncé", "Dark gray", true),
    ([86, 86, 86], [170, 170, 170], "Gris", "Gray", true),
    ([171, 171, 171], [235, 235, 235], "Gris clair", "Light gray", false),
    ([236, 236, 236], [255, 255, 255], "Blanc", "White", false),
    // blues
    ([0, 0, 120], [30, 30, 180], "Bleu foncé", "Dark blue", true),
    ([0, 0, 181], [65, 65, 255], "Bleu", "Blue", true),
    ([66, 66, 230], [160, 200, 255], "Bleu clair", "Light blue", false),
    ([0, 65, 106], [30, 90, 140], "Bleu marine", "Navy blue", true),
    // reds
    ([120, 0, 0], [200, 30, 30], "Rouge foncé", "Dark red", true),
    ([201, 31, 31], [255, 70, 70], "Rouge", "Red", true),
    ([181, 71, 71], [255, 150, 150], "Rouge clair", "Light red", false),
    ([180, 0, 0], [255, 50, 50], "Rouge vif", "Bright red", true),
    // greens
    ([0, 60, 0], [30, 120, 30], "Vert foncé", "Dark green", true),
    ([31, 121, 31], [80, 200, 80], "Vert", "Green", false),
    ([81, 201, 81], [170, 255, 170], "Vert clair", "Light green", false),
    // yellows and orange
    ([230, 180, 0], [255, 255, 60], "Jaune", "Yellow", false),
    ([200, 150, 0], [229, 179, 0], "Jaune foncé", "Dark yellow", false),
    ([200, 80, 0], [255, 150, 50], "Orange", "Orange", false),
    // pinks and purples
    ([200, 0, 130], [255, 0, 200], "Rose foncé", "Dark pink", true),
    ([250, 130, 200], [255, 200, 230], "Rose clair", "Light pink", false),
    ([80, 0, 80], [150, 0, 150], "Violet foncé", "Dark purple", true),
    ([151, 50, 151], [200, 100, 200], "Violet", "Purple", true),
    ([201, 101, 201], [235, 190, 235], "Violet clair", "Light purple", false),
    // cyans
    ([0, 150, 150], [100, 220, 220], "Turquoise", "Turquoise", false),
    ([0, 200, 230], [130, 255, 255], "Cyan", "Cyan", false),
    // leather goods
    ([50, 20, 0], [90, 45, 20], "Cuir", "Leather", true),
    ([130, 70, 30], [170, 100, 60], "Cognac", "Cognac", true),
    ([110, 60, 30], [140, 80, 50], "Châtaigne", "Chestnut", true),
    ([180, 160, 140], [220, 200, 180], "Taupe", "Taupe", false),
    ([170, 150, 130], [190, 170, 150], "Cappuccino", "Cappuccino", false),
    ([90, 80, 70], [120, 110, 100], "Anthracite", "Anthracite", true),
];
