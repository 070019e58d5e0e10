use serde::{Deserialize, Serialize};

use super::ColorSample;

/// A colour sample with its resolved name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub score: f32,
    pub pixel_fraction: f32,
    /// Locale (French) name, e.g. "Bleu marine".
    pub name_local: String,
    /// Canonical English name, e.g. "Navy blue".
    pub name_canonical: String,
    /// `#RRGGBB`, upper case.
    pub hex: String,
    pub is_dark: bool,
    /// Text colour readable on top of this one.
    pub contrast_color: String,
    /// Distance to the matched table range; 0 when inside it.
    pub distance: f64,
}

impl ClassifiedColor {
    pub fn sample(&self) -> ColorSample {
        ColorSample::new(
            self.red,
            self.green,
            self.blue,
            self.score,
            self.pixel_fraction,
        )
    }

    pub fn importance(&self) -> f32 {
        self.sample().importance()
    }
}

pub fn to_hex(red: u8, green: u8, blue: u8) -> String {
    format!("#{red:02X}{green:02X}{blue:02X}")
}
