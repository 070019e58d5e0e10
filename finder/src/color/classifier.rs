use crate::models::{clamp_to_channel, to_hex, ClassifiedColor, ColorSample};

use super::table::ColorTable;

/// Colours covering at most this share of the image are left out of descriptions.
const SIGNIFICANT_FRACTION: f32 = 0.05;
const MAX_DESCRIBED: usize = 3;
pub const UNDETECTED_DESCRIPTION: &str = "Couleur non détectée";

#[derive(Debug, Clone, Default)]
pub struct ColorClassifier {
    table: ColorTable,
}

impl ColorClassifier {
    pub fn new(table: ColorTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ColorTable {
        &self.table
    }

    /// Name an RGB triple. Channels outside `0..=255` are clamped first.
    pub fn classify(&self, red: f64, green: f64, blue: f64) -> ClassifiedColor {
        self.classify_sample(&ColorSample::new(
            clamp_to_channel(red),
            clamp_to_channel(green),
            clamp_to_channel(blue),
            0.0,
            0.0,
        ))
    }

    pub fn classify_sample(&self, sample: &ColorSample) -> ClassifiedColor {
        let rgb = [sample.red, sample.green, sample.blue];
        let (range, distance) = self.table.nearest(rgb);

        ClassifiedColor {
            red: sample.red,
            green: sample.green,
            blue: sample.blue,
            score: sample.score,
            pixel_fraction: sample.pixel_fraction,
            name_local: range.name_local.clone(),
            name_canonical: range.name_canonical.clone(),
            hex: to_hex(sample.red, sample.green, sample.blue),
            is_dark: range.is_dark,
            contrast_color: range.contrast_color.clone(),
            distance,
        }
    }

    pub fn classify_all(&self, samples: &[ColorSample]) -> Vec<ClassifiedColor> {
        samples.iter().map(|s| self.classify_sample(s)).collect()
    }

    /// Short locale description of a palette: "X", "X et y" or "X avec y et z".
    pub fn describe(&self, colors: &[ClassifiedColor]) -> String {
        if colors.is_empty() {
            return UNDETECTED_DESCRIPTION.to_string();
        }

        let mut significant: Vec<&ClassifiedColor> = colors
            .iter()
            .filter(|c| c.pixel_fraction > SIGNIFICANT_FRACTION)
            .collect();
        significant.sort_by(|a, b| {
            b.importance()
                .partial_cmp(&a.importance())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        significant.truncate(MAX_DESCRIBED);

        match significant.as_slice() {
            [] => {
                let top = colors.iter().fold(&colors[0], |best, c| {
                    if c.score > best.score {
                        c
                    } else {
                        best
                    }
                });
                top.name_local.clone()
            }
            [only] => only.name_local.clone(),
            [first, second] => format!(
                "{} et {}",
                first.name_local,
                second.name_local.to_lowercase()
            ),
            [first, rest @ ..] => {
                let others: Vec<String> =
                    rest.iter().map(|c| c.name_local.to_lowercase()).collect();
                format!("{} avec {}", first.name_local, others.join(" et "))
            }
        }
    }
}
