//! Records produced by the external vision collaborator.
//!
//! Shapes are validated once here, at the pipeline boundary. Channel values
//! are clamped to `0..=255` and scores to `0.0..=1.0` during
//! deserialization, so downstream code never re-checks them.

use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};

/// Web entities at or below this score are noise.
pub const WEB_ENTITY_MIN_SCORE: f32 = 0.5;

fn clamp_channel<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    Ok(clamp_to_channel(raw))
}

fn clamp_unit<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    Ok(clamp_to_unit(raw))
}

pub(crate) fn clamp_to_channel(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 255.0) as u8
}

pub(crate) fn clamp_to_unit(raw: f64) -> f32 {
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, 1.0) as f32
}

/// A free-text annotation with a confidence score (labels, web entities, logos).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "clamp_unit")]
    pub score: f32,
}

impl Label {
    pub fn new(description: impl Into<String>, score: f32) -> Self {
        Self {
            description: description.into(),
            score: clamp_to_unit(score as f64),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    #[serde(default)]
    pub normalized_vertices: Vec<Vertex>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedObject {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "clamp_unit")]
    pub score: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

impl DetectedObject {
    pub fn new(name: impl Into<String>, score: f32) -> Self {
        Self {
            name: name.into(),
            score: clamp_to_unit(score as f64),
            bounding_box: None,
        }
    }
}

/// One dominant colour reported by the vision service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSample {
    #[serde(default, deserialize_with = "clamp_channel")]
    pub red: u8,
    #[serde(default, deserialize_with = "clamp_channel")]
    pub green: u8,
    #[serde(default, deserialize_with = "clamp_channel")]
    pub blue: u8,
    #[serde(default, deserialize_with = "clamp_unit")]
    pub score: f32,
    #[serde(default, deserialize_with = "clamp_unit")]
    pub pixel_fraction: f32,
}

impl ColorSample {
    pub fn new(red: u8, green: u8, blue: u8, score: f32, pixel_fraction: f32) -> Self {
        Self {
            red,
            green,
            blue,
            score: clamp_to_unit(score as f64),
            pixel_fraction: clamp_to_unit(pixel_fraction as f64),
        }
    }

    /// Navy sample used when the vision service reports no colours at all.
    pub fn default_navy() -> Self {
        Self::new(0, 0, 128, 1.0, 1.0)
    }

    /// Ranking weight used when describing a palette.
    pub fn importance(&self) -> f32 {
        self.score * self.pixel_fraction.sqrt()
    }
}

/// Full vision result as consumed by `analyze`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionResult {
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub objects: Vec<DetectedObject>,
    #[serde(default)]
    pub dominant_colors: Vec<ColorSample>,
    #[serde(default)]
    pub web_entities: Vec<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_text: Option<String>,
    #[serde(default)]
    pub detected_logos: Vec<Label>,
    /// Content hash of the uploaded image, when the caller has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_hash: Option<String>,
}

impl VisionResult {
    /// Drop unusable records and fill the mandatory colour palette.
    pub fn sanitize(mut self) -> Self {
        self.labels.retain(|l| !l.description.trim().is_empty());
        self.objects.retain(|o| !o.name.trim().is_empty());
        self.web_entities
            .retain(|e| !e.description.trim().is_empty() && e.score > WEB_ENTITY_MIN_SCORE);
        self.detected_logos
            .retain(|l| !l.description.trim().is_empty());

        if self.dominant_colors.is_empty() {
            tracing::debug!("No dominant colours reported, using navy default");
            self.dominant_colors.push(ColorSample::default_navy());
        }

        self.image_hash = self
            .image_hash
            .take()
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty());

        self
    }

    /// Cache identity of this result: the caller's image hash, or a SHA-256
    /// of the canonical JSON when none was supplied.
    pub fn content_hash(&self) -> String {
        if let Some(ref hash) = self.image_hash {
            return hash.clone();
        }

        let canonical = serde_json::to_vec(self).unwrap_or_default();
        let digest = Sha256::digest(&canonical);
        format!("{digest:x}")
    }

    /// All free-text signals that feed the taxonomy: labels, object names,
    /// web entities and logos.
    pub fn text_signals(&self) -> Vec<Label> {
        let mut signals = self.labels.clone();
        signals.extend(
            self.objects
                .iter()
                .map(|o| Label::new(o.name.clone(), o.score)),
        );
        signals.extend(self.web_entities.iter().cloned());
        signals.extend(self.detected_logos.iter().cloned());
        signals
    }
}
