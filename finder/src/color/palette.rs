//! Palette clean-up ahead of classification.

use crate::models::ColorSample;

const MAX_SAMPLES: usize = 8;
const MIN_KEPT: usize = 3;
const SIMILARITY_THRESHOLD: f32 = 0.15;

/// Hue, saturation and lightness, each in `0.0..=1.0`.
pub fn to_hsl(sample: &ColorSample) -> [f32; 3] {
    let r = sample.red as f32 / 255.0;
    let g = sample.green as f32 / 255.0;
    let b = sample.blue as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return [0.0, 0.0, l];
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    [h / 6.0, s, l]
}

/// Hue differences count double and wrap around the colour wheel.
pub fn hsl_distance(a: [f32; 3], b: [f32; 3]) -> f32 {
    let raw_hue = (a[0] - b[0]).abs();
    let hue = raw_hue.min(1.0 - raw_hue);
    hue * 2.0 + (a[1] - b[1]).abs() + (a[2] - b[2]).abs()
}

/// Drop near-duplicate colours, keeping the highest scored of each group.
///
/// At most eight samples are considered. When the input had at least three
/// samples, the result is topped back up to three with the best unused ones.
pub fn dedupe(samples: &[ColorSample]) -> Vec<ColorSample> {
    let mut ordered: Vec<ColorSample> = samples.to_vec();
    ordered.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ordered.truncate(MAX_SAMPLES);

    if ordered.len() < 2 {
        return ordered;
    }

    let with_hsl: Vec<(ColorSample, [f32; 3])> =
        ordered.into_iter().map(|s| (s, to_hsl(&s))).collect();

    let mut kept: Vec<usize> = Vec::new();
    for (idx, (_, hsl)) in with_hsl.iter().enumerate() {
        let too_similar = kept
            .iter()
            .any(|&k| hsl_distance(*hsl, with_hsl[k].1) < SIMILARITY_THRESHOLD);
        if !too_similar {
            kept.push(idx);
        }
    }

    if kept.len() < MIN_KEPT && with_hsl.len() >= MIN_KEPT {
        for idx in 0..with_hsl.len() {
            if kept.len() >= MIN_KEPT {
                break;
            }
            if !kept.contains(&idx) {
                kept.push(idx);
            }
        }
    }

    tracing::debug!(
        input = with_hsl.len(),
        kept = kept.len(),
        "Deduplicated colour palette"
    );

    kept.into_iter().map(|idx| with_hsl[idx].0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(r: u8, g: u8, b: u8, score: f32) -> ColorSample {
        ColorSample::new(r, g, b, score, 0.2)
    }

    #[test]
    fn test_hsl_of_primaries() {
        assert_eq!(to_hsl(&sample(255, 0, 0, 1.0)), [0.0, 1.0, 0.5]);
        let blue = to_hsl(&sample(0, 0, 255, 1.0));
        assert!((blue[0] - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(to_hsl(&sample(128, 128, 128, 1.0))[1], 0.0);
    }

    #[test]
    fn test_hue_distance_wraps() {
        let a = [0.02, 0.5, 0.5];
        let b = [0.98, 0.5, 0.5];
        assert!((hsl_distance(a, b) - 0.08).abs() < 1e-5);
    }

    #[test]
    fn test_near_duplicates_are_dropped() {
        let palette = vec![
            sample(120, 70, 20, 0.9),
            sample(122, 71, 21, 0.8),
            sample(10, 10, 10, 0.5),
        ];
        let kept = dedupe(&palette[..2]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].score, 0.9);

        let kept = dedupe(&palette);
        assert_eq!(kept.len(), 3, "topped back up to three");
        assert_eq!(kept[2].score, 0.8);
    }

    #[test]
    fn test_distinct_colours_survive_in_score_order() {
        let palette = vec![
            sample(10, 10, 10, 0.3),
            sample(250, 250, 250, 0.6),
            sample(200, 20, 20, 0.9),
            sample(20, 20, 200, 0.1),
        ];
        let kept = dedupe(&palette);
        let scores: Vec<f32> = kept.iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![0.9, 0.6, 0.3, 0.1]);
    }

    #[test]
    fn test_at_most_eight_samples_considered() {
        let palette: Vec<ColorSample> = (0..12)
            .map(|i| sample((i * 20) as u8, 255 - (i * 20) as u8, (i * 7) as u8, i as f32 / 12.0))
            .collect();
        assert!(dedupe(&palette).len() <= 8);
    }
}
