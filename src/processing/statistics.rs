use std::collections::BTreeSet;

use serde::Serialize;

use crate::state::point::Point;

/// Statistics for a stitched series
#[derive(Debug, Clone, Serialize)]
pub struct SeriesStats {
    pub count: usize,
    pub gaps: usize,
    pub sources: usize,
    pub distance_min: f64,
    pub distance_max: f64,
    pub min: f64,
    pub max: f64,
    pub peak_to_peak: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

impl SeriesStats {
    /// Compute statistics over real readings; markers and non-finite values
    /// are counted as gaps and otherwise skipped.
    pub fn compute(points: &[Point]) -> Option<Self> {
        let mut vals = Vec::with_capacity(points.len());
        let mut distance_min = f64::INFINITY;
        let mut distance_max = f64::NEG_INFINITY;
        let mut sources = BTreeSet::new();

        for p in points {
            if let Some(src) = &p.source {
                sources.insert(src.clone());
            }
            if let Some(v) = p.reading() {
                vals.push(v);
                distance_min = distance_min.min(p.distance);
                distance_max = distance_max.max(p.distance);
            }
        }
        if vals.is_empty() {
            return None;
        }

        let count = vals.len();
        let gaps = points.len() - count;
        let min = vals.iter().copied().fold(f64::INFINITY, f64::min);
        let max = vals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let peak_to_peak = max - min;
        let mean = vals.iter().sum::<f64>() / count as f64;

        vals.sort_by(f64::total_cmp);
        let median = if count % 2 == 0 {
            (vals[count / 2 - 1] + vals[count / 2]) / 2.0
        } else {
            vals[count / 2]
        };

        let variance = vals.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;
        let std_dev = variance.sqrt();

        Some(SeriesStats {
            count,
            gaps,
            sources: sources.len(),
            distance_min,
            distance_max,
            min,
            max,
            peak_to_peak,
            mean,
            median,
            std_dev,
        })
    }

    /// Format as a multi-line report string.
    pub fn report(&self, label: &str) -> String {
        format!(
            "{}:\n  Points: {}\n  Gaps: {}\n  Files: {}\n  Distance: {:.1} .. {:.1}\n  Min: {:.3}\n  Max: {:.3}\n  Peak-to-Peak: {:.3}\n  Mean: {:.3}\n  Median: {:.3}\n  Std Dev: {:.3}\n",
            label,
            self.count,
            self.gaps,
            self.sources,
            self.distance_min,
            self.distance_max,
            self.min,
            self.max,
            self.peak_to_peak,
            self.mean,
            self.median,
            self.std_dev
        )
    }
}
