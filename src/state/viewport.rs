use serde::{Deserialize, Serialize};

use crate::config::WindowConfig;
use crate::state::point::Point;

/// Visible range on the distance axis. Owned by the caller and handed to
/// the reduction fresh on every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub min: f64,
    pub max: f64,
}

impl Viewport {
    /// Bounds given in either order are normalized so `min <= max`.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Width of the range, with a zero-width range counted as 1.
    pub fn span(&self) -> f64 {
        let span = self.max - self.min;
        if span > 0.0 {
            span
        } else {
            1.0
        }
    }

    /// Margin kept on each side of the visible range.
    pub fn buffer(&self, window: &WindowConfig) -> f64 {
        (self.span() * window.buffer_fraction).min(window.buffer_cap)
    }

    /// Inclusive `(lo, hi)` bounds after applying the buffer.
    pub fn padded_bounds(&self, window: &WindowConfig) -> (f64, f64) {
        let buffer = self.buffer(window);
        (self.min - buffer, self.max + buffer)
    }

    /// Tightest viewport covering every real point's distance.
    /// `None` when there are no real points.
    pub fn fit_to(points: &[Point]) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for p in points.iter().filter(|p| p.is_real() && p.distance.is_finite()) {
            min = min.min(p.distance);
            max = max.max(p.distance);
        }
        if min.is_finite() && max.is_finite() {
            Some(Self { min, max })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn buffer_is_ten_percent_capped_at_cap() {
        let window = WindowConfig::default();
        assert_relative_eq!(Viewport::new(100.0, 200.0).buffer(&window), 10.0);
        assert_relative_eq!(Viewport::new(0.0, 5000.0).buffer(&window), 100.0);
    }

    #[test]
    fn zero_width_counts_as_one() {
        let window = WindowConfig::default();
        let vp = Viewport::new(42.0, 42.0);
        assert_relative_eq!(vp.buffer(&window), 0.1);
        let (lo, hi) = vp.padded_bounds(&window);
        assert_relative_eq!(lo, 41.9);
        assert_relative_eq!(hi, 42.1);
    }

    #[test]
    fn reversed_bounds_are_normalized() {
        let vp = Viewport::new(9.0, 3.0);
        assert_eq!(vp, Viewport { min: 3.0, max: 9.0 });
    }

    #[test]
    fn fit_skips_gaps() {
        let points = vec![
            Point::new(5.0, 1.0),
            Point::new(9.0, 1.0),
            Point::gap(500.0),
            Point::new(2.0, 1.0),
        ];
        assert_eq!(Viewport::fit_to(&points), Some(Viewport::new(2.0, 9.0)));
        assert_eq!(Viewport::fit_to(&[Point::gap(1.0)]), None);
    }
}
