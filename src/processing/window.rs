use crate::config::WindowConfig;
use crate::state::point::Point;
use crate::state::viewport::Viewport;

/// Restrict `points` to the buffered viewport, keeping every discontinuity
/// marker regardless of its distance so that files are never joined.
///
/// The series is not globally sorted (each file restarts its axis), so this
/// is a linear scan rather than a binary search.
pub fn filter_to_viewport(points: &[Point], viewport: Viewport, window: &WindowConfig) -> Vec<Point> {
    let (lo, hi) = viewport.padded_bounds(window);
    points
        .iter()
        .filter(|p| p.is_marker() || (p.distance >= lo && p.distance <= hi))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distances(points: &[Point]) -> Vec<f64> {
        points.iter().map(|p| p.distance).collect()
    }

    #[test]
    fn keeps_buffered_range() {
        let points: Vec<Point> = (0..30).map(|i| Point::new(i as f64 * 10.0, 1.0)).collect();
        // span 100, buffer 10 -> [90, 210]
        let out = filter_to_viewport(&points, Viewport::new(100.0, 200.0), &WindowConfig::default());
        assert_eq!(
            distances(&out),
            vec![90.0, 100.0, 110.0, 120.0, 130.0, 140.0, 150.0, 160.0, 170.0, 180.0, 190.0, 200.0, 210.0]
        );
    }

    #[test]
    fn markers_survive_outside_window() {
        let points = vec![
            Point::new(10.0, 1.0),
            Point::new(20.0, 1.0),
            Point::gap(20.0),
            Point::new(500.0, 2.0),
            Point::gap(5000.0),
            Point::new(15.0, 3.0),
        ];
        let out = filter_to_viewport(&points, Viewport::new(0.0, 30.0), &WindowConfig::default());
        assert_eq!(out.len(), 5);
        assert!(out[2].is_marker());
        assert!(out[3].is_marker());
        assert_eq!(out[3].distance, 5000.0);
        assert_eq!(out[4].distance, 15.0);
    }

    #[test]
    fn nan_values_are_filtered_by_distance_only() {
        let points = vec![Point::new(1.0, f64::NAN), Point::new(900.0, f64::NAN)];
        let out = filter_to_viewport(&points, Viewport::new(0.0, 10.0), &WindowConfig::default());
        assert_eq!(distances(&out), vec![1.0]);
    }

    #[test]
    fn empty_in_empty_out() {
        assert!(filter_to_viewport(&[], Viewport::new(0.0, 1.0), &WindowConfig::default()).is_empty());
    }
}
