use crate::processing::budget::MIN_SEGMENT_BUDGET;
use crate::state::point::{Point, Reading};

/// Largest-Triangle-Three-Buckets downsampling of one line segment.
///
/// Returns exactly `target` points when `3 <= target < segment.len()`: the
/// original first and last points plus `target - 2` interior points, each an
/// original observation. Any other `target` returns the segment unchanged.
pub fn lttb_downsample(segment: &[Point], target: usize) -> Vec<Point> {
    lttb_indices(segment, target)
        .into_iter()
        .map(|i| segment[i].clone())
        .collect()
}

/// Indices picked by LTTB, strictly increasing.
pub fn lttb_indices(segment: &[Point], target: usize) -> Vec<usize> {
    let n = segment.len();
    if target >= n || target < MIN_SEGMENT_BUDGET {
        return (0..n).collect();
    }

    let mut picked = Vec::with_capacity(target);

    // Always keep the first point
    picked.push(0);

    let bucket_width = (n - 2) as f64 / (target - 2) as f64;
    let mut anchor = 0;

    for i in 0..(target - 2) {
        // Average of the next bucket, the third corner of the triangle
        let next_start = (((i + 1) as f64 * bucket_width) as usize + 1).min(n - 1);
        let next_end = (((i + 2) as f64 * bucket_width) as usize + 1).min(n);
        let (avg_x, avg_y) = if next_end > next_start {
            let count = (next_end - next_start) as f64;
            let (sum_x, sum_y) = segment[next_start..next_end]
                .iter()
                .map(coords)
                .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
            (sum_x / count, sum_y / count)
        } else {
            coords(&segment[next_start])
        };

        // Current bucket, half-open so consecutive buckets never share an
        // index and no point is picked twice. The last point is reserved, so
        // the highest candidate is n - 2.
        let start = ((i as f64 * bucket_width) as usize + 1).min(n - 2);
        let end = (((i + 1) as f64 * bucket_width) as usize + 1).clamp(start + 1, n - 1);

        let (ax, ay) = coords(&segment[anchor]);
        let mut max_area = -1.0f64;
        let mut best = start;

        for (j, point) in segment.iter().enumerate().take(end).skip(start) {
            let (bx, by) = coords(point);
            // Doubled triangle area; the halving does not change the argmax
            let area = ((ax - avg_x) * (by - ay) - (ax - bx) * (avg_y - ay)).abs();
            if area > max_area {
                max_area = area;
                best = j;
            }
        }

        picked.push(best);
        anchor = best;
    }

    // Always keep the last point
    picked.push(n - 1);

    picked
}

/// Line segments only hold real readings; a gap here would be a caller bug
/// and is read as zero rather than aborting the frame.
fn coords(point: &Point) -> (f64, f64) {
    let y = match point.value {
        Reading::Value(v) => v,
        Reading::Gap => 0.0,
    };
    (point.distance, y)
}
