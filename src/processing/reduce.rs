//! Entry point of the reduction pipeline:
//! viewport filter, segment split, budget allocation, LTTB, reassembly.
//!
//! Every call is a pure function of its inputs. Nothing is cached between
//! calls; memoizing on (series, viewport, budget) is up to the caller.

use serde::Serialize;

use crate::config::ReduceConfig;
use crate::processing::budget::segment_budget;
use crate::processing::lttb::lttb_downsample;
use crate::processing::segment::{line_point_total, split_segments, Segment};
use crate::processing::window::filter_to_viewport;
use crate::state::point::Point;
use crate::state::viewport::Viewport;

/// Counts describing what one reduction did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReductionReport {
    pub input_len: usize,
    pub filtered_len: usize,
    pub output_len: usize,
    pub line_segments: usize,
    pub gap_segments: usize,
    /// Real points in the filtered series.
    pub real_points: usize,
    /// Whether any segment went through LTTB.
    pub sampled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    pub points: Vec<Point>,
    pub report: ReductionReport,
}

/// Reduce `points` to what the renderer needs for `viewport`.
pub fn reduce(points: &[Point], viewport: Viewport, config: &ReduceConfig) -> Vec<Point> {
    reduce_with_report(points, viewport, config).points
}

/// Same transformation as [`reduce`], also returning a [`ReductionReport`].
pub fn reduce_with_report(points: &[Point], viewport: Viewport, config: &ReduceConfig) -> Reduction {
    let filtered = filter_to_viewport(points, viewport, &config.window());
    let mut reduction = decimate_with_report(&filtered, config.budget);
    reduction.report.input_len = points.len();
    tracing::debug!(
        min = viewport.min,
        max = viewport.max,
        input = points.len(),
        filtered = reduction.report.filtered_len,
        output = reduction.report.output_len,
        sampled = reduction.report.sampled,
        "reduced series"
    );
    reduction
}

/// Downsample an already-filtered series to `budget` real points, sampling
/// each line segment independently and leaving gap markers in place.
pub fn decimate(points: &[Point], budget: usize) -> Vec<Point> {
    decimate_with_report(points, budget).points
}

fn decimate_with_report(points: &[Point], budget: usize) -> Reduction {
    let segments = split_segments(points);
    let total = line_point_total(&segments);
    let line_segments = segments.iter().filter(|s| s.is_line()).count();

    let mut report = ReductionReport {
        input_len: points.len(),
        filtered_len: points.len(),
        output_len: points.len(),
        line_segments,
        gap_segments: segments.len() - line_segments,
        real_points: total,
        sampled: false,
    };

    if total == 0 || total <= budget {
        tracing::trace!(total, budget, "series within budget, passing through");
        return Reduction {
            points: points.to_vec(),
            report,
        };
    }

    // Output length is known before anything is written.
    let plan: Vec<(Segment<'_>, Option<usize>)> = segments
        .into_iter()
        .map(|segment| match segment {
            Segment::Line(run) => (segment, segment_budget(run.len(), total, budget)),
            Segment::Gap(_) => (segment, None),
        })
        .collect();
    let capacity = plan
        .iter()
        .map(|(segment, local)| local.unwrap_or_else(|| segment.len()))
        .sum();

    let mut out = Vec::with_capacity(capacity);
    for (segment, local) in plan {
        match (segment, local) {
            (Segment::Line(run), Some(target)) => {
                out.extend(lttb_downsample(run, target));
                report.sampled = true;
            }
            (Segment::Line(run), None) => out.extend_from_slice(run),
            (Segment::Gap(marker), _) => out.push(marker.clone()),
        }
    }

    report.output_len = out.len();
    Reduction { points: out, report }
}
