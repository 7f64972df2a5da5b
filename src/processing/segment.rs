use crate::state::point::Point;

/// A maximal run of real points, or a single discontinuity.
///
/// Segments borrow from the filtered series and only live for one
/// reduction call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment<'a> {
    Line(&'a [Point]),
    Gap(&'a Point),
}

impl<'a> Segment<'a> {
    pub fn len(&self) -> usize {
        match self {
            Segment::Line(points) => points.len(),
            Segment::Gap(_) => 1,
        }
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Segment::Line(_))
    }
}

/// Split a series into line runs and gaps, in order.
///
/// Anything that is not a finite reading (explicit markers as well as NaN
/// from malformed input) closes the open run and becomes a gap. No segment
/// is ever empty, and the segment lengths sum to `points.len()`.
pub fn split_segments(points: &[Point]) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut run_start = 0;

    for (i, point) in points.iter().enumerate() {
        if point.is_real() {
            continue;
        }
        if i > run_start {
            segments.push(Segment::Line(&points[run_start..i]));
        }
        segments.push(Segment::Gap(point));
        run_start = i + 1;
    }
    if run_start < points.len() {
        segments.push(Segment::Line(&points[run_start..]));
    }

    segments
}

/// Real points across all line segments.
pub fn line_point_total(segments: &[Segment<'_>]) -> usize {
    segments
        .iter()
        .filter(|s| s.is_line())
        .map(Segment::len)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(segments: &[Segment<'_>]) -> Vec<(char, usize)> {
        segments
            .iter()
            .map(|s| match s {
                Segment::Line(p) => ('L', p.len()),
                Segment::Gap(_) => ('G', 1),
            })
            .collect()
    }

    #[test]
    fn splits_on_markers() {
        let points = vec![
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::gap(1.0),
            Point::new(0.0, 2.0),
            Point::new(1.0, 2.0),
            Point::new(2.0, 2.0),
        ];
        let segments = split_segments(&points);
        assert_eq!(shape(&segments), vec![('L', 2), ('G', 1), ('L', 3)]);
        assert_eq!(line_point_total(&segments), 5);
    }

    #[test]
    fn nan_acts_as_gap() {
        let points = vec![
            Point::new(0.0, 1.0),
            Point::new(1.0, f64::NAN),
            Point::new(2.0, 1.0),
        ];
        assert_eq!(shape(&split_segments(&points)), vec![('L', 1), ('G', 1), ('L', 1)]);
    }

    #[test]
    fn infinite_readings_act_as_gaps() {
        let points = vec![
            Point::new(0.0, 1.0),
            Point::new(1.0, 2.0),
            Point::new(2.0, f64::INFINITY),
            Point::new(3.0, f64::NEG_INFINITY),
            Point::new(4.0, 1.0),
        ];
        let segments = split_segments(&points);
        assert_eq!(shape(&segments), vec![('L', 2), ('G', 1), ('G', 1), ('L', 1)]);
        assert_eq!(line_point_total(&segments), 3);
    }

    #[test]
    fn leading_and_adjacent_markers_make_no_empty_lines() {
        let points = vec![Point::gap(0.0), Point::gap(0.0), Point::new(1.0, 1.0), Point::gap(1.0)];
        let segments = split_segments(&points);
        assert_eq!(shape(&segments), vec![('G', 1), ('G', 1), ('L', 1), ('G', 1)]);
        let total: usize = segments.iter().map(Segment::len).sum();
        assert_eq!(total, points.len());
    }

    #[test]
    fn empty_series() {
        assert!(split_segments(&[]).is_empty());
    }
}
