use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::data::error::LoadError;
use crate::state::point::{Point, SourceId};

/// Inclusive distance bounds applied while reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceRange {
    pub min: f64,
    pub max: f64,
}

impl DistanceRange {
    pub fn contains(&self, distance: f64) -> bool {
        distance >= self.min && distance <= self.max
    }
}

/// Parse `distance,reading` lines into points sorted by distance.
///
/// Extra columns are ignored. Lines with fewer than two fields or with a
/// field that is not a finite number are skipped.
pub fn parse_points<R: Read>(reader: R, range: Option<DistanceRange>, source: Option<SourceId>) -> Vec<Point> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut points = Vec::new();
    let mut skipped = 0usize;
    for result in reader.byte_records() {
        let record = match result {
            Ok(record) => record,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        let (Some(distance), Some(value)) = (parse_field(record.get(0)), parse_field(record.get(1))) else {
            skipped += 1;
            continue;
        };
        if range.is_some_and(|r| !r.contains(distance)) {
            continue;
        }
        let mut point = Point::new(distance, value);
        point.source = source.clone();
        points.push(point);
    }

    if skipped > 0 {
        tracing::debug!(skipped, kept = points.len(), "skipped malformed lines");
    }

    points.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    points
}

/// Read one file, tagging every point with the file name.
pub fn parse_file(path: &Path, range: Option<DistanceRange>) -> Result<Vec<Point>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(parse_points(file, range, Some(Arc::from(name))))
}

fn parse_field(field: Option<&[u8]>) -> Option<f64> {
    let text = std::str::from_utf8(field?).ok()?;
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distances(points: &[Point]) -> Vec<f64> {
        points.iter().map(|p| p.distance).collect()
    }

    #[test]
    fn parses_and_sorts() {
        let text = "3.0, 30\n1.0,10\n2.0,20,extra\n";
        let points = parse_points(text.as_bytes(), None, None);
        assert_eq!(distances(&points), vec![1.0, 2.0, 3.0]);
        assert_eq!(points[0], Point::new(1.0, 10.0));
    }

    #[test]
    fn skips_malformed_lines() {
        let text = "header,line\n1.0\n\n2.0,abc\nNaN,1\n4.0,inf\n5.0,-2.5\r\n";
        let points = parse_points(text.as_bytes(), None, None);
        assert_eq!(points, vec![Point::new(5.0, -2.5)]);
    }

    #[test]
    fn non_utf8_lines_do_not_poison_the_file() {
        let mut bytes = b"1.0,1.0\n".to_vec();
        bytes.extend_from_slice(&[0xE9, b',', b'2', b'\n']);
        bytes.extend_from_slice(b"2.0,2.0\n");
        let points = parse_points(bytes.as_slice(), None, None);
        assert_eq!(distances(&points), vec![1.0, 2.0]);
    }

    #[test]
    fn applies_range() {
        let text = "0,1\n50,1\n100,1\n150,1\n";
        let range = DistanceRange { min: 50.0, max: 100.0 };
        let points = parse_points(text.as_bytes(), Some(range), None);
        assert_eq!(distances(&points), vec![50.0, 100.0]);
    }

    #[test]
    fn tags_source() {
        let src: SourceId = Arc::from("trace#tem.txt");
        let points = parse_points("1,1\n2,2\n".as_bytes(), None, Some(src));
        assert!(points.iter().all(|p| p.source.as_deref() == Some("trace#tem.txt")));
    }
}
