use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Opaque attribution token naming the file a point was read from.
pub type SourceId = Arc<str>;

/// The reading carried by a point: either a measured value or an explicit
/// discontinuity marker telling the renderer not to connect across it.
///
/// On the wire a gap is `null`, matching the payload the chart consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Reading {
    Value(f64),
    Gap,
}

impl From<Option<f64>> for Reading {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => Reading::Value(v),
            None => Reading::Gap,
        }
    }
}

impl From<Reading> for Option<f64> {
    fn from(reading: Reading) -> Self {
        match reading {
            Reading::Value(v) => Some(v),
            Reading::Gap => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub distance: f64,
    pub value: Reading,
    /// Passed through untouched; the reduction never branches on it.
    #[serde(rename = "fileId", default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceId>,
}

impl Point {
    pub fn new(distance: f64, value: f64) -> Self {
        Self {
            distance,
            value: Reading::Value(value),
            source: None,
        }
    }

    /// A discontinuity marker placed at `distance`.
    pub fn gap(distance: f64) -> Self {
        Self {
            distance,
            value: Reading::Gap,
            source: None,
        }
    }

    pub fn with_source(mut self, source: SourceId) -> Self {
        self.source = Some(source);
        self
    }

    /// True only for an explicit `Reading::Gap`.
    pub fn is_marker(&self) -> bool {
        matches!(self.value, Reading::Gap)
    }

    /// The reading, if it is a finite number. Markers and malformed values
    /// (NaN, infinities) both yield `None`.
    pub fn reading(&self) -> Option<f64> {
        match self.value {
            Reading::Value(v) if v.is_finite() => Some(v),
            _ => None,
        }
    }

    /// Whether this point can take part in a drawn line segment.
    pub fn is_real(&self) -> bool {
        self.reading().is_some()
    }
}
