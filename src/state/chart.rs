use std::str::FromStr;

use crate::state::viewport::Viewport;

/// Which measurement a channel's files carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Tension,
    Temperature,
}

impl ChartKind {
    /// File name suffix selecting this kind's files in a channel directory.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            ChartKind::Tension => "#str.txt",
            ChartKind::Temperature => "#tem.txt",
        }
    }

    pub fn default_viewport(&self) -> Viewport {
        match self {
            ChartKind::Tension => Viewport::new(0.0, 810.0),
            ChartKind::Temperature => Viewport::new(800.0, 1620.0),
        }
    }

    /// Initial value-axis range `(min, max)`.
    pub fn default_value_range(&self) -> (f64, f64) {
        match self {
            ChartKind::Tension => (-1000.0, 1000.0),
            ChartKind::Temperature => (-600.0, 600.0),
        }
    }

    pub fn axis_label(&self) -> &'static str {
        match self {
            ChartKind::Tension => "Tension (uE)",
            ChartKind::Temperature => "Temperature (\u{00B0}C)",
        }
    }
}

/// Accepts the long names and the file-suffix short forms, case-insensitively.
impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tension" | "str" => Ok(ChartKind::Tension),
            "temperature" | "tem" => Ok(ChartKind::Temperature),
            other => Err(format!(
                "unknown chart kind `{other}`, expected tension|str or temperature|tem"
            )),
        }
    }
}
