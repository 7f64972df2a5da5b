use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;

use crate::config::LoaderConfig;
use crate::data::error::LoadError;
use crate::data::parser::{self, DistanceRange};
use crate::state::chart::ChartKind;
use crate::state::point::Point;

/// A data file picked for loading.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub name: String,
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// A stitched channel, ready to hand to the reduction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Loaded {
    pub points: Vec<Point>,
    /// Name of the most recently modified file read.
    pub latest_file: Option<String>,
    /// Point count per file, oldest first.
    #[serde(skip)]
    pub file_counts: Vec<(String, usize)>,
}

/// The `limit` most recently modified files in `dir` ending with `suffix`,
/// ordered oldest to newest.
pub fn select_recent(dir: &Path, suffix: &str, limit: usize) -> Result<Vec<SourceFile>, LoadError> {
    let entries = std::fs::read_dir(dir).map_err(|source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(suffix) {
            continue;
        }
        let path = entry.path();
        match entry.metadata().and_then(|m| m.modified()) {
            Ok(modified) => files.push(SourceFile { name, path, modified }),
            Err(e) => tracing::warn!("Skipping {:?}: {e}", path),
        }
    }

    // Newest first to apply the limit, then back to chronological order
    files.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.name.cmp(&b.name)));
    files.truncate(limit);
    files.reverse();
    Ok(files)
}

/// Concatenate per-file point lists, inserting a gap marker at every
/// boundary between two non-empty files.
///
/// The marker carries the last distance and the source of the file before
/// it. Empty files are dropped and never produce a marker.
pub fn stitch<I>(files: I) -> Vec<Point>
where
    I: IntoIterator<Item = Vec<Point>>,
{
    let mut combined: Vec<Point> = Vec::new();
    for points in files {
        let Some(first) = points.first() else {
            continue;
        };
        if let Some(prev) = combined.last() {
            let mut marker = Point::gap(prev.distance);
            marker.source = prev.source.clone();
            tracing::trace!(at = prev.distance, next = first.distance, "file boundary");
            combined.push(marker);
        }
        combined.extend(points);
    }
    combined
}

/// Read and stitch the recent files of one channel.
pub fn load_channel(
    root: &Path,
    channel: &str,
    kind: ChartKind,
    range: Option<DistanceRange>,
    config: &LoaderConfig,
) -> Result<Loaded, LoadError> {
    let dir_name = config
        .channel_dir(channel)
        .ok_or_else(|| LoadError::UnknownChannel(channel.to_string()))?;
    let dir = root.join(dir_name);
    let suffix = kind.file_suffix();

    let selected = select_recent(&dir, suffix, config.files_per_channel)?;
    if selected.is_empty() {
        return Err(LoadError::NoFiles {
            dir,
            suffix: suffix.to_string(),
        });
    }
    let latest_file = selected.last().map(|f| f.name.clone());

    let mut file_counts = Vec::with_capacity(selected.len());
    let per_file: Vec<Vec<Point>> = selected
        .iter()
        .map(|file| {
            let points = parser::parse_file(&file.path, range).unwrap_or_else(|e| {
                tracing::warn!("Failed to read {}: {e}", file.name);
                Vec::new()
            });
            file_counts.push((file.name.clone(), points.len()));
            points
        })
        .collect();

    let points = stitch(per_file);
    tracing::info!(
        channel,
        files = selected.len(),
        points = points.len(),
        "Loaded channel from {:?}",
        dir
    );

    Ok(Loaded {
        points,
        latest_file,
        file_counts,
    })
}
