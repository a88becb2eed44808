/*!
 * Mute report export.
 *
 * Collects the merged mute intervals of every flagged entry into a single JSON
 * document that an audio tool can consume to silence the film.
 */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::file_utils::FileManager;
use crate::filtering::intervals::{merge_intervals, Interval};
use crate::subtitle_processor::SubtitleEntry;

/// File suffix appended to the subtitle stem
const REPORT_SUFFIX: &str = "_mute.json";

/// Mute intervals for one subtitle file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuteReport {
    // @field: Subtitle file the report was computed from
    pub source: PathBuf,

    // @field: Number of entries flagged for removal
    pub flagged_entries: usize,

    // @field: Sorted, disjoint spans clamped to the timeline
    pub intervals: Vec<Interval>,
}

impl MuteReport {
    /// Build a report from annotated entries
    ///
    /// Intervals of all flagged entries are merged across the whole file and
    /// clamped to start at zero and, when known, to end at `duration_ms`.
    pub fn from_entries(
        source: &Path,
        entries: &[SubtitleEntry],
        duration_ms: Option<i64>,
    ) -> Self {
        let flagged: Vec<&SubtitleEntry> = entries.iter().filter(|e| e.remove_flag).collect();

        let all = flagged
            .iter()
            .flat_map(|entry| entry.remove_intervals.iter().copied())
            .collect();

        let intervals = merge_intervals(all)
            .into_iter()
            .filter_map(|interval| interval.clamped(duration_ms))
            .collect();

        Self {
            source: source.to_path_buf(),
            flagged_entries: flagged.len(),
            intervals,
        }
    }

    /// Total muted time in milliseconds
    pub fn total_muted_ms(&self) -> i64 {
        self.intervals.iter().map(Interval::duration_ms).sum()
    }

    /// Default report location: `{dir}/{stem}_mute.json`
    pub fn default_path(subtitle_path: &Path, output_dir: Option<&Path>) -> PathBuf {
        let stem = subtitle_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let dir = output_dir
            .map(Path::to_path_buf)
            .or_else(|| subtitle_path.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        dir.join(format!("{}{}", stem, REPORT_SUFFIX))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize mute report")
    }

    /// Write the report as pretty JSON
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        FileManager::write_to_file(path, &self.to_json()?)
            .with_context(|| format!("Failed to write mute report: {}", path.display()))?;
        debug!(
            "Wrote mute report with {} interval(s) to {}",
            self.intervals.len(),
            path.display()
        );
        Ok(())
    }
}
