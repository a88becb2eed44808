/*!
 * Mute interval arithmetic.
 *
 * Maps a character position inside a subtitle entry to an absolute time span
 * and collapses overlapping spans. Interval bounds are signed milliseconds:
 * a padded interval near the start of a film may begin before zero, and the
 * consumer clamps when it actually cuts audio.
 */

use serde::{Deserialize, Serialize};

/// A time span to silence, in signed milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    /// Start of the span
    pub start_ms: i64,
    /// End of the span
    pub end_ms: i64,
}

impl Interval {
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        Self { start_ms, end_ms }
    }

    /// Interval covering a whole subtitle entry
    pub fn from_entry_bounds(start_ms: u64, end_ms: u64) -> Self {
        Self {
            start_ms: saturating_ms(start_ms),
            end_ms: saturating_ms(end_ms),
        }
    }

    pub fn duration_ms(&self) -> i64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// Clamp to `[0, upper]`, returning `None` when nothing of the span remains
    pub fn clamped(&self, upper_ms: Option<i64>) -> Option<Self> {
        let start = self.start_ms.max(0);
        let end = match upper_ms {
            Some(upper) => self.end_ms.min(upper),
            None => self.end_ms,
        };

        (end > start).then_some(Self::new(start, end))
    }
}

/// Compute the padded mute interval for a match inside an entry
///
/// The position of the match is mapped linearly onto the entry's display time,
/// assuming a uniform reading speed: `midpoint / text_len` of the way through
/// `[start, end]`, truncated to whole milliseconds.
pub fn calculate_interval(
    text_len: usize,
    entry_start_ms: u64,
    entry_end_ms: u64,
    midpoint: usize,
    before_ms: u64,
    after_ms: u64,
) -> Interval {
    let total_ms = entry_end_ms.saturating_sub(entry_start_ms) as f64;
    let proportion = if text_len == 0 {
        0.0
    } else {
        midpoint as f64 / text_len as f64
    };
    let offset_ms = (proportion * total_ms) as i64;

    let center_ms = saturating_ms(entry_start_ms).saturating_add(offset_ms);
    let start_ms = center_ms.saturating_sub(saturating_ms(before_ms));
    let end_ms = center_ms.saturating_add(saturating_ms(after_ms));

    Interval::new(start_ms, end_ms)
}

// @converts: Unsigned milliseconds to i64, saturating at i64::MAX
fn saturating_ms(ms: u64) -> i64 {
    i64::try_from(ms).unwrap_or(i64::MAX)
}

/// Collapse overlapping or touching intervals into a sorted minimal set
pub fn merge_intervals(mut intervals: Vec<Interval>) -> Vec<Interval> {
    if intervals.len() <= 1 {
        return intervals;
    }

    intervals.sort_by_key(|interval| interval.start_ms);

    let mut merged = Vec::with_capacity(intervals.len());
    let mut current = intervals[0];

    for next in intervals.into_iter().skip(1) {
        if next.start_ms <= current.end_ms {
            current.end_ms = current.end_ms.max(next.end_ms);
        } else {
            merged.push(current);
            current = next;
        }
    }
    merged.push(current);

    merged
}
