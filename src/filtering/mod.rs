/*!
 * Profanity filtering.
 *
 * - `word_matcher`: exact word search with an alphabetic boundary
 * - `regex_filter`: compiled include patterns
 * - `intervals`: mute interval arithmetic
 * - `detector`: per-entry flagging and interval collection
 * - `rewriter`: censored subtitle generation
 * - `mute_report`: JSON export of the intervals
 */

pub mod detector;
pub mod intervals;
pub mod mute_report;
pub mod regex_filter;
pub mod rewriter;
pub mod word_matcher;

pub use detector::{ProfanityDetector, SingleWordMargins, WordList};
pub use intervals::{calculate_interval, merge_intervals, Interval};
pub use mute_report::MuteReport;
pub use regex_filter::{RegexFilterProcessor, RegexMatch};
pub use rewriter::{generate_output_path, RenderedSubtitles, SubtitleRewriter, SubtitleVariant};
pub use word_matcher::{BoundaryMatcher, WordMatch};
