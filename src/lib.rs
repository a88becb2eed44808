/*!
 * # subcensor - profanity censoring for SRT subtitles
 *
 * A Rust library that finds profanity in subtitle files, writes censored
 * subtitles and computes the time intervals an audio tool should mute.
 *
 * ## Features
 *
 * - Lenient SRT parsing (BOM, CRLF, missing index lines, malformed timestamps)
 * - Whole-entry censoring from a "full" word list or regex include patterns
 * - Single-word mode: short padded intervals around each occurrence
 * - Normal, exclusive or both subtitle outputs with a configurable affix
 * - JSON mute reports with merged, clamped intervals
 * - Parallel folder processing
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: SRT parsing and serialization
 * - `filtering`: Detection and censoring:
 *   - `filtering::word_matcher`: Word search with an alphabetic boundary
 *   - `filtering::regex_filter`: Regex include patterns
 *   - `filtering::intervals`: Mute interval calculation and merging
 *   - `filtering::detector`: Per-entry flagging
 *   - `filtering::rewriter`: Censored subtitle output
 *   - `filtering::mute_report`: Interval export
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::len_without_is_empty)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod filtering;
pub mod subtitle_processor;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, FilterError, SubtitleError};
pub use filtering::{Interval, MuteReport, ProfanityDetector, SubtitleRewriter};
pub use subtitle_processor::{SubtitleCollection, SubtitleEntry};
