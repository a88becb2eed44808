/*!
 * Per-entry profanity detection.
 *
 * Decides for every subtitle entry whether it must be censored and which
 * spans of audio to silence:
 * - a regex hit or a "full" word censors the whole entry
 * - in single-word mode, each regex match and each "single" word occurrence
 *   adds a short padded interval around its position; single words use the
 *   same occurrences censoring masks, so a muted word is always starred out
 *
 * Detection never mutates its input; annotated copies are returned.
 */

use log::debug;

use crate::app_config::Config;
use crate::filtering::intervals::{calculate_interval, merge_intervals, Interval};
use crate::filtering::regex_filter::RegexFilterProcessor;
use crate::filtering::word_matcher::BoundaryMatcher;
use crate::subtitle_processor::SubtitleEntry;

/// Lowercased word lists used for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordList {
    /// Words that censor the whole entry
    pub full: Vec<String>,
    /// Words that censor a padded interval around each occurrence
    pub single: Vec<String>,
}

impl WordList {
    /// Normalize raw words: lowercase, trimmed, blanks dropped
    pub fn new<S: AsRef<str>>(full: &[S], single: &[S]) -> Self {
        let normalize = |words: &[S]| -> Vec<String> {
            words
                .iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect()
        };

        Self {
            full: normalize(full),
            single: normalize(single),
        }
    }

    /// Full words followed by single words, the order used when censoring text
    pub fn all_words(&self) -> impl Iterator<Item = &str> {
        self.full.iter().chain(self.single.iter()).map(String::as_str)
    }
}

/// Padding around a single-word occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleWordMargins {
    pub before_ms: u64,
    pub after_ms: u64,
}

/// Annotates subtitle entries with removal flags and mute intervals
#[derive(Debug, Clone)]
pub struct ProfanityDetector {
    words: WordList,
    regex: Option<RegexFilterProcessor>,
    single_word: Option<SingleWordMargins>,
}

impl ProfanityDetector {
    /// Create a detector from explicit parts
    ///
    /// `regex` is `None` when regex filtering is disabled; `single_word` is
    /// `None` when single-word mode is off.
    pub fn new(
        words: WordList,
        regex: Option<RegexFilterProcessor>,
        single_word: Option<SingleWordMargins>,
    ) -> Self {
        Self {
            words,
            regex,
            single_word,
        }
    }

    /// Build a detector from the application configuration
    pub fn from_config(config: &Config) -> Self {
        let words = WordList::new(&config.words.full, &config.words.single);

        let regex = config
            .regex
            .enabled
            .then(|| RegexFilterProcessor::from_config(&config.regex))
            .filter(|processor| !processor.is_empty());

        let single_word = config.single_word.enabled.then_some(SingleWordMargins {
            before_ms: config.single_word.before_ms,
            after_ms: config.single_word.after_ms,
        });

        Self::new(words, regex, single_word)
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }

    pub fn regex(&self) -> Option<&RegexFilterProcessor> {
        self.regex.as_ref()
    }

    /// Annotate every entry, preserving order
    pub fn annotate(&self, entries: &[SubtitleEntry]) -> Vec<SubtitleEntry> {
        entries.iter().map(|entry| self.annotate_entry(entry)).collect()
    }

    /// Return a copy of `entry` with its removal flag and merged intervals set
    pub fn annotate_entry(&self, entry: &SubtitleEntry) -> SubtitleEntry {
        let mut annotated = entry.clone();
        let mut intervals = entry.remove_intervals.clone();
        let mut flagged = entry.remove_flag;

        let whole_entry = Interval::from_entry_bounds(entry.start_time_ms, entry.end_time_ms);

        if self.regex.as_ref().is_some_and(|regex| regex.contains_match(&entry.text)) {
            debug!("Entry {} matched a regex pattern", entry.seq_num);
            intervals.push(whole_entry);
            flagged = true;
        } else if let Some(word) = self
            .words
            .full
            .iter()
            .find(|word| BoundaryMatcher::find(&entry.text, word).is_some())
        {
            debug!("Entry {} contains full word '{}'", entry.seq_num, word);
            intervals.push(whole_entry);
            flagged = true;
        }

        if let Some(margins) = self.single_word {
            let text_len = entry.text.chars().count();
            let interval_at = |midpoint: usize| {
                calculate_interval(
                    text_len,
                    entry.start_time_ms,
                    entry.end_time_ms,
                    midpoint,
                    margins.before_ms,
                    margins.after_ms,
                )
            };

            if let Some(regex) = self.regex.as_ref().filter(|_| !flagged) {
                let matches = regex.find_matches(&entry.text);
                if !matches.is_empty() {
                    flagged = true;
                    intervals.extend(matches.iter().map(|m| interval_at(m.midpoint())));
                }
            }

            for word in &self.words.single {
                let occurrences = BoundaryMatcher::find_all(&entry.text, word);
                if occurrences.is_empty() {
                    continue;
                }
                debug!(
                    "Entry {} contains single word '{}' {} time(s)",
                    entry.seq_num,
                    word,
                    occurrences.len()
                );
                flagged = true;
                intervals.extend(occurrences.iter().map(|m| interval_at(m.midpoint())));
            }
        }

        annotated.remove_flag = flagged;
        annotated.remove_intervals = merge_intervals(intervals);
        annotated
    }
}
