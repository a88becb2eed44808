/*!
 * Regex-based profanity filtering.
 *
 * A processor holds an ordered list of compiled include patterns. Patterns that
 * fail to compile are dropped with a warning so one bad line in a filter file
 * never disables the rest.
 */

use log::{debug, warn};
use regex::{Regex, RegexBuilder};

use crate::app_config::RegexFilterConfig;
use crate::errors::FilterError;

/// One pattern match, positioned in characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexMatch {
    /// Character index of the first matched character
    pub index: usize,
    /// Match length in characters
    pub length: usize,
    /// The matched text
    pub text: String,
}

impl RegexMatch {
    /// Character index used to place the mute interval
    pub fn midpoint(&self) -> usize {
        self.index + self.length / 2
    }
}

/// Compiled include patterns
#[derive(Debug, Clone)]
pub struct RegexFilterProcessor {
    patterns: Vec<Regex>,
}

impl RegexFilterProcessor {
    /// Compile case-insensitive include patterns, skipping the ones that fail
    pub fn new<S: AsRef<str>>(include_patterns: &[S]) -> Self {
        Self::with_case_sensitivity(include_patterns, false)
    }

    /// Build a processor from a filter configuration
    pub fn from_config(config: &RegexFilterConfig) -> Self {
        Self::with_case_sensitivity(&config.effective_patterns(), config.case_sensitive)
    }

    fn with_case_sensitivity<S: AsRef<str>>(include_patterns: &[S], case_sensitive: bool) -> Self {
        let mut patterns = Vec::with_capacity(include_patterns.len());

        for pattern in include_patterns {
            let pattern = pattern.as_ref().trim();
            if pattern.is_empty() {
                continue;
            }
            match compile_pattern(pattern, case_sensitive) {
                Ok(regex) => patterns.push(regex),
                Err(e) => warn!("Skipping regex pattern: {}", e),
            }
        }

        debug!("Compiled {} of {} regex include patterns", patterns.len(), include_patterns.len());
        Self { patterns }
    }

    /// Number of patterns that compiled
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True when any pattern matches anywhere in the text
    pub fn contains_match(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.patterns.iter().any(|pattern| pattern.is_match(text))
    }

    /// All matches of all patterns, pattern order first, then scan order
    ///
    /// Matches from different patterns are neither deduplicated nor re-sorted.
    pub fn find_matches(&self, text: &str) -> Vec<RegexMatch> {
        let mut matches = Vec::new();
        if text.trim().is_empty() {
            return matches;
        }

        for pattern in &self.patterns {
            for found in pattern.find_iter(text) {
                matches.push(RegexMatch {
                    index: text[..found.start()].chars().count(),
                    length: found.as_str().chars().count(),
                    text: found.as_str().to_string(),
                });
            }
        }

        matches
    }

    /// Mask every matched span with `*`, working right to left
    ///
    /// Each replacement is exactly as long as its span, so indices never shift
    /// and overlapping spans from different patterns end up masked as their
    /// union.
    pub fn censor_text(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        let mut matches = self.find_matches(text);
        if matches.is_empty() {
            return text.to_string();
        }
        matches.sort_by(|a, b| b.index.cmp(&a.index));

        let mut chars: Vec<char> = text.chars().collect();
        for found in &matches {
            for c in &mut chars[found.index..found.index + found.length] {
                *c = '*';
            }
        }

        chars.into_iter().collect()
    }
}

fn compile_pattern(pattern: &str, case_sensitive: bool) -> Result<Regex, FilterError> {
    RegexBuilder::new(pattern)
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|e| FilterError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}
