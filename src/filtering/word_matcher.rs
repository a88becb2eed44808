/*!
 * Exact profanity word matching with a crude alphabetic word boundary.
 *
 * Positions are character indices into the text, not byte offsets, so they can
 * be fed directly into the interval calculator. Only ASCII `a-z` counts as a
 * letter for the boundary test: digits, punctuation and accented letters next
 * to a word never block a match.
 */

/// A boundary-clean occurrence of a word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordMatch {
    /// Index of the first character
    pub begin: usize,
    /// Index of the last character (inclusive)
    pub end: usize,
}

impl WordMatch {
    pub fn len(&self) -> usize {
        self.end + 1 - self.begin
    }

    /// Character index used to place the mute interval
    pub fn midpoint(&self) -> usize {
        self.begin + self.len() / 2
    }
}

/// Stateless matcher for single profanity words
pub struct BoundaryMatcher;

impl BoundaryMatcher {
    /// Find the first occurrence of `word`, rejecting it when glued to a letter
    ///
    /// Only the first occurrence is considered: if it is embedded in a longer
    /// word the whole call reports no match, even when a later occurrence
    /// would have been clean.
    pub fn find(text: &str, word: &str) -> Option<WordMatch> {
        let haystack = lowercase_chars(text);
        let needle = lowercase_chars(word);
        if needle.is_empty() {
            return None;
        }

        let begin = index_of(&haystack, &needle)?;

        if haystack.len() <= needle.len() {
            return Some(WordMatch {
                begin: 0,
                end: needle.len() - 1,
            });
        }

        let candidate = WordMatch {
            begin,
            end: begin + needle.len() - 1,
        };
        is_boundary_clean(&haystack, candidate).then_some(candidate)
    }

    /// Every occurrence `censor_word` would mask, in text order
    ///
    /// Repeats `find` on a copy where each accepted occurrence has been masked,
    /// so it stops at the first remaining occurrence that is glued to a letter.
    /// An empty result means the text is left untouched by censoring.
    pub fn find_all(text: &str, word: &str) -> Vec<WordMatch> {
        let mut matches = Vec::new();
        let mut chars: Vec<char> = text.chars().collect();
        let mut current = text.to_string();

        while let Some(found) = Self::find(&current, word) {
            for c in &mut chars[found.begin..=found.end] {
                *c = '*';
            }
            let next: String = chars.iter().collect();
            if next == current {
                break;
            }
            matches.push(found);
            current = next;
        }

        matches
    }

    /// Mask every occurrence `find_all` reports with `*`
    ///
    /// The replacement has the same length as the word, so the text never
    /// grows and character positions stay valid.
    pub fn censor_word(text: &str, word: &str) -> String {
        let mut chars: Vec<char> = text.chars().collect();
        for found in Self::find_all(text, word) {
            for c in &mut chars[found.begin..=found.end] {
                *c = '*';
            }
        }
        chars.into_iter().collect()
    }
}

// Per-character lowercase keeps indices aligned with the original text.
fn lowercase_chars(text: &str) -> Vec<char> {
    text.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                let mut lower = c.to_lowercase();
                match (lower.next(), lower.next()) {
                    (Some(single), None) => single,
                    _ => c,
                }
            }
        })
        .collect()
}

fn index_of(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&i| haystack[i..i + needle.len()] == *needle)
}

fn is_boundary_clean(haystack: &[char], candidate: WordMatch) -> bool {
    if candidate.begin > 0 && haystack[candidate.begin - 1].is_ascii_lowercase() {
        return false;
    }
    if candidate.end + 1 < haystack.len() && haystack[candidate.end + 1].is_ascii_lowercase() {
        return false;
    }
    true
}
