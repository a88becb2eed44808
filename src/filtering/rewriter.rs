/*!
 * Censored subtitle generation.
 *
 * Produces masked copies of annotated entries and serializes them into the
 * normal and exclusive subtitle variants.
 */

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::app_config::SubtitlesType;
use crate::errors::SubtitleError;
use crate::filtering::detector::WordList;
use crate::filtering::regex_filter::RegexFilterProcessor;
use crate::filtering::word_matcher::BoundaryMatcher;
use crate::subtitle_processor::{write_srt_file, SubtitleCollection, SubtitleEntry};

/// Text used for entries blanked out of exclusive subtitles
const BLANK_ENTRY_TEXT: &str = " ";

/// One concrete subtitle file to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleVariant {
    /// Every entry, profanity masked
    Normal,
    /// Only flagged entries keep their text
    Exclusive,
}

impl SubtitleVariant {
    /// Variants written for an output mode
    pub fn for_type(subtitles_type: SubtitlesType) -> Vec<Self> {
        match subtitles_type {
            SubtitlesType::Normal => vec![Self::Normal],
            SubtitlesType::Exclusive => vec![Self::Exclusive],
            SubtitlesType::Both => vec![Self::Normal, Self::Exclusive],
        }
    }

    // @returns: Extra stem tag used when both variants are written side by side
    fn both_tag(&self) -> &'static str {
        match self {
            Self::Normal => "_Normal",
            Self::Exclusive => "_Exclusive",
        }
    }
}

/// Rendered subtitle content destined for one file
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSubtitles {
    pub variant: SubtitleVariant,
    pub path: PathBuf,
    pub content: String,
}

/// Build the output path for a subtitle variant
///
/// `movie.srt` becomes `movie{affix}.srt`; when both variants are written the
/// stem also receives `_Normal` or `_Exclusive`. With `embed` the file lands in
/// the system temp directory, where the muxer picks it up.
pub fn generate_output_path(
    subtitle_path: &Path,
    output_dir: Option<&Path>,
    custom_affix: &str,
    subtitles_type: SubtitlesType,
    variant: SubtitleVariant,
    embed: bool,
) -> PathBuf {
    let stem = subtitle_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let tag = if subtitles_type == SubtitlesType::Both {
        variant.both_tag()
    } else {
        ""
    };
    let file_name = format!("{}{}{}.srt", stem, tag, custom_affix);

    if embed {
        return std::env::temp_dir().join(file_name);
    }

    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| subtitle_path.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(file_name)
}

/// Masks profanity in subtitle text
#[derive(Debug, Clone)]
pub struct SubtitleRewriter {
    words: WordList,
    regex: Option<RegexFilterProcessor>,
}

impl SubtitleRewriter {
    pub fn new(words: WordList, regex: Option<RegexFilterProcessor>) -> Self {
        Self { words, regex }
    }

    /// Censored copy of a text: regex masking first, then every listed word
    pub fn censor_text(&self, text: &str) -> String {
        let mut censored = match &self.regex {
            Some(regex) => regex.censor_text(text),
            None => text.to_string(),
        };

        for word in self.words.all_words() {
            censored = BoundaryMatcher::censor_word(&censored, word);
        }

        censored
    }

    /// Copies of the entries with censored text; flags and intervals are kept
    pub fn censor_entries(&self, entries: &[SubtitleEntry]) -> Vec<SubtitleEntry> {
        entries
            .iter()
            .map(|entry| SubtitleEntry {
                text: self.censor_text(&entry.text),
                ..entry.clone()
            })
            .collect()
    }

    /// Serialize censored entries for one variant
    ///
    /// Both variants keep every entry and its timing; the exclusive variant
    /// replaces the text of unflagged entries with a single space.
    pub fn render(censored: &[SubtitleEntry], variant: SubtitleVariant) -> String {
        match variant {
            SubtitleVariant::Normal => SubtitleCollection::to_srt_string(censored),
            SubtitleVariant::Exclusive => {
                let blanked: Vec<SubtitleEntry> = censored
                    .iter()
                    .map(|entry| {
                        if entry.remove_flag {
                            entry.clone()
                        } else {
                            SubtitleEntry {
                                text: BLANK_ENTRY_TEXT.to_string(),
                                ..entry.clone()
                            }
                        }
                    })
                    .collect();
                SubtitleCollection::to_srt_string(&blanked)
            }
        }
    }

    /// Render every variant of an output mode for an annotated collection
    pub fn render_all(
        &self,
        collection: &SubtitleCollection,
        output_dir: Option<&Path>,
        custom_affix: &str,
        subtitles_type: SubtitlesType,
        embed: bool,
    ) -> Vec<RenderedSubtitles> {
        let censored = self.censor_entries(&collection.entries);

        SubtitleVariant::for_type(subtitles_type)
            .into_iter()
            .map(|variant| RenderedSubtitles {
                variant,
                path: generate_output_path(
                    &collection.source_file,
                    output_dir,
                    custom_affix,
                    subtitles_type,
                    variant,
                    embed,
                ),
                content: Self::render(&censored, variant),
            })
            .collect()
    }

    /// Write rendered subtitles, returning the paths written
    pub fn write_all(rendered: &[RenderedSubtitles]) -> Result<Vec<PathBuf>, SubtitleError> {
        let mut written = Vec::with_capacity(rendered.len());
        for output in rendered {
            write_srt_file(&output.path, &output.content)?;
            debug!("Wrote {:?} subtitles to {}", output.variant, output.path.display());
            written.push(output.path.clone());
        }
        info!("Wrote {} censored subtitle file(s)", written.len());
        Ok(written)
    }
}
