use std::fmt;
use std::path::{Path, PathBuf};
use anyhow::Result;
use log::{debug, warn};
use crate::errors::SubtitleError;
use crate::file_utils::FileManager;
use crate::filtering::intervals::Interval;

// @module: Subtitle parsing and serialization

// @const: Exact length of an SRT timestamp line
const TIMESTAMP_LINE_LEN: usize = 29;

// @const: Column where the end timestamp starts
const END_TIMESTAMP_COLUMN: usize = 17;

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    // @field: Sequence number (1-based position in the parsed file)
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Subtitle text, lines joined with '\n'
    pub text: String,

    // @field: Entry contains profanity
    pub remove_flag: bool,

    // @field: Spans to mute, sorted and disjoint once merged
    pub remove_intervals: Vec<Interval>,
}

impl SubtitleEntry {
    /// Creates a new, unflagged subtitle entry
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
            remove_flag: false,
            remove_intervals: Vec::new(),
        }
    }

    /// Display duration of the entry
    pub fn duration_ms(&self) -> u64 {
        self.end_time_ms.saturating_sub(self.start_time_ms)
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time_ms)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }

    /// Recognize an SRT timestamp line and return its (start, end) in milliseconds
    ///
    /// The line must be exactly `HH:MM:SS,mmm --> HH:MM:SS,mmm`. A `.` is also
    /// accepted as the millisecond separator. Anything else, including
    /// minutes or seconds of 60 and above, is not a timestamp line.
    pub fn parse_timestamp_line(line: &str) -> Option<(u64, u64)> {
        if !line.is_ascii() || line.len() != TIMESTAMP_LINE_LEN {
            return None;
        }
        if &line[12..END_TIMESTAMP_COLUMN] != " --> " {
            return None;
        }

        let start = Self::parse_timestamp_fields(&line[..12])?;
        let end = Self::parse_timestamp_fields(&line[END_TIMESTAMP_COLUMN..])?;
        Some((start, end))
    }

    // @parses: "HH:MM:SS,mmm" with fixed columns
    fn parse_timestamp_fields(field: &str) -> Option<u64> {
        let bytes = field.as_bytes();
        if bytes[2] != b':' || bytes[5] != b':' || !matches!(bytes[8], b',' | b'.') {
            return None;
        }

        let number = |range: std::ops::Range<usize>| -> Option<u64> {
            let digits = &field[range];
            if digits.bytes().all(|b| b.is_ascii_digit()) {
                digits.parse().ok()
            } else {
                None
            }
        };

        let hours = number(0..2)?;
        let minutes = number(3..5)?;
        let seconds = number(6..8)?;
        let millis = number(9..12)?;

        if minutes >= 60 || seconds >= 60 {
            return None;
        }

        Some(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
    }

    /// Whether a line is the numeric counter that precedes a timestamp line
    fn is_index_line(line: &str) -> bool {
        let trimmed = line.trim();
        !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit())
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        for line in self.text.split('\n') {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)
    }
}

/// Collection of subtitle entries with metadata
#[derive(Debug, Clone)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// List of subtitle entries
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Create a new subtitle collection
    pub fn new(source_file: PathBuf) -> Self {
        SubtitleCollection {
            source_file,
            entries: Vec::new(),
        }
    }

    /// Read and parse an SRT file
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SubtitleError> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path).map_err(|e| SubtitleError::ReadFailed {
            path: path.to_path_buf(),
            message: format!("{:#}", e),
        })?;

        let entries = Self::parse_srt_string(&content);
        debug!("Parsed {} subtitle entries from {}", entries.len(), path.display());

        Ok(SubtitleCollection {
            source_file: path.to_path_buf(),
            entries,
        })
    }

    /// Parse SRT format string into subtitle entries
    pub fn parse_srt_string(content: &str) -> Vec<SubtitleEntry> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        Self::parse_srt_lines(content.lines())
    }

    /// Parse the lines of an SRT file into subtitle entries, in file order
    ///
    /// Parsing is lenient: lines that are not recognized as timestamps are
    /// treated as text, entries whose text ends up empty are dropped, and text
    /// before the first timestamp line is discarded.
    pub fn parse_srt_lines<'a, I>(lines: I) -> Vec<SubtitleEntry>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut entries = Vec::new();
        let mut current_times: Option<(u64, u64)> = None;
        let mut current_lines: Vec<&str> = Vec::new();

        for line in lines {
            let line = line.strip_suffix('\r').unwrap_or(line);

            if let Some(times) = SubtitleEntry::parse_timestamp_line(line) {
                if current_lines.last().is_some_and(|last| SubtitleEntry::is_index_line(last)) {
                    current_lines.pop();
                }
                Self::emit_entry(current_times, &mut current_lines, &mut entries);
                current_times = Some(times);
            } else if !line.is_empty() {
                current_lines.push(line);
            }
        }

        Self::emit_entry(current_times, &mut current_lines, &mut entries);

        entries
    }

    // @emits: Accumulated entry if it has timing and text, then resets the buffer
    fn emit_entry(
        times: Option<(u64, u64)>,
        lines: &mut Vec<&str>,
        entries: &mut Vec<SubtitleEntry>,
    ) {
        match times {
            Some((start_ms, end_ms)) if !lines.is_empty() => {
                let end_ms = if end_ms < start_ms {
                    warn!(
                        "Subtitle entry at {} ends before it starts, clamping end to start",
                        SubtitleEntry::format_timestamp(start_ms)
                    );
                    start_ms
                } else {
                    end_ms
                };
                let seq_num = entries.len() + 1;
                entries.push(SubtitleEntry::new(seq_num, start_ms, end_ms, lines.join("\n")));
            }
            Some((start_ms, _)) => {
                debug!(
                    "Skipping empty subtitle entry at {}",
                    SubtitleEntry::format_timestamp(start_ms)
                );
            }
            None if !lines.is_empty() => {
                debug!("Discarding {} line(s) before the first timestamp", lines.len());
            }
            None => {}
        }
        lines.clear();
    }

    /// Serialize entries as SRT text, renumbering from 1
    pub fn to_srt_string(entries: &[SubtitleEntry]) -> String {
        let mut output = String::new();
        for (i, entry) in entries.iter().enumerate() {
            output.push_str(&format!("{}\n", i + 1));
            output.push_str(&format!(
                "{} --> {}\n",
                entry.format_start_time(),
                entry.format_end_time()
            ));
            for line in entry.text.split('\n') {
                output.push_str(line);
                output.push('\n');
            }
            output.push('\n');
        }
        output
    }

    /// Write subtitles to an SRT file, replacing any existing file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<(), SubtitleError> {
        write_srt_file(path.as_ref(), &Self::to_srt_string(&self.entries))
    }

    /// Number of entries flagged for removal
    pub fn flagged_count(&self) -> usize {
        self.entries.iter().filter(|e| e.remove_flag).count()
    }
}

/// Write already-serialized SRT content, creating the parent directory if needed
pub fn write_srt_file(path: &Path, content: &str) -> Result<(), SubtitleError> {
    FileManager::write_to_file(path, content).map_err(|e| SubtitleError::WriteFailed {
        path: path.to_path_buf(),
        message: format!("{:#}", e),
    })
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        writeln!(f, "Flagged: {}", self.flagged_count())?;
        Ok(())
    }
}
