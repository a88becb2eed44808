use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs;
use std::path::Path;

use crate::errors::{AppError, FilterError};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Profanity word lists
    #[serde(default)]
    pub words: WordListConfig,

    /// Single-word muting settings
    #[serde(default)]
    pub single_word: SingleWordConfig,

    /// Regex filter settings
    #[serde(default)]
    pub regex: RegexFilterConfig,

    /// Output subtitle settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Number of subtitle files processed in parallel by folder runs
    #[serde(default = "default_concurrent_files")]
    pub concurrent_files: usize,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Which censored subtitle files to produce
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubtitlesType {
    // @mode: Every entry, profanity masked in place
    #[default]
    Normal,
    // @mode: Only flagged entries keep their text
    Exclusive,
    // @mode: Normal and exclusive side by side
    Both,
}

impl SubtitlesType {
    // @returns: Lowercase identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Normal => "normal".to_string(),
            Self::Exclusive => "exclusive".to_string(),
            Self::Both => "both".to_string(),
        }
    }
}

impl std::fmt::Display for SubtitlesType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for SubtitlesType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "exclusive" => Ok(Self::Exclusive),
            "both" => Ok(Self::Both),
            _ => Err(anyhow::anyhow!("Invalid subtitles type: {}", s)),
        }
    }
}

/// Profanity word lists
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WordListConfig {
    /// Words that censor the whole subtitle entry
    #[serde(default = "default_full_words")]
    pub full: Vec<String>,

    /// Words that only censor a padded interval around the occurrence
    #[serde(default)]
    pub single: Vec<String>,
}

impl Default for WordListConfig {
    fn default() -> Self {
        Self {
            full: default_full_words(),
            single: Vec::new(),
        }
    }
}

/// Single-word muting configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SingleWordConfig {
    /// Whether single-word intervals are computed at all
    #[serde(default)]
    pub enabled: bool,

    /// Milliseconds muted before the word's midpoint
    #[serde(default = "default_margin_ms")]
    pub before_ms: u64,

    /// Milliseconds muted after the word's midpoint
    #[serde(default = "default_margin_ms")]
    pub after_ms: u64,
}

impl Default for SingleWordConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            before_ms: default_margin_ms(),
            after_ms: default_margin_ms(),
        }
    }
}

/// Regex filter configuration
///
/// Accepts both this crate's snake_case keys and the PascalCase keys written by
/// older filter configuration files.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RegexFilterConfig {
    /// Whether regex filtering participates in detection and censoring
    #[serde(default, alias = "UseRegexFiltering")]
    pub enabled: bool,

    /// Display name of the configuration
    #[serde(default = "default_regex_name", alias = "Name")]
    pub name: String,

    /// Free-form description
    #[serde(default = "default_regex_description", alias = "Description")]
    pub description: String,

    /// Ordered include patterns
    #[serde(default, alias = "IncludePatterns")]
    pub include_patterns: Vec<String>,

    /// Match case-sensitively instead of ignoring case
    #[serde(default, alias = "CaseSensitive")]
    pub case_sensitive: bool,

    /// Wrap simple patterns in `\b...\b` before compiling
    #[serde(default, alias = "AssumeWordBoundary")]
    pub assume_word_boundary: bool,
}

impl Default for RegexFilterConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            name: default_regex_name(),
            description: default_regex_description(),
            include_patterns: Vec::new(),
            case_sensitive: false,
            assume_word_boundary: false,
        }
    }
}

impl RegexFilterConfig {
    /// Standard configuration with the common profanity patterns
    pub fn create_default() -> Self {
        let include_patterns = [
            "ass", "fuck", "shit", "bitch", "damn", "hell", "cunt", "dick", "cock",
            "bastard", "asshole", "motherfucker", "bullshit", "goddamn", "piss",
            "pussy", "whore", "slut", "tits",
        ]
        .iter()
        .map(|word| format!("(^.*{}.*$)", word))
        .collect();

        Self {
            enabled: true,
            name: "Standard Profanity Filter".to_string(),
            description: "Standard configuration with common profanity patterns using (^.*WORD.*$) format"
                .to_string(),
            include_patterns,
            case_sensitive: false,
            assume_word_boundary: false,
        }
    }

    /// Patterns as they will be handed to the regex compiler
    ///
    /// With `assume_word_boundary` set, a pattern with no `\b` anywhere is
    /// wrapped as `\b{pattern}\b`; patterns that already carry a boundary are
    /// left alone.
    pub fn effective_patterns(&self) -> Vec<String> {
        self.include_patterns
            .iter()
            .map(|pattern| {
                if !self.assume_word_boundary {
                    return pattern.clone();
                }
                if pattern.starts_with("\\b") && pattern.ends_with("\\b") {
                    pattern.clone()
                } else if !pattern.contains("\\b") {
                    format!("\\b{}\\b", pattern)
                } else {
                    pattern.clone()
                }
            })
            .collect()
    }

    /// Load a regex filter configuration from a JSON file
    pub fn load_from_json<P: AsRef<Path>>(path: P) -> std::result::Result<Self, FilterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| FilterError::ConfigLoad(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| FilterError::ConfigLoad(format!("{}: {}", path.display(), e)))?;

        info!(
            "Loaded filter configuration '{}' from {} ({} include patterns)",
            config.name,
            path.display(),
            config.include_patterns.len()
        );

        Ok(config)
    }

    /// Save this configuration as pretty-printed JSON
    pub fn save_to_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize regex filter configuration")?;
        fs::write(path, json).with_context(|| {
            format!("Failed to write regex filter configuration: {}", path.display())
        })?;
        info!("Saved filter configuration '{}' to {}", self.name, path.display());
        Ok(())
    }
}

/// Output subtitle configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Write censored subtitle files at all
    #[serde(default = "default_true")]
    pub create_subtitles: bool,

    /// Write subtitles to the temp directory for an external muxer
    #[serde(default)]
    pub embed_subtitles: bool,

    /// Which subtitle variants to produce
    #[serde(default)]
    pub subtitles_type: SubtitlesType,

    /// Suffix appended to output file stems
    #[serde(default = "default_custom_affix")]
    pub custom_affix: String,

    /// Write the JSON mute report next to the outputs
    #[serde(default = "default_true")]
    pub write_mute_report: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            create_subtitles: true,
            embed_subtitles: false,
            subtitles_type: SubtitlesType::default(),
            custom_affix: default_custom_affix(),
            write_mute_report: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

/// Built-in full-entry profanity list
pub const DEFAULT_FULL_WORDS: [&str; 18] = [
    "ass", "asshole", "bastard", "bitch", "bullshit", "christ", "cock", "cunt",
    "damn", "dick", "dickhead", "fuck", "god", "goddamn", "jesus", "motherfucker",
    "pussy", "shit",
];

/// Largest accepted single-word margin (one hour)
pub const MAX_MARGIN_MS: u64 = 3_600_000;

fn default_full_words() -> Vec<String> {
    DEFAULT_FULL_WORDS.iter().map(|w| w.to_string()).collect()
}

fn default_margin_ms() -> u64 {
    500
}

fn default_concurrent_files() -> usize {
    4
}

fn default_custom_affix() -> String {
    "_SL".to_string()
}

fn default_regex_name() -> String {
    "Default".to_string()
}

fn default_regex_description() -> String {
    "Default regex filter configuration".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.regex.enabled && self.regex.include_patterns.iter().all(|p| p.trim().is_empty()) {
            return Err(AppError::Config(
                "Regex filtering is enabled but no include patterns are configured".to_string(),
            )
            .into());
        }

        if let Some(word) = self
            .words
            .full
            .iter()
            .chain(self.words.single.iter())
            .find(|w| w.trim().is_empty())
        {
            return Err(AppError::Config(format!("Blank entry in word list: {:?}", word)).into());
        }

        if self.output.custom_affix.contains(['/', '\\']) {
            return Err(AppError::Config(format!(
                "Custom affix must not contain path separators: {}",
                self.output.custom_affix
            ))
            .into());
        }

        if self.concurrent_files == 0 {
            return Err(AppError::Config("concurrent_files must be at least 1".to_string()).into());
        }

        for (name, margin) in [
            ("before_ms", self.single_word.before_ms),
            ("after_ms", self.single_word.after_ms),
        ] {
            if margin > MAX_MARGIN_MS {
                return Err(AppError::Config(format!(
                    "single_word.{} must be at most {} ms, got {}",
                    name, MAX_MARGIN_MS, margin
                ))
                .into());
            }
        }

        if self.single_word.enabled && self.words.single.is_empty() && !self.regex.enabled {
            warn!("Single-word mode is enabled but the single word list is empty");
        }

        Ok(())
    }

    /// Load a configuration file, or write and return the default when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        fs::write(path, config_json).with_context(|| {
            format!("Failed to write default config to file: {}", path.display())
        })?;

        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            words: WordListConfig::default(),
            single_word: SingleWordConfig::default(),
            regex: RegexFilterConfig::default(),
            output: OutputConfig::default(),
            concurrent_files: default_concurrent_files(),
            log_level: LogLevel::default(),
        }
    }
}
