// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::PathBuf;

use subcensor::app_config::{self, Config, RegexFilterConfig, SubtitlesType};
use subcensor::app_controller::{Controller, FileOutcome};

/// CLI Wrapper for SubtitlesType to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliSubtitlesType {
    Normal,
    Exclusive,
    Both,
}

impl From<CliSubtitlesType> for SubtitlesType {
    fn from(cli_type: CliSubtitlesType) -> Self {
        match cli_type {
            CliSubtitlesType::Normal => SubtitlesType::Normal,
            CliSubtitlesType::Exclusive => SubtitlesType::Exclusive,
            CliSubtitlesType::Both => SubtitlesType::Both,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for subcensor
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Write the standard regex filter configuration to a JSON file
    DefaultRegexConfig {
        /// Destination file
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

#[derive(Parser, Debug)]
struct CensorArgs {
    /// Input subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Directory for censored subtitles and mute reports (defaults to next to the input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Which censored subtitle files to produce
    #[arg(short = 't', long, value_enum)]
    subtitles_type: Option<CliSubtitlesType>,

    /// Mute only a padded interval around single words
    #[arg(long)]
    single_word: bool,

    /// Milliseconds muted before a single word
    #[arg(long, requires = "single_word")]
    single_word_before: Option<u64>,

    /// Milliseconds muted after a single word
    #[arg(long, requires = "single_word")]
    single_word_after: Option<u64>,

    /// Enable regex filtering
    #[arg(short = 'r', long)]
    use_regex: bool,

    /// Regex filter configuration file (JSON); implies --use-regex
    #[arg(long)]
    regex_config: Option<PathBuf>,

    /// Suffix appended to output file names
    #[arg(short = 'a', long)]
    custom_affix: Option<String>,

    /// Write subtitles to the temp directory for an external muxer
    #[arg(short, long)]
    embed_subtitles: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Detect and report without writing any file
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subcensor - profanity censoring for SRT subtitles
///
/// Finds profanity in subtitle files, writes censored copies and reports the
/// time spans to mute in the audio track.
#[derive(Parser, Debug)]
#[command(name = "subcensor")]
#[command(version)]
#[command(about = "Profanity censoring for SRT subtitles")]
#[command(long_about = "subcensor flags profane subtitle entries, writes censored subtitle files and a JSON report of the intervals to mute.

EXAMPLES:
    subcensor movie.srt                          # Censor using default config
    subcensor -f movie.srt                       # Force overwrite existing files
    subcensor -t both movie.srt                  # Write normal and exclusive subtitles
    subcensor --single-word movie.srt            # Mute single words instead of whole entries
    subcensor --regex-config filter.json /films/ # Process a directory with regex filtering
    subcensor -n movie.srt                       # Only report what would be muted
    subcensor completions bash > subcensor.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
#[command(args_conflicts_with_subcommands = true)]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    censor: CensorArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for log level
    fn decoration_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::decoration_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is lowered once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subcensor", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::DefaultRegexConfig { path }) => {
            RegexFilterConfig::create_default().save_to_json(&path)?;
            Ok(())
        }
        None => run_censor(cli.censor).await,
    }
}

async fn run_censor(options: CensorArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&level));
    }

    let input_path = options
        .input_path
        .clone()
        .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

    let mut config = Config::load_or_create(&options.config_path)?;
    apply_overrides(&mut config, &options)?;

    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?.with_dry_run(options.dry_run);

    if input_path.is_file() {
        match controller
            .run(input_path.clone(), options.output_dir.clone(), options.force_overwrite)
            .await?
        {
            FileOutcome::Processed(summary) => {
                let total_ms = summary.report.total_muted_ms();
                let count = summary.report.intervals.len();
                info!("{} interval(s), {} ms muted in total", count, total_ms);
            }
            FileOutcome::Skipped(_) => {}
        }
    } else if input_path.is_dir() {
        let summary = controller
            .run_folder(input_path.clone(), options.output_dir.clone(), options.force_overwrite)
            .await?;
        if summary.failed > 0 {
            warn!("{} file(s) failed, see the errors above", summary.failed);
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    Ok(())
}

// Command line flags win over the configuration file
fn apply_overrides(config: &mut Config, options: &CensorArgs) -> Result<()> {
    if let Some(subtitles_type) = &options.subtitles_type {
        config.output.subtitles_type = subtitles_type.clone().into();
    }
    if options.single_word {
        config.single_word.enabled = true;
    }
    if let Some(before_ms) = options.single_word_before {
        config.single_word.before_ms = before_ms;
    }
    if let Some(after_ms) = options.single_word_after {
        config.single_word.after_ms = after_ms;
    }
    if let Some(path) = &options.regex_config {
        config.regex = RegexFilterConfig::load_from_json(path)
            .with_context(|| format!("Failed to load regex configuration: {}", path.display()))?;
        config.regex.enabled = true;
    }
    if options.use_regex {
        config.regex.enabled = true;
        if config.regex.include_patterns.is_empty() {
            info!("No regex patterns configured, using the standard filter");
            config.regex = RegexFilterConfig::create_default();
        }
    }
    if let Some(affix) = &options.custom_affix {
        config.output.custom_affix = affix.clone();
    }
    if options.embed_subtitles {
        config.output.embed_subtitles = true;
    }
    if let Some(level) = &options.log_level {
        config.log_level = level.clone().into();
    }

    Ok(())
}
