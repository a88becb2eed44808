use anyhow::{Context, Result, anyhow};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::file_utils::{FileManager, FileType};
use crate::filtering::{
    MuteReport, ProfanityDetector, SubtitleRewriter, SubtitleVariant, generate_output_path,
};
use crate::subtitle_processor::SubtitleCollection;

// @module: Application controller for subtitle censoring

/// Result of processing one subtitle file
#[derive(Debug, Clone, PartialEq)]
pub struct FileSummary {
    // @field: Input subtitle file
    pub source: PathBuf,

    // @field: Parsed entries
    pub entries: usize,

    // @field: Entries flagged for removal
    pub flagged_entries: usize,

    // @field: Merged mute report for the file
    pub report: MuteReport,

    // @field: Censored subtitle files written
    pub outputs: Vec<PathBuf>,

    // @field: Mute report file written, if any
    pub report_path: Option<PathBuf>,
}

/// What happened to a single input
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Processed(FileSummary),
    /// Outputs already exist and overwriting was not requested
    Skipped(PathBuf),
}

/// Counters of a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub intervals: usize,
}

/// Main application controller for subtitle censoring
///
/// Cheap to clone; the detector and rewriter are shared read-only between
/// folder workers.
#[derive(Clone)]
pub struct Controller {
    // @field: App configuration
    config: Arc<Config>,

    // @field: Entry annotator built from the configuration
    detector: Arc<ProfanityDetector>,

    // @field: Text censor built from the same word lists and patterns
    rewriter: Arc<SubtitleRewriter>,

    // @field: Compute everything, write nothing
    dry_run: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let detector = ProfanityDetector::from_config(&config);
        let rewriter = SubtitleRewriter::new(detector.words().clone(), detector.regex().cloned());

        debug!(
            "Controller ready: {} full word(s), {} single word(s), {} regex pattern(s)",
            detector.words().full.len(),
            detector.words().single.len(),
            detector.regex().map_or(0, |r| r.pattern_count())
        );

        Ok(Self {
            config: Arc::new(config),
            detector: Arc::new(detector),
            rewriter: Arc::new(rewriter),
            dry_run: false,
        })
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the workflow for a single subtitle file
    pub async fn run(
        &self,
        input_file: PathBuf,
        output_dir: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<FileOutcome> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }
        if FileManager::detect_file_type(&input_file)? != FileType::Subtitle {
            return Err(anyhow!("Input file is not an SRT subtitle file: {:?}", input_file));
        }

        let outcome = self.process_file(&input_file, output_dir.as_deref(), force_overwrite)?;

        if let FileOutcome::Processed(summary) = &outcome {
            info!(
                "Censored {} of {} entries in {}",
                summary.flagged_entries,
                summary.entries,
                Self::format_duration(start_time.elapsed())
            );
        }

        Ok(outcome)
    }

    /// Read, annotate and censor one subtitle file, then write its outputs
    pub fn process_file(
        &self,
        input_file: &Path,
        output_dir: Option<&Path>,
        force_overwrite: bool,
    ) -> Result<FileOutcome> {
        let output = &self.config.output;

        if !force_overwrite && !self.dry_run {
            let planned = self.planned_outputs(input_file, output_dir);
            if let Some(existing) = planned.into_iter().find(|p| p.exists()) {
                warn!(
                    "Skipping {:?}, output already exists: {:?} (use -f to force overwrite)",
                    input_file, existing
                );
                return Ok(FileOutcome::Skipped(input_file.to_path_buf()));
            }
        }

        let collection = SubtitleCollection::read_from_file(input_file)?;
        let annotated = SubtitleCollection {
            source_file: collection.source_file.clone(),
            entries: self.detector.annotate(&collection.entries),
        };

        let report = MuteReport::from_entries(input_file, &annotated.entries, None);
        info!("Found {} intervals to mute", report.intervals.len());

        let mut summary = FileSummary {
            source: input_file.to_path_buf(),
            entries: annotated.entries.len(),
            flagged_entries: annotated.flagged_count(),
            report,
            outputs: Vec::new(),
            report_path: None,
        };

        if self.dry_run {
            info!("Dry run, nothing written for {:?}", input_file);
            return Ok(FileOutcome::Processed(summary));
        }

        if output.create_subtitles {
            let rendered = self.rewriter.render_all(
                &annotated,
                output_dir,
                &output.custom_affix,
                output.subtitles_type,
                output.embed_subtitles,
            );
            summary.outputs = SubtitleRewriter::write_all(&rendered)?;
            for path in &summary.outputs {
                info!("Success: {}", path.display());
            }
        }

        if output.write_mute_report {
            let path = MuteReport::default_path(input_file, output_dir);
            summary.report.write_to_file(&path)?;
            summary.report_path = Some(path);
        }

        Ok(FileOutcome::Processed(summary))
    }

    // @returns: Every file a run would produce for this input
    fn planned_outputs(&self, input_file: &Path, output_dir: Option<&Path>) -> Vec<PathBuf> {
        let output = &self.config.output;
        let mut paths = Vec::new();

        if output.create_subtitles {
            let variants = SubtitleVariant::for_type(output.subtitles_type);
            paths.extend(variants.into_iter().map(|variant| {
                generate_output_path(
                    input_file,
                    output_dir,
                    &output.custom_affix,
                    output.subtitles_type,
                    variant,
                    output.embed_subtitles,
                )
            }));
        }
        if output.write_mute_report {
            paths.push(MuteReport::default_path(input_file, output_dir));
        }

        paths
    }

    /// Run the workflow in folder mode, processing every subtitle file below a directory
    ///
    /// Files are processed in parallel up to `concurrent_files`. With an output
    /// directory, each input keeps its path relative to `input_dir` below it.
    /// Inputs whose outputs would collide with an earlier input's are counted as
    /// failed without being processed. A failing file is logged and counted;
    /// the rest of the folder still runs.
    pub async fn run_folder(
        &self,
        input_dir: PathBuf,
        output_dir: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<FolderSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let subtitle_files =
            FileManager::find_subtitle_files(&input_dir, &self.config.output.custom_affix)?;
        let mut summary = FolderSummary::default();

        if subtitle_files.is_empty() {
            warn!("No subtitle files found in directory: {:?}", input_dir);
            return Ok(summary);
        }

        let folder_pb = ProgressBar::new(subtitle_files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}",
            )
            .or_else(|_| {
                ProgressStyle::default_bar()
                    .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}")
            })
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Censoring subtitles");

        // Claim every planned output before dispatching so parallel workers never share one
        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
        let mut jobs = Vec::with_capacity(subtitle_files.len());
        for path in subtitle_files {
            let file_output_dir = Self::folder_output_dir(&input_dir, output_dir.as_deref(), &path);
            let planned = self.planned_outputs(&path, file_output_dir.as_deref());

            if let Some((output, owner)) = planned
                .iter()
                .find_map(|output| claimed.get(output).map(|owner| (output, owner)))
            {
                error!(
                    "Error processing file {:?}: output {:?} is already produced by {:?}",
                    path, output, owner
                );
                summary.failed += 1;
                folder_pb.inc(1);
                continue;
            }

            for output in planned {
                claimed.insert(output, path.clone());
            }
            jobs.push((path, file_output_dir));
        }

        let concurrency = self.config.concurrent_files.max(1);
        let mut results = stream::iter(jobs)
            .map(|(path, file_output_dir)| {
                let controller = self.clone();
                async move {
                    let worker_path = path.clone();
                    let result = tokio::task::spawn_blocking(move || {
                        let out = file_output_dir.as_deref();
                        controller.process_file(&worker_path, out, force_overwrite)
                    })
                    .await;
                    (path, result)
                }
            })
            .buffer_unordered(concurrency);

        while let Some((path, result)) = results.next().await {
            let file_name = path
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            match result {
                Ok(Ok(FileOutcome::Processed(file_summary))) => {
                    summary.processed += 1;
                    summary.intervals += file_summary.report.intervals.len();
                }
                Ok(Ok(FileOutcome::Skipped(_))) => summary.skipped += 1,
                Ok(Err(e)) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.failed += 1;
                }
                Err(e) => {
                    error!("Worker for file {} failed: {}", file_name, e);
                    summary.failed += 1;
                }
            }

            folder_pb.set_message(file_name);
            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        info!(
            "Folder processing completed in {}: {} processed, {} skipped, {} errors",
            Self::format_duration(start_time.elapsed()),
            summary.processed,
            summary.skipped,
            summary.failed
        );

        Ok(summary)
    }

    // @returns: Output directory mirroring the input's place below `input_dir`
    fn folder_output_dir(
        input_dir: &Path,
        output_dir: Option<&Path>,
        input_file: &Path,
    ) -> Option<PathBuf> {
        output_dir.map(|out| {
            let relative = input_file
                .parent()
                .and_then(|parent| parent.strip_prefix(input_dir).ok())
                .unwrap_or_else(|| Path::new(""));
            out.join(relative)
        })
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
