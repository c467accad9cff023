use anyhow::{Result, anyhow};
use log::{error, warn, info, debug};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle};
use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::subtitle_processor::convert_subtitle;

// @module: Application controller for batch subtitle conversion

/// Outcome of converting a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Output written to the given path
    Converted { output: PathBuf },
    /// Output already existed and overwriting was off
    Skipped { output: PathBuf },
    /// Conversion or I/O failed; the message is user-facing
    Failed { message: String },
}

/// Per-file entry of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Input file name, without directories
    pub input_name: String,
    pub outcome: FileOutcome,
}

impl FileReport {
    pub fn is_success(&self) -> bool {
        !matches!(self.outcome, FileOutcome::Failed { .. })
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            FileOutcome::Converted { output } => {
                write!(f, "Converted {} → {}", self.input_name, FileManager::display_name(output))
            }
            FileOutcome::Skipped { output } => {
                write!(f, "Skipped {}: {} already exists", self.input_name, output.display())
            }
            FileOutcome::Failed { message } => write!(f, "Failed {}: {}", self.input_name, message),
        }
    }
}

/// Result of a whole batch, reports in processing order
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub reports: Vec<FileReport>,
    pub duration: Duration,
}

impl BatchSummary {
    pub fn converted_count(&self) -> usize {
        self.reports.iter().filter(|r| matches!(r.outcome, FileOutcome::Converted { .. })).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.reports.iter().filter(|r| matches!(r.outcome, FileOutcome::Skipped { .. })).count()
    }

    pub fn failed_count(&self) -> usize {
        self.reports.iter().filter(|r| !r.is_success()).count()
    }

    /// True when there was at least one file and none of them succeeded
    pub fn all_failed(&self) -> bool {
        !self.reports.is_empty() && self.failed_count() == self.reports.len()
    }
}

/// Paths one batch has to keep its hands off
#[derive(Debug)]
struct BatchGuard {
    // @field: Every selected input file
    inputs: HashSet<PathBuf>,
    // @field: Outputs written earlier in this batch
    written: HashSet<PathBuf>,
}

impl BatchGuard {
    fn new(files: &[PathBuf]) -> Self {
        Self {
            inputs: files.iter().map(|f| Self::path_key(f)).collect(),
            written: HashSet::new(),
        }
    }

    // @returns: Canonical path when the file exists, the path as given otherwise
    fn path_key(path: &Path) -> PathBuf {
        std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    }
}

/// Main application controller for subtitle conversion
pub struct Controller {
    // @field: App configuration
    pub config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Expand the selected paths into the ordered list of files to convert.
    ///
    /// Directories contribute their `.srt`/`.vtt` files; anything else is kept
    /// as given so that it gets its own failure report.
    pub fn collect_inputs(&self, inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for input in inputs {
            if FileManager::dir_exists(input) {
                let mut found = FileManager::find_subtitle_files(input, self.config.recursive)?;
                if found.is_empty() {
                    warn!("No subtitle files found in directory: {:?}", input);
                }
                files.append(&mut found);
            } else {
                files.push(input.clone());
            }
        }
        Ok(files)
    }

    /// Convert every selected file, one at a time.
    ///
    /// A failing file is reported and the batch moves on to the next one.
    pub async fn run(&self, inputs: &[PathBuf]) -> Result<BatchSummary> {
        let start_time = Instant::now();

        let files = self.collect_inputs(inputs)?;
        if files.is_empty() {
            return Err(anyhow!("No subtitle files selected"));
        }

        debug!("Selected {} file(s):", files.len());
        for file in &files {
            debug!("  {} ({})", FileManager::display_name(file), FileManager::format_bytes(FileManager::file_size(file)));
        }

        let progress_bar = ProgressBar::new(files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));

        let mut guard = BatchGuard::new(&files);
        let mut reports = Vec::with_capacity(files.len());
        for file in &files {
            progress_bar.set_message(FileManager::display_name(file));

            let report = self.convert_guarded(file, &mut guard).await;
            match &report.outcome {
                FileOutcome::Converted { .. } => progress_bar.suspend(|| info!("{}", report)),
                FileOutcome::Skipped { .. } => progress_bar.suspend(|| warn!("{} (use -f to force overwrite)", report)),
                FileOutcome::Failed { .. } => progress_bar.suspend(|| error!("{}", report)),
            }
            reports.push(report);

            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        let summary = BatchSummary {
            reports,
            duration: start_time.elapsed(),
        };

        info!(
            "Conversion finished in {}: {} converted, {} skipped, {} failed",
            Self::format_duration(summary.duration),
            summary.converted_count(),
            summary.skipped_count(),
            summary.failed_count()
        );

        Ok(summary)
    }

    /// Read, convert and write a single file, capturing any failure in the report
    pub async fn convert_file(&self, input_file: &Path) -> FileReport {
        let mut guard = BatchGuard::new(&[input_file.to_path_buf()]);
        self.convert_guarded(input_file, &mut guard).await
    }

    async fn convert_guarded(&self, input_file: &Path, guard: &mut BatchGuard) -> FileReport {
        let input_name = FileManager::display_name(input_file);
        let outcome = match self.try_convert_file(input_file, &input_name, guard).await {
            Ok(outcome) => outcome,
            Err(e) => FileOutcome::Failed { message: e.to_string() },
        };

        FileReport { input_name, outcome }
    }

    async fn try_convert_file(&self, input_file: &Path, input_name: &str, guard: &mut BatchGuard) -> Result<FileOutcome> {
        let text = FileManager::read_subtitle_text(input_file).await?;
        let result = convert_subtitle(input_name, &text)?;

        let output = self.output_path_for(input_file, &result.output_name);
        let output_key = BatchGuard::path_key(&output);
        if guard.inputs.contains(&output_key) {
            return Ok(FileOutcome::Failed {
                message: format!("{} is also an input of this batch, not overwriting it", output.display()),
            });
        }
        if guard.written.contains(&output_key) {
            return Ok(FileOutcome::Failed {
                message: format!("{} was already written by another file in this batch", output.display()),
            });
        }

        if output.exists() && !self.config.force_overwrite {
            return Ok(FileOutcome::Skipped { output });
        }

        FileManager::write_to_file(&output, &result.output_text)?;
        guard.written.insert(BatchGuard::path_key(&output));
        Ok(FileOutcome::Converted { output })
    }

    /// Where the converted file for `input_file` goes
    pub fn output_path_for(&self, input_file: &Path, output_name: &str) -> PathBuf {
        match self.config.output_dir_path() {
            Some(dir) => dir.join(output_name),
            None => input_file
                .parent()
                .map(|parent| parent.join(output_name))
                .unwrap_or_else(|| PathBuf::from(output_name)),
        }
    }

    // Format duration in a human-readable format (HH:MM:SS)
    pub fn format_duration(duration: Duration) -> String {
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
