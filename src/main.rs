// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
// Add other lints specific to this module that you want to allow but not auto-fix

use anyhow::{Result, anyhow, Context};
use log::{debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::PathBuf;
use std::io::Write;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use subswap::app_config::{self, Config};
use subswap::app_controller::Controller;

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
    /// Convert subtitle files between SRT and VTT (default command)
    Convert(ConvertArgs),

    /// Generate shell completions for subswap
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Subtitle files or directories to convert
    #[arg(value_name = "INPUT_PATH")]
    input_paths: Vec<PathBuf>,

    /// Directory for converted files (defaults to each input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subswap - SRT <-> WebVTT subtitle converter
///
/// Converts .srt files to .vtt and .vtt files to .srt, one file at a time.
#[derive(Parser, Debug)]
#[command(name = "subswap")]
#[command(version)]
#[command(about = "Convert subtitles between SRT and WebVTT")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "subswap converts SubRip (.srt) subtitles to WebVTT (.vtt) and back.

EXAMPLES:
    subswap movie.srt                       # Writes movie.vtt next to movie.srt
    subswap episode1.vtt episode2.vtt       # Converts several files in order
    subswap -o converted/ subs/             # Converts every .srt/.vtt under subs/
    subswap -f movie.vtt                    # Overwrites an existing movie.srt
    subswap completions bash > subswap.bash # Generate bash completions

CONFIGURATION:
    Settings are read from conf.json by default. You can specify a different
    file with --config-path. Command line flags take precedence over the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    convert: ConvertArgs,
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
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => ("💬 ", "1;32"),
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
            let (emoji, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; log::set_max_level does the filtering
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subswap", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Convert(args)) => run_convert(args).await,
        None => run_convert(cli.convert).await,
    }
}

async fn run_convert(options: ConvertArgs) -> Result<()> {
    if options.input_paths.is_empty() {
        return Err(anyhow!("At least one INPUT_PATH is required"));
    }

    let mut config = Config::load_or_default(&options.config_path)
        .with_context(|| format!("Failed to load config file: {}", options.config_path))?;

    // Command line options take precedence over the config file
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    if let Some(output_dir) = &options.output_dir {
        config.output_dir = Some(output_dir.to_string_lossy().to_string());
    }
    if options.force_overwrite {
        config.force_overwrite = true;
    }

    log::set_max_level(config.log_level.to_level_filter());
    debug!("Using configuration: {:?}", config);

    let controller = Controller::with_config(config)
        .context("Configuration validation failed")?;

    let summary = controller.run(&options.input_paths).await?;
    if summary.all_failed() {
        return Err(anyhow!("All {} file(s) failed to convert", summary.failed_count()));
    }

    Ok(())
}
