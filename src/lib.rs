/*!
 * # subswap - SRT <-> WebVTT subtitle converter
 *
 * A Rust library for converting subtitle files between the SubRip and WebVTT formats.
 *
 * ## Features
 *
 * - Detect the subtitle format from the file extension
 * - Convert SRT to VTT (timestamp punctuation plus the `WEBVTT` header)
 * - Convert VTT to SRT (header, `NOTE`, `STYLE` and `REGION` lines dropped)
 * - Batch conversion where one bad file never stops the others
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: Format detection and the SRT/VTT transforms
 * - `file_utils`: File system operations and file name helpers
 * - `app_controller`: Batch conversion controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod subtitle_processor;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{BatchSummary, Controller, FileOutcome, FileReport};
pub use subtitle_processor::{ConversionResult, SubtitleDocument, SubtitleFormat, convert_subtitle};
pub use errors::{AppError, ConversionError};
