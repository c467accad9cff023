/*!
 * Error types for the subswap application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while converting a single subtitle file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The file extension is neither `srt` nor `vtt`
    #[error("Unsupported file extension. Only .srt and .vtt are supported.")]
    UnsupportedFormat,

    /// Nothing was left of a VTT document after dropping its header and metadata lines
    #[error("Input file did not contain valid VTT cues.")]
    EmptyResult,

    /// The file could not be read or is not valid UTF-8 text
    #[error("Could not read file: {0}")]
    ReadFailure(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle conversion
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Config(error.to_string())
    }
}
