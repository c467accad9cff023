use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use crate::errors::ConversionError;
use crate::subtitle_processor::SubtitleFormat;

// @module: File and directory utilities

// @const: Size units for human-readable byte counts
const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Lowercase text after the last `.` of a file name, or an empty string if there is none
    pub fn get_extension(file_name: &str) -> String {
        match file_name.rfind('.') {
            Some(dot) => file_name[dot + 1..].to_lowercase(),
            None => String::new(),
        }
    }

    /// Swap the text after the last `.` for `new_extension`, appending it when there is no dot
    pub fn replace_extension(file_name: &str, new_extension: &str) -> String {
        match file_name.rfind('.') {
            Some(dot) => format!("{}.{}", &file_name[..dot], new_extension),
            None => format!("{}.{}", file_name, new_extension),
        }
    }

    // @returns: File name component as a displayable string
    pub fn display_name<P: AsRef<Path>>(path: P) -> String {
        path.as_ref()
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.as_ref().to_string_lossy().to_string())
    }

    /// Find `.srt` and `.vtt` files in a directory, sorted by path
    pub fn find_subtitle_files<P: AsRef<Path>>(dir: P, recursive: bool) -> Result<Vec<PathBuf>> {
        let mut walker = WalkDir::new(dir.as_ref()).follow_links(true);
        if !recursive {
            walker = walker.max_depth(1);
        }

        let mut result = Vec::new();
        for entry in walker {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                let name = entry.file_name().to_string_lossy();
                if SubtitleFormat::from_file_name(&name).is_some() {
                    result.push(path.to_path_buf());
                }
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a subtitle file as UTF-8 text, dropping a leading byte-order mark
    pub async fn read_subtitle_text<P: AsRef<Path>>(path: P) -> Result<String, ConversionError> {
        let bytes = tokio::fs::read(path.as_ref())
            .await
            .map_err(|e| ConversionError::ReadFailure(e.to_string()))?;

        Self::decode_text(bytes)
    }

    /// Decode bytes as UTF-8, dropping a leading byte-order mark
    pub fn decode_text(bytes: Vec<u8>) -> Result<String, ConversionError> {
        let text = String::from_utf8(bytes)
            .map_err(|e| ConversionError::ReadFailure(format!("invalid UTF-8 ({})", e.utf8_error())))?;

        if let Some(stripped) = text.strip_prefix('\u{feff}') {
            return Ok(stripped.to_string());
        }
        Ok(text)
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    // @returns: File size in bytes, 0 if unavailable
    pub fn file_size<P: AsRef<Path>>(path: P) -> u64 {
        fs::metadata(path).map(|m| m.len()).unwrap_or(0)
    }

    /// Format a byte count as `B`, `KB`, `MB` or `GB` using 1024 steps.
    ///
    /// Values under 10 in a unit above bytes keep one decimal: `1.5 KB`, `12 KB`.
    pub fn format_bytes(bytes: u64) -> String {
        if bytes == 0 {
            return "0 B".to_string();
        }

        let mut exponent = 0;
        while exponent < SIZE_UNITS.len() - 1 && bytes >= 1024u64.pow(exponent as u32 + 1) {
            exponent += 1;
        }

        let value = bytes as f64 / 1024f64.powi(exponent as i32);
        let decimals = if value < 10.0 && exponent > 0 { 1 } else { 0 };
        format!("{:.*} {}", decimals, value, SIZE_UNITS[exponent])
    }
}
