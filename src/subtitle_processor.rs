use std::fmt;
use std::str::FromStr;
use regex::Regex;
use once_cell::sync::Lazy;
use log::debug;
use crate::errors::ConversionError;
use crate::file_utils::FileManager;

// @module: Subtitle format detection and SRT <-> VTT conversion

// @const: SRT timestamp, comma before the milliseconds
static SRT_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{2}:[0-9]{2}:[0-9]{2}),([0-9]{3})").unwrap()
});

// @const: VTT timestamp, period before the milliseconds
static VTT_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{2}:[0-9]{2}:[0-9]{2})\.([0-9]{3})").unwrap()
});

// @const: VTT-only block introducers with no SRT equivalent
static VTT_METADATA_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(NOTE|STYLE|REGION)").unwrap()
});

/// Header line every WebVTT document starts with
pub const VTT_HEADER: &str = "WEBVTT";

/// Subtitle formats the converter understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubtitleFormat {
    /// SubRip, `HH:MM:SS,mmm` timestamps
    Srt,
    /// WebVTT, `HH:MM:SS.mmm` timestamps and a `WEBVTT` header
    Vtt,
}

impl SubtitleFormat {
    // @returns: Format for a bare extension, case-insensitive
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "srt" => Some(Self::Srt),
            "vtt" => Some(Self::Vtt),
            _ => None,
        }
    }

    // @returns: Format inferred from the text after the last dot of a file name
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        Self::from_extension(&FileManager::get_extension(file_name))
    }

    // @returns: Lowercase extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Vtt => "vtt",
        }
    }

    // @returns: The format a file of this format is converted into
    pub fn counterpart(&self) -> Self {
        match self {
            Self::Srt => Self::Vtt,
            Self::Vtt => Self::Srt,
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Srt => write!(f, "SRT"),
            Self::Vtt => write!(f, "VTT"),
        }
    }
}

impl FromStr for SubtitleFormat {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s.trim_start_matches('.')).ok_or(ConversionError::UnsupportedFormat)
    }
}

/// Decoded subtitle text tagged with the format inferred from its file name
#[derive(Debug, Clone)]
pub struct SubtitleDocument {
    file_name: String,
    content: String,
    format: SubtitleFormat,
}

impl SubtitleDocument {
    /// Build a document from a file name and its decoded text.
    ///
    /// Line endings are normalized to `\n`. Fails with
    /// [`ConversionError::UnsupportedFormat`] when the extension is not `srt` or `vtt`.
    pub fn new(file_name: &str, content: &str) -> Result<Self, ConversionError> {
        let format = SubtitleFormat::from_file_name(file_name)
            .ok_or(ConversionError::UnsupportedFormat)?;

        Ok(Self {
            file_name: file_name.to_string(),
            content: normalize_newlines(content),
            format,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn format(&self) -> SubtitleFormat {
        self.format
    }

    /// Convert into the paired format
    pub fn convert(&self) -> Result<ConversionResult, ConversionError> {
        let target = self.format.counterpart();
        let output_text = match self.format {
            SubtitleFormat::Srt => convert_srt_to_vtt(&self.content),
            SubtitleFormat::Vtt => convert_vtt_to_srt(&self.content)?,
        };

        debug!("Converted {} ({} -> {}), {} bytes", self.file_name, self.format, target, output_text.len());

        Ok(ConversionResult {
            output_text,
            output_name: FileManager::replace_extension(&self.file_name, target.extension()),
            format: target,
        })
    }
}

/// Output of one conversion, ready to be written out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    /// Converted subtitle text
    pub output_text: String,

    /// Input file name with the extension swapped
    pub output_name: String,

    /// Format of `output_text`
    pub format: SubtitleFormat,
}

impl ConversionResult {
    /// MIME type of the emitted file
    pub const MIME_TYPE: &'static str = "text/plain; charset=utf-8";
}

/// Convert a subtitle file's text based on its file name.
///
/// `.srt` input becomes WebVTT and `.vtt` input becomes SubRip.
pub fn convert_subtitle(file_name: &str, contents: &str) -> Result<ConversionResult, ConversionError> {
    SubtitleDocument::new(file_name, contents)?.convert()
}

/// Collapse `\r\n` and lone `\r` line endings to `\n`
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Rewrite SubRip text as WebVTT.
///
/// Every `HH:MM:SS,mmm` in the text gets a period instead of the comma, cue
/// text included. Cue numbers are kept; WebVTT accepts them as cue identifiers.
pub fn convert_srt_to_vtt(text: &str) -> String {
    let cues = SRT_TIMESTAMP_REGEX.replace_all(text.trim(), "$1.$2");
    format!("{}\n\n{}", VTT_HEADER, cues)
}

/// Rewrite WebVTT text as SubRip.
///
/// Leading blank and `WEBVTT` lines are skipped. Afterwards, lines opening a
/// `NOTE`, `STYLE` or `REGION` block are dropped; the rest of such a block is
/// kept as-is. The joined output is trimmed, so a blank line left behind by a
/// dropped leading block does not start the file.
pub fn convert_vtt_to_srt(text: &str) -> Result<String, ConversionError> {
    let mut output: Vec<String> = Vec::new();
    let mut skipping_header = true;

    for line in text.split('\n') {
        let trimmed = line.trim();

        if skipping_header {
            if trimmed.is_empty() || trimmed.starts_with(VTT_HEADER) {
                continue;
            }
            skipping_header = false;
        }

        if VTT_METADATA_REGEX.is_match(trimmed) {
            continue;
        }

        output.push(VTT_TIMESTAMP_REGEX.replace_all(line, "$1,$2").into_owned());
    }

    let result = output.join("\n").trim().to_string();
    if result.is_empty() {
        return Err(ConversionError::EmptyResult);
    }

    Ok(result)
}
