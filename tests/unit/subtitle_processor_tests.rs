/*!
 * Tests for subtitle format detection and conversion
 */

use subswap::errors::ConversionError;
use subswap::subtitle_processor::{
    ConversionResult, SubtitleDocument, SubtitleFormat, convert_srt_to_vtt, convert_subtitle,
    convert_vtt_to_srt, normalize_newlines,
};

/// Test the documented SRT to VTT scenario
#[test]
fn test_convert_srt_to_vtt_withSingleCue_shouldAddHeaderAndSwapPunctuation() {
    let output = convert_srt_to_vtt("1\n00:00:01,000 --> 00:00:02,000\nHello\n");
    assert_eq!(output, "WEBVTT\n\n1\n00:00:01.000 --> 00:00:02.000\nHello");
}

/// Test the documented VTT to SRT scenario
#[test]
fn test_convert_vtt_to_srt_withSingleCue_shouldDropHeaderAndSwapPunctuation() {
    let output = convert_vtt_to_srt("WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHello\n").unwrap();
    assert_eq!(output, "00:00:01,000 --> 00:00:02,000\nHello");
}

/// Test that every timestamp is rewritten in place
#[test]
fn test_convert_srt_to_vtt_withManyTimestamps_shouldRewriteEachInPosition() {
    let timestamps = ["00:00:00,000", "01:23:45,678", "99:59:59,999", "12:00:00,001"];
    for ts in timestamps {
        let input = format!("{} --> {}\ntext", ts, ts);
        let output = convert_srt_to_vtt(&input);
        let expected_ts = ts.replace(',', ".");

        assert!(output.starts_with("WEBVTT\n\n"));
        assert_eq!(output, format!("WEBVTT\n\n{} --> {}\ntext", expected_ts, expected_ts));
    }
}

/// Test that VTT timestamps come back with commas
#[test]
fn test_convert_vtt_to_srt_withManyTimestamps_shouldUseCommas() {
    let timestamps = ["00:00:00.000", "01:23:45.678", "99:59:59.999"];
    for ts in timestamps {
        let input = format!("WEBVTT\n\n{} --> {}\ntext", ts, ts);
        let output = convert_vtt_to_srt(&input).unwrap();
        let expected_ts = ts.replace('.', ",");

        assert_eq!(output, format!("{} --> {}\ntext", expected_ts, expected_ts));
    }
}

/// Test that a timestamp inside caption text is rewritten too
#[test]
fn test_convert_srt_to_vtt_withTimestampInCueText_shouldRewriteIt() {
    let output = convert_srt_to_vtt("1\n00:00:01,000 --> 00:00:02,000\nMeet at 10:30:00,500 sharp");
    assert!(output.ends_with("Meet at 10:30:00.500 sharp"));
}

/// Test that text without timestamps passes through under the header
#[test]
fn test_convert_srt_to_vtt_withNoTimestamps_shouldPassTextThrough() {
    let output = convert_srt_to_vtt("  just some words\n\n");
    assert_eq!(output, "WEBVTT\n\njust some words");
}

/// Test that a header-only VTT file yields an empty result
#[test]
fn test_convert_vtt_to_srt_withHeaderOnly_shouldFailWithEmptyResult() {
    let result = convert_vtt_to_srt("WEBVTT\n\n\n");
    assert_eq!(result, Err(ConversionError::EmptyResult));

    let result = convert_vtt_to_srt("WEBVTT - Some title\n\n   \n");
    assert_eq!(result, Err(ConversionError::EmptyResult));
}

/// Test that metadata-only VTT content yields an empty result
#[test]
fn test_convert_vtt_to_srt_withOnlyMetadataLines_shouldFailWithEmptyResult() {
    let result = convert_vtt_to_srt("WEBVTT\n\nNOTE one\n\nSTYLE\n");
    assert_eq!(result, Err(ConversionError::EmptyResult));
}

/// Test that NOTE, STYLE and REGION introducers are dropped in any case
#[test]
fn test_convert_vtt_to_srt_withMetadataIntroducers_shouldDropThem() {
    let input = "WEBVTT\n\nNOTE first\nnote second\nSTYLE\n  REGION id:fred\n\n00:00:01.000 --> 00:00:02.000\nHello";
    let output = convert_vtt_to_srt(input).unwrap();

    for line in output.lines() {
        let upper = line.trim().to_uppercase();
        assert!(!upper.starts_with("NOTE"), "unexpected line: {}", line);
        assert!(!upper.starts_with("STYLE"), "unexpected line: {}", line);
        assert!(!upper.starts_with("REGION"), "unexpected line: {}", line);
    }
    assert!(output.contains("00:00:01,000 --> 00:00:02,000\nHello"));
}

/// Test that only the introducer line of a metadata block is removed
#[test]
fn test_convert_vtt_to_srt_withMultiLineStyleBlock_shouldKeepBlockBody() {
    let input = "WEBVTT\n\nSTYLE\n::cue { color: red }\n\n00:00:01.000 --> 00:00:02.000\nHello";
    let output = convert_vtt_to_srt(input).unwrap();
    assert_eq!(output, "::cue { color: red }\n\n00:00:01,000 --> 00:00:02,000\nHello");
}

/// Test that a WEBVTT line after the header region is kept
#[test]
fn test_convert_vtt_to_srt_withLateWebvttLiteral_shouldKeepIt() {
    let input = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nWEBVTT is a format";
    let output = convert_vtt_to_srt(input).unwrap();
    assert_eq!(output, "00:00:01,000 --> 00:00:02,000\nWEBVTT is a format");
}

/// Test that trailing whitespace is trimmed from the SRT output
#[test]
fn test_convert_vtt_to_srt_withTrailingBlankLines_shouldTrimThem() {
    let output = convert_vtt_to_srt("WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHello  \n\n\n").unwrap();
    assert_eq!(output, "00:00:01,000 --> 00:00:02,000\nHello");
}

/// Test line ending normalization
#[test]
fn test_normalize_newlines_withMixedEndings_shouldUseLineFeeds() {
    assert_eq!(normalize_newlines("a\r\nb\rc\nd"), "a\nb\nc\nd");
    assert_eq!(normalize_newlines("\r\n\r\n"), "\n\n");
}

/// Test that CRLF input converts the same as LF input
#[test]
fn test_convert_subtitle_withCrlfInput_shouldMatchLfOutput() {
    let lf = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHello\n";
    let crlf = lf.replace('\n', "\r\n");

    let from_lf = convert_subtitle("a.vtt", lf).unwrap();
    let from_crlf = convert_subtitle("a.vtt", &crlf).unwrap();
    assert_eq!(from_lf.output_text, from_crlf.output_text);
}

/// Test dispatching by extension
#[test]
fn test_convert_subtitle_withSrtAndVtt_shouldPickDirectionAndSwapName() {
    let result = convert_subtitle("movie.srt", "1\n00:00:01,000 --> 00:00:02,000\nHello").unwrap();
    assert_eq!(result.output_name, "movie.vtt");
    assert_eq!(result.format, SubtitleFormat::Vtt);
    assert!(result.output_text.starts_with("WEBVTT\n\n"));

    let result = convert_subtitle("movie.VTT", "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHello").unwrap();
    assert_eq!(result.output_name, "movie.srt");
    assert_eq!(result.format, SubtitleFormat::Srt);
}

/// Test that unsupported extensions are rejected
#[test]
fn test_convert_subtitle_withTxtFile_shouldFailWithUnsupportedFormat() {
    let result = convert_subtitle("clip.txt", "anything");
    assert_eq!(result, Err(ConversionError::UnsupportedFormat));
    assert_eq!(
        ConversionError::UnsupportedFormat.to_string(),
        "Unsupported file extension. Only .srt and .vtt are supported."
    );

    assert_eq!(convert_subtitle("noextension", "x"), Err(ConversionError::UnsupportedFormat));
}

/// Test format helpers
#[test]
fn test_subtitle_format_withVariousInputs_shouldDetectCorrectly() {
    assert_eq!(SubtitleFormat::from_file_name("a.b.SRT"), Some(SubtitleFormat::Srt));
    assert_eq!(SubtitleFormat::from_file_name("show.vtt"), Some(SubtitleFormat::Vtt));
    assert_eq!(SubtitleFormat::from_file_name("show.ass"), None);
    assert_eq!(SubtitleFormat::Srt.counterpart(), SubtitleFormat::Vtt);
    assert_eq!(SubtitleFormat::Vtt.extension(), "vtt");
    assert_eq!(".srt".parse::<SubtitleFormat>(), Ok(SubtitleFormat::Srt));
    assert_eq!("txt".parse::<SubtitleFormat>(), Err(ConversionError::UnsupportedFormat));
}

/// Test the document wrapper
#[test]
fn test_subtitle_document_withCrlfContent_shouldNormalizeOnCreation() {
    let document = SubtitleDocument::new("ep1.srt", "1\r\n00:00:01,000 --> 00:00:02,000\r\nHi\r\n").unwrap();
    assert_eq!(document.format(), SubtitleFormat::Srt);
    assert_eq!(document.file_name(), "ep1.srt");
    assert!(!document.content().contains('\r'));

    let result = document.convert().unwrap();
    assert_eq!(result.output_text, "WEBVTT\n\n1\n00:00:01.000 --> 00:00:02.000\nHi");
    assert_eq!(ConversionResult::MIME_TYPE, "text/plain; charset=utf-8");
}

/// Test that SRT -> VTT -> SRT keeps the timing lines
#[test]
fn test_srt_vtt_srt_withNumberedCues_shouldKeepTimingLines() {
    let srt = "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:03,000 --> 00:00:04,000\nWorld";
    let vtt = convert_srt_to_vtt(srt);
    let back = convert_vtt_to_srt(&vtt).unwrap();
    assert_eq!(back, srt);
}

/// Test that a dropped leading NOTE block does not leave a blank first line
#[test]
fn test_convert_vtt_to_srt_withLeadingNoteBlock_shouldTrimLeadingBlankLine() {
    let input = "WEBVTT\n\nNOTE made by hand\n\n00:00:01.000 --> 00:00:02.000\nHello\n";
    let output = convert_vtt_to_srt(input).unwrap();
    assert_eq!(output, "00:00:01,000 --> 00:00:02,000\nHello");
}
