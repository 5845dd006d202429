use std::fmt;
use std::str::FromStr;
use regex::Regex;
use once_cell::sync::Lazy;
use log::{warn, debug};

use crate::errors::SubtitleError;
use crate::format_converter;

// @module: Subtitle format detection and cue model

// @const: First SRT block (sequence line, timestamp line, one text line)
static SRT_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\d+[ \t]*\r?\n\d{1,2}:\d{2}:\d{2},\d{3}\s*-->\s*\d{1,2}:\d{2}:\d{2},\d{3}[ \t]*\r?\n[ \t]*\S",
    )
    .unwrap()
});

// @const: Cue timing line in either lexical form, hours optional
static CUE_TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:(\d{1,2}):)?(\d{2}):(\d{2})[,.](\d{3})\s*-->\s*(?:(\d{1,2}):)?(\d{2}):(\d{2})[,.](\d{3})",
    )
    .unwrap()
});

// @const: Blank-line block separator, tolerating whitespace-only lines and CRLF
static BLOCK_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n\s*\n").unwrap());

/// Header token every WebVTT document starts with
pub const VTT_HEADER: &str = "WEBVTT";

/// Subtitle document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubtitleFormat {
    /// SubRip text, comma millisecond separator
    #[default]
    Srt,
    /// WebVTT, period millisecond separator
    Vtt,
}

impl SubtitleFormat {
    /// File extension for this format, without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Vtt => "vtt",
        }
    }

    /// Format matching a file extension, case-insensitive
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "srt" => Some(Self::Srt),
            "vtt" => Some(Self::Vtt),
            _ => None,
        }
    }

    /// Millisecond decimal separator used in timestamps
    pub fn decimal_separator(&self) -> char {
        match self {
            Self::Srt => ',',
            Self::Vtt => '.',
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for SubtitleFormat {
    type Err = SubtitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s)
            .ok_or_else(|| SubtitleError::Validation(format!("Unsupported subtitle format: {}", s)))
    }
}

/// Trim surrounding whitespace and a leading UTF-8 byte-order mark
pub fn trim_subtitle_text(text: &str) -> &str {
    text.trim_start_matches('\u{FEFF}').trim()
}

/// Cheap structural check for SRT text.
///
/// Only the first block is inspected: a digits-only line, a timing line and
/// at least one non-empty text line.
pub fn is_valid_srt(text: &str) -> bool {
    let trimmed = trim_subtitle_text(text);
    !trimmed.is_empty() && SRT_BLOCK_REGEX.is_match(trimmed)
}

/// True when the trimmed text starts with the WEBVTT header token
pub fn is_valid_vtt(text: &str) -> bool {
    trim_subtitle_text(text).starts_with(VTT_HEADER)
}

/// Classify raw subtitle text before translation.
///
/// A `WEBVTT` prefix always means VTT, and the body has to convert cleanly.
/// Anything else must pass the SRT smoke test.
pub fn detect_format(text: &str) -> Result<SubtitleFormat, SubtitleError> {
    let trimmed = trim_subtitle_text(text);
    if trimmed.is_empty() {
        return Err(SubtitleError::Validation("Subtitle text is empty".to_string()));
    }

    if is_valid_vtt(trimmed) {
        // Whole-body conversion here only validates; the orchestrator
        // converts again per chunk so each request stands on its own.
        format_converter::vtt_to_internal_srt(trimmed)?;
        return Ok(SubtitleFormat::Vtt);
    }

    if is_valid_srt(trimmed) {
        return Ok(SubtitleFormat::Srt);
    }

    if trimmed.contains("-->") {
        Err(SubtitleError::Validation("Invalid SRT content. Check format.".to_string()))
    } else {
        Err(SubtitleError::Validation(
            "Unrecognized subtitle format. Expected SRT or WebVTT content.".to_string(),
        ))
    }
}

/// Split subtitle text into blocks on blank-line boundaries.
///
/// Blocks are trimmed; empty blocks never appear in the result.
pub fn split_into_blocks(text: &str) -> Vec<&str> {
    let trimmed = trim_subtitle_text(text);
    if trimmed.is_empty() {
        return Vec::new();
    }

    BLOCK_SEPARATOR_REGEX
        .split(trimmed)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// True for VTT blocks that carry no cue data (header, NOTE, STYLE, REGION)
pub fn is_vtt_metadata_block(block: &str) -> bool {
    let first_line = block.lines().next().unwrap_or("").trim_start();
    [VTT_HEADER, "NOTE", "STYLE", "REGION"]
        .iter()
        .any(|prefix| first_line.starts_with(prefix))
}

// @struct: Single subtitle cue
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    // @field: Positional sequence number, regenerated on conversion
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Cue text, one or more lines
    pub text: String,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
        }
    }

    // @creates: Validated subtitle entry
    // @validates: start <= end and non-empty text
    pub fn new_validated(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Result<Self, SubtitleError> {
        if end_time_ms < start_time_ms {
            return Err(SubtitleError::Unparseable(format!(
                "Invalid time range in cue {}: end time {} < start time {}",
                seq_num, end_time_ms, start_time_ms
            )));
        }

        let trimmed_text = text.trim();
        if trimmed_text.is_empty() {
            return Err(SubtitleError::Unparseable(format!("Empty subtitle text for cue {}", seq_num)));
        }

        Ok(SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text: trimmed_text.to_string(),
        })
    }

    /// Format milliseconds as a timestamp in the given format's lexical form
    pub fn format_timestamp(ms: u64, format: SubtitleFormat) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!(
            "{:02}:{:02}:{:02}{}{:03}",
            hours,
            minutes,
            seconds,
            format.decimal_separator(),
            millis
        )
    }

    /// Timing line for this cue, e.g. `00:00:01,000 --> 00:00:02,000`
    pub fn timing_line(&self, format: SubtitleFormat) -> String {
        format!(
            "{} --> {}",
            Self::format_timestamp(self.start_time_ms, format),
            Self::format_timestamp(self.end_time_ms, format)
        )
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{}", self.timing_line(SubtitleFormat::Srt))?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Ordered cues of one document plus its format tag
#[derive(Debug, Clone, Default)]
pub struct SubtitleCollection {
    /// Format of the source text
    pub format: SubtitleFormat,

    /// Cues in order of appearance
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Create an empty collection
    pub fn new(format: SubtitleFormat) -> Self {
        SubtitleCollection {
            format,
            entries: Vec::new(),
        }
    }

    /// Parse SRT or VTT text into cues.
    ///
    /// VTT input goes through the internal SRT form first, so metadata
    /// blocks are dropped and cue identifiers are replaced by positions.
    pub fn parse(text: &str, format: SubtitleFormat) -> Result<Self, SubtitleError> {
        let entries = match format {
            SubtitleFormat::Srt => Self::parse_srt_string(text)?,
            SubtitleFormat::Vtt => {
                let internal = format_converter::vtt_to_internal_srt(text)?;
                Self::parse_srt_string(&internal)?
            }
        };

        Ok(SubtitleCollection { format, entries })
    }

    /// Parse SRT-form text into cues, renumbered from 1.
    ///
    /// Blocks without a timing line are skipped with a warning. Cues are
    /// kept in order of appearance and may overlap.
    pub fn parse_srt_string(content: &str) -> Result<Vec<SubtitleEntry>, SubtitleError> {
        let mut entries = Vec::new();

        for (block_idx, block) in split_into_blocks(content).into_iter().enumerate() {
            let lines: Vec<&str> = block.lines().collect();
            let Some(timing_idx) = lines.iter().position(|line| line.contains("-->")) else {
                warn!("Skipping block {} without a timing line", block_idx + 1);
                continue;
            };

            let caps = CUE_TIMING_REGEX.captures(lines[timing_idx]).ok_or_else(|| {
                SubtitleError::Unparseable(format!("Invalid timing line: {}", lines[timing_idx].trim()))
            })?;
            let start_ms = Self::captured_ms(&caps, 1);
            let end_ms = Self::captured_ms(&caps, 5);
            let text = lines[timing_idx + 1..].join("\n");

            entries.push(SubtitleEntry::new_validated(entries.len() + 1, start_ms, end_ms, text)?);
        }

        if entries.is_empty() {
            return Err(SubtitleError::Unparseable(
                "No valid subtitle entries were found in the content".to_string(),
            ));
        }

        let overlap_count = entries
            .windows(2)
            .filter(|pair| pair[0].end_time_ms > pair[1].start_time_ms)
            .count();
        if overlap_count > 0 {
            debug!("Found {} overlapping subtitle entries", overlap_count);
        }

        Ok(entries)
    }

    /// Number of cues
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the collection has no cues
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn captured_ms(caps: &regex::Captures, start_idx: usize) -> u64 {
        let field = |offset: usize| -> u64 {
            caps.get(start_idx + offset)
                .map_or(0, |m| m.as_str().parse().unwrap_or(0))
        };

        field(0) * 3_600_000 + field(1) * 60_000 + field(2) * 1_000 + field(3)
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for entry in &self.entries {
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}
