/*!
 * Conversion between WebVTT and the internal SRT form.
 *
 * Translation always runs on SRT-shaped text. VTT input is flattened to that
 * form before it is sent out and restored afterwards. The conversion is
 * deliberately lossy around the cues:
 *
 * - VTT header text and NOTE/STYLE/REGION blocks are dropped
 * - VTT cue identifiers are dropped, SRT sequence numbers are regenerated
 * - only cue timing and cue text survive a round trip
 */

use log::debug;

use crate::errors::SubtitleError;
use crate::subtitle_processor::{split_into_blocks, trim_subtitle_text, VTT_HEADER};

const METADATA_PREFIXES: [&str; 3] = ["NOTE", "STYLE", "REGION"];

/// Convert VTT text to the internal SRT form.
///
/// Fails with `MissingHeader` when the first line does not start with
/// `WEBVTT`, and with `Unparseable` when no cue timing line is found.
pub fn vtt_to_internal_srt(vtt_text: &str) -> Result<String, SubtitleError> {
    let lines: Vec<&str> = vtt_text.lines().collect();
    let header_ok = lines
        .first()
        .is_some_and(|first| trim_subtitle_text(first).starts_with(VTT_HEADER));
    if !header_ok {
        return Err(SubtitleError::MissingHeader);
    }

    // Header line plus any blank or metadata lines directly after it
    let mut start = 1;
    while start < lines.len() {
        let line = lines[start].trim();
        if line.is_empty() || METADATA_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) {
            start += 1;
        } else {
            break;
        }
    }
    let lines = &lines[start..];

    let mut srt = String::new();
    let mut counter = 1;
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();
        if line.is_empty() {
            i += 1;
            continue;
        }

        let timing_line = if line.contains("-->") {
            line
        } else if i + 1 < lines.len() && lines[i + 1].contains("-->") {
            // cue identifier, no SRT equivalent
            i += 1;
            lines[i].trim()
        } else {
            i += 1;
            continue;
        };
        i += 1;

        let mut text_lines = Vec::new();
        while i < lines.len() && !lines[i].trim().is_empty() {
            text_lines.push(lines[i]);
            i += 1;
        }

        srt.push_str(&format!("{}\n", counter));
        srt.push_str(&timing_line.replace('.', ","));
        srt.push('\n');
        srt.push_str(&text_lines.join("\n"));
        srt.push_str("\n\n");
        counter += 1;
    }

    if counter == 1 {
        return Err(SubtitleError::Unparseable("No cues found in VTT content".to_string()));
    }

    debug!("Converted {} VTT cues to internal SRT", counter - 1);
    Ok(srt.trim_end().to_string())
}

/// Convert internal SRT text back to VTT.
///
/// Blocks with fewer than two lines are skipped silently.
pub fn internal_srt_to_vtt(srt_text: &str) -> String {
    let mut vtt = format!("{}\n\n", VTT_HEADER);

    for block in split_into_blocks(srt_text) {
        let lines: Vec<&str> = block.lines().collect();
        if lines.len() < 2 {
            continue;
        }

        vtt.push_str(&lines[1].replace(',', "."));
        vtt.push('\n');
        vtt.push_str(&lines[2..].join("\n"));
        vtt.push_str("\n\n");
    }

    vtt.trim().to_string()
}
