/*!
 * Comparison view and export of a finished translation.
 *
 * A `TranslationResult` is the only place the final text lives after a run;
 * callers thread it to whatever writes, prints or compares it.
 */

use std::path::Path;

use crate::subtitle_processor::SubtitleFormat;

/// Base name used when there is no input file to derive one from
const DEFAULT_BASE_NAME: &str = "translated_subtitle";

/// Column width of the side-by-side view, per side
pub const DEFAULT_COLUMN_WIDTH: usize = 48;

/// Final output of one translation run
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationResult {
    /// Source text exactly as supplied
    pub original: String,

    /// Translated text in the original format
    pub translated: String,

    /// Format of the original input, which is also the export format
    pub format: SubtitleFormat,
}

impl TranslationResult {
    pub fn new(original: impl Into<String>, translated: impl Into<String>, format: SubtitleFormat) -> Self {
        Self {
            original: original.into(),
            translated: translated.into(),
            format,
        }
    }

    /// File name to export this result under
    pub fn output_filename(&self, explicit: Option<&str>, input: Option<&Path>, target_language: &str) -> String {
        resolve_output_filename(explicit, input, target_language, self.format)
    }

    /// Two-column original/translated view
    pub fn side_by_side(&self, column_width: usize) -> String {
        render_side_by_side(&self.original, &self.translated, column_width)
    }
}

/// Pick the export file name.
///
/// An explicit name keeps its stem but always ends in the original format's
/// extension: a matching extension is kept, the other subtitle extension is
/// replaced and anything else gets the extension appended. Without a name the
/// input's stem (or `translated_subtitle`) is suffixed with the target
/// language code.
pub fn resolve_output_filename(
    explicit: Option<&str>,
    input: Option<&Path>,
    target_language: &str,
    format: SubtitleFormat,
) -> String {
    let extension = format.extension();

    match explicit.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => match subtitle_extension(name) {
            Some(current) if current == format => name.to_string(),
            Some(_) => {
                let stem = &name[..name.len() - extension.len() - 1];
                format!("{}.{}", stem, extension)
            }
            None => format!("{}.{}", name, extension),
        },
        None => {
            let base = input
                .and_then(|path| path.file_name())
                .map(|name| strip_subtitle_extension(&name.to_string_lossy()))
                .filter(|stem| !stem.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_NAME.to_string());
            let language = if target_language.trim().is_empty() {
                "trans"
            } else {
                target_language.trim()
            };
            format!("{}_{}.{}", base, language, extension)
        }
    }
}

fn subtitle_extension(name: &str) -> Option<SubtitleFormat> {
    let (_, ext) = name.rsplit_once('.')?;
    SubtitleFormat::from_extension(ext)
}

fn strip_subtitle_extension(name: &str) -> String {
    match subtitle_extension(name) {
        Some(_) => name[..name.len() - 4].to_string(),
        None => name.to_string(),
    }
}

/// Render original and translated text as two columns with headings
pub fn render_side_by_side(original: &str, translated: &str, column_width: usize) -> String {
    let width = column_width.max(8);
    let left = wrap_lines(original, width);
    let right = wrap_lines(translated, width);
    let rows = left.len().max(right.len());

    let mut out = String::new();
    out.push_str(&format!("{:<width$} | {}\n", "Original", "Translated", width = width));
    out.push_str(&format!("{}-+-{}\n", "-".repeat(width), "-".repeat(width)));

    for i in 0..rows {
        let l = left.get(i).map(String::as_str).unwrap_or("");
        let r = right.get(i).map(String::as_str).unwrap_or("");
        let padding = width.saturating_sub(l.chars().count());
        out.push_str(l);
        out.push_str(&" ".repeat(padding));
        out.push_str(" | ");
        out.push_str(r);
        out.push('\n');
    }

    out
}

// Hard-wraps each line at `width` characters; blank lines are kept
fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            lines.push(String::new());
            continue;
        }
        for piece in chars.chunks(width) {
            lines.push(piece.iter().collect());
        }
    }
    lines
}
