/*!
 * Output repair for translated subtitle text.
 *
 * Models translating into Persian or Arabic often render dialogue numbers in
 * the target script. `fix_numbers` maps those glyphs back to ASCII digits
 * while leaving SRT timing lines byte-for-byte untouched.
 */

use regex::{Captures, Regex};
use once_cell::sync::Lazy;

/// Alternation in priority order: full SRT timing range, ASCII digit run,
/// Persian / Arabic-Indic digit run.
static NUMERAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"([0-9]{1,2}:[0-9]{2}:[0-9]{2},[0-9]{3}\s*-->\s*[0-9]{1,2}:[0-9]{2}:[0-9]{2},[0-9]{3})",
        r"|([0-9]+)",
        r"|([\x{06F0}-\x{06F9}\x{0660}-\x{0669}]+)",
    ))
    .unwrap()
});

/// Replace Persian and Arabic-Indic digits with ASCII digits.
///
/// SRT timing ranges and existing ASCII digit runs pass through unchanged.
/// Total and idempotent.
pub fn fix_numbers(text: &str) -> String {
    NUMERAL_REGEX
        .replace_all(text, |caps: &Captures| {
            if let Some(timing) = caps.get(1) {
                return timing.as_str().to_string();
            }
            if let Some(western) = caps.get(2) {
                return western.as_str().to_string();
            }
            caps.get(3)
                .map(|digits| to_english_numerals(digits.as_str()))
                .unwrap_or_default()
        })
        .into_owned()
}

fn to_english_numerals(digits: &str) -> String {
    digits
        .chars()
        .map(|c| western_digit(c).unwrap_or(c))
        .collect()
}

fn western_digit(c: char) -> Option<char> {
    let offset = match c {
        '\u{06F0}'..='\u{06F9}' => c as u32 - 0x06F0,
        '\u{0660}'..='\u{0669}' => c as u32 - 0x0660,
        _ => return None,
    };
    char::from_digit(offset, 10)
}
