/*!
 * Tests for numeral normalization of translated output
 */

use submovies::translation::formatting::fix_numbers;

const TIMING: &str = "00:00:01,000 --> 00:00:02,000";

#[test]
fn test_fixNumbers_withPersianDigits_shouldMapToAscii() {
    assert_eq!(fix_numbers("۵ دلار"), "5 دلار");
    assert_eq!(fix_numbers("سال ۱۴۰۲"), "سال 1402");
}

#[test]
fn test_fixNumbers_withArabicIndicDigits_shouldMapToAscii() {
    assert_eq!(fix_numbers("٣ كتب و ١٠ أقلام"), "3 كتب و 10 أقلام");
}

#[test]
fn test_fixNumbers_withMixedScripts_shouldNormalizeEveryRun() {
    assert_eq!(fix_numbers("۱2٣"), "123");
}

#[test]
fn test_fixNumbers_shouldLeaveOtherTextUntouched() {
    let text = "Hello, world! 42 is the answer.\nسلام";
    assert_eq!(fix_numbers(text), text);
    assert_eq!(fix_numbers(""), "");
}

#[test]
fn test_fixNumbers_shouldBeIdempotent() {
    let samples = [
        "1\n00:00:01,000 --> 00:00:02,000\n۵ دلار",
        "٠١٢٣٤٥٦٧٨٩ ۰۱۲۳۴۵۶۷۸۹",
        "plain",
        "12:34:56,789-->01:02:03,004 ۷",
    ];

    for sample in samples {
        let once = fix_numbers(sample);
        assert_eq!(fix_numbers(&once), once, "not a fixed point: {:?}", sample);
    }
}

#[test]
fn test_fixNumbers_shouldPreserveTimingLineBytes() {
    let text = format!("۱\n{}\nقیمت ۵۰ تومان", TIMING);

    let fixed = fix_numbers(&text);

    assert!(fixed.contains(TIMING));
    assert_eq!(fixed, format!("1\n{}\nقیمت 50 تومان", TIMING));
}

#[test]
fn test_fixNumbers_withUnusualTimingSpacing_shouldKeepItVerbatim() {
    let timing = "1:02:03,004   -->0:00:05,600";
    let text = format!("{} ۹", timing);

    assert_eq!(fix_numbers(&text), format!("{} 9", timing));
}
