/*!
 * Tests for WebVTT/SRT conversion
 */

use submovies::errors::SubtitleError;
use submovies::format_converter::{internal_srt_to_vtt, vtt_to_internal_srt};
use submovies::subtitle_processor::{is_valid_srt, SubtitleCollection, SubtitleFormat};
use crate::common;

#[test]
fn test_vttToInternalSrt_shouldProduceValidSrt() {
    let srt = vtt_to_internal_srt(common::SAMPLE_VTT).unwrap();

    assert_eq!(
        srt,
        "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:03,000 --> 00:00:04,500\nGood night"
    );
    assert!(is_valid_srt(&srt));
}

#[test]
fn test_vttToInternalSrt_withoutHeader_shouldFailWithMissingHeader() {
    assert_eq!(
        vtt_to_internal_srt("00:00:01.000 --> 00:00:02.000\nHi"),
        Err(SubtitleError::MissingHeader)
    );
    assert_eq!(vtt_to_internal_srt(""), Err(SubtitleError::MissingHeader));
}

#[test]
fn test_vttToInternalSrt_withByteOrderMark_shouldAcceptHeader() {
    let vtt = format!("\u{FEFF}{}", common::SAMPLE_VTT);

    let srt = vtt_to_internal_srt(&vtt).unwrap();

    assert!(srt.starts_with("1\n00:00:01,000 --> 00:00:02,000\nHello"));
}

#[test]
fn test_vttToInternalSrt_shouldSkipLeadingMetadataBlocks() {
    let vtt = "WEBVTT\n\nSTYLE\n::cue { color: lime }\n\nREGION\nid:fred\n\n00:00:01.000 --> 00:00:02.000 align:start\nStyled";

    let srt = vtt_to_internal_srt(vtt).unwrap();

    assert_eq!(srt, "1\n00:00:01,000 --> 00:00:02,000 align:start\nStyled");
}

#[test]
fn test_internalSrtToVtt_shouldSwapSeparatorAndDropNumbers() {
    let vtt = internal_srt_to_vtt(common::SAMPLE_SRT);

    assert_eq!(
        vtt,
        "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHello\n\n00:00:03.000 --> 00:00:04.000\n5 dollars"
    );
}

#[test]
fn test_internalSrtToVtt_withEmptyInput_shouldReturnHeaderOnly() {
    assert_eq!(internal_srt_to_vtt(""), "WEBVTT");
}

#[test]
fn test_roundTrip_shouldDropNoteButKeepCue() {
    let input = "WEBVTT\n\nNOTE test\n\n1\n00:00:01.000 --> 00:00:02.000\nHello\n";

    let back = internal_srt_to_vtt(&vtt_to_internal_srt(input).unwrap());

    assert!(!back.contains("NOTE"));
    assert!(back.contains("00:00:01.000 --> 00:00:02.000\nHello"));
}

#[test]
fn test_roundTrip_srtThroughVtt_shouldPreserveTimingAndText() {
    let srt = common::numbered_srt(30);

    let back = vtt_to_internal_srt(&internal_srt_to_vtt(&srt)).unwrap();

    let original = SubtitleCollection::parse(&srt, SubtitleFormat::Srt).unwrap();
    let round_tripped = SubtitleCollection::parse(&back, SubtitleFormat::Srt).unwrap();
    assert_eq!(original.entries, round_tripped.entries);
}
