use std::str::FromStr;

use calliope::{CueNode, Line, TextAlignment, Vertical, WebVttDocument};

#[test]
fn minimal_single_cue() {
    let vtt = WebVttDocument::from_str(
        "WEBVTT

00:00:01.000 --> 00:00:02.000
Hello
",
    )
    .unwrap();

    assert_eq!(vtt.cues().len(), 1);
    let cue = vtt.cue(0).unwrap();
    assert_eq!(cue.identifier, "");
    assert_eq!(cue.start, 1000.into());
    assert_eq!(cue.end, 2000.into());
    assert_eq!(cue.nodes, vec![CueNode::Text("Hello".to_owned())]);
}

#[test]
fn cue_with_identifier() {
    let vtt = WebVttDocument::from_str(
        "WEBVTT

intro
00:00:00.500 --> 00:00:03.000
Hi
",
    )
    .unwrap();

    assert_eq!(vtt.cues().len(), 1);
    let cue = vtt.cue(0).unwrap();
    assert_eq!(cue.identifier, "intro");
    assert_eq!(cue.start, 500.into());
    assert_eq!(cue.end, 3000.into());
}

#[test]
fn header_text_after_signature() {
    let vtt = WebVttDocument::from_str(
        "WEBVTT - this file has a description

00:00:00.000 --> 00:00:01.000
A
",
    )
    .unwrap();

    assert_eq!(vtt.cues().len(), 1);
}

#[test]
fn header_block_is_discarded() {
    let vtt = WebVttDocument::from_str(
        "WEBVTT
header line one
header line two

00:00:00.000 --> 00:00:01.000
A
",
    )
    .unwrap();

    assert_eq!(vtt.cues().len(), 1);
    assert_eq!(vtt.cue(0).unwrap().plain_text(), "A");
}

#[test]
fn missing_signature_produces_nothing() {
    let vtt = WebVttDocument::from_str("not a subtitle file at all").unwrap();

    assert!(vtt.cues().is_empty());
    assert!(vtt.regions().is_empty());
    assert!(vtt.style_sheets().is_empty());
}

#[test]
fn signature_needs_a_separator() {
    let vtt = WebVttDocument::from_str("WEBVTTgarbage\n\n00:00:00.000 --> 00:00:01.000\nA\n")
        .unwrap();

    assert!(vtt.cues().is_empty());
}

#[test]
fn signature_alone_is_valid_but_empty() {
    let vtt = WebVttDocument::from_str("WEBVTT\n").unwrap();

    assert!(vtt.cues().is_empty());
}

#[test]
fn truncated_signature_produces_nothing() {
    let vtt = WebVttDocument::from_str("WEBV").unwrap();

    assert!(vtt.cues().is_empty());
}

#[test]
fn cue_without_blank_line_after_signature() {
    let vtt = WebVttDocument::from_str(
        "WEBVTT
00:00:00.000 --> 00:00:01.000
A
",
    )
    .unwrap();

    assert_eq!(vtt.cues().len(), 1);
    assert_eq!(vtt.cue(0).unwrap().plain_text(), "A");
}

#[test]
fn trailing_newlines() {
    let vtt = WebVttDocument::from_str(
        "WEBVTT

1
00:00:00.000 --> 00:00:05.000
Line


",
    )
    .unwrap();

    assert_eq!(vtt.cues().len(), 1);
    assert_eq!(vtt.cue(0).unwrap().plain_text(), "Line");
}

#[test]
fn short_timestamps() {
    let vtt = WebVttDocument::from_str(
        "WEBVTT

1
00:00.000 --> 00:05.000
Hello,

2
00:07.300 --> 00:10.100
dear friend

",
    )
    .unwrap();

    assert_eq!(vtt.cues().len(), 2);
    assert_eq!(vtt.cue(0).unwrap().start, 0.into());
    assert_eq!(vtt.cue(0).unwrap().end, 5000.into());
    assert_eq!(vtt.cue(1).unwrap().start, 7300.into());
}

#[test]
fn multiline_cues() {
    let vtt = WebVttDocument::from_str(
        "WEBVTT

1
00:00:00.000 --> 00:00:05.000
What
a
great
day


00:00:07.300 --> 00:00:10.100
it
is!",
    )
    .unwrap();

    assert_eq!(vtt.cues().len(), 2);
    assert_eq!(vtt.cue(0).unwrap().plain_text(), "What\na\ngreat\nday");
    assert_eq!(vtt.cue(1).unwrap().plain_text(), "it\nis!");
}

#[test]
fn invalid_block_between_cues() {
    let vtt = WebVttDocument::from_str(
        "WEBVTT

00:00:00.900 --> 00:00:03.350
Text

Invalid stuff

00:00:06.100 --> 00:00:09.800
More text
",
    )
    .unwrap();

    assert_eq!(vtt.cues().len(), 2);
    assert_eq!(vtt.cue(0).unwrap().plain_text(), "Text");
    assert_eq!(vtt.cue(1).unwrap().plain_text(), "More text");
}

#[test]
fn misplaced_arrow_line_starts_next_block() {
    // Two identifier-like lines make the block invalid, and the arrow line
    // is pushed back to open a block of its own.
    let vtt = WebVttDocument::from_str(
        "WEBVTT

id1
id2
00:00:00.000 --> 00:00:01.000
T
",
    )
    .unwrap();

    assert_eq!(vtt.cues().len(), 1);
    let cue = vtt.cue(0).unwrap();
    assert_eq!(cue.identifier, "");
    assert_eq!(cue.plain_text(), "T");
}

#[test]
fn note_blocks_are_skipped() {
    let vtt = WebVttDocument::from_str(
        "WEBVTT

NOTE This is a comment

00:00:00.000 --> 00:00:01.000
A

NOTE
Multi-line comment
still going

00:00:02.000 --> 00:00:03.000
B
",
    )
    .unwrap();

    assert_eq!(vtt.cues().len(), 2);
    assert_eq!(vtt.cue(0).unwrap().plain_text(), "A");
    assert_eq!(vtt.cue(1).unwrap().plain_text(), "B");
}

#[test]
fn malformed_timings_drop_only_that_cue() {
    let vtt = WebVttDocument::from_str(
        "WEBVTT

00:00:99.000 --> 00:00:01.000
bad seconds

banana --> phone
bad everything

00:00:02.000 --> 00:00:03.000
good
",
    )
    .unwrap();

    assert_eq!(vtt.cues().len(), 1);
    assert_eq!(vtt.cue(0).unwrap().plain_text(), "good");
}

#[test]
fn cue_must_end_after_it_starts() {
    let vtt = WebVttDocument::from_str(
        "WEBVTT

00:00:05.000 --> 00:00:05.000
zero length

00:00:05.000 --> 00:00:04.000
backwards

00:00:05.000 --> 00:00:06.000
fine
",
    )
    .unwrap();

    assert_eq!(vtt.cues().len(), 1);
    assert_eq!(vtt.cue(0).unwrap().plain_text(), "fine");
}

#[test]
fn crlf_and_nul_are_normalized() {
    let bytes = b"WEBVTT\r\n\r\n00:00:00.000 --> 00:00:01.000\r\nA\0B\r\n".to_vec();
    let vtt = WebVttDocument::from_bytes(bytes);

    assert_eq!(vtt.cues().len(), 1);
    assert_eq!(
        vtt.cue(0).unwrap().nodes,
        vec![CueNode::Text("A\u{fffd}B".to_owned())]
    );
}

#[test]
fn lone_carriage_returns_are_line_breaks() {
    let bytes = b"WEBVTT\r\r00:00:00.000 --> 00:00:01.000\rA\r".to_vec();
    let vtt = WebVttDocument::from_bytes(bytes);

    assert_eq!(vtt.cues().len(), 1);
    assert_eq!(vtt.cue(0).unwrap().plain_text(), "A");
}

#[test]
fn malformed_settings_do_not_suppress_valid_ones() {
    let vtt = WebVttDocument::from_str(
        "WEBVTT

00:00:00.000 --> 00:00:01.000 align:banana size:50% vertical:sideways
Z
",
    )
    .unwrap();

    assert_eq!(vtt.cues().len(), 1);
    let cue = vtt.cue(0).unwrap();
    assert_eq!(cue.size, 50.0);
    assert_eq!(cue.text_alignment, TextAlignment::Center);
    assert_eq!(cue.vertical, Vertical::None);
    assert_eq!(cue.line, Line::Auto);
}

#[test]
fn empty_payload_cue() {
    let vtt = WebVttDocument::from_str(
        "WEBVTT

00:00:00.000 --> 00:00:01.000

00:00:02.000 --> 00:00:03.000
B
",
    )
    .unwrap();

    assert_eq!(vtt.cues().len(), 2);
    assert_eq!(vtt.cue(0).unwrap().plain_text(), "");
    assert_eq!(vtt.cue(1).unwrap().plain_text(), "B");
}
