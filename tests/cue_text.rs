use std::str::FromStr;

use calliope::{CueNode, InternalNode, InternalNodeKind, WebVttCue, WebVttDocument};

fn parse_payload(payload: &str) -> WebVttCue {
    let source = format!("WEBVTT\n\n00:00:00.000 --> 00:10:00.000\n{payload}\n");
    let vtt = WebVttDocument::from_str(&source).unwrap();
    assert_eq!(vtt.cues().len(), 1);
    vtt.cue(0).unwrap().clone()
}

fn text(content: &str) -> CueNode {
    CueNode::Text(content.to_owned())
}

fn internal(kind: InternalNodeKind, children: Vec<CueNode>) -> CueNode {
    CueNode::Internal(InternalNode {
        kind,
        classes: Vec::new(),
        language: None,
        children,
    })
}

#[test]
fn plain_text_payload() {
    let cue = parse_payload("this is a very boring cue");

    assert_eq!(cue.nodes, vec![text("this is a very boring cue")]);
}

#[test]
fn bold_and_italic_spans() {
    let cue = parse_payload("<b>Hi</b> <i>world</i>");

    assert_eq!(
        cue.nodes,
        vec![
            internal(InternalNodeKind::Bold, vec![text("Hi")]),
            text(" "),
            internal(InternalNodeKind::Italic, vec![text("world")]),
        ]
    );
}

#[test]
fn nested_spans() {
    let cue = parse_payload("<b><u>both</u></b>");

    assert_eq!(
        cue.nodes,
        vec![internal(
            InternalNodeKind::Bold,
            vec![internal(InternalNodeKind::Underline, vec![text("both")])]
        )]
    );
}

#[test]
fn unclosed_spans_are_closed_at_end_of_payload() {
    let cue = parse_payload("<b>unclosed");

    assert_eq!(
        cue.nodes,
        vec![internal(InternalNodeKind::Bold, vec![text("unclosed")])]
    );
}

#[test]
fn unmatched_end_tags_are_ignored() {
    let cue = parse_payload("a</i>b");

    assert_eq!(cue.nodes, vec![text("a"), text("b")]);
}

#[test]
fn classes_are_collected_from_the_start_tag() {
    let cue = parse_payload("<c.yellow.bg-blue>styled</c>");

    assert_eq!(
        cue.nodes,
        vec![CueNode::Internal(InternalNode {
            kind: InternalNodeKind::Class,
            classes: vec!["yellow".to_owned(), "bg-blue".to_owned()],
            language: None,
            children: vec![text("styled")],
        })]
    );
}

#[test]
fn voice_span_with_annotation_and_classes() {
    let cue = parse_payload("<v.first.loud Esme>It’s a blue apple tree!");

    assert_eq!(
        cue.nodes,
        vec![CueNode::Internal(InternalNode {
            kind: InternalNodeKind::Voice {
                annotation: "Esme".to_owned(),
            },
            classes: vec!["first".to_owned(), "loud".to_owned()],
            language: None,
            children: vec![text("It’s a blue apple tree!")],
        })]
    );
}

#[test]
fn voice_annotation_whitespace_is_collapsed() {
    let cue = parse_payload("<v Lee  van  Cleef>...");

    let CueNode::Internal(node) = &cue.nodes[0] else {
        panic!("expected a voice span");
    };
    assert_eq!(
        node.kind,
        InternalNodeKind::Voice {
            annotation: "Lee van Cleef".to_owned(),
        }
    );
}

#[test]
fn ruby_and_ruby_text() {
    let cue = parse_payload("<ruby>base<rt>annotation</rt></ruby>");

    assert_eq!(
        cue.nodes,
        vec![internal(
            InternalNodeKind::Ruby,
            vec![
                text("base"),
                internal(InternalNodeKind::RubyText, vec![text("annotation")]),
            ]
        )]
    );
}

#[test]
fn ruby_end_tag_closes_open_ruby_text() {
    let cue = parse_payload("<ruby>base<rt>annotation</ruby>");

    assert_eq!(
        cue.nodes,
        vec![internal(
            InternalNodeKind::Ruby,
            vec![
                text("base"),
                internal(InternalNodeKind::RubyText, vec![text("annotation")]),
            ]
        )]
    );
}

#[test]
fn ruby_text_outside_ruby_is_ignored() {
    let cue = parse_payload("<rt>not really ruby</rt>");

    assert_eq!(cue.nodes, vec![text("not really ruby")]);
}

#[test]
fn language_spans_set_the_language_context() {
    let cue = parse_payload("Sur les <i.foreignphrase><lang en>playground</lang></i>, ici");

    assert_eq!(
        cue.nodes,
        vec![
            text("Sur les "),
            CueNode::Internal(InternalNode {
                kind: InternalNodeKind::Italic,
                classes: vec!["foreignphrase".to_owned()],
                language: None,
                children: vec![CueNode::Internal(InternalNode {
                    kind: InternalNodeKind::Language {
                        tag: "en".to_owned(),
                    },
                    classes: Vec::new(),
                    language: None,
                    children: vec![text("playground")],
                })],
            }),
            text(", ici"),
        ]
    );
}

#[test]
fn nodes_inside_language_span_inherit_its_tag() {
    let cue = parse_payload("<lang en><i>loanword</i></lang>");

    let CueNode::Internal(lang) = &cue.nodes[0] else {
        panic!("expected a language span");
    };
    let CueNode::Internal(italic) = &lang.children[0] else {
        panic!("expected an italic span");
    };
    assert_eq!(italic.language.as_deref(), Some("en"));
}

#[test]
fn predefined_language_applies_outside_language_spans() {
    let source = "WEBVTT\n\n00:00:00.000 --> 00:00:01.000\n<b>x</b>\n";
    let vtt = WebVttDocument::from_bytes_with_language(source.as_bytes().to_vec(), Some("sr"));

    let CueNode::Internal(bold) = &vtt.cue(0).unwrap().nodes[0] else {
        panic!("expected a bold span");
    };
    assert_eq!(bold.language.as_deref(), Some("sr"));
}

#[test]
fn named_references_resolve() {
    let cue = parse_payload("fish &amp; chips &lt;tasty&gt;&nbsp;&lrm;&rlm;");

    assert_eq!(
        cue.nodes,
        vec![text("fish & chips <tasty>\u{a0}\u{200e}\u{200f}")]
    );
}

#[test]
fn unknown_references_stay_literal() {
    let cue = parse_payload("100 &permille; &amp");

    assert_eq!(cue.nodes, vec![text("100 &permille; &amp")]);
}

#[test]
fn numeric_references_use_the_windows_1252_mapping() {
    let cue = parse_payload("&#x80;&#x85;&#x92;&#133;&#8230;");

    assert_eq!(
        cue.nodes,
        vec![text("\u{20ac}\u{2026}\u{2019}\u{2026}\u{2026}")]
    );
}

#[test]
fn nul_numeric_reference_becomes_replacement_character() {
    let cue = parse_payload("a&#x00;b&#0;c");

    assert_eq!(cue.nodes, vec![text("a\u{fffd}b\u{fffd}c")]);
}

#[test]
fn every_windows_1252_reference_resolves() {
    let expected = [
        (0x80, '\u{20ac}'),
        (0x82, '\u{201a}'),
        (0x83, '\u{0192}'),
        (0x84, '\u{201e}'),
        (0x85, '\u{2026}'),
        (0x86, '\u{2020}'),
        (0x87, '\u{2021}'),
        (0x88, '\u{02c6}'),
        (0x89, '\u{2030}'),
        (0x8a, '\u{0160}'),
        (0x8b, '\u{2039}'),
        (0x8c, '\u{0152}'),
        (0x8e, '\u{017d}'),
        (0x91, '\u{2018}'),
        (0x92, '\u{2019}'),
        (0x93, '\u{201c}'),
        (0x94, '\u{201d}'),
        (0x95, '\u{2022}'),
        (0x96, '\u{2013}'),
        (0x97, '\u{2014}'),
        (0x98, '\u{02dc}'),
        (0x99, '\u{2122}'),
        (0x9a, '\u{0161}'),
        (0x9b, '\u{203a}'),
        (0x9c, '\u{0153}'),
        (0x9e, '\u{017e}'),
        (0x9f, '\u{0178}'),
    ];

    for (code, replacement) in expected {
        let cue = parse_payload(&format!("&#x{code:x};"));
        assert_eq!(cue.nodes, vec![text(&replacement.to_string())], "&#x{code:x};");
    }
}

#[test]
fn timestamp_tags_between_start_and_end() {
    let cue = parse_payload("A<00:01:00.000>B<00:02:00.000>C");

    assert_eq!(
        cue.nodes,
        vec![
            text("A"),
            CueNode::Timestamp(60_000.into()),
            text("B"),
            CueNode::Timestamp(120_000.into()),
            text("C"),
        ]
    );
}

#[test]
fn timestamp_tags_must_be_strictly_increasing() {
    let cue = parse_payload("A<00:01:00.000>B<00:00:30.000>C<00:01:00.000>D");

    assert_eq!(
        cue.nodes,
        vec![
            text("A"),
            CueNode::Timestamp(60_000.into()),
            text("B"),
            text("C"),
            text("D"),
        ]
    );
}

#[test]
fn timestamp_tags_outside_the_cue_are_dropped() {
    // cue runs from 0 to 10 minutes
    let cue = parse_payload("A<00:00:00.000>B<00:10:00.000>C<00:15:00.000>D");

    assert_eq!(cue.nodes, vec![text("A"), text("B"), text("C"), text("D")]);
}

#[test]
fn unknown_tags_are_ignored() {
    let cue = parse_payload("<blink>nope</blink>");

    assert_eq!(cue.nodes, vec![text("nope")]);
}

#[test]
fn incomplete_trailing_tag_produces_no_text() {
    let cue = parse_payload("<b>hi<");

    assert_eq!(
        cue.nodes,
        vec![internal(InternalNodeKind::Bold, vec![text("hi")])]
    );
}

#[test]
fn multiline_payload_keeps_line_breaks_in_text() {
    let cue = parse_payload("first\nsecond");

    assert_eq!(cue.nodes, vec![text("first\nsecond")]);
    assert_eq!(cue.plain_text(), "first\nsecond");
}

#[test]
fn plain_text_strips_all_markup() {
    let cue = parse_payload("<v Esme>Hee!</v> <i>laughter</i>");

    assert_eq!(cue.plain_text(), "Hee! laughter");
}
