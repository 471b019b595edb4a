use encoding_rs::WINDOWS_1252;

use calliope::WebVttDocument;

#[test]
fn load_utf8_file() {
    let vtt = WebVttDocument::from_path("./tests/data/simple.vtt").unwrap();

    assert_eq!(vtt.cues().len(), 2);
    assert_eq!(vtt.cue(0).unwrap().identifier, "1");
    assert_eq!(vtt.cue(0).unwrap().plain_text(), "café time");
    assert_eq!(vtt.cue(1).unwrap().plain_text(), "second cue");
}

#[test]
fn load_file_with_explicit_encoding() {
    let vtt =
        WebVttDocument::from_path_with_encoding("./tests/data/windows1252.vtt", Some(WINDOWS_1252))
            .unwrap();

    assert_eq!(vtt.cues().len(), 1);
    assert_eq!(vtt.cue(0).unwrap().plain_text(), "café au lait, déjà prêt");
}

#[test]
fn load_file_with_detected_encoding() {
    let vtt = WebVttDocument::from_path("./tests/data/windows1252.vtt").unwrap();

    assert_eq!(vtt.cues().len(), 1);
    assert_eq!(vtt.cue(0).unwrap().plain_text(), "café au lait, déjà prêt");
}

#[test]
fn missing_file_is_an_io_error() {
    let result = WebVttDocument::from_path("./tests/data/does-not-exist.vtt");

    assert!(result.is_err());
}

#[test]
fn default_document_is_empty() {
    let vtt = WebVttDocument::default();

    assert!(vtt.cues().is_empty());
    assert!(vtt.regions().is_empty());
    assert!(vtt.style_sheets().is_empty());
}
