//! Character reference tables used while tokenizing cue text.

/// Replacement text for the named references recognized in cue text
pub(crate) fn named_reference(name: &str) -> Option<&'static str> {
    match name {
        "amp" => Some("&"),
        "lt" => Some("<"),
        "gt" => Some(">"),
        "quot" => Some("\""),
        "apos" => Some("'"),
        "nbsp" => Some("\u{00a0}"),
        "lrm" => Some("\u{200e}"),
        "rlm" => Some("\u{200f}"),
        "ensp" => Some("\u{2002}"),
        "emsp" => Some("\u{2003}"),
        "hellip" => Some("\u{2026}"),
        _ => None,
    }
}

/// Resolve a numeric character reference.
///
/// Values in the C1 control range are mapped to the codepoints Windows-1252
/// uses for those bytes, matching how browsers recover from legacy content.
/// NUL and values that are not Unicode scalars become U+FFFD.
pub(crate) fn numeric_reference(code: u32) -> char {
    match code {
        0x00 => '\u{fffd}',
        0x80 => '\u{20ac}', // EURO SIGN
        0x82 => '\u{201a}', // SINGLE LOW-9 QUOTATION MARK
        0x83 => '\u{0192}', // LATIN SMALL LETTER F WITH HOOK
        0x84 => '\u{201e}', // DOUBLE LOW-9 QUOTATION MARK
        0x85 => '\u{2026}', // HORIZONTAL ELLIPSIS
        0x86 => '\u{2020}', // DAGGER
        0x87 => '\u{2021}', // DOUBLE DAGGER
        0x88 => '\u{02c6}', // MODIFIER LETTER CIRCUMFLEX ACCENT
        0x89 => '\u{2030}', // PER MILLE SIGN
        0x8a => '\u{0160}', // LATIN CAPITAL LETTER S WITH CARON
        0x8b => '\u{2039}', // SINGLE LEFT-POINTING ANGLE QUOTATION MARK
        0x8c => '\u{0152}', // LATIN CAPITAL LIGATURE OE
        0x8e => '\u{017d}', // LATIN CAPITAL LETTER Z WITH CARON
        0x91 => '\u{2018}', // LEFT SINGLE QUOTATION MARK
        0x92 => '\u{2019}', // RIGHT SINGLE QUOTATION MARK
        0x93 => '\u{201c}', // LEFT DOUBLE QUOTATION MARK
        0x94 => '\u{201d}', // RIGHT DOUBLE QUOTATION MARK
        0x95 => '\u{2022}', // BULLET
        0x96 => '\u{2013}', // EN DASH
        0x97 => '\u{2014}', // EM DASH
        0x98 => '\u{02dc}', // SMALL TILDE
        0x99 => '\u{2122}', // TRADE MARK SIGN
        0x9a => '\u{0161}', // LATIN SMALL LETTER S WITH CARON
        0x9b => '\u{203a}', // SINGLE RIGHT-POINTING ANGLE QUOTATION MARK
        0x9c => '\u{0153}', // LATIN SMALL LIGATURE OE
        0x9e => '\u{017e}', // LATIN SMALL LETTER Z WITH CARON
        0x9f => '\u{0178}', // LATIN CAPITAL LETTER Y WITH DIAERESIS
        other => char::from_u32(other).unwrap_or('\u{fffd}'),
    }
}
