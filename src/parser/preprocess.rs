use crate::buffer::CodepointBuffer;

/// Number of codepoints pulled from the decoded stream per normalization pass
const PREPROCESS_CHUNK_SIZE: usize = 10;

/// Normalize the decoded stream into `output`: line terminators collapse to a
/// single LF and NUL / U+FFFF become U+FFFD. Runs until the input ends.
pub(super) fn preprocess_loop(input: &CodepointBuffer, output: &CodepointBuffer) {
    let mut last_read_cr = false;
    loop {
        let chunk = input.read_multiple(PREPROCESS_CHUNK_SIZE);
        if chunk.is_empty() {
            break;
        }
        output.write_multiple(normalize_chunk(&chunk, &mut last_read_cr));
    }
    output.set_input_ended();
    input.clear_until_read_position();
}

/// Normalize one chunk. `last_read_cr` carries the only state that matters
/// across chunk boundaries: whether the previous chunk ended with a CR whose
/// LF partner may arrive at the start of this one.
fn normalize_chunk(chunk: &[char], last_read_cr: &mut bool) -> Vec<char> {
    let mut normalized = Vec::with_capacity(chunk.len());

    let mut index = usize::from(*last_read_cr && chunk.first() == Some(&'\n'));
    *last_read_cr = chunk.last() == Some(&'\r');

    while index < chunk.len() {
        match chunk[index] {
            '\r' => {
                normalized.push('\n');
                if chunk.get(index + 1) == Some(&'\n') {
                    index += 1;
                }
            }
            '\0' | '\u{ffff}' => normalized.push('\u{fffd}'),
            c => normalized.push(c),
        }
        index += 1;
    }

    normalized
}
