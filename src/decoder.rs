use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use encoding_rs::{CoderResult, Decoder, UTF_8};
use log::debug;

use crate::buffer::{ByteBuffer, CodepointBuffer, SyncBuffer};

/// Number of bytes pulled from the input buffer per decode iteration
const DECODE_CHUNK_SIZE: usize = 10;

/// Streaming UTF-8 decoder stage.
///
/// Reads byte chunks from its input buffer on a background thread and writes
/// the decoded codepoints to its output buffer. Incomplete sequences at chunk
/// boundaries are carried over to the next chunk; invalid sequences decode to
/// U+FFFD. A leading UTF-8 byte order mark is stripped. An incomplete
/// sequence left over when the input ends is dropped as truncation.
pub struct Utf8Decoder {
    input: Arc<ByteBuffer>,
    output: Arc<CodepointBuffer>,
    started: bool,
    thread: Option<JoinHandle<()>>,
}

impl Utf8Decoder {
    /// Create a decoder reading from the given byte buffer
    #[must_use]
    pub fn new(input: Arc<ByteBuffer>) -> Self {
        Self {
            input,
            output: Arc::new(SyncBuffer::new()),
            started: false,
            thread: None,
        }
    }

    /// Start the decoding thread. Returns false and does nothing if decoding
    /// has already been started.
    pub fn start_decoding(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;

        let input = Arc::clone(&self.input);
        let output = Arc::clone(&self.output);
        self.thread = Some(thread::spawn(move || decode_loop(&input, &output)));
        true
    }

    /// The codepoint stream produced by this decoder, or `None` when decoding
    /// has not been started yet
    #[must_use]
    pub fn decoded_stream(&self) -> Option<Arc<CodepointBuffer>> {
        self.started.then(|| Arc::clone(&self.output))
    }
}

impl Drop for Utf8Decoder {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn decode_loop(input: &ByteBuffer, output: &CodepointBuffer) {
    let mut decoder = UTF_8.new_decoder();
    let mut decoded = String::new();

    loop {
        let bytes = input.read_multiple(DECODE_CHUNK_SIZE);
        if bytes.is_empty() {
            break;
        }

        decoded.clear();
        decode_chunk(&mut decoder, &bytes, &mut decoded);
        if !decoded.is_empty() {
            output.write_multiple(decoded.chars());
        }
    }

    // Whatever the decoder still holds at this point is a truncated sequence.
    let mut tail = String::with_capacity(8);
    let _ = decoder.decode_to_string(&[], &mut tail, true);
    if !tail.is_empty() {
        debug!("dropping an incomplete codepoint at the end of input");
    }

    output.set_input_ended();
    input.clear_until_read_position();
}

fn decode_chunk(decoder: &mut Decoder, bytes: &[u8], decoded: &mut String) {
    let mut remaining = bytes;
    loop {
        let capacity = decoder
            .max_utf8_buffer_length(remaining.len())
            .unwrap_or(remaining.len() * 3 + 4);
        decoded.reserve(capacity);

        let (result, consumed, _) = decoder.decode_to_string(remaining, decoded, false);
        remaining = &remaining[consumed..];
        if matches!(result, CoderResult::InputEmpty) {
            return;
        }
    }
}
