use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use encoding_rs_io::DecodeReaderBytesBuilder;

use crate::errors::Error;

/// How many leading bytes of a file are fed to the encoding detector
const DETECTION_WINDOW: usize = 4 * 1024;

/// Guess the encoding of the file at `path` from its leading bytes
pub(crate) fn detect_file_encoding(path: &Path) -> Result<&'static Encoding, Error> {
    let file = File::open(path)?;
    let mut head = Vec::with_capacity(DETECTION_WINDOW);
    file.take(DETECTION_WINDOW as u64).read_to_end(&mut head)?;

    let mut detector = EncodingDetector::new();
    detector.feed(&head, head.len() < DETECTION_WINDOW);
    Ok(detector.guess(None, true))
}

/// Read the file at `path` into UTF-8 bytes, transcoding from the given
/// encoding when one is known
pub(crate) fn read_file_bytes(
    path: &Path,
    encoding: Option<&'static Encoding>,
) -> Result<Vec<u8>, Error> {
    let file = File::open(path)?;
    let transcoded = DecodeReaderBytesBuilder::new()
        .encoding(encoding)
        .build(file);
    let mut reader = BufReader::new(transcoded);

    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(bytes)
}
