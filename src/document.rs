use std::{path::Path, str::FromStr, sync::Arc};

use buildstructor::Builder;
use encoding_rs::Encoding;

use crate::{
    buffer::SyncBuffer,
    cue::WebVttCue,
    decoder::Utf8Decoder,
    encoding::{detect_file_encoding, read_file_bytes},
    errors::Error,
    parser::WebVttParser,
    region::WebVttRegion,
    style::WebVttStyleSheet,
    timing::TimeDelta,
};

/// Fully parsed WebVTT file.
///
/// Runs the streaming pipeline to completion and keeps the drained cue,
/// region and style rule streams. Use [`WebVttParser`] directly to consume
/// them while parsing is still in progress.
#[derive(Clone, Debug, Builder)]
pub struct WebVttDocument {
    /// List of cues
    cues: Vec<WebVttCue>,
    /// List of regions
    regions: Vec<WebVttRegion>,
    /// List of cue style rules
    style_sheets: Vec<WebVttStyleSheet>,
}

impl WebVttDocument {
    /// Load a WebVTT file from the given path.
    /// Automatically attempts to detect the encoding to use from the file contents.
    ///
    /// # Errors
    ///
    /// If an error is encountered while opening the file, returns [`Error::FileIoError`]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let encoding = detect_file_encoding(path.as_ref()).ok();
        Self::from_path_with_encoding(path, encoding)
    }

    /// Load a WebVTT file from the given path using the given encoding
    ///
    /// # Errors
    ///
    /// If an error is encountered while opening the file, returns [`Error::FileIoError`]
    pub fn from_path_with_encoding(
        path: impl AsRef<Path>,
        encoding: Option<&'static Encoding>,
    ) -> Result<Self, Error> {
        let bytes = read_file_bytes(path.as_ref(), encoding)?;
        Ok(Self::from_bytes(bytes))
    }

    /// Parse a WebVTT document from UTF-8 bytes
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::from_bytes_with_language(bytes, None)
    }

    /// Parse a WebVTT document from UTF-8 bytes, applying `language` as the
    /// default language context of cue text
    #[must_use]
    pub fn from_bytes_with_language(bytes: impl Into<Vec<u8>>, language: Option<&str>) -> Self {
        let input = Arc::new(SyncBuffer::new());
        input.write_multiple(bytes.into());
        input.set_input_ended();

        let mut decoder = Utf8Decoder::new(input);
        decoder.start_decoding();
        let Some(decoded) = decoder.decoded_stream() else {
            return Self::builder().build();
        };

        let mut parser = WebVttParser::new(decoded);
        if let Some(language) = language {
            parser.set_predefined_language(language);
        }
        parser.start_parsing();

        let cue_buffer = parser.cue_buffer();
        let region_buffer = parser.region_buffer();
        let style_sheet_buffer = parser.style_sheet_buffer();

        let mut cues = Vec::new();
        while let Some(cue) = cue_buffer.read_one() {
            cues.push(cue);
        }
        let mut regions = Vec::new();
        while let Some(region) = region_buffer.read_one() {
            regions.push(region);
        }
        let mut style_sheets = Vec::new();
        while let Some(style_sheet) = style_sheet_buffer.read_one() {
            style_sheets.push(style_sheet);
        }

        Self {
            cues,
            regions,
            style_sheets,
        }
    }

    /// Get list of cues as a slice
    #[must_use]
    pub fn cues(&self) -> &[WebVttCue] {
        self.cues.as_slice()
    }

    /// Get list of cues as a mutable slice
    pub fn cues_mut(&mut self) -> &mut [WebVttCue] {
        self.cues.as_mut_slice()
    }

    /// Get cue at index
    #[must_use]
    pub fn cue(&self, index: usize) -> Option<&WebVttCue> {
        self.cues.get(index)
    }

    /// Get mutable cue at index
    pub fn cue_mut(&mut self, index: usize) -> Option<&mut WebVttCue> {
        self.cues.get_mut(index)
    }

    /// Get list of regions as a slice
    #[must_use]
    pub fn regions(&self) -> &[WebVttRegion] {
        self.regions.as_slice()
    }

    /// Get region at index
    #[must_use]
    pub fn region(&self, index: usize) -> Option<&WebVttRegion> {
        self.regions.get(index)
    }

    /// Get list of cue style rules as a slice
    #[must_use]
    pub fn style_sheets(&self) -> &[WebVttStyleSheet] {
        self.style_sheets.as_slice()
    }

    /// Get cue style rule at index
    #[must_use]
    pub fn style_sheet(&self, index: usize) -> Option<&WebVttStyleSheet> {
        self.style_sheets.get(index)
    }

    /// Shift all cues by the given amount of time
    pub fn shift(&mut self, delta: TimeDelta) {
        for cue in &mut self.cues {
            cue.shift(delta);
        }
    }
}

impl FromStr for WebVttDocument {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_bytes(s.as_bytes().to_vec()))
    }
}

impl Default for WebVttDocument {
    fn default() -> Self {
        Self::builder().build()
    }
}
