use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use log::{debug, error, info};

use crate::{
    buffer::{CodepointBuffer, SyncBuffer},
    cue::WebVttCue,
    errors::Error,
    region::WebVttRegion,
    style::WebVttStyleSheet,
};

mod cue;
mod cue_text;
mod preprocess;
mod region;
mod style;

use self::cue::CueParser;
pub use self::style::StyleSheetParser;

const SIGNATURE: &str = "WEBVTT";

/// Streaming WebVTT parser.
///
/// Consumes the codepoint stream produced by a [`Utf8Decoder`](crate::Utf8Decoder)
/// on two background threads: one normalizes line terminators and illegal
/// codepoints, the other collects blocks and parses them into cues, regions
/// and style rules, which it writes to three consumer-facing buffers.
///
/// Regions and style rules can only appear before the first cue, so both of
/// those buffers are marked ended as soon as the first cue is emitted. A
/// stream that is not WebVTT at all is reported through the logger and ends
/// all three buffers early; consumers never block on a failed parse.
///
/// Dropping the parser joins both threads, so the input buffer must reach its
/// end of input for the drop to finish.
pub struct WebVttParser {
    input: Arc<CodepointBuffer>,
    preprocessed: Arc<CodepointBuffer>,
    cues: Arc<SyncBuffer<WebVttCue>>,
    regions: Arc<SyncBuffer<WebVttRegion>>,
    style_sheets: Arc<SyncBuffer<WebVttStyleSheet>>,
    predefined_language: Option<String>,
    started: bool,
    preprocess_thread: Option<JoinHandle<()>>,
    parse_thread: Option<JoinHandle<()>>,
}

impl WebVttParser {
    /// Create a parser reading from the given codepoint buffer
    #[must_use]
    pub fn new(input: Arc<CodepointBuffer>) -> Self {
        Self {
            input,
            preprocessed: Arc::new(SyncBuffer::new()),
            cues: Arc::new(SyncBuffer::new()),
            regions: Arc::new(SyncBuffer::new()),
            style_sheets: Arc::new(SyncBuffer::new()),
            predefined_language: None,
            started: false,
            preprocess_thread: None,
            parse_thread: None,
        }
    }

    /// Default language context for cue text outside any `<lang>` span.
    /// Must be set before parsing starts; calls after that are ignored.
    pub fn set_predefined_language(&mut self, language: impl Into<String>) {
        if !self.started {
            self.predefined_language = Some(language.into());
        }
    }

    /// Start the preprocessing and parsing threads. Returns false and does
    /// nothing if parsing has already been started.
    pub fn start_parsing(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;

        let input = Arc::clone(&self.input);
        let preprocessed = Arc::clone(&self.preprocessed);
        self.preprocess_thread = Some(thread::spawn(move || {
            preprocess::preprocess_loop(&input, &preprocessed);
        }));

        let task = ParseTask {
            stream: Arc::clone(&self.preprocessed),
            cues: Arc::clone(&self.cues),
            regions: Arc::clone(&self.regions),
            style_sheets: Arc::clone(&self.style_sheets),
            cue_parser: CueParser::new(Arc::clone(&self.regions)),
            style_sheet_parser: StyleSheetParser::new(),
            predefined_language: self.predefined_language.clone(),
            seen_cue: false,
        };
        self.parse_thread = Some(thread::spawn(move || task.run()));
        true
    }

    /// Output buffer of parsed cues, in stream order
    #[must_use]
    pub fn cue_buffer(&self) -> Arc<SyncBuffer<WebVttCue>> {
        Arc::clone(&self.cues)
    }

    /// Output buffer of parsed regions. Ends no later than the first cue.
    #[must_use]
    pub fn region_buffer(&self) -> Arc<SyncBuffer<WebVttRegion>> {
        Arc::clone(&self.regions)
    }

    /// Output buffer of parsed style rules. Ends no later than the first cue.
    #[must_use]
    pub fn style_sheet_buffer(&self) -> Arc<SyncBuffer<WebVttStyleSheet>> {
        Arc::clone(&self.style_sheets)
    }
}

impl Drop for WebVttParser {
    fn drop(&mut self) {
        if let Some(thread) = self.preprocess_thread.take() {
            let _ = thread.join();
        }
        if let Some(thread) = self.parse_thread.take() {
            let _ = thread.join();
        }
    }
}

struct ParseTask {
    stream: Arc<CodepointBuffer>,
    cues: Arc<SyncBuffer<WebVttCue>>,
    regions: Arc<SyncBuffer<WebVttRegion>>,
    style_sheets: Arc<SyncBuffer<WebVttStyleSheet>>,
    cue_parser: CueParser,
    style_sheet_parser: StyleSheetParser,
    predefined_language: Option<String>,
    seen_cue: bool,
}

impl ParseTask {
    fn run(mut self) {
        match self.parse() {
            Ok(()) => info!("finished parsing WebVTT stream"),
            Err(err) => error!("{err}"),
        }
        self.cues.set_input_ended();
        self.regions.set_input_ended();
        self.style_sheets.set_input_ended();
    }

    fn parse(&mut self) -> Result<(), Error> {
        let signature = self.stream.read_exact_string(SIGNATURE.len());
        if signature != SIGNATURE {
            return Err(Error::FileFormatError(
                "file does not begin with the WEBVTT signature".to_owned(),
            ));
        }
        let Some(separator) = self.stream.read_one() else {
            return Err(Error::FileFormatError(
                "nothing follows the WEBVTT signature".to_owned(),
            ));
        };
        if separator != ' ' && separator != '\t' && separator != '\n' {
            return Err(Error::FileFormatError(
                "the WEBVTT signature must be followed by a space, tab or line feed".to_owned(),
            ));
        }
        if separator != '\n' {
            // the rest of the signature line is free-form text
            self.stream.read_line();
            if self.stream.read_one().is_none() {
                return Ok(());
            }
        }

        match self.stream.peek_one() {
            None => return Ok(()),
            Some('\n') => {}
            Some(_) => self.collect_block(true),
        }

        self.stream.skip_run(&'\n');
        while self.stream.peek_one().is_some() {
            self.collect_block(false);
            self.stream.skip_run(&'\n');
        }
        Ok(())
    }

    fn collect_block(&mut self, in_header: bool) {
        let mut line_count = 0u32;
        let mut seen_eof = false;
        let mut seen_arrow = false;
        let mut buffer = String::new();
        let mut previous_position = self.stream.read_position();
        let mut new_cue = false;
        let mut new_region = false;
        let mut new_style_sheet = false;

        loop {
            let line = self.stream.read_line();
            line_count += 1;
            if self.stream.read_one().is_none() {
                seen_eof = true;
            }

            if line.contains("-->") {
                if !in_header && (line_count == 1 || (line_count == 2 && !seen_arrow)) {
                    seen_arrow = true;
                    self.stream.clear_until_read_position();
                    previous_position = self.stream.read_position();

                    new_cue = self.cue_parser.begin_cue(&buffer, &line);
                    buffer.clear();
                } else {
                    // the arrow line opens the next block
                    self.stream.set_read_position(previous_position);
                    break;
                }
            } else if line.is_empty() {
                break;
            } else {
                if !in_header && line_count == 2 && !self.seen_cue && !new_cue {
                    if is_block_marker(&buffer, "STYLE") {
                        new_style_sheet = true;
                        buffer.clear();
                    } else if is_block_marker(&buffer, "REGION") {
                        new_region = true;
                        buffer.clear();
                    }
                }
                if !buffer.is_empty() {
                    buffer.push('\n');
                }
                buffer.push_str(&line);
                previous_position = self.stream.read_position();
            }

            if seen_eof {
                break;
            }
        }

        if new_cue {
            if let Some(cue) = self
                .cue_parser
                .finish_cue(&buffer, self.predefined_language.as_deref())
            {
                if !self.seen_cue {
                    self.seen_cue = true;
                    self.regions.set_input_ended();
                    self.style_sheets.set_input_ended();
                }
                self.cues.write_one(cue);
            }
        } else if new_style_sheet {
            let rules = self.style_sheet_parser.parse_block(&buffer);
            self.style_sheets.write_multiple(rules);
        } else if new_region {
            self.regions.write_one(region::parse_region_block(&buffer));
        } else if is_comment_block(&buffer) {
            debug!("skipping comment block");
        } else if !buffer.is_empty() && !in_header {
            debug!("dropping unrecognized block");
        }
    }
}

/// Whether the first buffered line is the given block marker, allowing only
/// whitespace around it
fn is_block_marker(buffer: &str, marker: &str) -> bool {
    buffer
        .trim_start()
        .strip_prefix(marker)
        .is_some_and(|rest| rest.chars().all(|c| c.is_ascii_whitespace()))
}

/// Whether the block is a NOTE comment
fn is_comment_block(buffer: &str) -> bool {
    let first_line = buffer.split('\n').next().unwrap_or("").trim_start();
    first_line == "NOTE" || first_line.strip_prefix("NOTE").is_some_and(|rest| rest.starts_with([' ', '\t']))
}
