//! calliope is a streaming WebVTT parsing library for Rust

#![warn(
    clippy::all,
    clippy::cargo,
    clippy::pedantic,
    missing_docs,
    clippy::perf,
    anonymous_parameters,
    trivial_numeric_casts,
    trivial_casts,
    single_use_lifetimes,
    nonstandard_style,
    unreachable_pub
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::doc_markdown,
    clippy::multiple_crate_versions,
    clippy::similar_names
)]

mod buffer;
mod cue;
mod decoder;
mod document;
mod encoding;
mod entities;
mod errors;
mod parser;
mod parsing;
mod region;
mod style;
mod timing;

pub use buffer::{ByteBuffer, CodepointBuffer, SyncBuffer};
pub use cue::{
    CueNode, CueNodeVisitor, InternalNode, InternalNodeKind, Line, LineAlignment, Position,
    PositionAlignment, TextAlignment, Vertical, WebVttCue,
};
pub use decoder::Utf8Decoder;
pub use document::WebVttDocument;
pub use errors::Error;
pub use parser::{StyleSheetParser, WebVttParser};
pub use region::{Scroll, WebVttRegion};
pub use style::{NodeType, Selector, SelectorVisitor, WebVttStyleSheet};
pub use timing::{Moment, TimeDelta};
