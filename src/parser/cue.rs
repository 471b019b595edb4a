use std::sync::Arc;

use log::debug;
use nom::{
    bytes::complete::tag,
    character::complete::space0,
    sequence::{delimited, preceded, separated_pair},
    IResult, Parser,
};

use super::cue_text::parse_cue_text;
use crate::{
    buffer::SyncBuffer,
    cue::{Line, LineAlignment, Position, PositionAlignment, TextAlignment, Vertical, WebVttCue},
    parsing::{percentage_value, setting, timestamp},
    region::WebVttRegion,
    timing::Moment,
};

/// Builds cues out of an arrow line and the block's text payload.
///
/// Region references are resolved against the region output buffer while the
/// arrow line is parsed; unknown identifiers are ignored.
pub(super) struct CueParser {
    regions: Arc<SyncBuffer<WebVttRegion>>,
    current: Option<WebVttCue>,
}

impl CueParser {
    pub(super) fn new(regions: Arc<SyncBuffer<WebVttRegion>>) -> Self {
        Self {
            regions,
            current: None,
        }
    }

    /// Parse the arrow line of a cue block. Returns false and drops the cue
    /// when the timings cannot be parsed.
    pub(super) fn begin_cue(&mut self, identifier: &str, line: &str) -> bool {
        self.current = None;
        let Ok((rest, (start, end))) = cue_timings(line) else {
            debug!("dropping cue block with a malformed timings line");
            return false;
        };
        if start >= end {
            debug!("dropping cue whose end does not come after its start");
            return false;
        }

        let mut cue = WebVttCue::new(identifier.to_owned(), start, end);
        self.apply_settings(&mut cue, rest);
        self.current = Some(cue);
        true
    }

    /// Attach the parsed text payload to the pending cue and emit it
    pub(super) fn finish_cue(
        &mut self,
        text: &str,
        predefined_language: Option<&str>,
    ) -> Option<WebVttCue> {
        let mut cue = self.current.take()?;
        cue.nodes = parse_cue_text(text, cue.start, cue.end, predefined_language);
        Some(cue)
    }

    /// Apply `name:value` settings in order. Malformed or unknown settings
    /// are dropped without affecting the others.
    fn apply_settings(&self, cue: &mut WebVttCue, input: &str) {
        for piece in input.split_ascii_whitespace() {
            let Some((name, value)) = setting(piece) else {
                continue;
            };
            match name {
                "region" => {
                    if self.regions.contains(|region| region.identifier == value) {
                        cue.region = Some(value.to_owned());
                    } else {
                        debug!("ignoring reference to unknown region {value}");
                    }
                }
                "vertical" => match value {
                    "rl" => cue.vertical = Vertical::Rl,
                    "lr" => cue.vertical = Vertical::Lr,
                    _ => {}
                },
                "line" => apply_line_setting(cue, value),
                "position" => apply_position_setting(cue, value),
                "size" => {
                    if let Some(number) = percentage_value(value) {
                        cue.size = number;
                    }
                }
                "align" => match value {
                    "start" => cue.text_alignment = TextAlignment::Start,
                    "center" => cue.text_alignment = TextAlignment::Center,
                    "end" => cue.text_alignment = TextAlignment::End,
                    "left" => cue.text_alignment = TextAlignment::Left,
                    "right" => cue.text_alignment = TextAlignment::Right,
                    _ => {}
                },
                _ => {}
            }
        }
    }
}

fn cue_timings(input: &str) -> IResult<&str, (Moment, Moment)> {
    separated_pair(
        preceded(space0, timestamp),
        delimited(space0, tag("-->"), space0),
        timestamp,
    )
    .parse(input)
}

fn apply_line_setting(cue: &mut WebVttCue, value: &str) {
    let (position, alignment) = match value.split_once(',') {
        Some((position, alignment)) => (position, Some(alignment)),
        None => (value, None),
    };

    let line = if let Some(number) = percentage_value(position) {
        Line::Percentage(number)
    } else if let Ok(number) = position.parse::<i64>() {
        Line::Number(number)
    } else {
        return;
    };

    match alignment {
        Some("start") => cue.line_alignment = LineAlignment::Start,
        Some("center") => cue.line_alignment = LineAlignment::Center,
        Some("end") => cue.line_alignment = LineAlignment::End,
        Some(_) => return,
        None => {}
    }
    cue.line = line;
}

fn apply_position_setting(cue: &mut WebVttCue, value: &str) {
    let (position, alignment) = match value.split_once(',') {
        Some((position, alignment)) => (position, Some(alignment)),
        None => (value, None),
    };

    let Some(number) = percentage_value(position) else {
        return;
    };

    match alignment {
        Some("line-left") => cue.position_alignment = PositionAlignment::LineLeft,
        Some("center") => cue.position_alignment = PositionAlignment::Center,
        Some("line-right") => cue.position_alignment = PositionAlignment::LineRight,
        Some(_) => return,
        None => {}
    }
    cue.position = Position::Percentage(number);
}
