use log::debug;

use crate::{
    parsing::{coordinates, percentage_value, setting},
    region::{Scroll, WebVttRegion},
};

/// Parse the settings lines of a REGION block. Malformed values fall back to
/// the region defaults.
pub(super) fn parse_region_block(block: &str) -> WebVttRegion {
    let mut region = WebVttRegion::default();

    for piece in block.split_ascii_whitespace() {
        let Some((name, value)) = setting(piece) else {
            continue;
        };
        match name {
            "id" => {
                if value.contains("-->") {
                    debug!("ignoring region identifier containing an arrow");
                } else {
                    region.identifier = value.to_owned();
                }
            }
            "width" => {
                if let Some(number) = percentage_value(value) {
                    region.width = number;
                }
            }
            "lines" => {
                if value.chars().all(|c| c.is_ascii_digit()) {
                    if let Ok(number) = value.parse() {
                        region.lines = number;
                    }
                }
            }
            "regionanchor" => {
                if let Some(point) = coordinates(value) {
                    region.region_anchor = point;
                }
            }
            "viewportanchor" => {
                if let Some(point) = coordinates(value) {
                    region.viewport_anchor = point;
                }
            }
            "scroll" => {
                if value == "up" {
                    region.scroll = Scroll::Up;
                }
            }
            _ => {}
        }
    }

    region
}
