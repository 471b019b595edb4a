use crate::style::{NodeType, Selector, SelectorVisitor};

/// Named rendering region that cues can be placed into
#[derive(Clone, Debug, PartialEq)]
pub struct WebVttRegion {
    /// Region identifier
    pub identifier: String,
    /// Width as a percentage of the video width
    pub width: f64,
    /// Number of lines the region holds
    pub lines: u32,
    /// Anchor point within the region, as `(x, y)` percentages
    pub region_anchor: (f64, f64),
    /// Anchor point within the viewport, as `(x, y)` percentages
    pub viewport_anchor: (f64, f64),
    /// Scrolling behavior when lines are added
    pub scroll: Scroll,
    should_apply_last_visited_style_sheet: bool,
}

/// Scrolling behavior of a region
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scroll {
    /// New lines replace the region content
    #[default]
    None,
    /// New lines push existing lines up
    Up,
}

impl Default for WebVttRegion {
    fn default() -> Self {
        Self {
            identifier: String::new(),
            width: 100.0,
            lines: 3,
            region_anchor: (0.0, 100.0),
            viewport_anchor: (0.0, 100.0),
            scroll: Scroll::None,
            should_apply_last_visited_style_sheet: false,
        }
    }
}

impl WebVttRegion {
    /// Whether the most recently visited selector selects this region's cues,
    /// so that the style sheet carrying it should be applied to them
    #[must_use]
    pub fn should_apply_last_visited_style_sheet(&self) -> bool {
        self.should_apply_last_visited_style_sheet
    }
}

impl SelectorVisitor for WebVttRegion {
    fn visit_match_all(&mut self) {
        self.should_apply_last_visited_style_sheet = true;
    }

    fn visit_id(&mut self, name: &str) {
        self.should_apply_last_visited_style_sheet = name == self.identifier;
    }

    fn visit_class(&mut self, _name: &str) {
        self.should_apply_last_visited_style_sheet = false;
    }

    fn visit_type(&mut self, _node_type: NodeType) {
        self.should_apply_last_visited_style_sheet = false;
    }

    fn visit_language(&mut self, _tag: &str) {
        self.should_apply_last_visited_style_sheet = false;
    }

    fn visit_voice(&mut self, _annotation: &str) {
        self.should_apply_last_visited_style_sheet = false;
    }

    fn visit_compound(&mut self, _parts: &[Selector]) {
        self.should_apply_last_visited_style_sheet = false;
    }

    fn visit_combinator(&mut self, _ancestor: &Selector, _descendant: &Selector) {
        self.should_apply_last_visited_style_sheet = false;
    }
}
