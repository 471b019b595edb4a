use crate::timing::{Moment, TimeDelta};

/// Writing direction requested by the `vertical` cue setting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Vertical {
    /// Horizontal text
    #[default]
    None,
    /// Vertical text growing right to left
    Rl,
    /// Vertical text growing left to right
    Lr,
}

/// Value of the `line` cue setting
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Line {
    /// Position the cue automatically
    #[default]
    Auto,
    /// Percentage of the video dimension
    Percentage(f64),
    /// Line number, counted from the edge of the video
    Number(i64),
}

/// Alignment given with the `line` cue setting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineAlignment {
    /// Align to the start of the line box
    #[default]
    Start,
    /// Center the line box
    Center,
    /// Align to the end of the line box
    End,
}

/// Value of the `position` cue setting
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Position {
    /// Position the cue automatically
    #[default]
    Auto,
    /// Percentage of the video dimension
    Percentage(f64),
}

/// Alignment given with the `position` cue setting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PositionAlignment {
    /// Derive the alignment from the text alignment
    #[default]
    Auto,
    /// Anchor the line-left edge at the position
    LineLeft,
    /// Center the cue box at the position
    Center,
    /// Anchor the line-right edge at the position
    LineRight,
}

/// Value of the `align` cue setting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlignment {
    /// Align text to the start of the line
    Start,
    /// Center text within the line
    #[default]
    Center,
    /// Align text to the end of the line
    End,
    /// Left-align text
    Left,
    /// Right-align text
    Right,
}

/// WebVTT cue: identifier, timings, settings and the parsed cue text tree
#[derive(Clone, Debug, PartialEq)]
pub struct WebVttCue {
    /// Cue identifier, empty when the cue block had no identifier line
    pub identifier: String,
    /// Start time of the cue
    pub start: Moment,
    /// End time of the cue
    pub end: Moment,
    /// Identifier of the region the cue renders into, when it named a known region
    pub region: Option<String>,
    /// Writing direction
    pub vertical: Vertical,
    /// Line position
    pub line: Line,
    /// Line alignment
    pub line_alignment: LineAlignment,
    /// Indent position
    pub position: Position,
    /// Indent alignment
    pub position_alignment: PositionAlignment,
    /// Size of the cue box as a percentage of the video dimension
    pub size: f64,
    /// Text alignment
    pub text_alignment: TextAlignment,
    /// Parsed cue text, in document order
    pub nodes: Vec<CueNode>,
}

impl WebVttCue {
    pub(crate) fn new(identifier: String, start: Moment, end: Moment) -> Self {
        Self {
            identifier,
            start,
            end,
            region: None,
            vertical: Vertical::default(),
            line: Line::default(),
            line_alignment: LineAlignment::default(),
            position: Position::default(),
            position_alignment: PositionAlignment::default(),
            size: 100.0,
            text_alignment: TextAlignment::default(),
            nodes: Vec::new(),
        }
    }

    /// Duration of the cue
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Shift the cue by the given amount of time. Timestamp nodes in the cue
    /// text move along with the cue timings.
    pub fn shift(&mut self, delta: TimeDelta) {
        self.start += delta;
        self.end += delta;
        shift_nodes(&mut self.nodes, delta);
    }

    /// Cue text with all markup removed
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut collector = PlainTextCollector {
            text: String::new(),
        };
        for node in &self.nodes {
            node.accept(&mut collector);
        }
        collector.text
    }
}

fn shift_nodes(nodes: &mut [CueNode], delta: TimeDelta) {
    for node in nodes {
        match node {
            CueNode::Internal(internal) => shift_nodes(&mut internal.children, delta),
            CueNode::Timestamp(moment) => *moment += delta,
            CueNode::Text(_) => {}
        }
    }
}

/// One node of the cue text tree
#[derive(Clone, Debug, PartialEq)]
pub enum CueNode {
    /// Styled span with children
    Internal(InternalNode),
    /// Run of unstyled text
    Text(String),
    /// Mid-cue timestamp marker
    Timestamp(Moment),
}

/// Styled span in the cue text tree
#[derive(Clone, Debug, PartialEq)]
pub struct InternalNode {
    /// What kind of span this is
    pub kind: InternalNodeKind,
    /// Classes listed in the start tag
    pub classes: Vec<String>,
    /// Language context: the tag of the nearest `lang` ancestor, or the
    /// predefined language configured on the parser
    pub language: Option<String>,
    /// Child nodes in document order
    pub children: Vec<CueNode>,
}

/// Kind of a styled span
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InternalNodeKind {
    /// `<b>`
    Bold,
    /// `<i>`
    Italic,
    /// `<u>`
    Underline,
    /// `<ruby>`
    Ruby,
    /// `<rt>`, only valid directly inside `<ruby>`
    RubyText,
    /// `<c>`, carries no semantics beyond its class list
    Class,
    /// `<v speaker>`
    Voice {
        /// Speaker name from the tag annotation
        annotation: String,
    },
    /// `<lang tag>`
    Language {
        /// BCP-47 language tag from the tag annotation
        tag: String,
    },
}

/// Visitor over cue text tree nodes.
///
/// [`CueNode::accept`] dispatches to the method matching the node variant.
/// Recursing into the children of internal nodes is up to the visitor.
#[allow(unused_variables)]
pub trait CueNodeVisitor {
    /// Called for `<b>` spans
    fn visit_bold(&mut self, node: &InternalNode) {}
    /// Called for `<i>` spans
    fn visit_italic(&mut self, node: &InternalNode) {}
    /// Called for `<u>` spans
    fn visit_underline(&mut self, node: &InternalNode) {}
    /// Called for `<ruby>` spans
    fn visit_ruby(&mut self, node: &InternalNode) {}
    /// Called for `<rt>` spans
    fn visit_ruby_text(&mut self, node: &InternalNode) {}
    /// Called for `<c>` spans
    fn visit_class(&mut self, node: &InternalNode) {}
    /// Called for `<v>` spans
    fn visit_voice(&mut self, node: &InternalNode, annotation: &str) {}
    /// Called for `<lang>` spans
    fn visit_language(&mut self, node: &InternalNode, tag: &str) {}
    /// Called for text runs
    fn visit_text(&mut self, text: &str) {}
    /// Called for mid-cue timestamps
    fn visit_timestamp(&mut self, timestamp: Moment) {}
}

impl CueNode {
    /// Dispatch to the visitor method matching this node's variant
    pub fn accept(&self, visitor: &mut dyn CueNodeVisitor) {
        match self {
            CueNode::Internal(node) => node.accept(visitor),
            CueNode::Text(text) => visitor.visit_text(text),
            CueNode::Timestamp(timestamp) => visitor.visit_timestamp(*timestamp),
        }
    }
}

impl InternalNode {
    /// Dispatch to the visitor method matching this node's kind
    pub fn accept(&self, visitor: &mut dyn CueNodeVisitor) {
        match &self.kind {
            InternalNodeKind::Bold => visitor.visit_bold(self),
            InternalNodeKind::Italic => visitor.visit_italic(self),
            InternalNodeKind::Underline => visitor.visit_underline(self),
            InternalNodeKind::Ruby => visitor.visit_ruby(self),
            InternalNodeKind::RubyText => visitor.visit_ruby_text(self),
            InternalNodeKind::Class => visitor.visit_class(self),
            InternalNodeKind::Voice { annotation } => visitor.visit_voice(self, annotation),
            InternalNodeKind::Language { tag } => visitor.visit_language(self, tag),
        }
    }
}

struct PlainTextCollector {
    text: String,
}

impl PlainTextCollector {
    fn descend(&mut self, node: &InternalNode) {
        for child in &node.children {
            child.accept(self);
        }
    }
}

impl CueNodeVisitor for PlainTextCollector {
    fn visit_bold(&mut self, node: &InternalNode) {
        self.descend(node);
    }

    fn visit_italic(&mut self, node: &InternalNode) {
        self.descend(node);
    }

    fn visit_underline(&mut self, node: &InternalNode) {
        self.descend(node);
    }

    fn visit_ruby(&mut self, node: &InternalNode) {
        self.descend(node);
    }

    fn visit_ruby_text(&mut self, node: &InternalNode) {
        self.descend(node);
    }

    fn visit_class(&mut self, node: &InternalNode) {
        self.descend(node);
    }

    fn visit_voice(&mut self, node: &InternalNode, _annotation: &str) {
        self.descend(node);
    }

    fn visit_language(&mut self, node: &InternalNode, _tag: &str) {
        self.descend(node);
    }

    fn visit_text(&mut self, text: &str) {
        self.text.push_str(text);
    }
}
