/// A single style rule scoped to cues: one selector and its declarations
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebVttStyleSheet {
    /// What the rule applies to
    pub selector: Selector,
    /// `(property, value)` pairs, stored verbatim
    pub declarations: Vec<(String, String)>,
}

/// Selector of a cue style rule
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    /// `::cue`, matching every cue
    MatchAll,
    /// `#name`, matching the cue with the given identifier
    Id(String),
    /// `.name`, matching nodes carrying the class
    Class(String),
    /// A cue text node type such as `b` or `ruby`
    Type(NodeType),
    /// `[lang="tag"]`, matching nodes in the given language context
    Language(String),
    /// `[voice="name"]`, matching voice spans with the given annotation
    Voice(String),
    /// Simple selectors that must all match the same node
    Compound(Vec<Selector>),
    /// Descendant combinator
    Combinator {
        /// Selector an ancestor node must match
        ancestor: Box<Selector>,
        /// Selector the node itself must match
        descendant: Box<Selector>,
    },
}

/// Cue text node type named by a type selector
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeType {
    /// `b`
    Bold,
    /// `i`
    Italic,
    /// `u`
    Underline,
    /// `ruby`
    Ruby,
    /// `rt`
    RubyText,
    /// `v`
    Voice,
    /// `c`
    Class,
    /// `lang`
    Language,
}

/// Visitor over selector variants.
///
/// [`Selector::accept`] dispatches to the method matching the variant.
#[allow(unused_variables)]
pub trait SelectorVisitor {
    /// Called for `::cue`
    fn visit_match_all(&mut self) {}
    /// Called for id selectors
    fn visit_id(&mut self, name: &str) {}
    /// Called for class selectors
    fn visit_class(&mut self, name: &str) {}
    /// Called for node type selectors
    fn visit_type(&mut self, node_type: NodeType) {}
    /// Called for language selectors
    fn visit_language(&mut self, tag: &str) {}
    /// Called for voice selectors
    fn visit_voice(&mut self, annotation: &str) {}
    /// Called for compound selectors
    fn visit_compound(&mut self, parts: &[Selector]) {}
    /// Called for descendant combinators
    fn visit_combinator(&mut self, ancestor: &Selector, descendant: &Selector) {}
}

impl Selector {
    /// Dispatch to the visitor method matching this selector's variant
    pub fn accept(&self, visitor: &mut dyn SelectorVisitor) {
        match self {
            Selector::MatchAll => visitor.visit_match_all(),
            Selector::Id(name) => visitor.visit_id(name),
            Selector::Class(name) => visitor.visit_class(name),
            Selector::Type(node_type) => visitor.visit_type(*node_type),
            Selector::Language(tag) => visitor.visit_language(tag),
            Selector::Voice(annotation) => visitor.visit_voice(annotation),
            Selector::Compound(parts) => visitor.visit_compound(parts),
            Selector::Combinator {
                ancestor,
                descendant,
            } => visitor.visit_combinator(ancestor, descendant),
        }
    }
}
