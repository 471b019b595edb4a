use log::debug;

use crate::{
    cue::{CueNode, InternalNode, InternalNodeKind},
    entities,
    parsing::timestamp_value,
    timing::Moment,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Data,
    Tag,
    StartTag,
    StartTagClass,
    StartTagAnnotation,
    EndTag,
    TimestampTag,
}

#[derive(Debug)]
enum Token {
    Text(String),
    StartTag {
        name: String,
        classes: Vec<String>,
        annotation: Option<String>,
    },
    EndTag(String),
    Timestamp(String),
}

/// Tokenizer over the codepoints of a cue's text payload.
///
/// Character references are resolved while text and annotation runs are
/// collected, so tokens carry their final content.
struct CueTextTokenizer {
    input: Vec<char>,
    position: usize,
}

impl CueTextTokenizer {
    fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn next_token(&mut self) -> Option<Token> {
        if self.position >= self.input.len() {
            return None;
        }

        let mut state = State::Data;
        let mut buffer = String::new();
        let mut classes = Vec::new();
        let mut class_buffer = String::new();
        let mut annotation = String::new();

        loop {
            let current = self.input.get(self.position).copied();
            match state {
                State::Data => match current {
                    Some('&') => buffer.push_str(&self.consume_reference()),
                    Some('<') => {
                        if buffer.is_empty() {
                            self.position += 1;
                            state = State::Tag;
                        } else {
                            return Some(Token::Text(buffer));
                        }
                    }
                    Some(c) => {
                        self.position += 1;
                        buffer.push(c);
                    }
                    None => {
                        self.position += 1;
                        return Some(Token::Text(buffer));
                    }
                },
                State::Tag => match current {
                    Some('\t' | '\n' | '\u{c}' | ' ') => {
                        self.position += 1;
                        state = State::StartTagAnnotation;
                    }
                    Some('.') => {
                        self.position += 1;
                        state = State::StartTagClass;
                    }
                    Some('/') => {
                        self.position += 1;
                        state = State::EndTag;
                    }
                    Some(c @ '0'..='9') => {
                        self.position += 1;
                        buffer.push(c);
                        state = State::TimestampTag;
                    }
                    Some('>') | None => {
                        self.position += 1;
                        return Some(Token::StartTag {
                            name: buffer,
                            classes,
                            annotation: None,
                        });
                    }
                    Some(c) => {
                        self.position += 1;
                        buffer.push(c);
                        state = State::StartTag;
                    }
                },
                State::StartTag => match current {
                    Some('\t' | '\n' | '\u{c}' | ' ') => {
                        self.position += 1;
                        state = State::StartTagAnnotation;
                    }
                    Some('.') => {
                        self.position += 1;
                        state = State::StartTagClass;
                    }
                    Some('>') | None => {
                        self.position += 1;
                        return Some(Token::StartTag {
                            name: buffer,
                            classes,
                            annotation: None,
                        });
                    }
                    Some(c) => {
                        self.position += 1;
                        buffer.push(c);
                    }
                },
                State::StartTagClass => match current {
                    Some('\t' | '\n' | '\u{c}' | ' ') => {
                        push_class(&mut classes, &mut class_buffer);
                        self.position += 1;
                        state = State::StartTagAnnotation;
                    }
                    Some('.') => {
                        push_class(&mut classes, &mut class_buffer);
                        self.position += 1;
                    }
                    Some('>') | None => {
                        push_class(&mut classes, &mut class_buffer);
                        self.position += 1;
                        return Some(Token::StartTag {
                            name: buffer,
                            classes,
                            annotation: None,
                        });
                    }
                    Some(c) => {
                        self.position += 1;
                        class_buffer.push(c);
                    }
                },
                State::StartTagAnnotation => match current {
                    Some('&') => annotation.push_str(&self.consume_reference()),
                    Some('>') | None => {
                        self.position += 1;
                        let annotation = annotation.split_whitespace().collect::<Vec<_>>().join(" ");
                        return Some(Token::StartTag {
                            name: buffer,
                            classes,
                            annotation: Some(annotation),
                        });
                    }
                    Some(c) => {
                        self.position += 1;
                        annotation.push(c);
                    }
                },
                State::EndTag => match current {
                    Some('>') | None => {
                        self.position += 1;
                        return Some(Token::EndTag(buffer));
                    }
                    Some(c) => {
                        self.position += 1;
                        buffer.push(c);
                    }
                },
                State::TimestampTag => match current {
                    Some('>') | None => {
                        self.position += 1;
                        return Some(Token::Timestamp(buffer));
                    }
                    Some(c) => {
                        self.position += 1;
                        buffer.push(c);
                    }
                },
            }
        }
    }

    /// Consume a character reference starting at `&` and return its
    /// replacement. Unterminated references yield the ampersand alone and
    /// unknown named references stay literal.
    fn consume_reference(&mut self) -> String {
        let start = self.position;
        let mut lookahead = start + 1;

        let numeric = self.input.get(lookahead) == Some(&'#');
        if numeric {
            lookahead += 1;
        }
        let hex = numeric && matches!(self.input.get(lookahead), Some(&('x' | 'X')));
        if hex {
            lookahead += 1;
        }

        let mut name = String::new();
        while let Some(&c) = self.input.get(lookahead) {
            let valid = if hex {
                c.is_ascii_hexdigit()
            } else if numeric {
                c.is_ascii_digit()
            } else {
                c.is_ascii_alphanumeric()
            };
            if !valid {
                break;
            }
            name.push(c);
            lookahead += 1;
        }

        if name.is_empty() || self.input.get(lookahead) != Some(&';') {
            self.position += 1;
            return "&".to_owned();
        }

        let end = lookahead + 1;
        self.position = end;

        if numeric {
            let radix = if hex { 16 } else { 10 };
            let code = u32::from_str_radix(&name, radix).unwrap_or(u32::MAX);
            entities::numeric_reference(code).to_string()
        } else {
            entities::named_reference(&name)
                .map_or_else(|| self.input[start..end].iter().collect(), str::to_owned)
        }
    }
}

fn push_class(classes: &mut Vec<String>, class_buffer: &mut String) {
    if !class_buffer.is_empty() {
        classes.push(std::mem::take(class_buffer));
    }
}

/// Parse a cue's text payload into a node tree.
///
/// Timestamp tags that do not fall strictly between `start` and `end`, or
/// that are not strictly increasing, are dropped. `predefined_language` is
/// the language context applied where no `<lang>` span is in scope.
pub(super) fn parse_cue_text(
    input: &str,
    start: Moment,
    end: Moment,
    predefined_language: Option<&str>,
) -> Vec<CueNode> {
    let mut tokenizer = CueTextTokenizer::new(input);
    let mut root = Vec::new();
    let mut open_nodes: Vec<InternalNode> = Vec::new();
    let mut language_stack: Vec<String> = Vec::new();
    let mut last_timestamp = start;

    while let Some(token) = tokenizer.next_token() {
        match token {
            Token::Text(text) => {
                if !text.is_empty() {
                    attach(&mut open_nodes, &mut root, CueNode::Text(text));
                }
            }
            Token::StartTag {
                name,
                classes,
                annotation,
            } => {
                let language = language_stack
                    .last()
                    .cloned()
                    .or_else(|| predefined_language.map(str::to_owned));
                let kind = match name.as_str() {
                    "b" => InternalNodeKind::Bold,
                    "i" => InternalNodeKind::Italic,
                    "u" => InternalNodeKind::Underline,
                    "ruby" => InternalNodeKind::Ruby,
                    "rt" => {
                        // ruby text only nests directly inside ruby
                        let inside_ruby = matches!(
                            open_nodes.last().map(|node| &node.kind),
                            Some(InternalNodeKind::Ruby)
                        );
                        if !inside_ruby {
                            continue;
                        }
                        InternalNodeKind::RubyText
                    }
                    "c" => InternalNodeKind::Class,
                    "v" => InternalNodeKind::Voice {
                        annotation: annotation.unwrap_or_default(),
                    },
                    "lang" => {
                        let tag = annotation.unwrap_or_default();
                        language_stack.push(tag.clone());
                        InternalNodeKind::Language { tag }
                    }
                    _ => continue,
                };
                open_nodes.push(InternalNode {
                    kind,
                    classes,
                    language,
                    children: Vec::new(),
                });
            }
            Token::EndTag(name) => {
                if end_tag_matches(&name, &open_nodes) {
                    let closes_language = matches!(
                        open_nodes.last().map(|node| &node.kind),
                        Some(InternalNodeKind::Language { .. })
                    );
                    close_top(&mut open_nodes, &mut root);
                    if closes_language {
                        language_stack.pop();
                    }
                } else if name == "ruby"
                    && matches!(
                        open_nodes.last().map(|node| &node.kind),
                        Some(InternalNodeKind::RubyText)
                    )
                {
                    // an open rt is closed implicitly by </ruby>
                    close_top(&mut open_nodes, &mut root);
                    close_top(&mut open_nodes, &mut root);
                }
            }
            Token::Timestamp(value) => match timestamp_value(&value) {
                Some(moment) if moment > last_timestamp && moment < end => {
                    last_timestamp = moment;
                    attach(&mut open_nodes, &mut root, CueNode::Timestamp(moment));
                }
                _ => debug!("dropping out-of-range or out-of-order timestamp tag <{value}>"),
            },
        }
    }

    while !open_nodes.is_empty() {
        close_top(&mut open_nodes, &mut root);
    }

    root
}

fn end_tag_matches(name: &str, open_nodes: &[InternalNode]) -> bool {
    let Some(node) = open_nodes.last() else {
        return false;
    };
    matches!(
        (name, &node.kind),
        ("b", InternalNodeKind::Bold)
            | ("i", InternalNodeKind::Italic)
            | ("u", InternalNodeKind::Underline)
            | ("ruby", InternalNodeKind::Ruby)
            | ("rt", InternalNodeKind::RubyText)
            | ("c", InternalNodeKind::Class)
            | ("v", InternalNodeKind::Voice { .. })
            | ("lang", InternalNodeKind::Language { .. })
    )
}

fn attach(open_nodes: &mut [InternalNode], root: &mut Vec<CueNode>, node: CueNode) {
    match open_nodes.last_mut() {
        Some(parent) => parent.children.push(node),
        None => root.push(node),
    }
}

fn close_top(open_nodes: &mut Vec<InternalNode>, root: &mut Vec<CueNode>) {
    let Some(node) = open_nodes.pop() else {
        return;
    };
    attach(open_nodes, root, CueNode::Internal(node));
}
