use log::debug;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{map, map_opt, opt},
    multi::{many0, many1, separated_list1},
    sequence::{delimited, pair, preceded, separated_pair, terminated},
    IResult, Parser,
};

use crate::style::{NodeType, Selector, WebVttStyleSheet};

/// Parser for STYLE blocks.
///
/// Parses the CSS-like rules WebVTT allows — `::cue` and `::cue(...)`
/// selectors with verbatim declarations — and accumulates every rule seen in
/// the stream. Malformed rules are skipped without giving up on the block.
pub struct StyleSheetParser {
    rules: Vec<WebVttStyleSheet>,
}

impl StyleSheetParser {
    /// Create a parser with an empty rule list
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Parse one STYLE block and return the rules it contributed, in order.
    /// A selector list produces one rule per selector.
    pub fn parse_block(&mut self, block: &str) -> Vec<WebVttStyleSheet> {
        let mut fresh = Vec::new();
        let mut rest = block;

        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                break;
            }
            match rule(rest) {
                Ok((remaining, mut rules)) => {
                    fresh.append(&mut rules);
                    rest = remaining;
                }
                Err(_) => {
                    debug!("skipping malformed style rule");
                    match rest.find('}') {
                        Some(index) => rest = &rest[index + 1..],
                        None => break,
                    }
                }
            }
        }

        self.rules.extend(fresh.iter().cloned());
        fresh
    }

    /// Every rule accumulated so far, in document order
    #[must_use]
    pub fn style_sheets(&self) -> &[WebVttStyleSheet] {
        &self.rules
    }
}

impl Default for StyleSheetParser {
    fn default() -> Self {
        Self::new()
    }
}

fn rule(input: &str) -> IResult<&str, Vec<WebVttStyleSheet>> {
    map(
        pair(
            separated_list1(delimited(multispace0, char(','), multispace0), cue_selector),
            declaration_block,
        ),
        |(selectors, declarations)| {
            selectors
                .into_iter()
                .map(|selector| WebVttStyleSheet {
                    selector,
                    declarations: declarations.clone(),
                })
                .collect()
        },
    )
    .parse(input)
}

fn cue_selector(input: &str) -> IResult<&str, Selector> {
    map(
        preceded(
            tag("::cue"),
            opt(delimited(
                char('('),
                delimited(multispace0, inner_selector, multispace0),
                char(')'),
            )),
        ),
        |inner| inner.unwrap_or(Selector::MatchAll),
    )
    .parse(input)
}

/// Whitespace between compound selectors is the descendant combinator
fn inner_selector(input: &str) -> IResult<&str, Selector> {
    map_opt(
        separated_list1(multispace1, compound_selector),
        |parts| {
            let mut parts = parts.into_iter();
            let first = parts.next()?;
            Some(parts.fold(first, |ancestor, descendant| Selector::Combinator {
                ancestor: Box::new(ancestor),
                descendant: Box::new(descendant),
            }))
        },
    )
    .parse(input)
}

fn compound_selector(input: &str) -> IResult<&str, Selector> {
    map_opt(many1(simple_selector), |mut parts| {
        if parts.len() == 1 {
            parts.pop()
        } else {
            Some(Selector::Compound(parts))
        }
    })
    .parse(input)
}

fn simple_selector(input: &str) -> IResult<&str, Selector> {
    alt((
        map(preceded(char('#'), ident), |name: &str| {
            Selector::Id(name.to_owned())
        }),
        map(preceded(char('.'), ident), |name: &str| {
            Selector::Class(name.to_owned())
        }),
        attribute_selector,
        type_selector,
    ))
    .parse(input)
}

fn type_selector(input: &str) -> IResult<&str, Selector> {
    map_opt(ident, |name| {
        let node_type = match name {
            "b" => NodeType::Bold,
            "i" => NodeType::Italic,
            "u" => NodeType::Underline,
            "ruby" => NodeType::Ruby,
            "rt" => NodeType::RubyText,
            "v" => NodeType::Voice,
            "c" => NodeType::Class,
            "lang" => NodeType::Language,
            _ => return None,
        };
        Some(Selector::Type(node_type))
    })
    .parse(input)
}

fn attribute_selector(input: &str) -> IResult<&str, Selector> {
    map_opt(
        delimited(
            char('['),
            separated_pair(ident, char('='), quoted_string),
            char(']'),
        ),
        |(name, value)| match name {
            "voice" => Some(Selector::Voice(value.to_owned())),
            "lang" => Some(Selector::Language(value.to_owned())),
            _ => None,
        },
    )
    .parse(input)
}

fn ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_').parse(input)
}

fn quoted_string(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_while(|c: char| c != '"'), char('"')).parse(input)
}

fn declaration_block(input: &str) -> IResult<&str, Vec<(String, String)>> {
    delimited(
        preceded(multispace0, char('{')),
        many0(declaration),
        preceded(multispace0, char('}')),
    )
    .parse(input)
}

fn declaration(input: &str) -> IResult<&str, (String, String)> {
    map(
        pair(
            delimited(multispace0, property, preceded(multispace0, char(':'))),
            terminated(
                take_while1(|c: char| c != ';' && c != '}' && c != '\n'),
                opt(char(';')),
            ),
        ),
        |(name, value): (&str, &str)| (name.to_owned(), value.trim().to_owned()),
    )
    .parse(input)
}

fn property(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-').parse(input)
}
