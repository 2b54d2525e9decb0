// Copyright (c) Ada Kestrel. All rights reserved.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The four leaf recognizers: `literal`, `any_char`, `char_from`, and
//! `end_of_input`. Each inspects the input at the current offset and
//! produces a new state without recursing into any child parser.

use std::rc::Rc;

use crate::error::ParseError;
use crate::node::NodeId;
use crate::parser::{Parser, ParserNode};
use crate::state::{ParserState, Status};
use crate::value::Value;

/// One element of a [`char_from`] set: a single character or an inclusive
/// range of characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetItem {
    Single(char),
    Range(char, char),
}

impl SetItem {
    /// Normalizes an out-of-order range (e.g. `('9', '0')`) by swapping its
    /// endpoints, the way the source tolerates unordered pairs.
    pub fn range(a: char, b: char) -> Self {
        if a <= b {
            SetItem::Range(a, b)
        } else {
            SetItem::Range(b, a)
        }
    }

    fn contains(&self, c: char) -> bool {
        match *self {
            SetItem::Single(s) => s == c,
            SetItem::Range(lo, hi) => lo <= c && c <= hi,
        }
    }
}

#[derive(Debug)]
struct Literal {
    id: NodeId,
    text: Rc<[char]>,
}

impl ParserNode for Literal {
    fn id(&self) -> NodeId {
        self.id
    }

    fn apply(&self, state: ParserState) -> ParserState {
        let remaining = state.remaining();
        let text = &self.text[..];

        if remaining.is_empty() {
            return error_at(state, ParseError::unexpected_eoi("expected more input for literal"));
        }

        if remaining.len() < text.len() {
            if !state.input.done && text.starts_with(remaining) {
                let matched: Rc<str> = remaining.iter().collect::<String>().into();
                let index = state.index + remaining.len();
                return ParserState {
                    index,
                    status: Status::Partial,
                    result: Value::Text(matched),
                    error: None,
                    ..state
                };
            }
            return error_at(state, ParseError::mismatch("literal did not match"));
        }

        if &remaining[..text.len()] == text {
            let index = state.index + text.len();
            ParserState {
                index,
                status: Status::Complete,
                result: Value::Text(self.text.iter().collect::<String>().into()),
                error: None,
                ..state
            }
        } else {
            error_at(state, ParseError::mismatch("literal did not match"))
        }
    }
}

/// Matches the exact character sequence `text` starting at the current
/// offset.
pub fn literal(text: &str) -> Parser {
    Parser::new(Literal {
        id: NodeId::next(),
        text: text.chars().collect::<Vec<_>>().into(),
    })
}

#[derive(Debug)]
struct AnyChar {
    id: NodeId,
}

impl ParserNode for AnyChar {
    fn id(&self) -> NodeId {
        self.id
    }

    fn apply(&self, state: ParserState) -> ParserState {
        match state.input.value.get(state.index) {
            None => error_at(state, ParseError::unexpected_eoi("expected any character")),
            Some(&c) => ParserState {
                index: state.index + 1,
                status: Status::Complete,
                result: Value::Char(c),
                error: None,
                ..state
            },
        }
    }
}

/// Consumes exactly one character, whatever it is.
pub fn any_char() -> Parser {
    Parser::new(AnyChar { id: NodeId::next() })
}

#[derive(Debug)]
struct CharFrom {
    id: NodeId,
    set: Vec<SetItem>,
}

impl ParserNode for CharFrom {
    fn id(&self) -> NodeId {
        self.id
    }

    fn apply(&self, state: ParserState) -> ParserState {
        match state.input.value.get(state.index) {
            None => error_at(state, ParseError::unexpected_eoi("expected a character from set")),
            Some(&c) if self.set.iter().any(|item| item.contains(c)) => ParserState {
                index: state.index + 1,
                status: Status::Complete,
                result: Value::Char(c),
                error: None,
                ..state
            },
            Some(_) => error_at(state, ParseError::mismatch("character not in set")),
        }
    }
}

/// Matches a single character belonging to `set` (singles and inclusive
/// ranges).
pub fn char_from(set: Vec<SetItem>) -> Parser {
    Parser::new(CharFrom {
        id: NodeId::next(),
        set,
    })
}

#[derive(Debug)]
struct EndOfInput {
    id: NodeId,
}

impl ParserNode for EndOfInput {
    fn id(&self) -> NodeId {
        self.id
    }

    fn apply(&self, state: ParserState) -> ParserState {
        if state.index < state.input.len() {
            return error_at(state, ParseError::mismatch("expected end of input"));
        }
        if !state.input.done {
            return error_at(state, ParseError::unexpected_eoi("expected end of input"));
        }
        ParserState {
            status: Status::Complete,
            result: Value::Null,
            error: None,
            ..state
        }
    }
}

/// Succeeds only at the true end of the whole input.
pub fn end_of_input() -> Parser {
    Parser::new(EndOfInput { id: NodeId::next() })
}

fn error_at(state: ParserState, error: ParseError) -> ParserState {
    ParserState {
        status: Status::Error,
        result: Value::Null,
        error: Some(error),
        ..state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::state::CacheMap;
    use std::rc::Rc;

    fn whole(s: &str) -> ParserState {
        let value: Rc<[char]> = s.chars().collect::<Vec<_>>().into();
        ParserState::initial(crate::state::InputSnapshot::new(value, true), CacheMap::new())
    }

    fn streaming(s: &str) -> ParserState {
        let value: Rc<[char]> = s.chars().collect::<Vec<_>>().into();
        ParserState::initial(crate::state::InputSnapshot::new(value, false), CacheMap::new())
    }

    #[test]
    fn literal_matches_exactly() {
        let out = literal("Hello, world!").transform(whole("Hello, world!"));
        assert_eq!(out.status, Status::Complete);
        assert_eq!(out.index, 13);
        assert_eq!(out.result.as_text(), Some("Hello, world!"));
    }

    #[test]
    fn literal_mismatches() {
        let out = literal("Hello, world!").transform(whole("Hi, world!"));
        assert_eq!(out.status, Status::Error);
        assert_eq!(out.index, 0);
        assert_eq!(out.error.unwrap().kind, ErrorKind::Mismatch);
    }

    #[test]
    fn literal_partial_on_proper_prefix() {
        let out = literal("Hello").transform(streaming("Hel"));
        assert_eq!(out.status, Status::Partial);
        assert_eq!(out.index, 3);
        assert_eq!(out.result.as_text(), Some("Hel"));
    }

    #[test]
    fn literal_eoi_on_empty_tail() {
        let out = literal("Hello").transform(streaming(""));
        assert_eq!(out.status, Status::Error);
        assert_eq!(out.error.unwrap().kind, ErrorKind::UnexpectedEndOfInput);
        assert!(out.is_pending_eoi());
    }

    #[test]
    fn any_char_consumes_one() {
        let out = any_char().transform(whole("x"));
        assert_eq!(out.status, Status::Complete);
        assert_eq!(out.result.as_char(), Some('x'));
        assert_eq!(out.index, 1);
    }

    #[test]
    fn char_from_set_and_range() {
        let set = vec![SetItem::Single('_'), SetItem::range('0', '9')];
        let digit = char_from(set.clone()).transform(whole("7"));
        assert_eq!(digit.status, Status::Complete);
        let under = char_from(set.clone()).transform(whole("_"));
        assert_eq!(under.status, Status::Complete);
        let other = char_from(set).transform(whole("x"));
        assert_eq!(other.status, Status::Error);
    }

    #[test]
    fn char_from_normalizes_reversed_range() {
        let set = vec![SetItem::range('9', '0')];
        let out = char_from(set).transform(whole("3"));
        assert_eq!(out.status, Status::Complete);
    }

    #[test]
    fn end_of_input_on_empty() {
        let out = end_of_input().transform(whole(""));
        assert_eq!(out.status, Status::Complete);
    }

    #[test]
    fn end_of_input_mismatch_on_leftover() {
        let out = end_of_input().transform(whole("x"));
        assert_eq!(out.status, Status::Error);
        assert_eq!(out.error.unwrap().kind, ErrorKind::Mismatch);
    }

    #[test]
    fn end_of_input_pending_while_streaming() {
        let out = end_of_input().transform(streaming(""));
        assert!(out.is_pending_eoi());
    }
}
