// Copyright (c) Ada Kestrel. All rights reserved.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::ParseError;
use crate::node::NodeId;
use crate::parser::{Parser, ParserNode};
use crate::state::{ParserState, Status};
use crate::value::Value;

#[derive(Debug)]
struct FollowedBy {
    id: NodeId,
    child: Parser,
}

impl ParserNode for FollowedBy {
    fn id(&self) -> NodeId {
        self.id
    }

    fn apply(&self, state: ParserState) -> ParserState {
        let entry = state.clone();
        let out = self.child.transform(state);

        if out.status == Status::Error {
            return ParserState {
                status: Status::Error,
                result: Value::Null,
                error: out.error,
                ..entry
            };
        }

        ParserState {
            status: out.status,
            result: out.result,
            error: None,
            ..entry
        }
    }
}

/// Positive lookahead: succeeds iff `child` would succeed, but never
/// consumes input.
pub fn followed_by(child: Parser) -> Parser {
    Parser::new(FollowedBy {
        id: NodeId::next(),
        child,
    })
}

#[derive(Debug)]
struct NotFollowedBy {
    id: NodeId,
    child: Parser,
}

impl ParserNode for NotFollowedBy {
    fn id(&self) -> NodeId {
        self.id
    }

    fn apply(&self, state: ParserState) -> ParserState {
        let entry = state.clone();
        let out = self.child.transform(state);

        match out.status {
            Status::Complete => ParserState {
                status: Status::Error,
                result: Value::Null,
                error: Some(ParseError::negative_lookahead(
                    "forbidden parser matched",
                )),
                ..entry
            },
            Status::Partial => ParserState {
                status: Status::Error,
                result: Value::Null,
                error: Some(ParseError::unexpected_eoi(
                    "cannot decide negative lookahead yet",
                )),
                ..entry
            },
            Status::Error if out.is_pending_eoi() => ParserState {
                status: Status::Error,
                result: Value::Null,
                error: Some(ParseError::unexpected_eoi(
                    "cannot decide negative lookahead yet",
                )),
                ..entry
            },
            Status::Error => ParserState {
                status: Status::Complete,
                result: Value::Null,
                error: None,
                ..entry
            },
        }
    }
}

/// Negative lookahead: succeeds with `null` iff `child` would genuinely
/// fail; never consumes input.
pub fn not_followed_by(child: Parser) -> Parser {
    Parser::new(NotFollowedBy {
        id: NodeId::next(),
        child,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::literal;
    use crate::state::{CacheMap, InputSnapshot};
    use std::rc::Rc;

    fn whole(s: &str) -> ParserState {
        let value: Rc<[char]> = s.chars().collect::<Vec<_>>().into();
        ParserState::initial(InputSnapshot::new(value, true), CacheMap::new())
    }

    #[test]
    fn followed_by_does_not_consume() {
        let out = followed_by(literal("Hi")).transform(whole("Hi there"));
        assert_eq!(out.status, Status::Complete);
        assert_eq!(out.index, 0);
        assert_eq!(out.result.as_text(), Some("Hi"));
    }

    #[test]
    fn followed_by_propagates_error_at_entry() {
        let out = followed_by(literal("Hi")).transform(whole("Nope"));
        assert_eq!(out.status, Status::Error);
        assert_eq!(out.index, 0);
    }

    #[test]
    fn not_followed_by_succeeds_when_child_fails() {
        let out = not_followed_by(literal("Hi")).transform(whole("Nope"));
        assert_eq!(out.status, Status::Complete);
        assert_eq!(out.index, 0);
        assert_eq!(out.result, Value::Null);
    }

    #[test]
    fn not_followed_by_fails_when_child_succeeds() {
        let out = not_followed_by(literal("Hi")).transform(whole("Hi there"));
        assert_eq!(out.status, Status::Error);
        assert_eq!(
            out.error.unwrap().kind,
            crate::error::ErrorKind::NegativeLookaheadViolation
        );
        assert_eq!(out.index, 0);
    }
}
