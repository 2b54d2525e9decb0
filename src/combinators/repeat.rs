// Copyright (c) Ada Kestrel. All rights reserved.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::ParseError;
use crate::node::NodeId;
use crate::parser::{Parser, ParserNode};
use crate::state::{ParserState, Status};
use crate::value::Value;

#[derive(Debug)]
struct Repeat {
    id: NodeId,
    child: Parser,
    require_one: bool,
}

impl ParserNode for Repeat {
    fn id(&self) -> NodeId {
        self.id
    }

    fn apply(&self, state: ParserState) -> ParserState {
        let entry = state.clone();
        let mut cur = state;
        let mut results: Vec<Value> = Vec::new();

        loop {
            let before = cur.clone();
            let out = self.child.transform(cur);

            if out.is_awaiting_more() {
                return ParserState {
                    index: before.index,
                    status: Status::Partial,
                    result: Value::List(results),
                    error: None,
                    ..before
                };
            }

            if out.status == Status::Error {
                if self.require_one && results.is_empty() {
                    return ParserState {
                        status: Status::Error,
                        result: Value::Null,
                        error: Some(ParseError::empty_repetition(
                            "one-or-more repetition matched zero times",
                        )),
                        ..entry
                    };
                }
                cur = before;
                break;
            }

            // Zero-width loop guard: a success that did not advance the
            // offset would otherwise repeat identically forever.
            let advanced = out.index != before.index;
            results.push(out.result.clone());
            cur = out;
            if !advanced {
                break;
            }
        }

        ParserState {
            status: Status::Complete,
            result: Value::List(results),
            error: None,
            ..cur
        }
    }
}

/// Greedily collects zero or more successes of `child`.
pub fn zero_or_more(child: Parser) -> Parser {
    Parser::new(Repeat {
        id: NodeId::next(),
        child,
        require_one: false,
    })
}

/// Greedily collects one or more successes of `child`; zero matches is
/// `ErrorKind::EmptyRepetition`.
pub fn one_or_more(child: Parser) -> Parser {
    Parser::new(Repeat {
        id: NodeId::next(),
        child,
        require_one: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::optional::optional;
    use crate::error::ErrorKind;
    use crate::primitives::literal;
    use crate::state::{CacheMap, InputSnapshot};
    use std::rc::Rc;

    fn whole(s: &str) -> ParserState {
        let value: Rc<[char]> = s.chars().collect::<Vec<_>>().into();
        ParserState::initial(InputSnapshot::new(value, true), CacheMap::new())
    }

    #[test]
    fn zero_or_more_scenario_s5() {
        let out = zero_or_more(literal("Ha")).transform(whole("HaHaHa!"));
        assert_eq!(out.status, Status::Complete);
        assert_eq!(out.index, 6);
        let list = out.result.as_list().unwrap();
        assert_eq!(list.len(), 3);
        for item in list {
            assert_eq!(item.as_text(), Some("Ha"));
        }
    }

    #[test]
    fn zero_or_more_on_empty_input() {
        let out = zero_or_more(literal("Ha")).transform(whole(""));
        assert_eq!(out.status, Status::Complete);
        assert_eq!(out.index, 0);
        assert!(out.result.as_list().unwrap().is_empty());
        assert!(out.error.is_none());
    }

    #[test]
    fn one_or_more_requires_at_least_one() {
        let out = one_or_more(literal("Ha")).transform(whole("Nope"));
        assert_eq!(out.status, Status::Error);
        assert_eq!(out.error.unwrap().kind, ErrorKind::EmptyRepetition);
    }

    #[test]
    fn one_or_more_collects_matches() {
        let out = one_or_more(literal("Ha")).transform(whole("HaHa!"));
        assert_eq!(out.status, Status::Complete);
        assert_eq!(out.result.as_list().unwrap().len(), 2);
    }

    #[test]
    fn zero_width_loop_guard_terminates() {
        // `optional` never fails, so a naive loop would spin forever.
        let out = zero_or_more(optional(literal("x"))).transform(whole(""));
        assert_eq!(out.status, Status::Complete);
        assert_eq!(out.index, 0);
        assert_eq!(out.result.as_list().unwrap().len(), 1);
    }
}
