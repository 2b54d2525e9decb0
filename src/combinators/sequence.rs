// Copyright (c) Ada Kestrel. All rights reserved.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::node::NodeId;
use crate::parser::{Parser, ParserNode};
use crate::state::{ParserState, Status};
use crate::value::Value;

#[derive(Debug)]
struct SequenceOf {
    id: NodeId,
    children: Vec<Parser>,
}

impl ParserNode for SequenceOf {
    fn id(&self) -> NodeId {
        self.id
    }

    fn apply(&self, state: ParserState) -> ParserState {
        let mut cur = state;
        let mut results: Vec<Value> = Vec::with_capacity(self.children.len());

        for child in &self.children {
            let before = cur.clone();
            let out = child.transform(cur);

            if out.is_awaiting_more() {
                let mut partial = results;
                partial.resize(self.children.len(), Value::Null);
                return ParserState {
                    index: before.index,
                    status: Status::Partial,
                    result: Value::List(partial),
                    error: None,
                    ..before
                };
            }

            if out.status == Status::Error {
                return out;
            }

            results.push(out.result.clone());
            cur = out;
        }

        ParserState {
            result: Value::List(results),
            ..cur
        }
    }
}

/// Applies children left-to-right, threading state, and collects their
/// results into a single list. A child that is still deciding (an
/// EOI-pending error or a genuine `Partial`) pauses the whole sequence at
/// the offset reached just before that child ran.
pub fn sequence_of(children: Vec<Parser>) -> Parser {
    Parser::new(SequenceOf {
        id: NodeId::next(),
        children,
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
    fn sequence_collects_results() {
        let p = sequence_of(vec![literal("Hello"), literal(", world!")]);
        let out = p.transform(whole("Hello, world!"));
        assert_eq!(out.status, Status::Complete);
        let list = out.result.as_list().unwrap();
        assert_eq!(list[0].as_text(), Some("Hello"));
        assert_eq!(list[1].as_text(), Some(", world!"));
    }

    #[test]
    fn sequence_propagates_genuine_mismatch() {
        let p = sequence_of(vec![literal("Hello"), literal("!!")]);
        let out = p.transform(whole("Hello, world!"));
        assert_eq!(out.status, Status::Error);
    }

    #[test]
    fn sequence_streaming_scenario_s3() {
        let p = sequence_of(vec![
            literal("Hello"),
            literal(", "),
            literal("world"),
            literal("!"),
        ]);
        let emitted = crate::driver::parse_iterable(
            &p,
            ["", "Hello", "", ", ", "", "world!"],
        );
        // The first observable progress is the partial match of "Hello"
        // alone, per the source's scenario table.
        let first = &emitted[0];
        assert_eq!(first.status, Status::Partial);
        assert_eq!(first.index, 5);
        let partial = first.result.as_list().unwrap();
        assert_eq!(partial[0].as_text(), Some("Hello"));
        assert_eq!(partial[1], Value::Null);

        // Index is monotone non-decreasing and exactly one terminal state
        // appears, at the end (invariant 4).
        let mut prev_index = 0;
        for (i, state) in emitted.iter().enumerate() {
            assert!(state.index >= prev_index);
            prev_index = state.index;
            if i + 1 < emitted.len() {
                assert_ne!(state.status, Status::Complete);
                assert_ne!(state.status, Status::Error);
            }
        }

        let last = emitted.last().unwrap();
        assert_eq!(last.status, Status::Complete);
        assert_eq!(last.index, 13);
        let list = last.result.as_list().unwrap();
        assert_eq!(list[0].as_text(), Some("Hello"));
        assert_eq!(list[1].as_text(), Some(", "));
        assert_eq!(list[2].as_text(), Some("world"));
        assert_eq!(list[3].as_text(), Some("!"));
    }
}
