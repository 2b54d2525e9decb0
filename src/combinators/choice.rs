// Copyright (c) Ada Kestrel. All rights reserved.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::node::NodeId;
use crate::parser::{Parser, ParserNode};
use crate::state::{ParserState, Status};

#[derive(Debug)]
struct OneOf {
    id: NodeId,
    children: Vec<Parser>,
}

impl ParserNode for OneOf {
    fn id(&self) -> NodeId {
        self.id
    }

    fn apply(&self, state: ParserState) -> ParserState {
        let mut first_error: Option<ParserState> = None;

        for child in &self.children {
            let out = child.transform(state.clone());

            if out.is_pending_eoi() {
                return out;
            }

            if out.status == Status::Error {
                if first_error.is_none() {
                    first_error = Some(out);
                }
                continue;
            }

            return out;
        }

        first_error.expect("oneOf requires at least one child")
    }
}

/// Ordered (PEG) choice: tries each child in order and commits to the first
/// success. An EOI-pending child short-circuits immediately, since the
/// choice between alternatives cannot yet be made.
pub fn one_of(children: Vec<Parser>) -> Parser {
    assert!(!children.is_empty(), "oneOf requires at least one child");
    Parser::new(OneOf {
        id: NodeId::next(),
        children,
    })
}
