// Copyright (c) Ada Kestrel. All rights reserved.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::node::NodeId;
use crate::parser::{Parser, ParserNode};
use crate::state::{ParserState, Status};
use crate::value::Value;

#[derive(Debug)]
struct Optional {
    id: NodeId,
    child: Parser,
}

impl ParserNode for Optional {
    fn id(&self) -> NodeId {
        self.id
    }

    fn apply(&self, state: ParserState) -> ParserState {
        let entry = state.clone();
        let out = self.child.transform(state);

        if out.is_pending_eoi() {
            return out;
        }

        if out.status == Status::Error {
            return ParserState {
                status: Status::Complete,
                result: Value::Null,
                error: None,
                ..entry
            };
        }

        out
    }
}

/// Tries `child`; on any genuine failure, succeeds with `null` at the entry
/// offset instead of propagating the error. A raw `Partial` success is
/// passed through unchanged, since it is a success, not a failure.
pub fn optional(child: Parser) -> Parser {
    Parser::new(Optional {
        id: NodeId::next(),
        child,
    })
}
