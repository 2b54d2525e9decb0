// Copyright (c) Ada Kestrel. All rights reserved.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::node::NodeId;
use crate::state::{ParserState, Status};

/// The uniform shape every recognizer and combinator implements: an
/// identity for memoization, and the raw transform function, unmemoized.
///
/// [`Parser::transform`] is the memoized wrapper callers actually invoke;
/// `apply` is only ever called by that wrapper on a cache miss.
pub trait ParserNode: fmt::Debug {
    fn id(&self) -> NodeId;
    fn apply(&self, state: ParserState) -> ParserState;
}

/// A handle to a parser node, cheap to clone and share across a grammar
/// (structurally, the same role chumsky's boxed `Parser` trait objects or
/// combine's `Parser` impls play, but packrat needs the nodes to be
/// reference-counted so `lazy` can close a cycle over one of them).
#[derive(Clone)]
pub struct Parser(pub(crate) Rc<dyn ParserNode>);

impl Parser {
    pub fn new(node: impl ParserNode + 'static) -> Self {
        Parser(Rc::new(node))
    }

    pub(crate) fn from_rc(node: Rc<dyn ParserNode>) -> Self {
        Parser(node)
    }

    pub fn id(&self) -> NodeId {
        self.0.id()
    }

    /// Applies this parser to `state`, consulting and updating the shared
    /// memo table.
    ///
    /// Errors short-circuit unconditionally: a parser is never asked to
    /// reinterpret a state that already failed upstream.
    pub fn transform(&self, state: ParserState) -> ParserState {
        if state.status == Status::Error {
            return state;
        }

        let key = (self.0.id(), state.index);
        if let Some(cached) = state.cache.get(key) {
            if is_reusable(&cached, &state) {
                trace!(node = ?key.0, offset = key.1, "memo hit");
                return cached.with_input_and_cache(state.input, state.cache);
            }
        }

        if !state.cache.enter(key) {
            trace!(node = ?key.0, offset = key.1, "recursive re-entry, aborting");
            return ParserState {
                status: Status::Error,
                result: crate::value::Value::Null,
                error: Some(crate::error::ParseError::recursion_limit(
                    "a parser rule recursed into itself at the same offset before returning",
                )),
                ..state
            };
        }

        trace!(node = ?key.0, offset = key.1, "memo miss");
        let produced = self.0.apply(state);
        produced.cache.exit(key);
        produced.cache.insert(key, produced.clone());
        produced
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Implements the cache-reusability rule of SPEC_FULL.md §4.1: a `Complete`
/// entry is always reusable, a `Partial` entry only if the live snapshot is
/// bit-for-bit the one that produced it, and an `Error` entry unless it is
/// an EOI-over-non-final-input control signal (which the next, longer
/// snapshot may resolve differently).
fn is_reusable(cached: &ParserState, current: &ParserState) -> bool {
    match cached.status {
        Status::Complete => true,
        Status::Partial => {
            cached.input.value == current.input.value && cached.input.done == current.input.done
        }
        Status::Error => !cached.is_pending_eoi(),
    }
}
