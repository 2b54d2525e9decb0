// Copyright (c) Ada Kestrel. All rights reserved.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use crate::error::{ErrorKind, ParseError};
use crate::node::NodeId;
use crate::value::Value;

/// A prefix of the input seen so far, plus whether more will ever arrive.
///
/// `done = true` from the outset in whole-string mode; in streaming mode it
/// flips to `true` only on the final, post-exhaustion transform.
#[derive(Clone, Debug, PartialEq)]
pub struct InputSnapshot {
    pub value: Rc<[char]>,
    pub done: bool,
}

impl InputSnapshot {
    pub fn new(value: Rc<[char]>, done: bool) -> Self {
        InputSnapshot { value, done }
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// The three-valued verdict of a transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Complete,
    Partial,
    Error,
}

/// The shared packrat store: `(parser identity, offset) -> cached state`.
///
/// Entries are added, never removed, over the lifetime of a parse, and the
/// map is shared by reference across every nested transform of that parse.
/// It also tracks which `(node, offset)` pairs are currently being computed
/// higher up the call stack, which is how a left-recursive grammar is
/// turned into an `ErrorKind::RecursionLimitExceeded` diagnostic instead of
/// an unbounded recursion (SPEC_FULL.md §9).
#[derive(Clone)]
pub struct CacheMap {
    memo: Rc<RefCell<HashMap<(NodeId, usize), ParserState>>>,
    in_progress: Rc<RefCell<HashSet<(NodeId, usize)>>>,
}

/// A hand-written, shallow `Debug`: every cached [`ParserState`] holds this
/// very map in its own `cache` field, so a derived, recursing impl would
/// walk the whole table once per entry and never terminate.
impl fmt::Debug for CacheMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheMap")
            .field("entries", &self.memo.borrow().len())
            .field("in_progress", &self.in_progress.borrow().len())
            .finish()
    }
}

impl CacheMap {
    pub fn new() -> Self {
        CacheMap {
            memo: Rc::new(RefCell::new(HashMap::new())),
            in_progress: Rc::new(RefCell::new(HashSet::new())),
        }
    }

    pub fn get(&self, key: (NodeId, usize)) -> Option<ParserState> {
        self.memo.borrow().get(&key).cloned()
    }

    pub fn insert(&self, key: (NodeId, usize), state: ParserState) {
        self.memo.borrow_mut().insert(key, state);
    }

    pub fn len(&self) -> usize {
        self.memo.borrow().len()
    }

    /// Marks `key` as currently being computed. Returns `false` (and marks
    /// nothing) if it already was, which signals a recursive re-entry at
    /// the same node and offset before the first call returned.
    pub fn enter(&self, key: (NodeId, usize)) -> bool {
        self.in_progress.borrow_mut().insert(key)
    }

    pub fn exit(&self, key: (NodeId, usize)) {
        self.in_progress.borrow_mut().remove(&key);
    }
}

impl Default for CacheMap {
    fn default() -> Self {
        CacheMap::new()
    }
}

/// The value threaded through every transform.
///
/// Cloning a `ParserState` is cheap for the shared fields (`input.value` and
/// `cache` are both reference-counted); only `result` can be proportional to
/// the grammar's output size, which mirrors the source's "new record per
/// transform" model without needing a persistent-data-structure library.
#[derive(Clone, Debug)]
pub struct ParserState {
    pub input: InputSnapshot,
    pub index: usize,
    pub status: Status,
    pub result: Value,
    pub error: Option<ParseError>,
    pub cache: CacheMap,
}

impl ParserState {
    /// The neutral starting state for a fresh transform: not yet an error,
    /// so it will not short-circuit, and carrying no result yet.
    pub fn initial(input: InputSnapshot, cache: CacheMap) -> Self {
        ParserState {
            input,
            index: 0,
            status: Status::Complete,
            result: Value::Null,
            error: None,
            cache,
        }
    }

    pub fn remaining(&self) -> &[char] {
        &self.input.value[self.index.min(self.input.value.len())..]
    }

    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }

    /// A state is an EOI-over-non-final-input control signal, as opposed to
    /// a genuine terminal error, iff it errored with `UnexpectedEndOfInput`
    /// against a snapshot that has not yet seen its final chunk.
    pub fn is_pending_eoi(&self) -> bool {
        self.status == Status::Error
            && !self.input.done
            && self
                .error
                .as_ref()
                .is_some_and(|e| e.kind == ErrorKind::UnexpectedEndOfInput)
    }

    /// Either shape of "the decision is not yet made": an EOI-pending error,
    /// or a genuine `Partial` success. Sequence and repetition combinators
    /// pause on either uniformly; see SPEC_FULL.md §4.3.
    pub fn is_awaiting_more(&self) -> bool {
        self.status == Status::Partial || self.is_pending_eoi()
    }

    pub fn with_input_and_cache(mut self, input: InputSnapshot, cache: CacheMap) -> Self {
        self.input = input;
        self.cache = cache;
        self
    }
}
