// Copyright (c) Ada Kestrel. All rights reserved.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::node::NodeId;
use crate::parser::{Parser, ParserNode};
use crate::state::ParserState;

/// The fixpoint cell shared between the strong handle returned to the
/// caller and the weak self-reference handed to the builder closure.
///
/// Both sides carry the same [`NodeId`], so a recursive occurrence of
/// `self` inside the grammar and the outer handle to the very same rule
/// are, correctly, the same memoization key.
struct LazyCell {
    id: NodeId,
    resolved: RefCell<Option<Parser>>,
}

impl LazyCell {
    fn resolved(&self) -> Parser {
        self.resolved
            .borrow()
            .clone()
            .expect("lazy node evaluated before its builder returned")
    }
}

#[derive(Clone)]
struct LazyNode(Rc<LazyCell>);

impl std::fmt::Debug for LazyNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lazy({:?})", self.0.id)
    }
}

impl ParserNode for LazyNode {
    fn id(&self) -> NodeId {
        self.0.id
    }

    fn apply(&self, state: ParserState) -> ParserState {
        self.0.resolved().transform(state)
    }
}

/// A back-edge into a [`LazyCell`] that does not keep it alive, used only
/// as the `self` argument passed into the builder closure. Without this,
/// the cycle `LazyCell -> resolved parser -> self-reference -> LazyCell`
/// would be a reference-counted cycle that never deallocates.
#[derive(Clone)]
struct LazyRef {
    id: NodeId,
    inner: Weak<LazyCell>,
}

impl std::fmt::Debug for LazyRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LazyRef({:?})", self.id)
    }
}

impl ParserNode for LazyRef {
    fn id(&self) -> NodeId {
        self.id
    }

    fn apply(&self, state: ParserState) -> ParserState {
        let cell = self
            .inner
            .upgrade()
            .expect("lazy node dropped while its self-reference was still reachable");
        cell.resolved().transform(state)
    }
}

/// A fixpoint gate enabling cyclic (self-referential or mutually
/// recursive) grammars.
///
/// `build` is invoked eagerly, once, at `lazy()` construction time, and is
/// passed a handle standing in for the parser `lazy` itself is building;
/// the handle is fully usable for parsing (it shares the eventual node's
/// identity) even though the underlying grammar isn't resolved until
/// `build` returns. This realizes the same observable "defer until the
/// cycle is closed" semantics as a thunk evaluated on first use, without
/// needing the self-reference to exist before it is taken.
pub fn lazy(build: impl FnOnce(Parser) -> Parser) -> Parser {
    let id = NodeId::next();
    let cell = Rc::new(LazyCell {
        id,
        resolved: RefCell::new(None),
    });

    let self_ref = Parser::from_rc(Rc::new(LazyRef {
        id,
        inner: Rc::downgrade(&cell),
    }));

    let resolved = build(self_ref);
    *cell.resolved.borrow_mut() = Some(resolved);

    Parser::from_rc(Rc::new(LazyNode(cell)))
}
