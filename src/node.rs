// Copyright (c) Ada Kestrel. All rights reserved.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::cell::Cell;

thread_local! {
    static NEXT_ID: Cell<u64> = Cell::new(0);
}

/// A monotonically assigned identity for a parser node, used as the outer
/// key of the memo table.
///
/// Two structurally identical combinator trees are never identified with
/// each other; every call to [`NodeId::next`] hands out a fresh id, the way
/// a node's address would under an arena allocator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    pub fn next() -> Self {
        NEXT_ID.with(|cell| {
            let id = cell.get();
            cell.set(id + 1);
            NodeId(id)
        })
    }
}
