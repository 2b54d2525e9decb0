// Copyright (c) Ada Kestrel. All rights reserved.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

mod choice;
mod lazy;
mod lookahead;
mod optional;
mod repeat;
mod sequence;

pub use choice::one_of;
pub use lazy::lazy;
pub use lookahead::{followed_by, not_followed_by};
pub use optional::optional;
pub use repeat::{one_or_more, zero_or_more};
pub use sequence::sequence_of;
