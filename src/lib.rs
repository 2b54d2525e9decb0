// Copyright (c) Ada Kestrel. All rights reserved.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A streaming parser-combinator library built on packrat memoization.
//!
//! A grammar is assembled out of small [`Parser`] values, primitives like
//! [`literal`] and [`char_from`], composed with combinators like
//! [`sequence_of`] and [`one_of`], and then run either all at once with
//! [`parse_string`], or incrementally against a chunked source with
//! [`parse_iterable`] or [`parse_async_iterable`]. Every [`Parser`] memoizes
//! its own result per input offset, so re-running a top-level parser from
//! offset zero as a stream grows is linear, not quadratic, in the input
//! length: nothing once decided is recomputed.
//!
//! See [`state`] for the state record threaded through every transform and
//! [`combinators`] for how each combinator interprets a child's partial or
//! end-of-input signal.

mod combinators;
pub mod driver;
pub mod error;
mod node;
mod parser;
pub mod primitives;
pub mod state;
mod value;

pub use combinators::{
    followed_by, lazy, not_followed_by, one_of, one_or_more, optional, sequence_of, zero_or_more,
};
pub use driver::{parse_async_iterable, parse_iterable, parse_string, ParseAsyncIterable, StreamingParser};
pub use error::{ErrorKind, ParseError};
pub use node::NodeId;
pub use parser::{Parser, ParserNode};
pub use primitives::{any_char, char_from, end_of_input, literal, SetItem};
pub use state::{CacheMap, InputSnapshot, ParserState, Status};
pub use value::Value;

/// Re-exports the pieces most callers need to build and run a grammar.
pub mod prelude {
    pub use crate::combinators::{
        followed_by, lazy, not_followed_by, one_of, one_or_more, optional, sequence_of,
        zero_or_more,
    };
    pub use crate::driver::{parse_async_iterable, parse_iterable, parse_string};
    pub use crate::primitives::{any_char, char_from, end_of_input, literal, SetItem};
    pub use crate::state::{ParserState, Status};
    pub use crate::value::Value;
    pub use crate::Parser;
}
