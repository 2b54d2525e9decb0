// Copyright (c) Ada Kestrel. All rights reserved.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Error taxonomy for the parser core. `ErrorKind` is the closed set of
// failure modes a transform can produce; `ParseError` pairs a kind with a
// message built at the point of failure.

use thiserror::Error;

/// The closed set of ways a parser can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// The parser needed more characters than the current snapshot holds.
    ///
    /// Raised regardless of [`InputSnapshot::done`](crate::state::InputSnapshot::done);
    /// whether it is a control signal or a terminal user error depends on
    /// that flag, not on the kind itself.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A recognizer saw characters that did not satisfy it.
    #[error("mismatch")]
    Mismatch,
    /// `oneOrMore` matched zero times.
    #[error("one-or-more repetition matched zero times")]
    EmptyRepetition,
    /// A `notFollowedBy` predicate saw its forbidden parser succeed.
    #[error("negative lookahead violation")]
    NegativeLookaheadViolation,
    /// A `lazy` fixpoint recursed past the configured depth guard without
    /// making progress, most likely because the grammar is left-recursive.
    #[error("recursion limit exceeded, possible left-recursive grammar")]
    RecursionLimitExceeded,
}

/// An error produced by a transform, carrying its kind and a message for
/// display to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ParseError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        ParseError {
            kind,
            message: message.into(),
        }
    }

    pub fn unexpected_eoi(message: impl Into<String>) -> Self {
        ParseError::new(ErrorKind::UnexpectedEndOfInput, message)
    }

    pub fn mismatch(message: impl Into<String>) -> Self {
        ParseError::new(ErrorKind::Mismatch, message)
    }

    pub fn empty_repetition(message: impl Into<String>) -> Self {
        ParseError::new(ErrorKind::EmptyRepetition, message)
    }

    pub fn negative_lookahead(message: impl Into<String>) -> Self {
        ParseError::new(ErrorKind::NegativeLookaheadViolation, message)
    }

    pub fn recursion_limit(message: impl Into<String>) -> Self {
        ParseError::new(ErrorKind::RecursionLimitExceeded, message)
    }
}
