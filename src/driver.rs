// Copyright (c) Ada Kestrel. All rights reserved.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The streaming driver: runs a parser against input that may arrive all at
//! once or in chunks, suppressing states that make no observable progress
//! and emitting the rest.

use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tracing::debug;

use crate::parser::Parser;
use crate::state::{CacheMap, InputSnapshot, ParserState, Status};

/// Runs `parser` once against the whole of `input`, with `done = true` from
/// the outset. A `Partial` status can never be observed here.
pub fn parse_string(parser: &Parser, input: &str) -> ParserState {
    let value: Rc<[char]> = input.chars().collect::<Vec<_>>().into();
    let snapshot = InputSnapshot::new(value, true);
    let state = ParserState::initial(snapshot, CacheMap::new());
    parser.transform(state)
}

/// The incremental half of the streaming driver: owns the accumulating
/// buffer, the shared memo table, and the last emitted state, and decides
/// per chunk whether the new state is observable.
pub struct StreamingParser {
    parser: Parser,
    buffer: Vec<char>,
    cache: CacheMap,
    last_emitted: ParserState,
    finished: bool,
}

impl StreamingParser {
    pub fn new(parser: Parser) -> Self {
        let cache = CacheMap::new();
        // A sentinel baseline with no progress, so the very first chunk's
        // state is compared against "nothing observed yet" by the same
        // rule that suppresses every other non-progressing state.
        let sentinel = ParserState {
            status: Status::Partial,
            ..ParserState::initial(
                InputSnapshot::new(Rc::from(Vec::<char>::new()), false),
                cache.clone(),
            )
        };
        StreamingParser {
            parser,
            buffer: Vec::new(),
            cache,
            last_emitted: sentinel,
            finished: false,
        }
    }

    /// Appends `chunk` to the accumulated input and re-parses from offset
    /// zero. Returns the newly emitted state, or `None` if it was
    /// suppressed (still awaiting more input, or no observable progress).
    pub fn feed(&mut self, chunk: &str) -> Option<ParserState> {
        assert!(!self.finished, "fed a chunk after the stream finished");
        self.buffer.extend(chunk.chars());
        let snapshot = InputSnapshot::new(Rc::from(self.buffer.as_slice()), false);
        let state = ParserState::initial(snapshot, self.cache.clone());
        let out = self.parser.transform(state);

        if out.is_pending_eoi() {
            debug!(index = out.index, "chunk suppressed: still awaiting input");
            return None;
        }
        if self.no_progress(&out) {
            debug!(index = out.index, "chunk suppressed: no observable progress");
            return None;
        }

        let terminal = out.status != Status::Partial;
        self.last_emitted = out.clone();
        if terminal {
            self.finished = true;
        }
        Some(out)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Runs the final transform with `done = true` over everything
    /// accumulated so far, and emits it unconditionally.
    ///
    /// If a chunk already drove the parse to a terminal state, that state
    /// is already the correct final answer (a `done = true` re-run over
    /// the same characters cannot change a `Complete` or non-pending
    /// `Error` verdict), so it is returned as-is instead of being
    /// recomputed and re-emitted.
    pub fn finish(mut self) -> ParserState {
        if self.finished {
            return self.last_emitted;
        }
        let snapshot = InputSnapshot::new(Rc::from(self.buffer.as_slice()), true);
        let state = ParserState::initial(snapshot, self.cache.clone());
        let out = self.parser.transform(state);
        self.last_emitted = out.clone();
        self.finished = true;
        out
    }

    fn no_progress(&self, candidate: &ParserState) -> bool {
        candidate.input.value == self.last_emitted.input.value
            && candidate.index == self.last_emitted.index
            && candidate.status == self.last_emitted.status
    }
}

/// Runs `parser` over a finite sequence of chunks, returning every emitted
/// state in order. The final element is always the `done = true` flush.
pub fn parse_iterable<I, S>(parser: &Parser, chunks: I) -> Vec<ParserState>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut driver = StreamingParser::new(parser.clone());
    let mut emitted = Vec::new();
    for chunk in chunks {
        if driver.is_finished() {
            break;
        }
        if let Some(state) = driver.feed(chunk.as_ref()) {
            emitted.push(state);
        }
    }
    if !driver.is_finished() {
        emitted.push(driver.finish());
    }
    emitted
}

/// The asynchronous counterpart of [`parse_iterable`]: awaits each chunk
/// from a [`Stream`] instead of pulling from a synchronous iterator, and
/// yields states as a `Stream` in turn.
pub struct ParseAsyncIterable<St> {
    chunks: St,
    driver: Option<StreamingParser>,
    done: bool,
}

impl<St> ParseAsyncIterable<St> {
    pub fn new(parser: Parser, chunks: St) -> Self {
        ParseAsyncIterable {
            chunks,
            driver: Some(StreamingParser::new(parser)),
            done: false,
        }
    }
}

impl<St> Stream for ParseAsyncIterable<St>
where
    St: Stream<Item = String> + Unpin,
{
    type Item = ParserState;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if this.done {
            return Poll::Ready(None);
        }

        loop {
            match Pin::new(&mut this.chunks).poll_next(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(chunk)) => {
                    let driver = this
                        .driver
                        .as_mut()
                        .expect("driver missing before stream finished");
                    if let Some(state) = driver.feed(&chunk) {
                        if driver.is_finished() {
                            this.done = true;
                        }
                        return Poll::Ready(Some(state));
                    }
                    // Suppressed; poll the chunk source again.
                }
                Poll::Ready(None) => {
                    let driver = this.driver.take().expect("driver already finished");
                    this.done = true;
                    return Poll::Ready(Some(driver.finish()));
                }
            }
        }
    }
}

/// Builds the asynchronous driver stream for `parser` over `chunks`.
pub fn parse_async_iterable<St>(parser: &Parser, chunks: St) -> ParseAsyncIterable<St>
where
    St: Stream<Item = String> + Unpin,
{
    ParseAsyncIterable::new(parser.clone(), chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::literal;

    #[test]
    fn whole_input_scenario_s1() {
        let out = parse_string(&literal("Hello, world!"), "Hello, world!");
        assert_eq!(out.status, Status::Complete);
        assert_eq!(out.index, 13);
        assert_eq!(out.result.as_text(), Some("Hello, world!"));
    }

    #[test]
    fn whole_input_scenario_s2() {
        let out = parse_string(&literal("Hello, world!"), "Hi, world!");
        assert_eq!(out.status, Status::Error);
        assert_eq!(out.index, 0);
        assert_eq!(out.error.unwrap().kind, crate::error::ErrorKind::Mismatch);
    }

    #[test]
    fn all_empty_chunks_emit_only_the_terminal_flush() {
        // Invariant 11: a stream of entirely empty chunks produces nothing
        // until the final, done = true flush, which must agree with
        // parsing "" outright.
        let p = literal("x");
        let emitted = parse_iterable(&p, ["", "", ""]);
        assert_eq!(emitted.len(), 1);
        let whole = parse_string(&p, "");
        assert_eq!(emitted[0].status, whole.status);
        assert_eq!(emitted[0].index, whole.index);
        assert_eq!(emitted[0].error.as_ref().map(|e| e.kind), whole.error.as_ref().map(|e| e.kind));
    }

    #[test]
    fn async_iterable_matches_sync_iterable() {
        use futures::executor::block_on;
        use futures::stream::{self, StreamExt};

        let p = literal("Hello");
        let chunks: Vec<String> = ["", "Hel", "", "lo!"].iter().map(|s| s.to_string()).collect();
        let sync_emitted = parse_iterable(&p, chunks.clone());

        let async_emitted: Vec<ParserState> =
            block_on(parse_async_iterable(&p, stream::iter(chunks)).collect());

        assert_eq!(sync_emitted.len(), async_emitted.len());
        for (a, b) in sync_emitted.iter().zip(async_emitted.iter()) {
            assert_eq!(a.status, b.status);
            assert_eq!(a.index, b.index);
            assert_eq!(a.result, b.result);
        }
    }
}
