//! Byte sources with a consumption budget.
//!
//! A list header declares how many bytes its items take. Decoding the items through a
//! [Bounded] reader scoped to that length guarantees the decoder stops exactly at the end of
//! the list instead of running into the next sibling. Nested lists nest readers: each one is
//! built on top of its parent and can never see past the parent's budget.
//!
//! Readers opened for a list body also count how deeply lists are nested on the current
//! thread. Opening one more than [MAX_DEPTH] levels fails with [Error::DepthExceeded], so a
//! short input of stacked empty-list headers cannot exhaust the stack of a recursive decoder.

use crate::{header, Error};
use bytes::Buf;
use std::cell::Cell;
use tracing::debug;

/// Deepest list nesting a single decode accepts.
pub const MAX_DEPTH: usize = 128;

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Holds one level of list nesting until dropped.
struct Nesting;

impl Nesting {
    fn enter() -> Result<Self, Error> {
        DEPTH.with(|depth| {
            let current = depth.get();
            if current >= MAX_DEPTH {
                debug!(limit = MAX_DEPTH, "rejecting nested list");
                return Err(Error::DepthExceeded(MAX_DEPTH));
            }
            depth.set(current + 1);
            Ok(Self)
        })
    }
}

impl Drop for Nesting {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// A [Buf] that yields at most `limit` bytes of an underlying source.
///
/// Every read decrements the budget, so a single reader must not be shared between concurrent
/// decodes.
pub struct Bounded<'a> {
    inner: &'a mut dyn Buf,
    limit: usize,
    nesting: Option<Nesting>,
}

impl<'a> Bounded<'a> {
    /// Wraps `inner`, allowing at most `limit` bytes to be consumed.
    ///
    /// The reader does not count towards the nesting depth. Use [Bounded::nested] for the body
    /// of a list.
    pub fn new(inner: &'a mut dyn Buf, limit: usize) -> Self {
        Self {
            inner,
            limit,
            nesting: None,
        }
    }

    /// Wraps `inner` for a list body of `limit` bytes, one level deeper than the caller.
    ///
    /// The level is released when the reader is dropped.
    pub fn nested(inner: &'a mut dyn Buf, limit: usize) -> Result<Self, Error> {
        let nesting = Nesting::enter()?;
        Ok(Self {
            inner,
            limit,
            nesting: Some(nesting),
        })
    }

    /// Reads a list header from `inner` and returns a reader over its body.
    pub fn list<B: Buf>(inner: &'a mut B) -> Result<Self, Error> {
        let len = header::read_list(inner)?;
        Self::nested(inner, len)
    }

    /// Returns true if this reader holds a level of list nesting.
    pub fn is_nested(&self) -> bool {
        self.nesting.is_some()
    }

    /// Returns the remaining budget.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns true once nothing more can be read, either because the budget is spent or
    /// because the underlying source ran dry.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Copies up to `dst.len()` bytes into `dst`, returning how many were copied.
    ///
    /// Fails with [Error::EndOfBuffer] if `dst` is non-empty and nothing is left to read.
    pub fn read(&mut self, dst: &mut [u8]) -> Result<usize, Error> {
        if dst.is_empty() {
            return Ok(0);
        }
        let n = dst.len().min(self.remaining());
        if n == 0 {
            return Err(Error::EndOfBuffer);
        }
        self.copy_to_slice(&mut dst[..n]);
        Ok(n)
    }
}

impl Buf for Bounded<'_> {
    fn remaining(&self) -> usize {
        self.inner.remaining().min(self.limit)
    }

    fn chunk(&self) -> &[u8] {
        let chunk = self.inner.chunk();
        &chunk[..chunk.len().min(self.limit)]
    }

    fn advance(&mut self, cnt: usize) {
        assert!(cnt <= self.limit, "cannot advance past the read budget");
        self.inner.advance(cnt);
        self.limit -= cnt;
    }
}
