//! Chunk layout along the leading axis and the thread-local splitting policy.
//!
//! Gathering (fancy-indexing) a large array normally splits the result into
//! chunks of at most [`DEFAULT_MAX_CHUNK_LEN`] steps. Some computations need
//! the gathered axis in one piece; they open a [`ChunkingScope`] for the
//! duration of the call.

use std::cell::Cell;
use std::marker::PhantomData;
use std::ops::Range;

/// Largest chunk produced by gathering while splitting is enabled.
pub const DEFAULT_MAX_CHUNK_LEN: usize = 128;

thread_local! {
    static SPLIT_LARGE_CHUNKS: Cell<bool> = const { Cell::new(true) };
}

/// Returns `true` if gathered arrays are currently split into bounded chunks.
pub fn split_large_chunks() -> bool {
    SPLIT_LARGE_CHUNKS.with(Cell::get)
}

/// Guard that overrides the chunk-splitting policy until it is dropped.
///
/// The previous policy is restored on drop, including during unwinding, so
/// scopes nest and never leak past the call that opened them. The guard is
/// tied to the thread that created it.
#[derive(Debug)]
#[must_use = "the policy is restored as soon as the scope is dropped"]
pub struct ChunkingScope {
    previous: bool,
    _not_send: PhantomData<*const ()>,
}

impl ChunkingScope {
    /// Opens a scope in which gathered arrays keep a single chunk.
    pub fn disable_splitting() -> Self {
        Self::with_splitting(false)
    }

    /// Opens a scope with an explicit splitting policy.
    pub fn with_splitting(enabled: bool) -> Self {
        let previous = SPLIT_LARGE_CHUNKS.with(|cell| cell.replace(enabled));
        tracing::trace!(enabled, previous, "chunking scope opened");
        Self {
            previous,
            _not_send: PhantomData,
        }
    }
}

impl Drop for ChunkingScope {
    fn drop(&mut self) {
        SPLIT_LARGE_CHUNKS.with(|cell| cell.set(self.previous));
    }
}

/// Chunk sizes along the leading axis of an array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunks(Vec<usize>);

impl Chunks {
    /// One chunk covering `len` steps. An empty axis has no chunks.
    pub fn single(len: usize) -> Self {
        if len == 0 {
            Self(Vec::new())
        } else {
            Self(vec![len])
        }
    }

    /// Regular chunks of `size` steps; the last chunk holds the remainder.
    pub fn regular(len: usize, size: usize) -> Self {
        let size = size.max(1);
        let mut sizes = vec![size; len / size];
        if len % size != 0 {
            sizes.push(len % size);
        }
        Self(sizes)
    }

    /// Layout of an array produced by gathering `len` steps, honouring the
    /// current thread's splitting policy.
    pub fn for_gather(len: usize) -> Self {
        if split_large_chunks() {
            Self::regular(len, DEFAULT_MAX_CHUNK_LEN)
        } else {
            Self::single(len)
        }
    }

    /// Layout of the sub-range `range` of an array chunked like `self`.
    pub fn slice(&self, range: Range<usize>) -> Self {
        let mut sizes = Vec::new();
        let mut start = 0;
        for &size in &self.0 {
            let end = start + size;
            let lo = start.max(range.start);
            let hi = end.min(range.end);
            if lo < hi {
                sizes.push(hi - lo);
            }
            start = end;
        }
        Self(sizes)
    }

    /// Returns the chunk sizes.
    pub fn sizes(&self) -> &[usize] {
        &self.0
    }

    /// Returns the number of chunks.
    pub fn count(&self) -> usize {
        self.0.len()
    }

    /// Returns the total number of steps covered.
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_with_remainder() {
        assert_eq!(Chunks::regular(366, 128).sizes(), &[128, 128, 110]);
        assert_eq!(Chunks::regular(10, 5).sizes(), &[5, 5]);
        assert!(Chunks::regular(0, 5).sizes().is_empty());
    }

    #[test]
    fn slice_intersects_chunks() {
        let chunks = Chunks::regular(10, 4);
        assert_eq!(chunks.slice(2..9).sizes(), &[2, 4, 1]);
        assert_eq!(chunks.slice(4..8).sizes(), &[4]);
        assert!(chunks.slice(3..3).sizes().is_empty());
    }

    #[test]
    fn scope_toggles_gather_layout() {
        assert!(split_large_chunks());
        assert_eq!(Chunks::for_gather(366).count(), 3);
        {
            let _scope = ChunkingScope::disable_splitting();
            assert!(!split_large_chunks());
            assert_eq!(Chunks::for_gather(366).sizes(), &[366]);
        }
        assert!(split_large_chunks());
    }

    #[test]
    fn nested_scopes_restore_in_order() {
        let outer = ChunkingScope::disable_splitting();
        {
            let _inner = ChunkingScope::with_splitting(true);
            assert!(split_large_chunks());
        }
        assert!(!split_large_chunks());
        drop(outer);
        assert!(split_large_chunks());
    }
}
