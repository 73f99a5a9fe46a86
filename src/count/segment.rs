//! Segmenter
//!
//! Splits a buffer into `k` contiguous half-open byte ranges. The split is purely
//! arithmetic: a word lying across a boundary is counted as two fragments, one per
//! segment, so parallel counts can drift slightly from the single-threaded ones.

use crate::count::TextBuffer;
use crate::error::{CountError, Result};
use serde::Serialize;

/// Half-open byte range `[start, end)` into a `TextBuffer`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

impl Segment {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "segment start {start} past end {end}");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Partition `buffer` into `workers` segments.
///
/// Every segment gets `len / workers` bytes and the last one also absorbs the remainder,
/// so the segments cover the buffer exactly once. Fails with `InvalidPartition` when
/// `workers` is zero or the buffer is empty; callers short-circuit to an empty result.
pub fn partition(buffer: &TextBuffer, workers: usize) -> Result<Vec<Segment>> {
    let len = buffer.len();
    if workers == 0 || len == 0 {
        return Err(CountError::InvalidPartition { workers, len });
    }

    let segment_size = len / workers;
    let segments = (0..workers)
        .map(|i| {
            let start = i * segment_size;
            let end = if i == workers - 1 {
                len
            } else {
                start + segment_size
            };
            Segment::new(start, end)
        })
        .collect();

    Ok(segments)
}
