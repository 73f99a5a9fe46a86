//! Word-frequency counting core
//!
//! The pieces here are pure and single-threaded; the `strategy` module decides how they
//! are scheduled across workers.
//!
//! ```text
//! TextBuffer ──partition──▶ [Segment; k] ──count──▶ [FrequencyMap; k] ──merge──▶ FrequencyMap ──top_n──▶ TopList
//! ```

pub mod buffer;
pub mod merge;
pub mod segment;
pub mod tokenize;
pub mod top;

use std::collections::HashMap;

/// Lowercase ASCII word → occurrence count.
///
/// The same shape serves both as a worker's local map and as the per-file global map.
pub type FrequencyMap = HashMap<String, u64>;

pub use buffer::TextBuffer;
pub use merge::{MergeMode, SharedFrequencyMap, fold, merge};
pub use segment::{Segment, partition};
pub use tokenize::count;
pub use top::{DEFAULT_TOP_N, TopEntry, TopList, top_n};
