//! Top-N Selector

use crate::count::FrequencyMap;
use serde::Serialize;
use std::cmp::Reverse;

/// Number of entries reported per file unless configured otherwise
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopEntry {
    pub word: String,
    pub count: u64,
}

pub type TopList = Vec<TopEntry>;

/// Rank `global` by count descending, ties broken by ascending word, and keep the first `n`
pub fn top_n(global: &FrequencyMap, n: usize) -> TopList {
    let mut entries: Vec<(&String, &u64)> = global.iter().collect();
    entries.sort_unstable_by_key(|&(word, count)| (Reverse(*count), word));
    entries.truncate(n);

    entries
        .into_iter()
        .map(|(word, count)| TopEntry {
            word: word.clone(),
            count: *count,
        })
        .collect()
}
