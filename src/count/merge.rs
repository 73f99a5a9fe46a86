//! Merge Coordinator
//!
//! Folding a local map into the global map is commutative and associative, so the
//! final map does not depend on which worker commits first.

use crate::count::FrequencyMap;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

/// How local maps reach the global map once every worker has finished counting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// Workers hand their maps back; one routine folds them after the join
    #[default]
    Fold,
    /// Workers commit into a mutex-guarded map after a shared barrier
    Locked,
}

impl std::fmt::Display for MergeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeMode::Fold => write!(f, "fold"),
            MergeMode::Locked => write!(f, "locked"),
        }
    }
}

/// Add every count in `local` to `global`, inserting words that are absent
pub fn merge(global: &mut FrequencyMap, local: FrequencyMap) {
    if global.is_empty() {
        *global = local;
        return;
    }
    for (word, count) in local {
        *global.entry(word).or_insert(0) += count;
    }
}

/// Fold a batch of local maps into a fresh global map, sequentially
pub fn fold(locals: impl IntoIterator<Item = FrequencyMap>) -> FrequencyMap {
    locals.into_iter().fold(FrequencyMap::new(), |mut global, local| {
        merge(&mut global, local);
        global
    })
}

/// Global map shared by workers that commit concurrently
///
/// Each `commit` is one critical section. The map is created per file and consumed by
/// `into_inner` once the workers are joined.
#[derive(Debug, Default)]
pub struct SharedFrequencyMap {
    inner: Mutex<FrequencyMap>,
}

impl SharedFrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commit(&self, local: FrequencyMap) {
        // A poisoned lock only means another worker panicked mid-commit; the run is
        // aborted by the task group in that case, so the data is never read.
        let mut global = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        merge(&mut global, local);
    }

    pub fn into_inner(self) -> FrequencyMap {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, u64)]) -> FrequencyMap {
        pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn test_merge_adds_and_inserts() {
        let mut global = map(&[("cat", 2), ("dog", 1)]);
        merge(&mut global, map(&[("cat", 3), ("emu", 4)]));
        assert_eq!(global, map(&[("cat", 5), ("dog", 1), ("emu", 4)]));
    }

    #[test]
    fn test_merge_into_empty_global() {
        let mut global = FrequencyMap::new();
        merge(&mut global, map(&[("one", 1)]));
        assert_eq!(global, map(&[("one", 1)]));
    }

    #[test]
    fn test_fold_is_order_independent() {
        let a = map(&[("x", 1), ("y", 2)]);
        let b = map(&[("y", 3), ("z", 4)]);
        let c = map(&[("x", 5)]);

        let forward = fold([a.clone(), b.clone(), c.clone()]);
        let backward = fold([c, b, a]);
        assert_eq!(forward, backward);
        assert_eq!(forward, map(&[("x", 6), ("y", 5), ("z", 4)]));
    }

    #[test]
    fn test_shared_map_concurrent_commits() {
        let shared = SharedFrequencyMap::new();
        crossbeam::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|_| shared.commit(map(&[("word", 1), ("other", 2)])));
            }
        })
        .unwrap();

        assert_eq!(shared.into_inner(), map(&[("word", 8), ("other", 16)]));
    }
}
