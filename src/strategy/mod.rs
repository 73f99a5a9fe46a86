//! Execution strategies
//!
//! Every strategy walks the corpus one file at a time and produces one [`FileReport`]
//! per file, in corpus order:
//!
//! - **single**: one Local Counter pass over the whole buffer, no merge.
//! - **threads**: segment, count each segment on its own worker, join, merge.
//! - **process**: the threaded computation runs in a child task and only the file's
//!   distinct-word count crosses back over a channel.
//!
//! File-scoped failures (unreadable file, nothing to partition) never leave the file:
//! they are logged and the file reports an empty result. Worker and channel failures
//! abort the run.

pub mod process;
pub mod single;
pub mod threaded;

use crate::count::{DEFAULT_TOP_N, FrequencyMap, MergeMode, TopList, top_n};
use crate::error::{CountError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub use process::BoundaryMessage;
pub use threaded::{Phase, ThreadedCounter};

/// Default Segmenter fan-out
pub const DEFAULT_WORKERS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Sequential baseline
    Single,
    /// Thread-parallel counting
    Threads,
    /// Thread-parallel counting behind a simulated process boundary
    Process,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Single,
        StrategyKind::Threads,
        StrategyKind::Process,
    ];

    /// Human-readable name used in reports
    pub fn label(&self) -> &'static str {
        match self {
            StrategyKind::Single => "single-threading",
            StrategyKind::Threads => "multithreading",
            StrategyKind::Process => "multiprocessing",
        }
    }

    /// Run this strategy over `files`, calling `on_file` as each file completes
    pub fn run(
        &self,
        files: &[PathBuf],
        settings: &CountSettings,
        on_file: &mut dyn FnMut(&FileReport),
    ) -> Result<StrategyResult> {
        tracing::info!("Running {} over {} files", self.label(), files.len());
        let start = Instant::now();

        let reports = match self {
            StrategyKind::Single => single::run(files, settings, on_file)?,
            StrategyKind::Threads => threaded::run(files, settings, on_file)?,
            StrategyKind::Process => process::run(files, settings, on_file)?,
        };

        Ok(StrategyResult::new(*self, reports, start.elapsed()))
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StrategyKind::Single => "single",
            StrategyKind::Threads => "threads",
            StrategyKind::Process => "process",
        };
        f.write_str(name)
    }
}

/// Knobs shared by all strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountSettings {
    pub workers: usize,
    pub top_n: usize,
    pub merge: MergeMode,
}

impl Default for CountSettings {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            top_n: DEFAULT_TOP_N,
            merge: MergeMode::Fold,
        }
    }
}

/// Outcome for one corpus file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    /// Number of distinct words in the file's global map
    pub distinct_words: u64,
    /// Sum of all counts; unknown when only the aggregate crossed a process boundary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_words: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub top_words: TopList,
    /// Recoverable failure that emptied this file's result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    /// Report carrying the full ranking of a global map
    pub fn from_map(path: &Path, map: &FrequencyMap, n: usize, error: Option<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            distinct_words: map.len() as u64,
            total_words: Some(map.values().sum()),
            top_words: top_n(map, n),
            error,
        }
    }

    /// Report built from the aggregate alone
    pub fn aggregate(path: &Path, distinct_words: u64, error: Option<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            distinct_words,
            total_words: None,
            top_words: TopList::new(),
            error,
        }
    }

    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Everything one strategy produced for the corpus
#[derive(Debug, Clone, Serialize)]
pub struct StrategyResult {
    pub strategy: StrategyKind,
    pub files: Vec<FileReport>,
    pub elapsed_secs: f64,
    /// Sum of the per-file distinct-word counts
    pub total_distinct_words: u64,
}

impl StrategyResult {
    pub fn new(strategy: StrategyKind, files: Vec<FileReport>, elapsed: Duration) -> Self {
        let total_distinct_words = files.iter().map(|f| f.distinct_words).sum();
        Self {
            strategy,
            files,
            elapsed_secs: elapsed.as_secs_f64(),
            total_distinct_words,
        }
    }

    pub fn failed_files(&self) -> usize {
        self.files.iter().filter(|f| f.failed()).count()
    }
}

/// Confine a file-scoped error to its file.
///
/// Fatal errors pass through untouched. An empty buffer is not a failure, just an empty
/// result; any other recoverable error is logged and reported alongside the empty map.
pub(crate) fn recover(
    path: &Path,
    result: Result<FrequencyMap>,
) -> Result<(FrequencyMap, Option<String>)> {
    match result {
        Ok(map) => Ok((map, None)),
        Err(e) if e.is_fatal() => Err(e),
        Err(CountError::InvalidPartition { len: 0, .. }) => {
            tracing::debug!("{} is empty, nothing to count", path.display());
            Ok((FrequencyMap::new(), None))
        }
        Err(e) => {
            tracing::debug!("{}", e);
            Ok((FrequencyMap::new(), Some(e.to_string())))
        }
    }
}
