//! Benchmark driver
//!
//! Runs each configured strategy over the whole corpus in turn. Every run is bracketed
//! by resource queries and a wall-clock timer; the queries are for reporting only.

use crate::profile::{HOST, HostProfile, ResourceMonitor, ResourceUsage, current_pid};
use crate::strategy::{CountSettings, FileReport, StrategyKind, StrategyResult};
use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

/// Callbacks fired while a benchmark runs
pub trait BenchObserver {
    fn strategy_started(&mut self, _kind: StrategyKind) {}
    fn file_finished(&mut self, _kind: StrategyKind, _report: &FileReport) {}
    fn strategy_finished(&mut self, _run: &StrategyRun) {}
}

impl BenchObserver for () {}

/// One strategy's result together with the resources observed around it
#[derive(Debug, Clone, Serialize)]
pub struct StrategyRun {
    #[serde(flatten)]
    pub result: StrategyResult,
    /// Process usage right after the run; `None` if the query failed
    pub resources: Option<ResourceUsage>,
    /// CPU seconds (user, kernel) spent during the run
    pub cpu_delta: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub host: HostProfile,
    pub settings: ReportSettings,
    pub runs: Vec<StrategyRun>,
    pub total_elapsed_secs: f64,
    /// Sum of per-file distinct-word counts, taken from the threaded run
    pub combined_word_count: u64,
    /// Whether the parallel strategies arrived at the same combined count
    pub consistent: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReportSettings {
    pub workers: usize,
    pub top_n: usize,
    pub merge: crate::count::MergeMode,
}

impl From<CountSettings> for ReportSettings {
    fn from(settings: CountSettings) -> Self {
        Self {
            workers: settings.workers,
            top_n: settings.top_n,
            merge: settings.merge,
        }
    }
}

pub struct Benchmark<M> {
    files: Vec<PathBuf>,
    settings: CountSettings,
    strategies: Vec<StrategyKind>,
    monitor: M,
}

impl<M: ResourceMonitor> Benchmark<M> {
    pub fn new(
        files: Vec<PathBuf>,
        settings: CountSettings,
        strategies: Vec<StrategyKind>,
        monitor: M,
    ) -> Self {
        Self {
            files,
            settings,
            strategies,
            monitor,
        }
    }

    /// Run every strategy in order. Stops at the first fatal error.
    pub fn run(&mut self, observer: &mut dyn BenchObserver) -> Result<BenchReport> {
        let pid = current_pid();
        let strategies = self.strategies.clone();
        let mut runs = Vec::with_capacity(strategies.len());

        for kind in strategies {
            observer.strategy_started(kind);
            let before = self.query(pid);

            let result = kind.run(&self.files, &self.settings, &mut |report| {
                observer.file_finished(kind, report)
            })?;

            let after = self.query(pid);
            let cpu_delta = match (before, after) {
                (Some(before), Some(after)) => Some(after.cpu_since(&before)),
                _ => None,
            };

            tracing::info!(
                "{} finished in {:.3}s ({} files, {} failed)",
                kind.label(),
                result.elapsed_secs,
                result.files.len(),
                result.failed_files()
            );

            let run = StrategyRun {
                result,
                resources: after,
                cpu_delta,
            };
            observer.strategy_finished(&run);
            runs.push(run);
        }

        let (combined_word_count, consistent) = combine(&runs);
        if !consistent {
            tracing::warn!("Parallel strategies disagree on the combined word count");
        }

        Ok(BenchReport {
            host: HOST.clone(),
            settings: self.settings.into(),
            total_elapsed_secs: runs.iter().map(|run| run.result.elapsed_secs).sum(),
            runs,
            combined_word_count,
            consistent,
        })
    }

    fn query(&mut self, pid: sysinfo::Pid) -> Option<ResourceUsage> {
        match self.monitor.query(pid) {
            Ok(usage) => Some(usage),
            Err(e) => {
                tracing::warn!("Resource usage unavailable: {:#}", e);
                None
            }
        }
    }
}

/// Combined total and whether the parallel strategies agree on it.
///
/// The total comes from the threaded run, or the first run when threads were not run.
/// The single pass never splits words, so only threads and process are compared.
fn combine(runs: &[StrategyRun]) -> (u64, bool) {
    let combined = runs
        .iter()
        .find(|run| run.result.strategy == StrategyKind::Threads)
        .or_else(|| runs.first())
        .map_or(0, |run| run.result.total_distinct_words);

    let parallel: Vec<u64> = runs
        .iter()
        .filter(|run| run.result.strategy != StrategyKind::Single)
        .map(|run| run.result.total_distinct_words)
        .collect();
    let consistent = parallel.windows(2).all(|pair| pair[0] == pair[1]);

    (combined, consistent)
}
