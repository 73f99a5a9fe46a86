//! Thread-parallel strategy
//!
//! Per file the counter moves through
//! `Idle → Segmenting → WorkersRunning → Merging → Done`. Merging never starts before
//! every worker has produced its local map. Files are handled strictly one after another.

use super::{CountSettings, FileReport, recover};
use crate::count::{
    FrequencyMap, MergeMode, Segment, SharedFrequencyMap, TextBuffer, fold, partition, tokenize,
};
use crate::error::Result;
use crate::parallel::{TaskGroup, WorkerBarrier};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Segmenting,
    WorkersRunning,
    Merging,
    Done,
}

impl Phase {
    fn can_advance_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Idle, Phase::Segmenting)
                | (Phase::Segmenting, Phase::WorkersRunning)
                | (Phase::Segmenting, Phase::Done)
                | (Phase::WorkersRunning, Phase::Merging)
                | (Phase::WorkersRunning, Phase::Done)
                | (Phase::Merging, Phase::Done)
        )
    }
}

/// Counts one buffer at a time across a fixed number of workers
#[derive(Debug)]
pub struct ThreadedCounter {
    workers: usize,
    merge: MergeMode,
    phase: Phase,
    history: Vec<Phase>,
}

impl ThreadedCounter {
    pub fn new(workers: usize, merge: MergeMode) -> Self {
        Self {
            workers,
            merge,
            phase: Phase::Idle,
            history: vec![Phase::Idle],
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Phases visited during the most recent `count_buffer` call
    pub fn history(&self) -> &[Phase] {
        &self.history
    }

    fn advance(&mut self, next: Phase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "invalid phase transition {:?} -> {:?}",
            self.phase,
            next
        );
        tracing::trace!("phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
        self.history.push(next);
    }

    pub fn count_buffer(&mut self, buffer: &TextBuffer) -> Result<FrequencyMap> {
        self.phase = Phase::Idle;
        self.history.clear();
        self.history.push(Phase::Idle);

        self.advance(Phase::Segmenting);
        let segments = match partition(buffer, self.workers) {
            Ok(segments) => segments,
            Err(e) => {
                self.advance(Phase::Done);
                return Err(e);
            }
        };

        self.advance(Phase::WorkersRunning);
        let counted = match self.merge {
            MergeMode::Fold => count_then_fold(buffer, segments),
            MergeMode::Locked => count_then_commit(buffer, segments),
        };
        let pending = match counted {
            Ok(pending) => pending,
            Err(e) => {
                self.advance(Phase::Done);
                return Err(e);
            }
        };

        self.advance(Phase::Merging);
        let global = match pending {
            Pending::Locals(locals) => fold(locals),
            Pending::Committed(shared) => shared.into_inner(),
        };

        self.advance(Phase::Done);
        Ok(global)
    }
}

/// Worker output waiting for the merge phase
enum Pending {
    Locals(Vec<FrequencyMap>),
    Committed(SharedFrequencyMap),
}

fn count_then_fold(buffer: &TextBuffer, segments: Vec<Segment>) -> Result<Pending> {
    let locals = TaskGroup::new("count").run(segments, |_worker, segment| {
        tokenize::count(buffer, segment)
    })?;
    Ok(Pending::Locals(locals))
}

fn count_then_commit(buffer: &TextBuffer, segments: Vec<Segment>) -> Result<Pending> {
    let shared = SharedFrequencyMap::new();
    let barrier = WorkerBarrier::new(segments.len());

    TaskGroup::new("count")
        .with_barrier(&barrier)
        .run(segments, |worker, segment| {
            let local = tokenize::count(buffer, segment);
            if barrier.wait() {
                shared.commit(local);
            } else {
                tracing::debug!("worker {} dropping its counts, run abandoned", worker);
            }
        })?;

    Ok(Pending::Committed(shared))
}

/// Count `buffer` with `workers` threads
pub fn count_buffer(buffer: &TextBuffer, workers: usize, merge: MergeMode) -> Result<FrequencyMap> {
    ThreadedCounter::new(workers, merge).count_buffer(buffer)
}

pub fn count_file(path: &Path, workers: usize, merge: MergeMode) -> Result<FrequencyMap> {
    let buffer = TextBuffer::load(path)?;
    count_buffer(&buffer, workers, merge)
}

pub fn run(
    files: &[PathBuf],
    settings: &CountSettings,
    on_file: &mut dyn FnMut(&FileReport),
) -> Result<Vec<FileReport>> {
    let mut counter = ThreadedCounter::new(settings.workers, settings.merge);
    let mut reports = Vec::with_capacity(files.len());

    for path in files {
        let counted = TextBuffer::load(path).and_then(|buffer| counter.count_buffer(&buffer));
        let (map, error) = recover(path, counted)?;
        let report = FileReport::from_map(path, &map, settings.top_n, error);
        tracing::debug!("{}: {} distinct words", path.display(), report.distinct_words);
        on_file(&report);
        reports.push(report);
    }

    Ok(reports)
}
