//! Simulated multi-process strategy
//!
//! Each file is handed to a child task that runs the threaded counter and reports back
//! a single fixed-size [`BoundaryMessage`] over a bounded channel. The caller blocks on
//! the receive before starting the next file, so at most one file is ever in flight.
//! The child shares the parent's address space; only the message shape models the
//! process boundary.

use super::{CountSettings, FileReport, recover, threaded};
use crate::error::{CountError, Result};
use crossbeam::channel::{Sender, bounded};
use std::path::{Path, PathBuf};

/// The only data that crosses the simulated boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryMessage {
    pub file_index: u32,
    pub distinct_words: u64,
}

pub fn run(
    files: &[PathBuf],
    settings: &CountSettings,
    on_file: &mut dyn FnMut(&FileReport),
) -> Result<Vec<FileReport>> {
    run_with(files, settings, on_file, child_process)
}

/// A child's exit status: its fatal error, or the notice for a file it could not open
type ChildResult = Result<Option<String>>;

fn run_with<C>(
    files: &[PathBuf],
    settings: &CountSettings,
    on_file: &mut dyn FnMut(&FileReport),
    child: C,
) -> Result<Vec<FileReport>>
where
    C: Fn(u32, &Path, &CountSettings, Sender<BoundaryMessage>) -> ChildResult + Sync,
{
    let mut reports = Vec::with_capacity(files.len());

    for (index, path) in files.iter().enumerate() {
        let (message, error) = round_trip(index, path, settings, &child)?;
        let report = FileReport::aggregate(path, message.distinct_words, error);
        tracing::debug!("{}: {} distinct words", path.display(), report.distinct_words);
        on_file(&report);
        reports.push(report);
    }

    Ok(reports)
}

/// Start a child for one file and wait for its message.
///
/// The child's own fatal error takes precedence over the missing message it causes.
fn round_trip<C>(
    index: usize,
    path: &Path,
    settings: &CountSettings,
    child: &C,
) -> Result<(BoundaryMessage, Option<String>)>
where
    C: Fn(u32, &Path, &CountSettings, Sender<BoundaryMessage>) -> ChildResult + Sync,
{
    let file_index = u32::try_from(index)
        .map_err(|_| CountError::Channel(format!("file index {index} does not fit the message")))?;
    let (tx, rx) = bounded::<BoundaryMessage>(1);

    let outcome = crossbeam::thread::scope(|s| -> Result<(BoundaryMessage, Option<String>)> {
        let handle = s
            .builder()
            .name(format!("child-{index}"))
            .spawn(move |_| child(file_index, path, settings, tx))
            .map_err(|source| CountError::WorkerSpawn {
                worker: index,
                source,
            })?;

        // The child owns the only sender, so this fails as soon as it exits without sending
        let received = rx.recv();
        let status = handle.join().map_err(|_| CountError::WorkerPanicked)?;
        let notice = status?;

        let message = received.map_err(|_| {
            CountError::Channel(format!("child for {} exited without reporting", path.display()))
        })?;
        if message.file_index != file_index {
            return Err(CountError::Channel(format!(
                "expected result for file {file_index}, received {}",
                message.file_index
            )));
        }

        Ok((message, notice))
    });

    outcome.map_err(|_| CountError::WorkerPanicked)?
}

fn child_process(
    file_index: u32,
    path: &Path,
    settings: &CountSettings,
    tx: Sender<BoundaryMessage>,
) -> ChildResult {
    let counted = threaded::count_file(path, settings.workers, settings.merge);
    let (map, notice) = recover(path, counted)?;

    let message = BoundaryMessage {
        file_index,
        distinct_words: map.len() as u64,
    };
    tx.send(message).map_err(|e| {
        CountError::Channel(format!("failed to send word count for {}: {e}", path.display()))
    })?;

    Ok(notice)
}
