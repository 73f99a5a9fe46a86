use crate::error::{CountError, Result};
use std::sync::{Condvar, Mutex, PoisonError};

/// Scoped group of workers, one per work item
pub struct TaskGroup<'a> {
    label: &'a str,
    barrier: Option<&'a WorkerBarrier>,
}

impl<'a> TaskGroup<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            barrier: None,
        }
    }

    /// Barrier to abandon if any worker fails to start or panics
    pub fn with_barrier(mut self, barrier: &'a WorkerBarrier) -> Self {
        self.barrier = Some(barrier);
        self
    }

    /// Run `worker` once per item on its own thread and return the results in item order.
    ///
    /// Returns only after every started worker has finished. A worker that cannot be
    /// started yields `WorkerSpawn`; a worker that panics yields `WorkerPanicked`.
    pub fn run<T, R, F>(&self, items: Vec<T>, worker: F) -> Result<Vec<R>>
    where
        T: Send,
        R: Send,
        F: Fn(usize, T) -> R + Sync,
    {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let worker = &worker;
        let barrier = self.barrier;

        let joined = crossbeam::thread::scope(|s| -> Result<Vec<R>> {
            let mut handles = Vec::with_capacity(items.len());

            for (worker_id, item) in items.into_iter().enumerate() {
                let spawned = s
                    .builder()
                    .name(format!("{}-{}", self.label, worker_id))
                    .spawn(move |_| {
                        let _guard = barrier.map(AbandonOnPanic);
                        worker(worker_id, item)
                    });

                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(source) => {
                        tracing::error!(
                            "Failed to start {} worker {}: {}",
                            self.label,
                            worker_id,
                            source
                        );
                        if let Some(barrier) = barrier {
                            barrier.abandon();
                        }
                        return Err(CountError::WorkerSpawn {
                            worker: worker_id,
                            source,
                        });
                    }
                }
            }

            tracing::trace!("{} workers running for {}", handles.len(), self.label);

            let mut results = Vec::with_capacity(handles.len());
            let mut panicked = false;
            for handle in handles {
                match handle.join() {
                    Ok(result) => results.push(result),
                    Err(_) => panicked = true,
                }
            }

            if panicked {
                Err(CountError::WorkerPanicked)
            } else {
                Ok(results)
            }
        });

        // The scope itself reports a panic only if one escaped a handle we never joined
        joined.map_err(|_| CountError::WorkerPanicked)?
    }
}

/// Rendezvous point for a fixed number of workers that can be abandoned
///
/// `std::sync::Barrier` cannot be released early, so a sibling that never arrives would
/// block the rest forever.
#[derive(Debug)]
pub struct WorkerBarrier {
    parties: usize,
    state: Mutex<BarrierState>,
    released: Condvar,
}

#[derive(Debug, Default)]
struct BarrierState {
    arrived: usize,
    abandoned: bool,
}

impl WorkerBarrier {
    pub fn new(parties: usize) -> Self {
        Self {
            parties,
            state: Mutex::new(BarrierState::default()),
            released: Condvar::new(),
        }
    }

    /// Block until all parties have arrived. Returns `false` if the barrier was abandoned.
    pub fn wait(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.arrived += 1;
        if state.arrived >= self.parties {
            self.released.notify_all();
            return !state.abandoned;
        }

        while state.arrived < self.parties && !state.abandoned {
            state = self
                .released
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        !state.abandoned
    }

    pub fn abandon(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.abandoned = true;
        self.released.notify_all();
    }

    pub fn is_abandoned(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .abandoned
    }
}

struct AbandonOnPanic<'a>(&'a WorkerBarrier);

impl Drop for AbandonOnPanic<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.abandon();
        }
    }
}
