//! Structured worker execution
//!
//! A [`TaskGroup`] owns every worker it starts and joins all of them before it returns,
//! which is the barrier between counting and merging. Nothing spawned here can outlive
//! the call that spawned it, so workers may borrow the caller's buffer directly.
//!
//! ```text
//! ┌──────────────┐   spawn k    ┌──────────┐
//! │  TaskGroup   │─────────────▶│ worker 0 │──┐
//! │              │              │ worker 1 │──┤  join all
//! │ (crossbeam   │              │   ...    │──┤────────────▶ Vec<R> in item order
//! │  scope)      │              │ worker k │──┘
//! └──────────────┘              └──────────┘
//! ```
//!
//! Workers that have to rendezvous before a shared step (the locked merge) use a
//! [`WorkerBarrier`]. The group abandons the barrier if a sibling fails to start or
//! panics, so no worker is left waiting for a party that will never arrive.
//!
//! # Example
//!
//! ```rust
//! use wordbench::parallel::TaskGroup;
//!
//! let squares = TaskGroup::new("square")
//!     .run(vec![1u64, 2, 3], |_worker, x| x * x)
//!     .unwrap();
//! assert_eq!(squares, vec![1, 4, 9]);
//! ```

pub mod core;

pub use core::{TaskGroup, WorkerBarrier};
