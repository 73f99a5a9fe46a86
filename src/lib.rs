//! # wordbench - word-frequency counting strategies, side by side
//!
//! wordbench counts word frequencies over a fixed corpus of text files three ways and
//! reports how long each took and what it cost the process:
//!
//! - **single**: one sequential pass over each file
//! - **threads**: each file split into segments counted on parallel workers, then merged
//! - **process**: the threaded count behind a simulated process boundary, where only
//!   the per-file distinct-word count comes back over a channel
//!
//! ## Quick Start
//!
//! ```bash
//! # Benchmark every strategy over a directory of text files
//! wordbench run corpus/calgary
//!
//! # Top 20 words of one file using 8 workers
//! wordbench count corpus/calgary/book1 -w 8 -n 20
//! ```
//!
//! ## Library use
//!
//! ```rust
//! use wordbench::count::{MergeMode, TextBuffer, top_n};
//! use wordbench::strategy::threaded;
//!
//! let buffer = TextBuffer::from("the cat sat. The CAT sat!");
//! let counts = threaded::count_buffer(&buffer, 1, MergeMode::Fold).unwrap();
//! let top = top_n(&counts, 3);
//! assert_eq!(top[0].word, "cat");
//! assert_eq!(top[0].count, 2);
//! ```
//!
//! ## Known approximation
//!
//! Segments are cut at fixed byte offsets with no regard for word boundaries. A word
//! that straddles a cut is counted as two fragments. This matches the reference
//! benchmark the tool is compared against.

pub mod bench;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod count;
pub mod error;
pub mod parallel;
pub mod profile;
pub mod strategy;

pub use cli::{Cli, Output};
pub use config::BenchConfig;
pub use error::CountError;

/// Result type alias for application-level operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
