//! Configuration management for wordbench
//!
//! Settings are layered with figment: embedded defaults, user config, project config
//! (or an explicit `--config` file), `WORDBENCH_*` environment variables, and finally
//! command-line overrides.

pub mod core;

pub use core::{
    BenchConfig, ConfigIssue, CorpusConfig, CountingConfig, Overrides, RunConfig, Severity,
};
