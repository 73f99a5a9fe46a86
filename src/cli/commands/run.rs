//! Full benchmark over the corpus

use super::{OutputFormat, render};
use crate::bench::Benchmark;
use crate::cli::Output;
use crate::cli::output::TextReporter;
use crate::config::{BenchConfig, Overrides, Severity};
use crate::count::MergeMode;
use crate::corpus;
use crate::profile::{HOST, ProcessMonitor};
use crate::strategy::StrategyKind;
use anyhow::{Context, Result, bail};
use clap::Args;

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Files, directories or glob patterns (replaces corpus.files)
    #[arg(value_name = "PATHS")]
    pub paths: Vec<String>,

    /// Number of workers each file is split across
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Number of words listed per file
    #[arg(short = 'n', long)]
    pub top: Option<usize>,

    /// Strategies to run, in order (repeatable)
    #[arg(short, long = "strategy", value_enum)]
    pub strategies: Vec<StrategyKind>,

    /// How worker results are merged
    #[arg(long, value_enum)]
    pub merge: Option<MergeMode>,
}

impl RunArgs {
    fn overrides(self) -> Overrides {
        Overrides {
            files: self.paths,
            workers: self.workers,
            top_n: self.top,
            merge: self.merge,
            strategies: self.strategies,
        }
    }
}

pub async fn execute(
    args: RunArgs,
    format: OutputFormat,
    config_path: Option<&str>,
    output: &Output,
) -> Result<()> {
    let mut config = BenchConfig::load_with_custom_config(config_path)?;
    config.apply(args.overrides());

    for issue in config.validate() {
        match issue.severity {
            Severity::Error => bail!("Invalid configuration: {}", issue.message),
            Severity::Warning => tracing::warn!("{}", issue.message),
        }
    }

    let files = corpus::resolve(&config.corpus.files, config.corpus.follow_symlinks)?;
    if files.is_empty() {
        bail!("No corpus files to process; pass paths or set corpus.files");
    }

    let settings = config.settings();
    let strategies = config.run.strategies.clone();
    let text = format == OutputFormat::Text;

    if text {
        output.header("📊 Word Frequency Benchmark");
        output.key_value("Host:", &HOST.summary(), false);
        output.key_value(
            "Settings:",
            &format!(
                "{} files, {} workers, top {}, {} merge",
                files.len(),
                settings.workers,
                settings.top_n,
                settings.merge
            ),
            false,
        );
    }

    // Counting blocks; keep it off the async runtime's worker threads
    let output_for_task = *output;
    let report = tokio::task::spawn_blocking(move || {
        let mut bench = Benchmark::new(files, settings, strategies, ProcessMonitor::new());
        if text {
            bench.run(&mut TextReporter::new(&output_for_task))
        } else {
            bench.run(&mut ())
        }
    })
    .await
    .context("Benchmark task failed")??;

    if text {
        output.bench_summary(&report);
    } else {
        println!("{}", render(&report, format)?);
    }

    Ok(())
}
