//! Top words of a single file

use super::{OutputFormat, render};
use crate::cli::Output;
use crate::config::{BenchConfig, Overrides};
use crate::strategy::StrategyKind;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CountArgs {
    /// File to count
    pub path: PathBuf,

    /// Counting strategy
    #[arg(short, long, value_enum, default_value_t = StrategyKind::Threads)]
    pub strategy: StrategyKind,

    /// Number of workers the file is split across
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Number of words listed
    #[arg(short = 'n', long)]
    pub top: Option<usize>,
}

pub async fn execute(
    args: CountArgs,
    format: OutputFormat,
    config_path: Option<&str>,
    output: &Output,
) -> Result<()> {
    let mut config = BenchConfig::load_with_custom_config(config_path)?;
    config.apply(Overrides {
        workers: args.workers,
        top_n: args.top,
        ..Overrides::default()
    });

    let settings = config.settings();
    let kind = args.strategy;
    let files = vec![args.path];

    let result = tokio::task::spawn_blocking(move || kind.run(&files, &settings, &mut |_| {}))
        .await
        .context("Counting task failed")??;

    match format {
        OutputFormat::Text => {
            for report in &result.files {
                output.file_report(kind, report);
            }
            output.blank_line();
            output.key_value(
                &format!("Elapsed time for {}:", kind.label()),
                &format!("{:.6} seconds", result.elapsed_secs),
                true,
            );
        }
        _ => println!("{}", render(&result, format)?),
    }

    Ok(())
}
