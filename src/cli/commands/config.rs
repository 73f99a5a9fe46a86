//! Configuration management commands

use super::{OutputFormat, render};
use crate::cli::Output;
use crate::config::{BenchConfig, Severity};
use anyhow::{Result, bail};
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the merged configuration (toml unless --format is given)
    Show,
    /// Load the configuration and report problems
    Validate,
}

pub async fn execute(
    args: ConfigArgs,
    format: OutputFormat,
    config_path: Option<&str>,
    output: &Output,
) -> Result<()> {
    let config = BenchConfig::load_with_custom_config(config_path)?;

    match args.command {
        ConfigCommand::Show => {
            println!("{}", render(&config, format)?);
            Ok(())
        }
        ConfigCommand::Validate => validate(&config, output),
    }
}

fn validate(config: &BenchConfig, output: &Output) -> Result<()> {
    let issues = config.validate();
    let mut errors = 0;

    for issue in &issues {
        match issue.severity {
            Severity::Error => {
                errors += 1;
                output.error(&issue.message);
            }
            Severity::Warning => output.warning(&issue.message),
        }
    }

    if errors > 0 {
        bail!("Configuration has {errors} error(s)");
    }
    output.success("Configuration is valid");
    Ok(())
}
