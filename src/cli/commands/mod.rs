use crate::cli::Output;
use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};

pub mod config;
pub mod count;
pub mod run;
pub mod version;

#[derive(Parser)]
#[command(
    name = "wordbench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Benchmark word-frequency counting strategies",
    long_about = "wordbench counts word frequencies over a corpus of text files with a \
                  single-threaded baseline, a thread-parallel counter and a simulated \
                  multi-process counter, reporting elapsed time and resource usage for each."
)]
pub struct Cli {
    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the benchmark over the corpus with every configured strategy
    Run(run::RunArgs),
    /// Show the most frequent words of a single file
    Count(count::CountArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);
        let output = Output::new(self.verbose > 0, self.quiet);
        let config_path = self.config.as_deref();

        match self.command {
            Some(Commands::Run(args)) => {
                run::execute(args, self.format, config_path, &output).await
            }
            Some(Commands::Count(args)) => {
                count::execute(args, self.format, config_path, &output).await
            }
            Some(Commands::Config(args)) => {
                config::execute(args, self.format, config_path, &output).await
            }
            Some(Commands::Version) => version::execute(&output).await,
            None => {
                Cli::command().print_help()?;
                Ok(())
            }
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,ignore=warn,globset=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,ignore=warn,globset=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // stdout is reserved for reports so json/yaml stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Serialize `value` in a machine-readable format
pub(crate) fn render<T: serde::Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yml::to_string(value)?,
        OutputFormat::Text => toml::to_string_pretty(value)?,
    })
}
