//! Console output for wordbench
//!
//! Consistent, styled messages plus the benchmark tables: per-file word rankings,
//! elapsed times and resource usage blocks.

use crate::bench::{BenchObserver, BenchReport, StrategyRun};
use crate::count::TopEntry;
use crate::profile::ResourceUsage;
use crate::strategy::{FileReport, StrategyKind};
use console::style;

/// Output handler for consistent CLI formatting
#[derive(Debug, Clone, Copy)]
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✔").green(), message);
        }
    }

    /// Errors are always shown, even in quiet mode
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✖").red(), message);
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("⚠").yellow(), message);
        }
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            println!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }


    pub fn header(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    pub fn section_header(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", style(title).bold().cyan());
        }
    }

    pub fn key_value(&self, key: &str, value: &str, highlight: bool) {
        if !self.quiet {
            let styled_value = if highlight {
                style(value).green().bold()
            } else {
                style(value).white()
            };
            println!("  {} {}", style(key).dim(), styled_value);
        }
    }

    pub fn blank_line(&self) {
        if !self.quiet {
            println!();
        }
    }

    /// Ranked words for one file, one `word : count` row each
    pub fn word_table(&self, path: &str, words: &[TopEntry]) {
        if self.quiet {
            return;
        }
        println!("\n{} {}:", style("Top frequent words in").bold(), style(path).underlined());
        if words.is_empty() {
            println!("  {}", style("(no words)").dim());
        }
        for entry in words {
            println!("  {:<15} : {}", entry.word, style(entry.count).yellow());
        }
    }

    pub fn file_report(&self, kind: StrategyKind, report: &FileReport) {
        let path = report.path.display().to_string();
        if let Some(error) = &report.error {
            self.error(error);
        }
        match kind {
            StrategyKind::Process => self.key_value(
                &format!("Word count for {path}:"),
                &report.distinct_words.to_string(),
                false,
            ),
            StrategyKind::Single | StrategyKind::Threads => {
                self.word_table(&path, &report.top_words);
                self.verbose(&format!(
                    "{} distinct words, {} total",
                    report.distinct_words,
                    report.total_words.unwrap_or_default()
                ));
            }
        }
    }

    pub fn resource_block(&self, kind: StrategyKind, usage: Option<&ResourceUsage>) {
        if self.quiet {
            return;
        }
        println!("\n{}", style(format!("[{} Resource Usage]", title_case(kind.label()))).bold());
        match usage {
            Some(usage) => {
                self.key_value(
                    "Peak resident memory:",
                    &format!("{} KB", usage.peak_resident_kb()),
                    false,
                );
                self.key_value(
                    "User CPU time:",
                    &format!("{:.6} seconds", usage.user_cpu_seconds),
                    false,
                );
                self.key_value(
                    "Kernel CPU time:",
                    &format!("{:.6} seconds", usage.kernel_cpu_seconds),
                    false,
                );
            }
            None => self.warning("Resource usage unavailable"),
        }
    }

    pub fn strategy_summary(&self, run: &StrategyRun) {
        let kind = run.result.strategy;
        self.blank_line();
        self.key_value(
            &format!("Elapsed time for {}:", kind.label()),
            &format!("{:.6} seconds", run.result.elapsed_secs),
            true,
        );
        let failed = run.result.failed_files();
        if failed > 0 {
            self.warning(&format!("{failed} file(s) could not be processed"));
        }
        self.resource_block(kind, run.resources.as_ref());
    }

    pub fn bench_summary(&self, report: &BenchReport) {
        if report.runs.is_empty() {
            return;
        }
        self.section_header("Summary");
        let labels: Vec<&str> = report.runs.iter().map(|r| r.result.strategy.label()).collect();
        self.key_value(
            &format!("Total elapsed time ({}):", labels.join(" + ")),
            &format!("{:.6} seconds", report.total_elapsed_secs),
            false,
        );
        self.key_value(
            "Total word count for all files combined:",
            &report.combined_word_count.to_string(),
            true,
        );
        if !report.consistent {
            let totals: Vec<String> = report
                .runs
                .iter()
                .map(|r| format!("{}={}", r.result.strategy, r.result.total_distinct_words))
                .collect();
            self.warning(&format!(
                "Parallel strategies disagree on the total: {}",
                totals.join(", ")
            ));
        }
    }
}

/// Streams benchmark progress to the console as it happens
pub struct TextReporter<'a> {
    output: &'a Output,
}

impl<'a> TextReporter<'a> {
    pub fn new(output: &'a Output) -> Self {
        Self { output }
    }
}

impl BenchObserver for TextReporter<'_> {
    fn strategy_started(&mut self, kind: StrategyKind) {
        self.output
            .section_header(&format!("[{}]", title_case(kind.label())));
    }

    fn file_finished(&mut self, kind: StrategyKind, report: &FileReport) {
        self.output.file_report(kind, report);
    }

    fn strategy_finished(&mut self, run: &StrategyRun) {
        self.output.strategy_summary(run);
    }
}

fn title_case(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
