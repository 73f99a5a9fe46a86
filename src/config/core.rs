use crate::count::{DEFAULT_TOP_N, MergeMode};
use crate::strategy::{CountSettings, DEFAULT_WORKERS, StrategyKind};
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Json, Toml, Yaml},
};
use serde::{Deserialize, Serialize};

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub corpus: CorpusConfig,
    pub counting: CountingConfig,
    pub run: RunConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Files, directories or glob patterns, in processing order
    pub files: Vec<String>,
    pub follow_symlinks: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountingConfig {
    pub workers: usize,
    pub top_n: usize,
    pub merge: MergeMode,
}

impl Default for CountingConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            top_n: DEFAULT_TOP_N,
            merge: MergeMode::Fold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub strategies: Vec<StrategyKind>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            strategies: StrategyKind::ALL.to_vec(),
        }
    }
}

/// Values given on the command line; `None` leaves the layered value alone
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub files: Vec<String>,
    pub workers: Option<usize>,
    pub top_n: Option<usize>,
    pub merge: Option<MergeMode>,
    pub strategies: Vec<StrategyKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub message: String,
}

impl ConfigIssue {
    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

impl BenchConfig {
    pub fn load() -> Result<Self> {
        Self::load_with_custom_config(None)
    }

    pub fn load_with_custom_config(custom_config: Option<&str>) -> Result<Self> {
        Self::figment(custom_config)
            .extract()
            .context("Failed to load wordbench configuration")
    }

    /// Layered configuration sources, lowest priority first
    pub fn figment(custom_config: Option<&str>) -> Figment {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        // A custom config replaces the user and project files
        if let Some(custom_path) = custom_config {
            figment = match custom_path.rsplit('.').next() {
                Some("json") => figment.merge(Json::file(custom_path)),
                Some("yaml") | Some("yml") => figment.merge(Yaml::file(custom_path)),
                _ => figment.merge(Toml::file(custom_path)),
            };
        } else {
            let user = Self::user_config_path();
            figment = figment
                .merge(Toml::file(format!("{user}.toml")))
                .merge(Json::file(format!("{user}.json")))
                .merge(Yaml::file(format!("{user}.yaml")))
                .merge(Yaml::file(format!("{user}.yml")))
                .merge(Toml::file("wordbench.toml"))
                .merge(Json::file("wordbench.json"))
                .merge(Yaml::file("wordbench.yaml"))
                .merge(Yaml::file("wordbench.yml"));
        }

        // Environment variables always win over files
        figment.merge(Env::prefixed("WORDBENCH_").split("__"))
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if !overrides.files.is_empty() {
            self.corpus.files = overrides.files;
        }
        if let Some(workers) = overrides.workers {
            self.counting.workers = workers;
        }
        if let Some(top_n) = overrides.top_n {
            self.counting.top_n = top_n;
        }
        if let Some(merge) = overrides.merge {
            self.counting.merge = merge;
        }
        if !overrides.strategies.is_empty() {
            self.run.strategies = overrides.strategies;
        }
    }

    pub fn settings(&self) -> CountSettings {
        CountSettings {
            workers: self.counting.workers,
            top_n: self.counting.top_n,
            merge: self.counting.merge,
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.corpus.files.is_empty() {
            issues.push(ConfigIssue::warning(
                "corpus.files is empty; pass paths on the command line",
            ));
        }
        if self.counting.workers == 0 {
            issues.push(ConfigIssue::warning(
                "counting.workers is 0; threads and process will fail every file",
            ));
        }
        if self.counting.top_n == 0 {
            issues.push(ConfigIssue::warning("counting.top_n is 0; no words will be listed"));
        }
        if self.run.strategies.is_empty() {
            issues.push(ConfigIssue::error(
                "run.strategies must name at least one strategy",
            ));
        }
        for (i, kind) in self.run.strategies.iter().enumerate() {
            if self.run.strategies[..i].contains(kind) {
                issues.push(ConfigIssue::warning(format!(
                    "strategy '{kind}' is listed more than once"
                )));
            }
        }

        issues
    }

    fn user_config_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{home}/.config/wordbench/config"),
            Err(_) => "~/.config/wordbench/config".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn isolated(jail: &mut Jail) {
        let home = jail.directory().to_path_buf();
        jail.set_env("HOME", home.display());
    }

    #[test]
    fn test_defaults_match_embedded_file() {
        Jail::expect_with(|jail| {
            isolated(jail);
            let config = BenchConfig::load().expect("default config should load");
            assert_eq!(config, BenchConfig::default());
            assert_eq!(config.counting.workers, 4);
            assert_eq!(config.counting.top_n, 10);
            assert_eq!(config.run.strategies, StrategyKind::ALL.to_vec());
            Ok(())
        });
    }

    #[test]
    fn test_project_file_and_env_layering() {
        Jail::expect_with(|jail| {
            isolated(jail);
            jail.create_file(
                "wordbench.toml",
                r#"
                [corpus]
                files = ["calgary/bib", "calgary/paper1"]

                [counting]
                workers = 2
                merge = "locked"
                "#,
            )?;
            jail.set_env("WORDBENCH_COUNTING__WORKERS", 8);

            let config = BenchConfig::load().expect("layered config should load");
            assert_eq!(config.corpus.files, vec!["calgary/bib", "calgary/paper1"]);
            assert_eq!(config.counting.workers, 8);
            assert_eq!(config.counting.merge, MergeMode::Locked);
            assert_eq!(config.counting.top_n, 10);
            Ok(())
        });
    }

    #[test]
    fn test_custom_yaml_config() {
        Jail::expect_with(|jail| {
            isolated(jail);
            jail.create_file(
                "bench.yaml",
                "run:\n  strategies: [threads]\ncounting:\n  top_n: 3\n",
            )?;

            let config = BenchConfig::load_with_custom_config(Some("bench.yaml")).unwrap();
            assert_eq!(config.run.strategies, vec![StrategyKind::Threads]);
            assert_eq!(config.counting.top_n, 3);
            Ok(())
        });
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        Jail::expect_with(|jail| {
            isolated(jail);
            jail.create_file("wordbench.toml", "[run]\nstrategies = [\"gpu\"]\n")?;
            assert!(BenchConfig::load().is_err());
            Ok(())
        });
    }

    #[test]
    fn test_overrides_win() {
        let mut config = BenchConfig::default();
        config.apply(Overrides {
            files: vec!["trans".into()],
            workers: Some(1),
            top_n: None,
            merge: Some(MergeMode::Locked),
            strategies: vec![StrategyKind::Process],
        });

        assert_eq!(config.corpus.files, vec!["trans"]);
        assert_eq!(
            config.settings(),
            CountSettings {
                workers: 1,
                top_n: 10,
                merge: MergeMode::Locked
            }
        );
        assert_eq!(config.run.strategies, vec![StrategyKind::Process]);
    }

    #[test]
    fn test_validate() {
        let mut config = BenchConfig::default();
        config.counting.workers = 0;
        config.run.strategies = vec![StrategyKind::Single, StrategyKind::Single];

        let issues = config.validate();
        assert!(issues.iter().all(|i| i.severity == Severity::Warning));
        assert!(issues.iter().any(|i| i.message.contains("workers is 0")));
        assert!(issues.iter().any(|i| i.message.contains("more than once")));

        config.run.strategies.clear();
        assert!(config.validate().iter().any(|i| i.severity == Severity::Error));
    }
}
