use casino_engine::Chips;
use casino_engine::optimizer::DEFAULT_MINIMUM_RESERVE;
use casino_engine::slots::SPIN_COST;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::io_utils::read_text;

pub const DEFAULT_DATA_FILE: &str = "data/players.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub data_file: String,
    pub seed: Option<u64>,
    pub max_turns: u32,
    /// Upper limit accepted for `--turns`; the search grows exponentially
    pub max_turns_cap: u32,
    pub minimum_reserve: Chips,
    pub spin_cost: Chips,
    pub round_log: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub data_file: ValueSource,
    pub seed: ValueSource,
    pub max_turns: ValueSource,
    pub max_turns_cap: ValueSource,
    pub minimum_reserve: ValueSource,
    pub spin_cost: ValueSource,
    pub round_log: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            data_file: ValueSource::Default,
            seed: ValueSource::Default,
            max_turns: ValueSource::Default,
            max_turns_cap: ValueSource::Default,
            minimum_reserve: ValueSource::Default,
            spin_cost: ValueSource::Default,
            round_log: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.into(),
            seed: None,
            max_turns: 6,
            max_turns_cap: 10,
            minimum_reserve: DEFAULT_MINIMUM_RESERVE,
            spin_cost: SPIN_COST,
            round_log: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

/// Resolves the configuration from the process environment.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    resolve(|key| std::env::var(key).ok())
}

/// Resolves defaults, then the TOML file named by `CASINO_CONFIG`, then the
/// individual `CASINO_*` variables, each layer overriding the previous one.
/// `env` looks variables up so callers can supply their own environment.
pub fn resolve<F>(env: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();
    let var = |key: &str| env(key).filter(|v| !v.is_empty());

    if let Some(path) = var("CASINO_CONFIG") {
        let s = read_text(Path::new(&path))?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.data_file {
            cfg.data_file = v;
            sources.data_file = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.max_turns {
            cfg.max_turns = v;
            sources.max_turns = ValueSource::File;
        }
        if let Some(v) = f.max_turns_cap {
            cfg.max_turns_cap = v;
            sources.max_turns_cap = ValueSource::File;
        }
        if let Some(v) = f.minimum_reserve {
            cfg.minimum_reserve = v;
            sources.minimum_reserve = ValueSource::File;
        }
        if let Some(v) = f.spin_cost {
            cfg.spin_cost = v;
            sources.spin_cost = ValueSource::File;
        }
        if let Some(v) = f.round_log {
            cfg.round_log = Some(v);
            sources.round_log = ValueSource::File;
        }
    }

    if let Some(path) = var("CASINO_DATA") {
        cfg.data_file = path;
        sources.data_file = ValueSource::Env;
    }
    if let Some(seed) = var("CASINO_SEED") {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(turns) = var("CASINO_MAX_TURNS") {
        cfg.max_turns = turns
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid max_turns".into()))?;
        sources.max_turns = ValueSource::Env;
    }
    if let Some(reserve) = var("CASINO_RESERVE") {
        cfg.minimum_reserve = reserve
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid minimum_reserve".into()))?;
        sources.minimum_reserve = ValueSource::Env;
    }
    if let Some(log) = var("CASINO_ROUND_LOG") {
        cfg.round_log = if parse_bool(&log) == Some(false) {
            None
        } else {
            Some(log)
        };
        sources.round_log = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    data_file: Option<String>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    max_turns: Option<u32>,
    #[serde(default)]
    max_turns_cap: Option<u32>,
    #[serde(default)]
    minimum_reserve: Option<Chips>,
    #[serde(default)]
    spin_cost: Option<Chips>,
    #[serde(default)]
    round_log: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.data_file.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: data_file must not be empty".into(),
        ));
    }
    if cfg.max_turns_cap == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: max_turns_cap must be >=1".into(),
        ));
    }
    if cfg.max_turns == 0 || cfg.max_turns > cfg.max_turns_cap {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: max_turns must be between 1 and {}",
            cfg.max_turns_cap
        )));
    }
    if cfg.minimum_reserve < 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: minimum_reserve must be >=0".into(),
        ));
    }
    if cfg.spin_cost <= 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: spin_cost must be >0".into(),
        ));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let r = resolve(env_of(&[])).unwrap();
        assert_eq!(r.config, Config::default());
        assert_eq!(r.sources.max_turns, ValueSource::Default);
        assert_eq!(r.config.minimum_reserve, 100);
        assert_eq!(r.config.data_file, DEFAULT_DATA_FILE);
    }

    #[test]
    fn environment_overrides_defaults() {
        let r = resolve(env_of(&[
            ("CASINO_SEED", "42"),
            ("CASINO_MAX_TURNS", "3"),
            ("CASINO_RESERVE", "0"),
            ("CASINO_DATA", "/tmp/p.json"),
        ]))
        .unwrap();
        assert_eq!(r.config.seed, Some(42));
        assert_eq!(r.config.max_turns, 3);
        assert_eq!(r.config.minimum_reserve, 0);
        assert_eq!(r.config.data_file, "/tmp/p.json");
        assert_eq!(r.sources.seed, ValueSource::Env);
        assert_eq!(r.sources.spin_cost, ValueSource::Default);
    }

    #[test]
    fn empty_variables_are_ignored() {
        let r = resolve(env_of(&[("CASINO_SEED", "")])).unwrap();
        assert_eq!(r.config.seed, None);
        assert_eq!(r.sources.seed, ValueSource::Default);
    }

    #[test]
    fn file_then_env_layering() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("casino.toml");
        std::fs::write(
            &path,
            "max_turns = 4\nspin_cost = 250\nseed = 7\nround_log = \"rounds.jsonl\"\n",
        )
        .unwrap();
        let path_str = path.to_string_lossy().to_string();
        let r = resolve(env_of(&[
            ("CASINO_CONFIG", path_str.as_str()),
            ("CASINO_SEED", "9"),
        ]))
        .unwrap();
        assert_eq!(r.config.max_turns, 4);
        assert_eq!(r.sources.max_turns, ValueSource::File);
        assert_eq!(r.config.spin_cost, 250);
        assert_eq!(r.config.seed, Some(9));
        assert_eq!(r.sources.seed, ValueSource::Env);
        assert_eq!(r.config.round_log.as_deref(), Some("rounds.jsonl"));
    }

    #[test]
    fn round_log_can_be_switched_off_from_env() {
        let r = resolve(env_of(&[("CASINO_ROUND_LOG", "off")])).unwrap();
        assert_eq!(r.config.round_log, None);
        assert_eq!(r.sources.round_log, ValueSource::Env);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            resolve(env_of(&[("CASINO_SEED", "abc")])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            resolve(env_of(&[("CASINO_MAX_TURNS", "11")])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            resolve(env_of(&[("CASINO_RESERVE", "-5")])),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn unreadable_or_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let missing = missing.to_string_lossy().to_string();
        assert!(matches!(
            resolve(env_of(&[("CASINO_CONFIG", missing.as_str())])),
            Err(ConfigError::Io(_))
        ));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "max_turns = \"many\"").unwrap();
        let bad = bad.to_string_lossy().to_string();
        assert!(matches!(
            resolve(env_of(&[("CASINO_CONFIG", bad.as_str())])),
            Err(ConfigError::Parse(_))
        ));
    }
}
