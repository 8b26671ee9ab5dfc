use anyhow::Error;
use hyper::Uri;
use serde::Deserialize;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use std::time::Duration;
use thiserror::Error as ThisError;
use toml;

pub const DEFAULT_TRIALS: usize = 3;
pub const DEFAULT_DELAY_SECONDS: u64 = 1;

const DEFAULT_ENTITY_URL: &str =
    "https://real-estate-view.jvb127.workers.dev/api/entity?id=fault_system_Clinton_Fault";
const DEFAULT_API_URL: &str = "https://real-estate-view.jvb127.workers.dev/api";

#[derive(Debug, Deserialize)]
pub struct FileTargetConfig {
    pub label: String,
    pub url: String,
    pub show_body: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    pub trials: Option<usize>,
    pub delay_seconds: Option<u64>,
    pub targets: Vec<FileTargetConfig>,
}

#[derive(Debug, Clone)]
pub struct TargetConfig {
    pub label: String,
    pub url: Uri,
    pub show_body: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub trials: usize,
    pub delay: Duration,
    pub targets: Vec<TargetConfig>,
}

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("No targets defined in config file.")]
    NoTargets,
    #[error("Invalid url for target '{0}': {1}")]
    InvalidUrl(String, http::uri::InvalidUri),
}

impl Config {
    /// Built-in endpoints and timings, used when no config file is given.
    pub fn builtin() -> Config {
        Config {
            trials: DEFAULT_TRIALS,
            delay: Duration::from_secs(DEFAULT_DELAY_SECONDS),
            targets: vec![
                TargetConfig {
                    label: "entity".into(),
                    url: DEFAULT_ENTITY_URL.parse().unwrap(),
                    show_body: false,
                },
                TargetConfig {
                    label: "api".into(),
                    url: DEFAULT_API_URL.parse().unwrap(),
                    show_body: true,
                },
            ],
        }
    }

    fn fill_defaults(unresolved: FileConfig) -> Result<Config, ConfigError> {
        if unresolved.targets.is_empty() {
            return Err(ConfigError::NoTargets);
        }
        let trials = unresolved.trials.unwrap_or(DEFAULT_TRIALS);
        let delay_seconds = unresolved.delay_seconds.unwrap_or(DEFAULT_DELAY_SECONDS);

        let targets: Result<Vec<TargetConfig>, ConfigError> = unresolved
            .targets
            .into_iter()
            .map(|t| {
                let url = t
                    .url
                    .parse::<Uri>()
                    .map_err(|e| ConfigError::InvalidUrl(t.label.clone(), e))?;
                Ok(TargetConfig {
                    label: t.label,
                    url,
                    show_body: t.show_body.unwrap_or(false),
                })
            })
            .collect();

        Ok(Config {
            trials,
            delay: Duration::from_secs(delay_seconds),
            targets: targets?,
        })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, Error> {
        let mut f = File::open(path.as_ref())?;
        let mut contents = String::new();
        f.read_to_string(&mut contents)?;
        let config: FileConfig = toml::from_str(&contents)?;
        Ok(Config::fill_defaults(config)?)
    }
}
