use std::fs;
use std::path::{Path, PathBuf};

use blackjack_trainer::{SessionLimits, TrainerSettings};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file is not valid YAML")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid value in config file")]
    Invalid(#[from] serde::de::value::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub trainer: ConfigTrainer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigTrainer {
    pub difficulty: String,
    pub rng_seed: Option<u64>,
    pub questions: SessionLimits,
}

impl Default for ConfigTrainer {
    fn default() -> Self {
        ConfigTrainer {
            difficulty: String::from("normal"),
            rng_seed: None,
            questions: SessionLimits::default(),
        }
    }
}

impl TryInto<TrainerSettings> for ConfigTrainer {
    type Error = serde::de::value::Error;

    fn try_into(self) -> Result<TrainerSettings, Self::Error> {
        let settings = TrainerSettings {
            difficulty: self.difficulty.parse()?,
            limits: self.questions,
            rng_seed: self.rng_seed,
        };

        Ok(settings)
    }
}

/// Reads the content of a given config file and parses it to a Config.
pub fn parse_config_from_file(filename: &Path) -> Result<Config, ConfigError> {
    let file_content = fs::read_to_string(filename).map_err(|source| ConfigError::Io {
        path: filename.to_path_buf(),
        source,
    })?;
    parse_config_from_str(&file_content)
}

pub fn parse_config_from_str(content: &str) -> Result<Config, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
}

/// Installs the global tracing subscriber. Logs go to stderr so they never
/// mix with the prompts on stdout.
///
/// `RUST_LOG` wins when set. Otherwise the level comes from the number of
/// `-v` flags: warn, info, debug, then trace.
pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}
