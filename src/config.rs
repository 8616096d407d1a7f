use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::{Deserialize, Serialize};

use crate::shortlink::DEFAULT_ID_LENGTH;

pub static CONFIG_FILE: &str = "roulette.toml";
pub static ENV_PREFIX: &str = "ROULETTE_";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Short link prefix the random identifiers are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_id_length")]
    pub id_length: usize,
    #[serde(default = "default_findings_file")]
    pub findings_file: PathBuf,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Give up after this many short links. Unset searches forever.
    #[serde(default)]
    pub max_attempts: Option<u64>,
    /// Give up after this many seconds. Unset searches forever.
    #[serde(default)]
    pub deadline_secs: Option<u64>,
}

fn default_bind() -> String {
    "0.0.0.0:8080".into()
}

fn default_base_url() -> String {
    "https://on.soundcloud.com/".into()
}

fn default_id_length() -> usize {
    DEFAULT_ID_LENGTH
}

fn default_findings_file() -> PathBuf {
    "found.jsonl".into()
}

fn default_request_timeout_secs() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            base_url: default_base_url(),
            id_length: default_id_length(),
            findings_file: default_findings_file(),
            request_timeout_secs: default_request_timeout_secs(),
            max_attempts: None,
            deadline_secs: None,
        }
    }
}

impl Config {
    pub fn get_config(path: &Path) -> Result<Self> {
        Ok(Self::figment(path).extract()?)
    }

    /// TOML file overlaid with `ROULETTE_*` environment variables. A missing
    /// file is not an error.
    pub fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }
}
