use crate::error::Error;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llava";
pub const DEFAULT_PROMPT: &str = "Provide an exhaustive description of the computer software image including identifying all objects and describing them and their relationships";

/// Optional settings, from a config file or from the command line
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub base_url: Option<Url>,
    pub model: Option<String>,
    pub prompt: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Parse the response and print selected fields
    Detailed,
    /// Print the response body as is
    Raw,
}

/// Fully resolved settings for a single run
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: Url,
    pub model: String,
    pub prompt: String,
    pub timeout: Option<Duration>,
    pub mode: OutputMode,
}

impl Config {
    pub async fn load(path: &Path) -> Result<Config, Error> {
        let config = fs::read_to_string(path).await.map_err(Error::ReadConfig)?;

        Ok(toml::from_str(&config)?)
    }

    /// Values set in `self` win, the rest are taken from `fallback`
    pub fn or(self, fallback: Config) -> Config {
        Config {
            base_url: self.base_url.or(fallback.base_url),
            model: self.model.or(fallback.model),
            prompt: self.prompt.or(fallback.prompt),
            timeout_secs: self.timeout_secs.or(fallback.timeout_secs),
        }
    }
}

impl Settings {
    pub fn resolve(config: Config, mode: OutputMode) -> Result<Settings, Error> {
        let base_url = match config.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        Ok(Settings {
            base_url,
            model: config.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            prompt: config.prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
            timeout: config.timeout_secs.map(Duration::from_secs),
            mode,
        })
    }
}
