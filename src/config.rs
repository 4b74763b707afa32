use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_QUESTIONS_PER_QUIZ: usize = 10;
pub const DEFAULT_DIALOGUE_DB: &str = "db.sqlite";
pub const DEFAULT_SHARE_URL: &str = "https://redflagscorecard.com";
pub const DEFAULT_CHATGPT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_CHATGPT_MAX_TOKENS: u32 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub chatgpt_api_key: String,
    pub chatgpt_timeout: Duration,
    /// Upper bound on the length of a generated roast.
    pub chatgpt_max_tokens: u32,
    pub questions_per_quiz: usize,
    pub questions_file: Option<PathBuf>,
    pub results_file: Option<PathBuf>,
    pub dialogue_db: String,
    pub share_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let chatgpt_api_key = lookup("CHATGPT_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing("CHATGPT_API_KEY"))?;

        let questions_per_quiz = match lookup("QUESTIONS_PER_QUIZ") {
            Some(value) => {
                let parsed = value.trim().parse::<usize>();
                match parsed {
                    Ok(count) if count > 0 => count,
                    _ => {
                        return Err(ConfigError::Invalid {
                            key: "QUESTIONS_PER_QUIZ",
                            value,
                        })
                    }
                }
            }
            None => DEFAULT_QUESTIONS_PER_QUIZ,
        };

        let timeout_secs = match lookup("CHATGPT_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid {
                    key: "CHATGPT_TIMEOUT_SECS",
                    value,
                })?,
            None => DEFAULT_CHATGPT_TIMEOUT_SECS,
        };

        let chatgpt_max_tokens = match lookup("CHATGPT_MAX_TOKENS") {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(tokens) if tokens > 0 => tokens,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "CHATGPT_MAX_TOKENS",
                        value,
                    })
                }
            },
            None => DEFAULT_CHATGPT_MAX_TOKENS,
        };

        Ok(Config {
            chatgpt_api_key,
            chatgpt_timeout: Duration::from_secs(timeout_secs),
            chatgpt_max_tokens,
            questions_per_quiz,
            questions_file: lookup("QUESTIONS_FILE").map(PathBuf::from),
            results_file: lookup("RESULTS_FILE").map(PathBuf::from),
            dialogue_db: lookup("DIALOGUE_DB").unwrap_or_else(|| DEFAULT_DIALOGUE_DB.to_string()),
            share_url: lookup("SHARE_URL").unwrap_or_else(|| DEFAULT_SHARE_URL.to_string()),
        })
    }
}
