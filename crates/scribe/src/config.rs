//! Layered settings: built-in defaults, then an optional TOML file, then
//! `SCRIBE__*` environment variables (`SCRIBE__TITLE__MODEL=gpt-4o`).
//!
//! The file is taken from `--config`, else `SCRIBE_CONFIG`, else
//! `scribe.toml` in the working directory if it exists.
use std::{
    env, fmt,
    path::{Path, PathBuf},
    time::Duration,
};

use scribe_core::model::Model;
use serde::Deserialize;
use thiserror::Error;

use crate::pipeline::GenerationSettings;

pub const CONFIG_ENV: &str = "SCRIBE_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "scribe.toml";
const ENV_PREFIX: &str = "SCRIBE";
const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub openai: OpenAiSettings,
    pub title: TitleSettings,
    pub article: ArticleSettings,
    pub store: StoreSettings,
}

#[derive(Clone, Deserialize)]
pub struct OpenAiSettings {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl fmt::Debug for OpenAiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TitleSettings {
    pub model: String,
    pub temperature: f64,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleSettings {
    pub model: String,
    pub temperature: f64,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    pub path: PathBuf,
}

impl Settings {
    /// Resolve the config file, read every layer and validate the result.
    /// `OPENAI_API_KEY` fills in the API key when no layer sets one.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let file = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));

        let mut settings = Self::from_sources(file.as_deref(), environment())?;
        if settings.api_key().is_none() {
            settings.openai.api_key = env::var(API_KEY_ENV).ok();
        }

        Ok(settings)
    }

    /// Build from an explicit file (required when given) and an environment
    /// source.  Without a file, `scribe.toml` is read if present.
    pub fn from_sources(file: Option<&Path>, env: ::config::Environment) -> Result<Self> {
        let builder = ::config::Config::builder()
            .set_default("openai.timeout_secs", 60_i64)?
            .set_default("openai.max_retries", 2_i64)?
            .set_default("title.model", "gpt-3.5-turbo-instruct")?
            .set_default("title.temperature", 0.9)?
            .set_default("title.max_tokens", 256_i64)?
            .set_default("article.model", "gpt-3.5-turbo")?
            .set_default("article.temperature", 0.9)?
            .set_default("store.path", "./data/articles")?;

        let builder = match file {
            Some(path) => builder.add_source(::config::File::from(path).required(true)),
            None => builder.add_source(
                ::config::File::new(DEFAULT_CONFIG_FILE, ::config::FileFormat::Toml).required(false),
            ),
        };

        let settings: Settings = builder.add_source(env).build()?.try_deserialize()?;
        settings.validate()?;

        Ok(settings)
    }

    /// The configured API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.openai
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.openai.timeout_secs)
    }

    /// Model and sampling options for the pipeline.
    pub fn generation(&self) -> Result<GenerationSettings> {
        Ok(GenerationSettings {
            title_model: parse_model("title.model", &self.title.model)?,
            title_temperature: Some(self.title.temperature),
            title_max_tokens: self.title.max_tokens,
            article_model: parse_model("article.model", &self.article.model)?,
            article_temperature: Some(self.article.temperature),
            article_max_tokens: self.article.max_tokens,
            system_prompt: self.article.system_prompt.clone(),
        })
    }

    /// Adapter for the configured OpenAI-compatible endpoint.
    #[cfg(feature = "openai")]
    pub fn openai_adapter(
        &self,
    ) -> scribe_core::error::Result<scribe_openai::OpenAiAdapter> {
        use scribe_openai::{OpenAiAdapterBuilder, RetryPolicy};

        let mut builder = OpenAiAdapterBuilder::new()
            .with_timeout(self.timeout())
            .with_retry_policy(RetryPolicy::default().with_max_retries(self.openai.max_retries));

        if let Some(key) = self.api_key() {
            builder = builder.with_api_key(key);
        }
        if let Some(url) = &self.openai.base_url {
            builder = builder.with_base_url(url);
        }

        builder.build()
    }

    fn validate(&self) -> Result<()> {
        check_temperature("title.temperature", self.title.temperature)?;
        check_temperature("article.temperature", self.article.temperature)?;
        parse_model("title.model", &self.title.model)?;
        parse_model("article.model", &self.article.model)?;

        if self.openai.timeout_secs == 0 {
            return Err(SettingsError::Invalid {
                key: "openai.timeout_secs",
                reason: "must be at least one second".into(),
            });
        }
        if self.store.path.as_os_str().is_empty() {
            return Err(SettingsError::Invalid {
                key: "store.path",
                reason: "must not be empty".into(),
            });
        }

        Ok(())
    }
}

fn environment() -> ::config::Environment {
    ::config::Environment::with_prefix(ENV_PREFIX).separator("__")
}

fn check_temperature(key: &'static str, value: f64) -> Result<()> {
    if (0.0..=2.0).contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::Invalid {
            key,
            reason: format!("{value} is outside 0.0..=2.0"),
        })
    }
}

fn parse_model(key: &'static str, name: &str) -> Result<Model> {
    name.parse().map_err(|e| SettingsError::Invalid {
        key,
        reason: format!("{e}"),
    })
}
