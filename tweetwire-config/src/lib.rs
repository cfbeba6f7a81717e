//! Loader for tweetwire configuration with YAML + environment overlays.
//!
//! Sources are merged in the order they are attached, with `TWEETWIRE__`
//! environment variables always applied last (`TWEETWIRE__TWITTER__BEARER_TOKEN`
//! maps to `twitter.bearer_token`). String values may reference other
//! environment variables as `${VAR}`; those are expanded after merging.
//!
//! ```yaml
//! server:
//!   bind: "0.0.0.0:8000"
//! twitter:
//!   bearer_token: "${TWITTER_TOKEN}"
//! logging:
//!   format: json
//! ```
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tweetwire_common::LogConfig;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

pub const DEFAULT_LIMIT: u32 = 30;
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct TweetwireConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub twitter: TwitterConfig,
    #[serde(default)]
    pub logging: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Page size used when a request carries no `limit`.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            default_limit: default_limit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwitterConfig {
    pub bearer_token: String,
    #[serde(default = "default_twitter_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_bind() -> String {
    "127.0.0.1:8000".into()
}
fn default_limit() -> u32 {
    DEFAULT_LIMIT
}
fn default_twitter_base_url() -> String {
    "https://api.twitter.com".into()
}
fn default_timeout_secs() -> u64 {
    15
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

impl TweetwireConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.twitter.bearer_token.trim().is_empty() || self.twitter.bearer_token.contains("${")
        {
            return Err(ConfigError::Message(
                "twitter.bearer_token is empty or references an unset variable".into(),
            ));
        }
        if !(1..=MAX_LIMIT).contains(&self.server.default_limit) {
            return Err(ConfigError::Message(format!(
                "server.default_limit must be between 1 and {MAX_LIMIT}, got {}",
                self.server.default_limit
            )));
        }
        if self.twitter.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "twitter.timeout_secs must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct TweetwireConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for TweetwireConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TweetwireConfigLoader {
    /// Start empty; `TWEETWIRE__` env overrides are layered on in [`load`](Self::load).
    ///
    /// ```
    /// use tweetwire_config::TweetwireConfigLoader;
    ///
    /// let config = TweetwireConfigLoader::new()
    ///     .with_yaml_str("twitter:\n  bearer_token: 'abc'")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.twitter.bearer_token, "abc");
    /// assert_eq!(config.twitter.base_url, "https://api.twitter.com");
    /// assert_eq!(config.server.default_limit, 30);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Like [`with_file`](Self::with_file) but silently skipped when the file is absent,
    /// so deployments can run from environment variables alone.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use tweetwire_common::LogFormat;
    /// use tweetwire_config::TweetwireConfigLoader;
    ///
    /// let cfg = TweetwireConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// server:
    ///   bind: "0.0.0.0:9000"
    /// twitter:
    ///   bearer_token: "example"
    ///   timeout_secs: 3
    /// logging:
    ///   format: json
    ///   stderr: false
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.server.bind, "0.0.0.0:9000");
    /// assert_eq!(cfg.twitter.timeout_secs, 3);
    /// assert_eq!(cfg.logging.format, LogFormat::Json);
    /// assert!(!cfg.logging.stderr);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    ///
    /// ```
    /// use tweetwire_config::TweetwireConfigLoader;
    ///
    /// unsafe { std::env::set_var("TW_DOC_TOKEN", "injected-from-env"); }
    ///
    /// let config = TweetwireConfigLoader::new()
    ///     .with_yaml_str("twitter:\n  bearer_token: \"${TW_DOC_TOKEN}\"")
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.twitter.bearer_token, "injected-from-env");
    ///
    /// unsafe { std::env::remove_var("TW_DOC_TOKEN"); }
    /// ```
    pub fn load(self) -> Result<TweetwireConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("TWEETWIRE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: TweetwireConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;
        typed.validate()?;

        Ok(typed)
    }
}
