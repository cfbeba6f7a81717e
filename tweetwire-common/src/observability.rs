//! `tracing` bootstrap shared by the `tweetwire` binary and the test suites.
//!
//! Events go to a daily rolling file and, unless turned off, to stderr. The
//! `logging:` section of the config file deserializes straight into
//! [`LogConfig`].

use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::Context;
use chrono::Utc;
use serde::Deserialize;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_DIR_ENV: &str = "TWEETWIRE_LOG_DIR";

/// Set once the global subscriber is live; the guard keeps the file writer flushing.
static INSTALLED: OnceLock<Installed> = OnceLock::new();

struct Installed {
    path: PathBuf,
    _guard: WorkerGuard,
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Output encoding for both sinks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// The `logging:` config section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Directory for the rolling file. Unset means `TWEETWIRE_LOG_DIR`, then
    /// `$HOME/.local/share/<name>`, then `./logs`.
    pub dir: Option<PathBuf>,
    /// Mirror events to stderr.
    pub stderr: bool,
    pub format: LogFormat,
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: None,
            stderr: true,
            format: LogFormat::Text,
            filter: "info".to_string(),
        }
    }
}

impl LogConfig {
    fn resolve_dir(&self, name: &str) -> PathBuf {
        self.dir
            .clone()
            .or_else(|| std::env::var_os(LOG_DIR_ENV).map(PathBuf::from))
            .or_else(|| {
                std::env::var_os("HOME")
                    .map(|home| PathBuf::from(home).join(".local/share").join(name))
            })
            .unwrap_or_else(|| PathBuf::from("logs"))
    }

    fn layers(&self, file: tracing_appender::non_blocking::NonBlocking) -> Vec<BoxedLayer> {
        let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);
        match self.format {
            LogFormat::Text => {
                layers.push(fmt::layer().with_writer(file).with_ansi(false).boxed());
                if self.stderr {
                    layers.push(fmt::layer().with_writer(std::io::stderr).boxed());
                }
            }
            LogFormat::Json => {
                layers.push(fmt::layer().json().with_writer(file).boxed());
                if self.stderr {
                    layers.push(fmt::layer().json().with_writer(std::io::stderr).boxed());
                }
            }
        }
        layers
    }
}

/// Install the global subscriber, writing to `<dir>/<name>.log.<YYYY-MM-DD>`.
///
/// Returns today's log file. Only the first call installs anything; later
/// calls return the first call's path whatever they are passed.
pub fn init_logging(name: &str, config: &LogConfig) -> anyhow::Result<PathBuf> {
    if let Some(installed) = INSTALLED.get() {
        return Ok(installed.path.clone());
    }

    let dir = config.resolve_dir(name);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;

    let prefix = format!("{name}.log");
    // the appender rotates on UTC days
    let path = dir.join(format!("{prefix}.{}", Utc::now().format("%Y-%m-%d")));

    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(&dir, &prefix));
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    tracing_subscriber::registry()
        .with(config.layers(writer))
        .with(filter)
        .try_init()
        .context("installing tracing subscriber")?;

    let installed = INSTALLED.get_or_init(|| Installed {
        path,
        _guard: guard,
    });
    Ok(installed.path.clone())
}
