//! Logging bootstrap shared by TinyDB binaries.
use anyhow::{Context, Result};
use std::env::{self, VarError};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt, layer::Layered, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Layer,
    Registry,
};

/// Environment variable that overrides the configured filter.
pub const ENV_VAR: &str = "TINYDB_LOG";

const FILE_NAME: &str = "tinydb.log";

/// Handle used to swap the active filter at runtime.
pub type ReloadHandle = reload::Handle<EnvFilter, Registry>;

type Filtered = Layered<reload::Layer<EnvFilter, Registry>, Registry>;

/// Where and how log records are written.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directive, e.g. `warn` or `tinydb_parser=debug`.
    pub level: String,
    /// Write daily rolling files into this directory instead of stderr.
    pub dir: Option<PathBuf>,
    /// Emit JSON records.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            dir: None,
            json: false,
        }
    }
}

/// Build an [`EnvFilter`], letting `TINYDB_LOG` win over `level`.
///
/// An unparsable `TINYDB_LOG` is an error, not a silent fallback.
pub fn filter(level: &str) -> Result<EnvFilter> {
    filter_from(env::var(ENV_VAR), level)
}

fn filter_from(env_value: Result<String, VarError>, level: &str) -> Result<EnvFilter> {
    match env_value {
        Ok(directives) => EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid {ENV_VAR} value '{directives}'")),
        Err(VarError::NotPresent) => {
            EnvFilter::try_new(level).with_context(|| format!("invalid log filter '{level}'"))
        }
        Err(err) => Err(err).with_context(|| format!("cannot read {ENV_VAR}")),
    }
}

/// Install the global subscriber.
///
/// Returns a reload handle that can update the filter at runtime.
pub fn init(config: &LogConfig) -> Result<ReloadHandle> {
    let (filter_layer, handle) = reload::Layer::new(filter(&config.level)?);

    let fmt_layer: Box<dyn Layer<Filtered> + Send + Sync> = match &config.dir {
        Some(dir) => {
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, FILE_NAME);
            let layer = fmt::layer().with_ansi(false).with_writer(appender);
            if config.json {
                layer.json().with_current_span(false).with_span_list(false).boxed()
            } else {
                layer.boxed()
            }
        }
        None => {
            let layer = fmt::layer().with_writer(std::io::stderr);
            if config.json {
                layer.json().boxed()
            } else {
                layer.boxed()
            }
        }
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .context("failed to install log subscriber")?;
    Ok(handle)
}

/// Replace the active filter through `handle`.
pub fn set_level(handle: &ReloadHandle, level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level).with_context(|| format!("invalid log filter '{level}'"))?;
    handle.reload(filter).context("log subscriber is gone")?;
    Ok(())
}
