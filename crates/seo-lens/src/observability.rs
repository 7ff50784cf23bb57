//! Logging setup.
//!
//! Human-readable events go to stderr; JSON lines go to a log file rotated
//! daily. The file lives in, by precedence: `SEO_LENS_LOG_PATH` (exact file,
//! no rotation), `SEO_LENS_LOG_DIR`, the configured `log_dir`, or `logs/`
//! under the platform data directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_PATH_ENV: &str = "SEO_LENS_LOG_PATH";
const LOG_DIR_ENV: &str = "SEO_LENS_LOG_DIR";
const LOG_FILE_PREFIX: &str = "seo-lens";
const LOG_FILE_SUFFIX: &str = "jsonl";

/// Where log files are written.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// Exact log file; disables rotation.
    pub log_path: Option<PathBuf>,
    /// Directory for daily-rotated log files.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve from the environment, falling back to `config_log_dir` and
    /// then the platform data directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self {
            log_path: env_path(LOG_PATH_ENV),
            log_dir: env_path(LOG_DIR_ENV)
                .or(config_log_dir)
                .or_else(default_log_dir),
        }
    }

    fn appender(&self) -> anyhow::Result<Option<RollingFileAppender>> {
        let (dir, prefix, rotation) = if let Some(path) = &self.log_path {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .context("log path has no file name")?;
            (dir.to_path_buf(), name.to_string(), Rotation::NEVER)
        } else if let Some(dir) = &self.log_dir {
            (dir.clone(), LOG_FILE_PREFIX.to_string(), Rotation::DAILY)
        } else {
            return Ok(None);
        };

        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;

        let mut builder = RollingFileAppender::builder()
            .rotation(rotation.clone())
            .filename_prefix(prefix);
        if rotation != Rotation::NEVER {
            builder = builder.filename_suffix(LOG_FILE_SUFFIX);
        }
        let appender = builder
            .build(&dir)
            .with_context(|| format!("failed to open log file in {}", dir.display()))?;
        Ok(Some(appender))
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn default_log_dir() -> Option<PathBuf> {
    seo_lens_core::config::user_data_dir().map(|dir| dir.join("logs").into_std_path_buf())
}

/// Build the event filter.
///
/// `RUST_LOG` wins when set. Otherwise `-q` shows errors only, `-v` debug,
/// `-vv` trace, and the configured level applies.
pub fn env_filter(quiet: bool, verbose: u8, configured: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => configured,
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    EnvFilter::new(level)
}

/// Keeps the background log writer alive; drop it last.
#[derive(Debug)]
pub struct ObservabilityGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// A log file that cannot be opened is reported as a warning on stderr; the
/// command still runs.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<ObservabilityGuard> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let (appender, file_error) = match config.appender() {
        Ok(appender) => (appender, None),
        Err(e) => (None, Some(e)),
    };
    let (file_layer, guard) = match appender {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    if let Some(e) = file_error {
        tracing::warn!(error = %e, "file logging disabled");
    }

    Ok(ObservabilityGuard { _file: guard })
}
