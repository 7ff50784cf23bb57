//! Configuration loading and discovery.
//!
//! Sources are merged with figment, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. User config: `~/.config/seo-lens/config.<ext>`
//! 3. Project config: `.seo-lens.<ext>` then `seo-lens.<ext>`, from the
//!    closest directory at or above the search root that has any
//! 4. Explicit files (`--config`), in the order given
//! 5. `SEO_LENS_*` environment variables
//!
//! Where `<ext>` is one of `toml`, `yaml`, `yml`, `json`. Project search
//! stops at a directory containing `.git` unless told otherwise.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use seo_lens_core::config::ConfigLoader;
//!
//! let cwd = Utf8PathBuf::from(".");
//! let (config, sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! println!("{:?} from {:?}", config.content_options(), sources.primary_file());
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::DEFAULT_MAX_INPUT_BYTES;
use crate::content::ContentOptions;
use crate::error::{ConfigError, ConfigResult};

/// The configuration for seo-lens.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Log level (`debug`, `info`, `warn`, `error`).
    pub log_level: LogLevel,
    /// Directory for JSONL log files (platform default when unset).
    pub log_dir: Option<Utf8PathBuf>,
    /// Language hint used when a page declares no `lang` attribute.
    pub language: Option<String>,
    /// Default comma-separated keyword list for `keywords` and `audit`.
    pub keywords: Option<String>,
    /// Word limit before a paragraph is flagged (default 150).
    pub long_paragraph_words: Option<usize>,
    /// Word limit before a sentence is flagged (default 25).
    pub long_sentence_words: Option<usize>,
    /// Maximum input size in bytes (default 5 MiB).
    pub max_input_bytes: Option<usize>,
    /// Skip the input size check entirely; `max_input_bytes` is ignored.
    pub disable_input_limit: bool,
}

impl Config {
    /// Content analysis limits, with defaults for anything unset.
    pub fn content_options(&self) -> ContentOptions {
        let defaults = ContentOptions::default();
        ContentOptions {
            long_paragraph_words: self
                .long_paragraph_words
                .unwrap_or(defaults.long_paragraph_words),
            long_sentence_words: self
                .long_sentence_words
                .unwrap_or(defaults.long_sentence_words),
        }
    }

    /// Effective input size limit; `None` when the limit is disabled.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(DEFAULT_MAX_INPUT_BYTES))
        }
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging.
    Debug,
    /// Standard operational information.
    #[default]
    Info,
    /// Potential problems.
    Warn,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// Lowercase name, as accepted by an `EnvFilter`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Which configuration files were loaded.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project files, low to high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Files passed explicitly.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The highest-precedence file that was loaded.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }

    /// Every loaded file, low to high precedence.
    pub fn all_files(&self) -> Vec<&Utf8Path> {
        self.user_file
            .iter()
            .chain(&self.project_files)
            .chain(&self.explicit_files)
            .map(Utf8PathBuf::as_path)
            .collect()
    }
}

const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

const APP_NAME: &str = "seo-lens";

const ENV_PREFIX: &str = "SEO_LENS_";

/// Builder for loading configuration from multiple sources.
#[derive(Debug)]
pub struct ConfigLoader {
    project_search_root: Option<Utf8PathBuf>,
    include_user_config: bool,
    boundary_marker: Option<String>,
    explicit_files: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader with user config enabled and a `.git` boundary.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Walk up from `path` looking for project config files.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Whether to read `~/.config/seo-lens/config.<ext>`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Stop the upward search at a directory containing `marker`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Search all the way to the filesystem root.
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file; later files win.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load and merge every source.
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        if self.include_user_config
            && let Some(user_config) = find_user_config()
        {
            figment = merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        if let Some(root) = &self.project_search_root {
            let project_configs = self.find_project_configs(root);
            for path in &project_configs {
                figment = merge_file(figment, path);
            }
            sources.project_files = project_configs;
        }

        for file in &self.explicit_files {
            figment = merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        // SEO_LENS_LOG_LEVEL=debug, SEO_LENS_KEYWORDS="a, b", ...
        figment = figment.merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            files = sources.all_files().len(),
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Like [`ConfigLoader::load`], but fails when no file exists at all.
    pub fn load_or_error(self) -> ConfigResult<(Config, ConfigSources)> {
        let has_user = self.include_user_config && find_user_config().is_some();
        let has_project = self
            .project_search_root
            .as_ref()
            .is_some_and(|root| !self.find_project_configs(root).is_empty());

        if !has_user && !has_project && self.explicit_files.is_empty() {
            return Err(ConfigError::NotFound);
        }
        self.load()
    }

    /// Config files from the closest directory that has any, dotfiles first.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let found: Vec<Utf8PathBuf> = [format!(".{APP_NAME}"), APP_NAME.to_string()]
                .iter()
                .flat_map(|stem| {
                    CONFIG_EXTENSIONS
                        .iter()
                        .map(move |ext| format!("{stem}.{ext}"))
                })
                .map(|name| dir.join(name))
                .filter(|path| path.is_file())
                .collect();

            if !found.is_empty() {
                return found;
            }

            // A config next to the marker still counts.
            if let Some(marker) = &self.boundary_marker
                && dir.join(marker).exists()
                && dir != start
            {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }
}

fn find_user_config() -> Option<Utf8PathBuf> {
    let dir = user_config_dir()?;
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
        Some("json") => figment.merge(Json::file_exact(path.as_str())),
        _ => figment.merge(Toml::file_exact(path.as_str())),
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

/// User config directory, e.g. `~/.config/seo-lens/` on Linux.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()
}

/// User data directory, e.g. `~/.local/share/seo-lens/` on Linux.
///
/// Log files go under `logs/` here when nothing else is configured.
pub fn user_data_dir() -> Option<Utf8PathBuf> {
    let dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(dirs.data_dir().to_path_buf()).ok()
}
