use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Environment, File, FileFormat};
use serde::Deserialize;

use crate::core::naming::Mode;
use crate::utils::{Error, OsirisResult};

const APP_DIR: &str = "osiris";
const CONFIG_STEM: &str = "osiris";
const CONFIG_EXTENSIONS: [&str; 3] = ["yml", "yaml", "toml"];
const ENV_PREFIX: &str = "OSIRIS";

impl Config {
    /// Load settings from `explicit` if given, else from the first config file found in the
    /// user config directory. A missing file is an error either way.
    pub fn init(explicit: Option<&Path>) -> OsirisResult<Self> {
        let path = match explicit {
            Some(p) if !p.is_file() => return Err(Error::ConfigNotFound(p.to_path_buf())),
            Some(p) => p.to_path_buf(),
            None => discover_in(&default_config_dir().unwrap_or_else(|| PathBuf::from(APP_DIR)))?,
        };

        Self::load(&path)
    }

    /// Load `path`, picking the format from its extension. Unknown extensions are tried as
    /// YAML first, then TOML.
    pub fn load(path: &Path) -> OsirisResult<Self> {
        tracing::debug!("Loading config from '{}'", path.display());
        let wrap = |source: config::ConfigError| Error::ConfigFile {
            path: path.to_path_buf(),
            source,
        };

        match format_for(path) {
            Some(format) => Self::from_sources(file_source(path, format)).map_err(wrap),
            None => Self::from_sources(file_source(path, FileFormat::Yaml))
                .or_else(|_| Self::from_sources(file_source(path, FileFormat::Toml)))
                .map_err(wrap),
        }
    }

    fn from_sources(
        file: File<config::FileSourceFile, FileFormat>,
    ) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(file)
            // Add in settings from the environment (with a prefix of OSIRIS)
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

fn file_source(path: &Path, format: FileFormat) -> File<config::FileSourceFile, FileFormat> {
    File::from(path).format(format).required(true)
}

fn format_for(path: &Path) -> Option<FileFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "yml" | "yaml" => Some(FileFormat::Yaml),
        "toml" => Some(FileFormat::Toml),
        _ => None,
    }
}

pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

/// First existing `osiris.{yml,yaml,toml}` in `dir`.
pub fn locate_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{CONFIG_STEM}.{ext}")))
        .find(|candidate| candidate.is_file())
}

/// Like [`locate_in`], but reports the preferred `osiris.yml` path when nothing is found.
fn discover_in(dir: &Path) -> OsirisResult<PathBuf> {
    locate_in(dir).ok_or_else(|| {
        Error::ConfigNotFound(dir.join(format!("{CONFIG_STEM}.{}", CONFIG_EXTENSIONS[0])))
    })
}

// ================================================================================================
// Models
// ================================================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(alias = "seriesYear", alias = "seriesyear")]
    pub series_year: Option<bool>,
    pub scene: Option<bool>,
    #[serde(alias = "uppercaseEpisode", alias = "uppercaseepisode")]
    pub uppercase_episode: Option<bool>,
    pub templates: TemplatesConfig,
    pub regex: RegexConfig,
    pub logs: LogsConfig,
}

// ===============================================================================
// Templates
// ===============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    pub series: Option<String>,
    pub film: Option<String>,
}

impl TemplatesConfig {
    pub fn for_mode(&self, mode: Mode) -> Option<&str> {
        match mode {
            Mode::Series => self.series.as_deref(),
            Mode::Film => self.film.as_deref(),
        }
    }
}

// ===============================================================================
// Regex
// ===============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegexConfig {
    /// Default input pattern for series mode.
    pub series: Option<String>,
    /// Default input pattern for film mode.
    pub film: Option<String>,
    /// Named presets, selectable with `--preset`.
    pub custom: PresetsConfig,
}

impl RegexConfig {
    pub fn for_mode(&self, mode: Mode) -> Option<&str> {
        match mode {
            Mode::Series => self.series.as_deref(),
            Mode::Film => self.film.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PresetsConfig {
    pub series: BTreeMap<String, String>,
    pub film: BTreeMap<String, String>,
}

impl PresetsConfig {
    pub fn for_mode(&self, mode: Mode) -> &BTreeMap<String, String> {
        match mode {
            Mode::Series => &self.series,
            Mode::Film => &self.film,
        }
    }
}

// ===============================================================================
// Logs
// ===============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogsConfig {
    pub level: String,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}
