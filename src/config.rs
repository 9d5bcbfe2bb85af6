//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/colepio/colepio.toml`
//! 3. Local config: `<dir>/.colepio.toml`
//! 4. Environment variables: `COLEPIO_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, ErrorPolicy};

/// Color handling for help and terminal output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Let `colored` decide (TTY, NO_COLOR, CLICOLOR, CLICOLOR_FORCE)
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Install this mode as the process-wide `colored` override.
    pub fn apply(self) {
        match self {
            ColorMode::Auto => colored::control::unset_override(),
            ColorMode::Always => colored::control::set_override(true),
            ColorMode::Never => colored::control::set_override(false),
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

fn parse_policy(value: &str) -> Option<ErrorPolicy> {
    match value.to_ascii_lowercase().as_str() {
        "fail-fast" | "fail_fast" => Some(ErrorPolicy::FailFast),
        "collect" => Some(ErrorPolicy::Collect),
        _ => None,
    }
}

/// Unified configuration for a colepio CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Render help on `-h`/`--help` instead of dispatching
    pub generate_help: bool,
    /// Show `{type}` next to argument names in help
    pub display_help_types: bool,
    pub color: ColorMode,
    pub error_policy: ErrorPolicy,
    /// 0 warn, 1 info, 2 debug, 3+ trace
    pub verbosity: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            generate_help: true,
            display_help_types: false,
            color: ColorMode::Auto,
            error_policy: ErrorPolicy::FailFast,
            verbosity: 0,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified, inherit").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub generate_help: Option<bool>,
    pub display_help_types: Option<bool>,
    pub color: Option<ColorMode>,
    pub error_policy: Option<ErrorPolicy>,
    pub verbosity: Option<u8>,
}

/// Get the XDG config directory for colepio.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "colepio").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("colepio.toml"))
}

/// Get the path to the local config file in `dir`.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".colepio.toml")
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> ApplicationResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    parse_raw_settings(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn parse_raw_settings(content: &str) -> Result<RawSettings, toml::de::Error> {
    toml::from_str(content)
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            generate_help: overlay.generate_help.unwrap_or(self.generate_help),
            display_help_types: overlay
                .display_help_types
                .unwrap_or(self.display_help_types),
            color: overlay.color.unwrap_or(self.color),
            error_policy: overlay.error_policy.unwrap_or(self.error_policy),
            verbosity: overlay.verbosity.unwrap_or(self.verbosity),
        }
    }

    /// Parse TOML content and merge it onto the defaults.
    pub fn from_toml_str(content: &str) -> ApplicationResult<Self> {
        let raw = parse_raw_settings(content).map_err(|e| ApplicationError::Config {
            message: format!("parse: {}", e),
        })?;
        Ok(Self::default().merge_with(&raw))
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.colepio.toml`
    pub fn load(local_dir: Option<&Path>) -> ApplicationResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("local config: {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply COLEPIO_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> ApplicationResult<Self> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("COLEPIO"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_bool("generate_help") {
            settings.generate_help = val;
        }
        if let Ok(val) = config.get_bool("display_help_types") {
            settings.display_help_types = val;
        }
        if let Ok(val) = config.get_string("color") {
            settings.color = ColorMode::parse(&val).ok_or_else(|| ApplicationError::Config {
                message: format!("COLEPIO_COLOR: unknown color mode '{}'", val),
            })?;
        }
        if let Ok(val) = config.get_string("error_policy") {
            settings.error_policy = parse_policy(&val).ok_or_else(|| ApplicationError::Config {
                message: format!("COLEPIO_ERROR_POLICY: unknown policy '{}'", val),
            })?;
        }
        if let Ok(val) = config.get_int("verbosity") {
            settings.verbosity = u8::try_from(val.max(0)).unwrap_or(u8::MAX);
        }

        Ok(settings)
    }
}
