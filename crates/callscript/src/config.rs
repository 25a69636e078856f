//! Configuration loading
//!
//! Settings are layered, later layers overriding earlier ones:
//! 1. built-in defaults
//! 2. user config: `<config dir>/callscript/callscript.toml`
//! 3. project config: `callscript.toml` in the working directory
//! 4. a file passed explicitly (must exist)
//! 5. environment: `CALLSCRIPT_AJAX_DEBUG`, `CALLSCRIPT_BASE_URL`

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use etcetera::{BaseStrategy, choose_base_strategy};
use log::debug;
use serde::Deserialize;

use crate::behavior::AjaxSettings;


pub const CONFIG_FILE_NAME: &str = "callscript.toml";

const ENV_AJAX_DEBUG: &str = "CALLSCRIPT_AJAX_DEBUG";
const ENV_BASE_URL: &str = "CALLSCRIPT_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Render the client Ajax debug support
    pub ajax_debug_mode: bool,
    /// Base url handed to the client runtime
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ajax_debug_mode: false,
            base_url: ".".to_owned(),
        }
    }
}

/// One configuration layer; unset keys leave the lower layer untouched
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct ConfigLayer {
    ajax_debug_mode: Option<bool>,
    base_url: Option<String>,
}

impl Config {
    /// Load all layers. `explicit` is an additional file given by the user.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let mut discovered = Vec::new();
        if let Some(user) = user_config_path() {
            discovered.push(user);
        }
        discovered.push(PathBuf::from(CONFIG_FILE_NAME));

        for path in discovered.iter().filter(|path| path.is_file()) {
            config.merge_file(path)?;
        }

        if let Some(path) = explicit {
            config.merge_file(path)?;
        }

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Overlay the keys set in the TOML file at `path`
    pub fn merge_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        self.merge_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!("Loaded configuration from {}", path.display());
        Ok(())
    }

    /// Overlay the keys set in a TOML document
    pub fn merge_str(&mut self, content: &str) -> Result<()> {
        let layer: ConfigLayer = toml::from_str(content)?;
        if let Some(debug_mode) = layer.ajax_debug_mode {
            self.ajax_debug_mode = debug_mode;
        }
        if let Some(base_url) = layer.base_url {
            self.base_url = base_url;
        }
        Ok(())
    }

    /// Overlay values from `CALLSCRIPT_*` environment variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var(ENV_AJAX_DEBUG) {
            self.ajax_debug_mode = parse_flag(&value)
                .with_context(|| format!("Invalid value for {ENV_AJAX_DEBUG}"))?;
        }
        if let Ok(value) = std::env::var(ENV_BASE_URL) {
            self.base_url = value;
        }
        Ok(())
    }

    /// Settings consumed by behaviors when rendering headers
    pub fn settings(&self) -> AjaxSettings {
        AjaxSettings {
            debug_mode: self.ajax_debug_mode,
            base_url: self.base_url.clone(),
        }
    }
}

fn user_config_path() -> Option<PathBuf> {
    let strategy = choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("callscript").join(CONFIG_FILE_NAME))
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("expected a boolean, got '{other}'"),
    }
}
