//! Configuration for tabslide tab bars.
//!
//! TOML file + `TABSLIDE_*` environment overrides merged over built-in
//! defaults with figment, then validated before any widget is built.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tabslide::{Selection, SlidingTabs, Tab, TabStyle, TabsError};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// A tab as written in the config: either a bare label or a table with a
/// compact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TabEntry {
    Label(String),
    Detailed {
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        short: Option<String>,
    },
}

impl TabEntry {
    pub fn label(&self) -> &str {
        match self {
            Self::Label(label) | Self::Detailed { label, .. } => label,
        }
    }
}

impl From<&TabEntry> for Tab {
    fn from(entry: &TabEntry) -> Self {
        match entry {
            TabEntry::Label(label) => Tab::new(label.clone()),
            TabEntry::Detailed { label, short } => {
                let tab = Tab::new(label.clone());
                match short {
                    Some(short) => tab.with_short(short.clone()),
                    None => tab,
                }
            }
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Tab labels, left to right.
    #[serde(default = "default_tabs")]
    pub tabs: Vec<TabEntry>,

    /// Initially selected tab.
    #[serde(default)]
    pub selected: usize,

    /// Host loop tick interval.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Host loop frame interval.
    #[serde(default = "default_frame_rate_ms")]
    pub frame_rate_ms: u64,

    #[serde(default)]
    pub style: TabStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tabs: default_tabs(),
            selected: 0,
            tick_rate_ms: default_tick_rate_ms(),
            frame_rate_ms: default_frame_rate_ms(),
            style: TabStyle::default(),
        }
    }
}

fn default_tabs() -> Vec<TabEntry> {
    ["First", "Second", "Third"]
        .into_iter()
        .map(|label| TabEntry::Label(label.into()))
        .collect()
}
fn default_tick_rate_ms() -> u64 {
    250
}
fn default_frame_rate_ms() -> u64 {
    16
}

impl Config {
    /// Check everything a tab bar will insist on, plus the loop timings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tabs.len() < 2 {
            return Err(validation(
                "tabs",
                format!("need at least 2 tabs, got {}", self.tabs.len()),
            ));
        }
        for (i, entry) in self.tabs.iter().enumerate() {
            if self.tabs[..i].iter().any(|prev| prev.label() == entry.label()) {
                return Err(validation(
                    "tabs",
                    format!("duplicate label '{}'", entry.label()),
                ));
            }
        }
        if self.selected >= self.tabs.len() {
            return Err(validation(
                "selected",
                format!("{} is out of range for {} tabs", self.selected, self.tabs.len()),
            ));
        }
        if self.tick_rate_ms == 0 {
            return Err(validation("tick_rate_ms", "must be greater than zero".into()));
        }
        if self.frame_rate_ms == 0 {
            return Err(validation("frame_rate_ms", "must be greater than zero".into()));
        }
        Ok(())
    }

    /// Build a tab bar from this config, bound to `selection`.
    pub fn build_tabs(&self, selection: Selection) -> Result<SlidingTabs, TabsError> {
        Ok(SlidingTabs::new(selection, self.tabs.iter().map(Tab::from))?.style(self.style))
    }
}

fn validation(field: &str, reason: String) -> ConfigError {
    ConfigError::Validation {
        field: field.into(),
        reason,
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "tabslide", "tabslide").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("tabslide");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load and validate the config from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load and validate the config from `path` + environment.
///
/// A missing file is not an error: defaults and env vars still apply.
/// Nested keys use a double underscore, e.g. `TABSLIDE_STYLE__BAR_HEIGHT=2`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TABSLIDE_").split("__"))
        .extract()?;
    config.validate()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`, creating parents.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Serialize config to TOML and write it to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}
