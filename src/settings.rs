//! User settings
//!
//! A small TOML file in the user config directory:
//!
//! ```toml
//! [ui]
//! theme = "dark"
//! language = "en"
//!
//! [shortcuts]
//! "selection.fill" = "Ctrl+F"
//! ```
//!
//! Only shortcuts that differ from an action's default are written. An empty
//! value unbinds the action. Missing keys keep their defaults.

use macroquad::logging::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::ui::{ActionRegistry, Shortcut, Theme};

/// Languages offered in the panel
pub const LANGUAGES: [&str; 3] = ["en", "fr", "de"];

#[derive(Debug)]
pub enum SettingsError {
    /// No settings file yet
    NotFound(PathBuf),
    Io(String),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::NotFound(path) => write!(f, "not found: {}", path.display()),
            SettingsError::Io(msg) => write!(f, "I/O error: {}", msg),
            SettingsError::Parse(e) => write!(f, "parse error: {}", e),
            SettingsError::Serialize(e) => write!(f, "cannot serialize: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(e) => Some(e),
            SettingsError::Serialize(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e.to_string())
    }
}

impl From<toml::de::Error> for SettingsError {
    fn from(e: toml::de::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl From<toml::ser::Error> for SettingsError {
    fn from(e: toml::ser::Error) -> Self {
        SettingsError::Serialize(e)
    }
}

/// `[ui]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub theme: String,
    pub language: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: Theme::DARK.name.to_string(),
            language: LANGUAGES[0].to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ui: UiSettings,
    /// Action id to shortcut string, as found in the file
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub shortcuts: BTreeMap<String, String>,
}

impl Settings {
    /// `<config dir>/voxsel/settings.toml`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("voxsel").join("settings.toml"))
    }

    #[cfg(target_arch = "wasm32")]
    pub fn default_path() -> Option<PathBuf> {
        None
    }

    pub fn parse(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SettingsError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(&text)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Load from `path`, falling back to defaults (and logging why)
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => {
                info!("settings: read {}", path.display());
                settings
            }
            Err(SettingsError::NotFound(_)) => Self::default(),
            Err(e) => {
                warn!("settings: {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save to `path`, logging the outcome
    pub fn save_logged(&self, path: Option<&Path>) {
        let Some(path) = path else {
            return;
        };
        match self.save(path) {
            Ok(()) => info!("settings: saved {}", path.display()),
            Err(e) => error!("settings: cannot save {}: {}", path.display(), e),
        }
    }

    /// Theme named in the settings, or the default one
    pub fn theme(&self) -> Theme {
        Theme::by_name(&self.ui.theme).unwrap_or_default()
    }

    /// Rebind registry actions from the `[shortcuts]` section. Returns the
    /// number of shortcuts applied.
    pub fn apply_shortcuts(&self, registry: &mut ActionRegistry) -> usize {
        let mut applied = 0;
        for (id, value) in &self.shortcuts {
            if registry.get(id).is_none() {
                warn!("settings: unknown action '{}'", id);
                continue;
            }
            let shortcut = if value.is_empty() {
                None
            } else {
                match Shortcut::parse(value) {
                    Ok(s) => Some(s),
                    Err(e) => {
                        warn!("settings: shortcut for '{}': {}", id, e);
                        continue;
                    }
                }
            };
            match registry.rebind(id, shortcut) {
                Ok(()) => applied += 1,
                Err(e) => warn!("settings: cannot bind '{}' to '{}': {}", id, value, e),
            }
        }
        applied
    }

    /// Replace the `[shortcuts]` section with the registry's customized bindings
    pub fn capture_shortcuts(&mut self, registry: &ActionRegistry) {
        self.shortcuts = registry
            .sorted()
            .into_iter()
            .filter(|a| a.is_customized())
            .map(|a| {
                let value = a.shortcut.as_ref().map(Shortcut::to_config_string).unwrap_or_default();
                (a.id.to_string(), value)
            })
            .collect();
    }
}
