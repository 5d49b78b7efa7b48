//! Light/dark theme preference and its persistence.
//!
//! The engine never sees the theme. Reading and writing the preference are
//! expressed as stillwater effects over an environment that provides a
//! [`PreferenceStore`]; callers decide when to run them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use stillwater::effect::{BoxedEffect, Effect};
use stillwater::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

/// Key under which the theme preference is stored.
pub const THEME_PREFERENCE_KEY: &str = "calculatorTheme";

/// Presentation theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Only an explicit `"light"` selects the light theme; anything else,
    /// including a missing value, is dark.
    pub fn from_preference(value: Option<&str>) -> Self {
        match value {
            Some("light") => Self::Light,
            _ => Self::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from preference storage.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Preference file {path} could not be accessed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Preference file {path} is not a JSON object of strings: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Preference store lock was poisoned")]
    Poisoned,
}

/// Key/value storage for user preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// In-memory store, mainly for tests and embedders without persistence.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let values = self.values.lock().map_err(|_| PreferenceError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.values.lock().map_err(|_| PreferenceError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept in a JSON object file.
///
/// Writes go to a sibling temp file which is then renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonFilePreferences {
    path: PathBuf,
}

impl JsonFilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(PreferenceError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&json).map_err(|source| PreferenceError::Malformed {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());

        let json = serde_json::to_string_pretty(&values).map_err(|source| {
            PreferenceError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        let io_err = |source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        };

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json).map_err(io_err)?;
        fs::rename(&temp_path, &self.path).map_err(io_err)?;
        Ok(())
    }
}

/// Environment capable of reaching a preference store.
pub trait PreferenceEnv {
    fn preferences(&self) -> &dyn PreferenceStore;
}

/// Effect reading the stored theme; missing or unknown values yield dark.
pub fn load_theme<Env>(key: String) -> BoxedEffect<Theme, PreferenceError, Env>
where
    Env: PreferenceEnv + Clone + Send + Sync + 'static,
{
    from_fn(move |env: &Env| -> Result<Theme, PreferenceError> {
        let stored = env.preferences().get(&key)?;
        let theme = Theme::from_preference(stored.as_deref());
        debug!(%theme, key = %key, "theme loaded");
        Ok(theme)
    })
    .boxed()
}

/// Effect writing the theme preference.
pub fn persist_theme<Env>(key: String, theme: Theme) -> BoxedEffect<(), PreferenceError, Env>
where
    Env: PreferenceEnv + Clone + Send + Sync + 'static,
{
    from_fn(move |env: &Env| -> Result<(), PreferenceError> {
        env.preferences().set(&key, theme.as_str())?;
        info!(%theme, key = %key, "theme persisted");
        Ok(())
    })
    .boxed()
}
