//! Imperative shell around the pure engine.
//!
//! Everything a presentation layer needs besides drawing: key mapping,
//! the error-recovery timer, the theme preference and a [`Session`] that
//! ties them to a [`Calculator`](crate::engine::Calculator).

pub mod config;
pub mod keymap;
pub mod recovery;
pub mod session;
pub mod theme;

pub use config::{ConfigError, SessionConfig, DEFAULT_RECOVERY_DELAY_MS, MAX_RECOVERY_DELAY_MS};
pub use keymap::{is_consumed, map_key};
pub use recovery::RecoveryTimer;
pub use session::{KeyResponse, Session};
pub use theme::{
    load_theme, persist_theme, JsonFilePreferences, MemoryPreferences, PreferenceEnv,
    PreferenceError, PreferenceStore, Theme, THEME_PREFERENCE_KEY,
};
