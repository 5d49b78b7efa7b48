//! Errors raised while building a session.

use thiserror::Error;

/// Errors that can occur when building a [`Session`](crate::shell::Session).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Recovery delay must be greater than zero")]
    ZeroRecoveryDelay,

    #[error("Recovery delay of {millis} ms is out of range")]
    RecoveryDelayOutOfRange { millis: u64 },

    #[error("Preference key must not be empty. Call .preference_key(key) with a non-empty key")]
    EmptyPreferenceKey,
}
