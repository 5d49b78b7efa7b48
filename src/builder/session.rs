//! Builder for constructing sessions.

use crate::builder::error::BuildError;
use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::engine::Calculator;
use crate::shell::{RecoveryTimer, Session, SessionConfig, Theme, MAX_RECOVERY_DELAY_MS};
use std::time::Duration;
use tracing::debug;

/// Builder for [`Session`] with a fluent API.
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    config: SessionConfig,
    calculator: Option<Calculator>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Delay before the error sentinel clears itself.
    pub fn recovery_delay(mut self, delay: Duration) -> Self {
        self.config.recovery_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn preference_key(mut self, key: impl Into<String>) -> Self {
        self.config.preference_key = key.into();
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.config.initial_theme = theme;
        self
    }

    /// Start from an existing engine instead of the initial state.
    pub fn calculator(mut self, calculator: Calculator) -> Self {
        self.calculator = Some(calculator);
        self
    }

    /// Resume the engine and theme captured in a checkpoint.
    ///
    /// The checkpoint is validated first. A captured error sentinel is not
    /// resumed, since its recovery timer did not survive; the session starts
    /// from the initial state instead.
    pub fn resume_from(mut self, checkpoint: &Checkpoint) -> Result<Self, CheckpointError> {
        checkpoint.validate()?;
        debug!(id = %checkpoint.id, "resuming from checkpoint");
        self.config.initial_theme = checkpoint.theme;
        self.calculator = Some(checkpoint.to_calculator());
        Ok(self)
    }

    /// Build the session.
    pub fn build(self) -> Result<Session, BuildError> {
        let millis = self.config.recovery_delay_ms;
        if millis == 0 {
            return Err(BuildError::ZeroRecoveryDelay);
        }
        if millis > MAX_RECOVERY_DELAY_MS {
            return Err(BuildError::RecoveryDelayOutOfRange { millis });
        }
        let delay = chrono::Duration::from_std(Duration::from_millis(millis))
            .map_err(|_| BuildError::RecoveryDelayOutOfRange { millis })?;

        if self.config.preference_key.trim().is_empty() {
            return Err(BuildError::EmptyPreferenceKey);
        }

        Ok(Session::from_parts(
            self.calculator.unwrap_or_default(),
            RecoveryTimer::new(delay),
            self.config.initial_theme,
            self.config.preference_key,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Digit, InputEvent};

    #[test]
    fn default_builder_matches_new_session() {
        let session = SessionBuilder::new().build().unwrap();
        assert_eq!(session.recovery_delay(), chrono::Duration::seconds(2));
        assert_eq!(session.preference_key(), "calculatorTheme");
        assert_eq!(session.theme(), Theme::Dark);
        assert_eq!(session.snapshot(), Session::new().snapshot());
    }

    #[test]
    fn builder_rejects_zero_delay() {
        let result = SessionBuilder::new()
            .recovery_delay(Duration::ZERO)
            .build();
        assert!(matches!(result, Err(BuildError::ZeroRecoveryDelay)));
    }

    #[test]
    fn builder_rejects_out_of_range_delay() {
        let result = SessionBuilder::new()
            .recovery_delay(Duration::from_secs(u64::MAX / 1000))
            .build();
        assert!(matches!(
            result,
            Err(BuildError::RecoveryDelayOutOfRange { .. })
        ));
    }

    #[test]
    fn builder_accepts_delay_up_to_one_day() {
        let session = SessionBuilder::new()
            .recovery_delay(Duration::from_millis(MAX_RECOVERY_DELAY_MS))
            .build()
            .unwrap();
        assert_eq!(session.recovery_delay(), chrono::Duration::days(1));

        let result = SessionBuilder::new()
            .recovery_delay(Duration::from_millis(MAX_RECOVERY_DELAY_MS + 1))
            .build();
        assert_eq!(
            result.err(),
            Some(BuildError::RecoveryDelayOutOfRange {
                millis: MAX_RECOVERY_DELAY_MS + 1
            })
        );
    }

    #[test]
    fn configured_huge_delay_is_rejected() {
        let config =
            SessionConfig::from_json(r#"{"recovery_delay_ms": 10000000000000000}"#).unwrap();
        let result = SessionBuilder::new().config(config).build();
        assert!(matches!(
            result,
            Err(BuildError::RecoveryDelayOutOfRange { millis: 10_000_000_000_000_000 })
        ));
    }

    #[test]
    fn builder_rejects_blank_key() {
        let result = SessionBuilder::new().preference_key("  ").build();
        assert!(matches!(result, Err(BuildError::EmptyPreferenceKey)));
    }

    #[test]
    fn fluent_api_builds_session() {
        let mut calculator = Calculator::new();
        calculator.apply(InputEvent::Digit(Digit::new(4).unwrap()));

        let session = Session::builder()
            .recovery_delay(Duration::from_millis(750))
            .preference_key("theme")
            .theme(Theme::Light)
            .calculator(calculator)
            .build()
            .unwrap();

        assert_eq!(session.recovery_delay(), chrono::Duration::milliseconds(750));
        assert_eq!(session.preference_key(), "theme");
        assert_eq!(session.theme(), Theme::Light);
        assert_eq!(session.snapshot().main, "4");
    }

    #[test]
    fn config_from_json_feeds_builder() {
        let config = SessionConfig::from_json(r#"{"recovery_delay_ms": 100}"#).unwrap();
        let session = SessionBuilder::new().config(config).build().unwrap();
        assert_eq!(session.recovery_delay(), chrono::Duration::milliseconds(100));
    }
}
