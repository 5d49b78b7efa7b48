//! Engine, recovery timer and theme wired together for a presentation layer.

use super::config::DEFAULT_RECOVERY_DELAY_MS;
use super::keymap::{is_consumed, map_key};
use super::recovery::RecoveryTimer;
use super::theme::{load_theme, persist_theme, PreferenceEnv, PreferenceError, Theme};
use super::THEME_PREFERENCE_KEY;
use crate::builder::SessionBuilder;
use crate::engine::{Calculator, Digit, DisplaySnapshot, InputEvent, StepOutcome};
use chrono::{DateTime, Duration, Utc};
use stillwater::effect::BoxedEffect;
use tracing::{debug, info, trace, warn};

/// Response to a raw key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyResponse {
    /// The host should suppress the key's default handling.
    pub consumed: bool,
    /// Present when the key mapped to an event.
    pub snapshot: Option<DisplaySnapshot>,
}

/// One calculator session.
///
/// Events are processed one at a time; the caller passes the current time so
/// that recovery is driven by an explicit clock.
#[derive(Debug, Clone)]
pub struct Session {
    calculator: Calculator,
    recovery: RecoveryTimer,
    theme: Theme,
    preference_key: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Session with default configuration.
    pub fn new() -> Self {
        Self::from_parts(
            Calculator::new(),
            RecoveryTimer::new(Duration::milliseconds(DEFAULT_RECOVERY_DELAY_MS as i64)),
            Theme::default(),
            THEME_PREFERENCE_KEY.to_string(),
        )
    }

    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub(crate) fn from_parts(
        calculator: Calculator,
        recovery: RecoveryTimer,
        theme: Theme,
        preference_key: String,
    ) -> Self {
        Self {
            calculator,
            recovery,
            theme,
            preference_key,
        }
    }

    /// Handle one input event.
    ///
    /// Any event that changes the engine supersedes a pending recovery. A
    /// faulted computation arms recovery relative to `now`.
    pub fn dispatch(&mut self, event: InputEvent, now: DateTime<Utc>) -> DisplaySnapshot {
        match self.calculator.apply(event) {
            StepOutcome::Faulted(fault) => {
                match self.recovery.schedule(now) {
                    Some(deadline) => info!(%fault, %deadline, "showing error until recovery"),
                    None => warn!(%fault, "showing error without scheduled recovery"),
                }
            }
            StepOutcome::Applied => {
                if self.recovery.cancel() {
                    debug!(event = event.kind(), "recovery superseded by input");
                }
            }
            StepOutcome::Ignored => {}
        }
        self.calculator.snapshot()
    }

    /// Handle a raw key name.
    pub fn press_key(&mut self, key: &str, now: DateTime<Utc>) -> KeyResponse {
        let consumed = is_consumed(key);
        let snapshot = match map_key(key) {
            Some(event) => Some(self.dispatch(event, now)),
            None => {
                trace!(key, "unmapped key");
                None
            }
        };
        KeyResponse { consumed, snapshot }
    }

    /// Handle an on-screen button: a digit value or an action name.
    pub fn press_button(&mut self, button: &str, now: DateTime<Utc>) -> Option<DisplaySnapshot> {
        let mut chars = button.chars();
        let event = match (chars.next(), chars.next()) {
            (Some('.'), None) => Some(InputEvent::DecimalPoint),
            (Some(c), None) => Digit::from_char(c).map(InputEvent::Digit),
            _ => InputEvent::from_action(button),
        };

        match event {
            Some(event) => Some(self.dispatch(event, now)),
            None => {
                trace!(button, "unknown button");
                None
            }
        }
    }

    /// Advance the clock; clears the engine if recovery is due.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<DisplaySnapshot> {
        if !self.recovery.poll(now) {
            return None;
        }
        info!("recovering from error");
        self.calculator.clear();
        Some(self.calculator.snapshot())
    }

    pub fn snapshot(&self) -> DisplaySnapshot {
        self.calculator.snapshot()
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn recovery_deadline(&self) -> Option<DateTime<Utc>> {
        self.recovery.deadline()
    }

    pub fn recovery_delay(&self) -> Duration {
        self.recovery.delay()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn preference_key(&self) -> &str {
        &self.preference_key
    }

    /// Set the theme without persisting it (e.g. after loading).
    pub fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Flip the theme and return the effect that persists the new value.
    pub fn toggle_theme<Env>(&mut self) -> BoxedEffect<(), PreferenceError, Env>
    where
        Env: PreferenceEnv + Clone + Send + Sync + 'static,
    {
        self.theme = self.theme.toggled();
        debug!(theme = %self.theme, "theme toggled");
        persist_theme(self.preference_key.clone(), self.theme)
    }

    /// Effect reading the stored theme preference for this session's key.
    pub fn stored_theme<Env>(&self) -> BoxedEffect<Theme, PreferenceError, Env>
    where
        Env: PreferenceEnv + Clone + Send + Sync + 'static,
    {
        load_theme(self.preference_key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;
    use crate::engine::Operation;
    use crate::shell::theme::{MemoryPreferences, PreferenceStore};
    use std::sync::Arc;
    use stillwater::effect::Effect;

    #[derive(Clone)]
    struct TestEnv {
        store: Arc<MemoryPreferences>,
    }

    impl PreferenceEnv for TestEnv {
        fn preferences(&self) -> &dyn PreferenceStore {
            self.store.as_ref()
        }
    }

    fn press_all(session: &mut Session, keys: &[&str], now: DateTime<Utc>) {
        for key in keys {
            session.press_key(key, now);
        }
    }

    #[test]
    fn keys_drive_the_engine() {
        let mut session = Session::new();
        let now = Utc::now();
        press_all(&mut session, &["1", "2", "*", "3", "Enter"], now);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.main, "36");
        assert_eq!(snapshot.operation, "12 × 3");
    }

    #[test]
    fn key_response_reports_consumption() {
        let mut session = Session::new();
        let now = Utc::now();

        let response = session.press_key("=", now);
        assert!(!response.consumed);
        assert!(response.snapshot.is_some());

        let response = session.press_key("Tab", now);
        assert!(!response.consumed);
        assert!(response.snapshot.is_none());

        let response = session.press_key("5", now);
        assert!(response.consumed);
        assert_eq!(response.snapshot.unwrap().main, "5");
    }

    #[test]
    fn buttons_accept_values_and_actions() {
        let mut session = Session::new();
        let now = Utc::now();
        for button in ["5", "0", "percent"] {
            session.press_button(button, now);
        }
        assert_eq!(session.snapshot().main, "0.5");
        assert!(session.press_button("sqrt", now).is_none());
        session.press_button(".", now);
        assert_eq!(session.calculator().state().current_input(), "0.5");
    }

    #[test]
    fn error_recovers_after_delay() {
        let mut session = Session::new();
        let start = Utc::now();
        press_all(&mut session, &["5", "/", "0", "Enter"], start);

        assert_eq!(session.snapshot().main, "Error");
        assert_eq!(
            session.recovery_deadline(),
            Some(start + Duration::seconds(2))
        );
        assert!(session.tick(start + Duration::seconds(1)).is_none());

        let snapshot = session.tick(start + Duration::seconds(2)).unwrap();
        assert_eq!(snapshot.main, "0");
        assert_eq!(snapshot.operation, "");
        assert!(session.calculator().state().is_initial());
        assert!(session.recovery_deadline().is_none());
    }

    #[test]
    fn fault_with_unrepresentable_deadline_still_shows_error() {
        let mut session = Session::from_parts(
            Calculator::new(),
            RecoveryTimer::new(Duration::MAX),
            Theme::default(),
            THEME_PREFERENCE_KEY.to_string(),
        );
        let start = Utc::now();
        press_all(&mut session, &["5", "/", "0", "Enter"], start);

        assert_eq!(session.snapshot().main, "Error");
        assert!(session.recovery_deadline().is_none());
        assert!(session.tick(start + Duration::days(30)).is_none());

        press_all(&mut session, &["7"], start);
        assert_eq!(session.snapshot().main, "7");
    }

    #[test]
    fn explicit_input_cancels_recovery() {
        let mut session = Session::new();
        let start = Utc::now();
        press_all(&mut session, &["5", "/", "0", "Enter"], start);
        session.press_key("7", start + Duration::milliseconds(500));

        assert!(session.recovery_deadline().is_none());
        assert!(session.tick(start + Duration::seconds(3)).is_none());
        assert_eq!(session.snapshot().main, "7");
    }

    #[test]
    fn ignored_events_keep_recovery_armed() {
        let mut session = Session::new();
        let start = Utc::now();
        press_all(&mut session, &["5", "/", "0", "Enter", "%"], start);

        assert!(session.recovery_deadline().is_some());
        assert_eq!(session.snapshot().main, "Error");
        assert!(session.tick(start + Duration::seconds(2)).is_some());
    }

    #[test]
    fn dispatch_accepts_typed_events() {
        let mut session = Session::new();
        let now = Utc::now();
        session.dispatch(InputEvent::Digit(Digit::new(9).unwrap()), now);
        let snapshot = session.dispatch(InputEvent::Operation(Operation::Subtract), now);
        assert_eq!(snapshot.operation, "9 −");
    }

    #[tokio::test]
    async fn toggle_theme_persists_new_value() {
        let env = TestEnv {
            store: Arc::new(MemoryPreferences::new()),
        };
        let mut session = Session::new();
        assert_eq!(session.theme(), Theme::Dark);

        session.toggle_theme::<TestEnv>().run(&env).await.unwrap();
        assert_eq!(session.theme(), Theme::Light);

        let mut restarted = Session::new();
        let stored = restarted.stored_theme::<TestEnv>().run(&env).await.unwrap();
        restarted.apply_theme(stored);
        assert_eq!(restarted.theme(), Theme::Light);
    }
}
