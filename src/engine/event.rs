//! Typed input events delivered by the presentation layer.

use super::operation::Operation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single decimal digit, `0` through `9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// Returns `None` for values above 9.
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self(d as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl TryFrom<u8> for Digit {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Digit::new(value).ok_or_else(|| format!("digit out of range: {value}"))
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every event the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum InputEvent {
    Digit(Digit),
    DecimalPoint,
    Operation(Operation),
    Equals,
    Clear,
    ToggleSign,
    Percent,
}

impl InputEvent {
    /// Short name used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Digit(_) => "digit",
            Self::DecimalPoint => "decimal",
            Self::Operation(_) => "operation",
            Self::Equals => "equals",
            Self::Clear => "clear",
            Self::ToggleSign => "toggle",
            Self::Percent => "percent",
        }
    }

    /// Resolve a button action name (`clear`, `toggle`, `percent`, `add`,
    /// `subtract`, `multiply`, `divide`, `equals`, `decimal`).
    pub fn from_action(action: &str) -> Option<Self> {
        match action {
            "clear" => Some(Self::Clear),
            "toggle" => Some(Self::ToggleSign),
            "percent" => Some(Self::Percent),
            "equals" => Some(Self::Equals),
            "decimal" => Some(Self::DecimalPoint),
            other => Operation::from_name(other).map(Self::Operation),
        }
    }
}

impl From<Digit> for InputEvent {
    fn from(digit: Digit) -> Self {
        Self::Digit(digit)
    }
}

impl From<Operation> for InputEvent {
    fn from(op: Operation) -> Self {
        Self::Operation(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_rejects_out_of_range() {
        assert!(Digit::new(9).is_some());
        assert!(Digit::new(10).is_none());
        assert!(Digit::from_char('x').is_none());
    }

    #[test]
    fn digit_char_round_trip() {
        for c in '0'..='9' {
            let digit = Digit::from_char(c).unwrap();
            assert_eq!(digit.as_char(), c);
        }
    }

    #[test]
    fn actions_resolve_to_events() {
        assert_eq!(InputEvent::from_action("toggle"), Some(InputEvent::ToggleSign));
        assert_eq!(
            InputEvent::from_action("divide"),
            Some(InputEvent::Operation(Operation::Divide))
        );
        assert_eq!(InputEvent::from_action("decimal"), Some(InputEvent::DecimalPoint));
        assert_eq!(InputEvent::from_action("sqrt"), None);
    }

    #[test]
    fn out_of_range_digit_fails_to_deserialize() {
        let err = serde_json::from_str::<Digit>("12");
        assert!(err.is_err());
        let ok: Digit = serde_json::from_str("7").unwrap();
        assert_eq!(ok.value(), 7);
    }

    #[test]
    fn event_serializes_with_tag() {
        let event = InputEvent::Digit(Digit::new(4).unwrap());
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"digit","value":4}"#);
        let back: InputEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
