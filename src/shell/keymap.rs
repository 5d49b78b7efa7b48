//! Keyboard input mirroring the on-screen buttons.

use crate::engine::{Digit, InputEvent, Operation};

/// Keys whose default handling the presentation layer should suppress.
pub const CONSUMED_KEYS: [&str; 18] = [
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", "+", "-", "*", "/", "Enter", "Escape",
    "%",
];

/// Translate a key name (as reported by the UI toolkit) into an input event.
pub fn map_key(key: &str) -> Option<InputEvent> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(digit) = Digit::from_char(c) {
            return Some(InputEvent::Digit(digit));
        }
    }

    match key {
        "." => Some(InputEvent::DecimalPoint),
        "+" => Some(InputEvent::Operation(Operation::Add)),
        "-" => Some(InputEvent::Operation(Operation::Subtract)),
        "*" => Some(InputEvent::Operation(Operation::Multiply)),
        "/" => Some(InputEvent::Operation(Operation::Divide)),
        "Enter" | "=" => Some(InputEvent::Equals),
        "Escape" | "c" | "C" => Some(InputEvent::Clear),
        "%" => Some(InputEvent::Percent),
        _ => None,
    }
}

/// Whether the key's default action should be prevented.
///
/// `=`, `c` and `C` are mapped but deliberately not consumed.
pub fn is_consumed(key: &str) -> bool {
    CONSUMED_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_map_to_digit_events() {
        for d in 0..=9u8 {
            let key = d.to_string();
            assert_eq!(map_key(&key), Some(InputEvent::Digit(Digit::new(d).unwrap())));
        }
    }

    #[test]
    fn operators_map_to_operations() {
        assert_eq!(map_key("+"), Some(InputEvent::Operation(Operation::Add)));
        assert_eq!(map_key("-"), Some(InputEvent::Operation(Operation::Subtract)));
        assert_eq!(map_key("*"), Some(InputEvent::Operation(Operation::Multiply)));
        assert_eq!(map_key("/"), Some(InputEvent::Operation(Operation::Divide)));
    }

    #[test]
    fn control_keys() {
        assert_eq!(map_key("Enter"), Some(InputEvent::Equals));
        assert_eq!(map_key("="), Some(InputEvent::Equals));
        assert_eq!(map_key("Escape"), Some(InputEvent::Clear));
        assert_eq!(map_key("c"), Some(InputEvent::Clear));
        assert_eq!(map_key("C"), Some(InputEvent::Clear));
        assert_eq!(map_key("%"), Some(InputEvent::Percent));
        assert_eq!(map_key("."), Some(InputEvent::DecimalPoint));
    }

    #[test]
    fn unknown_keys_are_unmapped() {
        assert_eq!(map_key("a"), None);
        assert_eq!(map_key("Tab"), None);
        assert_eq!(map_key("12"), None);
        assert_eq!(map_key(""), None);
    }

    #[test]
    fn consumed_set_excludes_aliases() {
        assert!(is_consumed("7"));
        assert!(is_consumed("Enter"));
        assert!(is_consumed("%"));
        assert!(!is_consumed("="));
        assert!(!is_consumed("c"));
        assert!(!is_consumed("Tab"));
    }

    #[test]
    fn every_consumed_key_is_mapped() {
        for key in CONSUMED_KEYS {
            assert!(map_key(key).is_some(), "{key} should map to an event");
        }
    }
}
