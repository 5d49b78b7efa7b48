//! Core State trait for calculator states.
//!
//! Implementors expose pure inspection methods so that logging, guards and
//! checkpoints can reason about a state without knowing its concrete shape.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure. A state is an immutable value describing where the
/// machine currently is; transitions produce new values rather than mutating.
///
/// # Required Traits
///
/// - `Clone`: transitions build the next state from a copy of the current one
/// - `PartialEq`: tests and guards compare states
/// - `Debug`: states show up in diagnostics
/// - `Serialize` + `Deserialize`: states are checkpointed
///
/// # Example
///
/// ```rust
/// use tallyho::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Lamp {
///     Off,
///     On,
///     Blown,
/// }
///
/// impl State for Lamp {
///     fn name(&self) -> &str {
///         match self {
///             Self::Off => "Off",
///             Self::On => "On",
///             Self::Blown => "Blown",
///         }
///     }
///
///     fn is_initial(&self) -> bool {
///         matches!(self, Self::Off)
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Blown)
///     }
/// }
///
/// assert!(Lamp::Off.is_initial());
/// assert!(Lamp::Blown.is_error());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name of the state (or of the phase it is in) for display/logging.
    fn name(&self) -> &str;

    /// Check if this is the configuration the machine starts in.
    ///
    /// Default implementation returns `false`.
    fn is_initial(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Error states are expected to be transient: the surrounding shell is
    /// responsible for leaving them.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Register {
        Zero,
        Holding(i64),
        Overflowed,
    }

    impl State for Register {
        fn name(&self) -> &str {
            match self {
                Self::Zero => "Zero",
                Self::Holding(_) => "Holding",
                Self::Overflowed => "Overflowed",
            }
        }

        fn is_initial(&self) -> bool {
            matches!(self, Self::Zero)
        }

        fn is_error(&self) -> bool {
            matches!(self, Self::Overflowed)
        }
    }

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    struct Plain;

    impl State for Plain {
        fn name(&self) -> &str {
            "Plain"
        }
    }

    #[test]
    fn name_ignores_payload() {
        assert_eq!(Register::Holding(1).name(), "Holding");
        assert_eq!(Register::Holding(-40).name(), "Holding");
        assert_eq!(Register::Zero.name(), "Zero");
    }

    #[test]
    fn flags_identify_initial_and_error_states() {
        assert!(Register::Zero.is_initial());
        assert!(!Register::Zero.is_error());
        assert!(!Register::Holding(3).is_initial());
        assert!(Register::Overflowed.is_error());
    }

    #[test]
    fn defaults_are_false() {
        assert!(!Plain.is_initial());
        assert!(!Plain.is_error());
    }

    #[test]
    fn state_serializes_correctly() {
        let state = Register::Holding(42);
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: Register = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
