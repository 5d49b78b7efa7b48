//! The calculator's state value.

use super::operation::Operation;
use crate::core::State;
use serde::{Deserialize, Serialize};

/// Literal shown in place of a result after a faulted computation.
pub const ERROR_SENTINEL: &str = "Error";

/// Value of `current_input` in the initial configuration.
pub const INITIAL_INPUT: &str = "0";

/// Everything the engine remembers between events.
///
/// Only the transition function produces new values; collaborators read it
/// through the accessors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineState {
    pub(crate) current_input: String,
    pub(crate) previous_input: String,
    pub(crate) pending_operation: Option<Operation>,
    pub(crate) awaiting_fresh_entry: bool,
}

/// Phase derived from the four state fields, used for logging and guards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Initial configuration.
    Ready,
    /// A number is being typed.
    Entering,
    /// An operation is pending; the next digit starts its second operand.
    AwaitingOperand,
    /// A result is shown; the next digit starts a new number.
    ShowingResult,
    /// The sentinel is shown until reset.
    Error,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::Entering => "Entering",
            Self::AwaitingOperand => "AwaitingOperand",
            Self::ShowingResult => "ShowingResult",
            Self::Error => "Error",
        }
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::initial()
    }
}

impl EngineState {
    /// `"0"`, no operand, no operation, not awaiting fresh entry.
    pub fn initial() -> Self {
        Self {
            current_input: INITIAL_INPUT.to_string(),
            previous_input: String::new(),
            pending_operation: None,
            awaiting_fresh_entry: false,
        }
    }

    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    pub fn previous_input(&self) -> &str {
        &self.previous_input
    }

    pub fn pending_operation(&self) -> Option<Operation> {
        self.pending_operation
    }

    pub fn awaiting_fresh_entry(&self) -> bool {
        self.awaiting_fresh_entry
    }

    /// An operand has been captured and an operation is waiting for its
    /// right-hand side.
    pub fn has_pending_operand(&self) -> bool {
        !self.previous_input.is_empty() && self.pending_operation.is_some()
    }

    /// Sign toggling and percent only apply to a non-zero, non-error value.
    pub fn is_transformable(&self) -> bool {
        self.current_input != INITIAL_INPUT && self.current_input != ERROR_SENTINEL
    }

    pub fn phase(&self) -> Phase {
        if self.current_input == ERROR_SENTINEL {
            Phase::Error
        } else if *self == Self::initial() {
            Phase::Ready
        } else if self.awaiting_fresh_entry {
            if self.pending_operation.is_some() {
                Phase::AwaitingOperand
            } else {
                Phase::ShowingResult
            }
        } else {
            Phase::Entering
        }
    }
}

impl State for EngineState {
    fn name(&self) -> &str {
        self.phase().name()
    }

    fn is_initial(&self) -> bool {
        *self == Self::initial()
    }

    fn is_error(&self) -> bool {
        self.current_input == ERROR_SENTINEL
    }
}
