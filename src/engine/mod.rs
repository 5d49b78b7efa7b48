//! The calculator engine: a pure, sequential, immediate-execution machine.
//!
//! Events go in through [`Calculator::apply`] (or the free [`transition`]
//! function), a [`DisplaySnapshot`] comes out. Division by zero never raises
//! an error to the caller; it moves the engine into the `Error` sentinel and
//! reports [`StepOutcome::Faulted`] so the shell can schedule recovery.

mod calculator;
mod event;
mod format;
mod invariants;
mod operation;
mod snapshot;
mod state;
mod transition;

pub use calculator::Calculator;
pub use event::{Digit, InputEvent};
pub use format::{canonical_decimal, format_number, format_value, parse_operand, MAX_FRACTION_DIGITS};
pub use invariants::StateViolation;
pub use operation::{Fault, Operation};
pub use snapshot::{DisplaySnapshot, OperationLine};
pub use state::{EngineState, Phase, ERROR_SENTINEL, INITIAL_INPUT};
pub use transition::{transition, Step, StepOutcome, TransitionTable};
