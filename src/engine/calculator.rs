//! The engine value owned by a session.

use super::event::{Digit, InputEvent};
use super::operation::Operation;
use super::snapshot::{DisplaySnapshot, OperationLine};
use super::state::EngineState;
use super::transition::{StepOutcome, TransitionTable};
use crate::core::State;
use tracing::{debug, warn};

/// Calculator engine: current state, operation line, and the transition
/// rules that move them.
///
/// # Example
///
/// ```rust
/// use tallyho::engine::{Calculator, Digit, Operation};
///
/// let mut calc = Calculator::new();
/// calc.submit_digit(Digit::new(3).unwrap());
/// calc.submit_operation(Operation::Add);
/// calc.submit_digit(Digit::new(4).unwrap());
/// calc.evaluate();
///
/// let snapshot = calc.snapshot();
/// assert_eq!(snapshot.main, "7");
/// assert_eq!(snapshot.operation, "3 + 4");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    state: EngineState,
    line: OperationLine,
    table: TransitionTable,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an engine from previously captured parts.
    pub fn from_parts(state: EngineState, line: OperationLine) -> Self {
        Self {
            state,
            line,
            table: TransitionTable::new(),
        }
    }

    /// Apply one event and commit the resulting step.
    pub fn apply(&mut self, event: InputEvent) -> StepOutcome {
        let step = self.table.apply(&self.state, &self.line, event);

        match step.outcome {
            StepOutcome::Faulted(fault) => warn!(
                event = event.kind(),
                %fault,
                previous = %self.state.previous_input(),
                "computation faulted"
            ),
            outcome => debug!(
                event = event.kind(),
                from = self.state.name(),
                to = step.state.name(),
                ?outcome,
                "engine transition"
            ),
        }

        self.state = step.state;
        self.line = step.line;
        step.outcome
    }

    pub fn submit_digit(&mut self, digit: Digit) -> StepOutcome {
        self.apply(InputEvent::Digit(digit))
    }

    pub fn submit_decimal_point(&mut self) -> StepOutcome {
        self.apply(InputEvent::DecimalPoint)
    }

    pub fn submit_operation(&mut self, op: Operation) -> StepOutcome {
        self.apply(InputEvent::Operation(op))
    }

    pub fn evaluate(&mut self) -> StepOutcome {
        self.apply(InputEvent::Equals)
    }

    pub fn toggle_sign(&mut self) -> StepOutcome {
        self.apply(InputEvent::ToggleSign)
    }

    pub fn percent(&mut self) -> StepOutcome {
        self.apply(InputEvent::Percent)
    }

    pub fn clear(&mut self) -> StepOutcome {
        self.apply(InputEvent::Clear)
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn operation_line(&self) -> &OperationLine {
        &self.line
    }

    pub fn is_error(&self) -> bool {
        self.state.is_error()
    }

    pub fn snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot::project(&self.state, &self.line)
    }
}
