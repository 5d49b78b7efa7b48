//! The pure transition function: `(state, line, event) -> step`.
//!
//! Nothing here keeps time or performs I/O. A division by zero is reported
//! as `StepOutcome::Faulted` so the shell can schedule recovery; the engine
//! itself only ever moves into the `Error` sentinel.

use super::event::{Digit, InputEvent};
use super::format::{canonical_decimal, parse_operand};
use super::operation::{Fault, Operation};
use super::snapshot::OperationLine;
use super::state::{EngineState, ERROR_SENTINEL, INITIAL_INPUT};
use crate::core::{Guard, State};
use tracing::{trace, warn};

/// How an event affected the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The state (or operation line) was replaced.
    Applied,
    /// A precondition rejected the event; nothing changed.
    Ignored,
    /// The computation faulted and the engine now shows the error sentinel.
    Faulted(Fault),
}

impl StepOutcome {
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Faulted(_))
    }
}

/// Result of one transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub state: EngineState,
    pub line: OperationLine,
    pub outcome: StepOutcome,
}

impl Step {
    fn applied(state: EngineState, line: OperationLine) -> Self {
        Self {
            state,
            line,
            outcome: StepOutcome::Applied,
        }
    }

    fn ignored(state: &EngineState, line: &OperationLine) -> Self {
        Self {
            state: state.clone(),
            line: line.clone(),
            outcome: StepOutcome::Ignored,
        }
    }
}

/// Transition rules together with the guards that gate them.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    can_evaluate: Guard<EngineState>,
    can_transform: Guard<EngineState>,
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionTable {
    pub fn new() -> Self {
        Self {
            can_evaluate: Guard::new("has_pending_operand", EngineState::has_pending_operand),
            can_transform: Guard::new("transformable", EngineState::is_transformable),
        }
    }

    /// Apply one event.
    ///
    /// From the error sentinel every event except toggle/percent first resets
    /// to the initial configuration and is then applied to it.
    pub fn apply(&self, state: &EngineState, line: &OperationLine, event: InputEvent) -> Step {
        if state.is_error() {
            return match event {
                InputEvent::ToggleSign | InputEvent::Percent => Step::ignored(state, line),
                _ => {
                    let mut step = self.apply(&EngineState::initial(), &OperationLine::Empty, event);
                    if step.outcome == StepOutcome::Ignored {
                        step.outcome = StepOutcome::Applied;
                    }
                    step
                }
            };
        }

        match event {
            InputEvent::Digit(digit) => Step::applied(submit_digit(state, digit), line.clone()),
            InputEvent::DecimalPoint => match submit_decimal_point(state) {
                Some(next) => Step::applied(next, line.clone()),
                None => Step::ignored(state, line),
            },
            InputEvent::Operation(op) => self.submit_operation(state, line, op),
            InputEvent::Equals => self.evaluate(state, line),
            InputEvent::Clear => Step::applied(EngineState::initial(), OperationLine::Empty),
            InputEvent::ToggleSign => self.toggle_sign(state, line),
            InputEvent::Percent => self.percent(state, line),
        }
    }

    fn submit_operation(&self, state: &EngineState, line: &OperationLine, op: Operation) -> Step {
        let mut next = if self.can_evaluate.check(state) {
            let chained = self.evaluate(state, line);
            if chained.outcome.is_fault() {
                return chained;
            }
            chained.state
        } else {
            state.clone()
        };

        next.previous_input = next.current_input.clone();
        next.pending_operation = Some(op);
        next.awaiting_fresh_entry = true;

        let line = OperationLine::Pending {
            operand: next.previous_input.clone(),
            operation: op,
        };
        Step::applied(next, line)
    }

    fn evaluate(&self, state: &EngineState, line: &OperationLine) -> Step {
        if !self.can_evaluate.check(state) {
            trace!(guard = self.can_evaluate.name(), "equals ignored");
            return Step::ignored(state, line);
        }
        let Some(operation) = state.pending_operation else {
            return Step::ignored(state, line);
        };
        let (Some(lhs), Some(rhs)) = (
            parse_operand(&state.previous_input),
            parse_operand(&state.current_input),
        ) else {
            warn!(
                previous = %state.previous_input,
                current = %state.current_input,
                "operands failed to parse; equals ignored"
            );
            return Step::ignored(state, line);
        };

        match operation.apply(lhs, rhs) {
            Ok(value) => {
                let line = OperationLine::Completed {
                    lhs: state.previous_input.clone(),
                    operation,
                    rhs: state.current_input.clone(),
                };
                let next = EngineState {
                    current_input: canonical_decimal(value),
                    previous_input: String::new(),
                    pending_operation: None,
                    awaiting_fresh_entry: true,
                };
                Step::applied(next, line)
            }
            Err(fault) => {
                let mut next = state.clone();
                next.current_input = ERROR_SENTINEL.to_string();
                Step {
                    state: next,
                    line: line.clone(),
                    outcome: StepOutcome::Faulted(fault),
                }
            }
        }
    }

    fn toggle_sign(&self, state: &EngineState, line: &OperationLine) -> Step {
        if !self.can_transform.check(state) {
            trace!(guard = self.can_transform.name(), "toggle ignored");
            return Step::ignored(state, line);
        }

        let mut next = state.clone();
        next.current_input = match state.current_input.strip_prefix('-') {
            Some(unsigned) => unsigned.to_string(),
            None => format!("-{}", state.current_input),
        };
        Step::applied(next, line.clone())
    }

    fn percent(&self, state: &EngineState, line: &OperationLine) -> Step {
        if !self.can_transform.check(state) {
            trace!(guard = self.can_transform.name(), "percent ignored");
            return Step::ignored(state, line);
        }
        let Some(value) = parse_operand(&state.current_input) else {
            return Step::ignored(state, line);
        };

        let mut next = state.clone();
        next.current_input = canonical_decimal(value / 100.0);
        Step::applied(next, line.clone())
    }
}

/// Apply one event with the default transition table.
pub fn transition(state: &EngineState, line: &OperationLine, event: InputEvent) -> Step {
    TransitionTable::new().apply(state, line, event)
}

fn submit_digit(state: &EngineState, digit: Digit) -> EngineState {
    let mut next = state.clone();
    if next.awaiting_fresh_entry {
        next.current_input.clear();
        next.awaiting_fresh_entry = false;
    }

    if next.current_input == INITIAL_INPUT {
        next.current_input = digit.as_char().to_string();
    } else {
        next.current_input.push(digit.as_char());
    }
    next
}

/// `None` when the input already has a decimal point.
///
/// A fresh entry starts from `"0"`, so the point never stands alone.
fn submit_decimal_point(state: &EngineState) -> Option<EngineState> {
    let mut next = state.clone();
    if next.awaiting_fresh_entry {
        next.current_input = INITIAL_INPUT.to_string();
        next.awaiting_fresh_entry = false;
    }

    if next.current_input.contains('.') {
        return None;
    }
    next.current_input.push('.');
    Some(next)
}
