//! Invariant checks over `EngineState` and the operation line shown with it.
//!
//! Checks use stillwater's `Validation` so a broken state reports every
//! violated invariant at once instead of stopping at the first.

use super::format::parse_operand;
use super::operation::Operation;
use super::snapshot::OperationLine;
use super::state::{EngineState, ERROR_SENTINEL};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A single broken invariant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StateViolation {
    #[error("Input '{input}' contains more than one decimal point")]
    MultipleDecimalPoints { input: String },

    #[error("Input '{input}' is neither a numeric literal nor the error sentinel")]
    MalformedInput { input: String },

    #[error("Operand '{operand}' captured without a pending operation")]
    OperandWithoutOperation { operand: String },

    #[error("Operation '{operation:?}' pending without a captured operand")]
    OperationWithoutOperand { operation: Operation },

    #[error("Captured operand '{operand}' is not a valid number")]
    InvalidOperand { operand: String },

    #[error("Operation line operand '{operand}' is not a valid number")]
    InvalidLineOperand { operand: String },

    #[error("Operation line '{operand} {operation:?}' does not match the pending operation")]
    StalePendingLine { operand: String, operation: Operation },

    #[error("Operation line shows a completed calculation while '{operation:?}' is pending")]
    CompletedLineWhilePending { operation: Operation },

    #[error("Operation '{operation:?}' pending but the operation line is empty")]
    MissingPendingLine { operation: Operation },
}

type Check = Validation<(), NonEmptyVec<StateViolation>>;

impl EngineState {
    /// Check all invariants, accumulating every violation.
    pub fn validate(&self) -> Check {
        let checks: Vec<Check> = vec![
            check_decimal_points(&self.current_input),
            check_literal(&self.current_input),
            check_pairing(&self.previous_input, self.pending_operation),
            check_operand(&self.previous_input),
        ];

        Validation::all_vec(checks).map(|_| ())
    }

    /// `validate` flattened into a `Result` with the violations collected.
    pub fn check_invariants(&self) -> Result<(), Vec<StateViolation>> {
        into_result(self.validate())
    }

    /// State and operation line checked together.
    pub fn check_with_line(&self, line: &OperationLine) -> Result<(), Vec<StateViolation>> {
        let checks = vec![self.validate(), line.validate(self)];
        into_result(Validation::all_vec(checks).map(|_| ()))
    }
}

impl OperationLine {
    /// Check that the line agrees with the state it is displayed with.
    ///
    /// A pending line mirrors the captured operand and operation, a completed
    /// line never coexists with a pending operation, and every operand shown
    /// is a finite numeric literal.
    pub fn validate(&self, state: &EngineState) -> Check {
        let checks: Vec<Check> = match self {
            Self::Empty => vec![match state.pending_operation {
                Some(operation) => {
                    Validation::fail(StateViolation::MissingPendingLine { operation })
                }
                None => Validation::success(()),
            }],
            Self::Pending { operand, operation } => {
                let in_sync = state.pending_operation == Some(*operation)
                    && state.previous_input == *operand;
                vec![
                    check_line_operand(operand),
                    if in_sync {
                        Validation::success(())
                    } else {
                        Validation::fail(StateViolation::StalePendingLine {
                            operand: operand.clone(),
                            operation: *operation,
                        })
                    },
                ]
            }
            Self::Completed { lhs, rhs, .. } => vec![
                check_line_operand(lhs),
                check_line_operand(rhs),
                match state.pending_operation {
                    Some(operation) => {
                        Validation::fail(StateViolation::CompletedLineWhilePending { operation })
                    }
                    None => Validation::success(()),
                },
            ],
        };

        Validation::all_vec(checks).map(|_| ())
    }
}

fn into_result(check: Check) -> Result<(), Vec<StateViolation>> {
    match check {
        Validation::Success(()) => Ok(()),
        Validation::Failure(errors) => Err(errors.iter().cloned().collect()),
    }
}

fn check_line_operand(operand: &str) -> Check {
    if is_finite_literal(operand) {
        Validation::success(())
    } else {
        Validation::fail(StateViolation::InvalidLineOperand {
            operand: operand.to_string(),
        })
    }
}

fn check_decimal_points(input: &str) -> Check {
    if input.matches('.').count() > 1 {
        Validation::fail(StateViolation::MultipleDecimalPoints {
            input: input.to_string(),
        })
    } else {
        Validation::success(())
    }
}

fn check_literal(input: &str) -> Check {
    if input == ERROR_SENTINEL || is_numeric_literal(input) {
        Validation::success(())
    } else {
        Validation::fail(StateViolation::MalformedInput {
            input: input.to_string(),
        })
    }
}

fn check_pairing(operand: &str, operation: Option<Operation>) -> Check {
    match (operand.is_empty(), operation) {
        (true, Some(operation)) => {
            Validation::fail(StateViolation::OperationWithoutOperand { operation })
        }
        (false, None) => Validation::fail(StateViolation::OperandWithoutOperation {
            operand: operand.to_string(),
        }),
        _ => Validation::success(()),
    }
}

fn check_operand(operand: &str) -> Check {
    if operand.is_empty() || is_finite_literal(operand) {
        Validation::success(())
    } else {
        Validation::fail(StateViolation::InvalidOperand {
            operand: operand.to_string(),
        })
    }
}

fn is_finite_literal(input: &str) -> bool {
    is_numeric_literal(input) && parse_operand(input).is_some()
}

/// Optional leading `-`, decimal digits, at most one `.`, at least one digit.
fn is_numeric_literal(input: &str) -> bool {
    let unsigned = input.strip_prefix('-').unwrap_or(input);
    let mut digits = 0;
    let mut points = 0;
    for c in unsigned.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return false,
        }
    }
    digits > 0 && points <= 1
}
