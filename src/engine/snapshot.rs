//! Read-only projection of the engine for rendering.

use super::format::format_number;
use super::operation::Operation;
use super::state::{EngineState, ERROR_SENTINEL};
use serde::{Deserialize, Serialize};

/// What the secondary (operation) display shows.
///
/// Operands are kept unformatted and formatted on projection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationLine {
    #[default]
    Empty,
    /// `"<operand> <symbol>"`, shown while an operation is pending.
    Pending {
        operand: String,
        operation: Operation,
    },
    /// `"<lhs> <symbol> <rhs>"`, shown once after a successful evaluation.
    Completed {
        lhs: String,
        operation: Operation,
        rhs: String,
    },
}

impl OperationLine {
    pub fn render(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Pending { operand, operation } => {
                format!("{} {}", format_number(operand), operation.symbol())
            }
            Self::Completed {
                lhs,
                operation,
                rhs,
            } => format!(
                "{} {} {}",
                format_number(lhs),
                operation.symbol(),
                format_number(rhs)
            ),
        }
    }
}

/// Strings the presentation layer renders after every transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    /// `"Error"` verbatim in the error state, else the formatted input.
    pub main: String,
    pub operation: String,
    pub is_error: bool,
}

impl DisplaySnapshot {
    pub fn project(state: &EngineState, line: &OperationLine) -> Self {
        let is_error = state.current_input() == ERROR_SENTINEL;
        let main = if is_error {
            ERROR_SENTINEL.to_string()
        } else {
            format_number(state.current_input())
        };

        Self {
            main,
            operation: line.render(),
            is_error,
        }
    }
}
