//! Binary operations and the faults they can raise.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Arithmetic faults. These never escape the engine as errors; they are
/// turned into the `Error` display sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Fault {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Result is not a finite number")]
    NonFinite,
}

/// The four immediate-execution operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Symbol shown in the operation display.
    ///
    /// Subtraction uses U+2212 MINUS SIGN, not the ASCII hyphen.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "\u{2212}",
            Self::Multiply => "\u{00d7}",
            Self::Divide => "\u{00f7}",
        }
    }

    /// Action name as used by button bindings (`add`, `subtract`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// Look an operation up by its action name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Apply the operation (pure).
    ///
    /// A zero divisor (either sign) is a `DivisionByZero` fault; any other
    /// non-finite result is `NonFinite`.
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, Fault> {
        let value = match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => {
                if rhs == 0.0 {
                    return Err(Fault::DivisionByZero);
                }
                lhs / rhs
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(Fault::NonFinite)
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
