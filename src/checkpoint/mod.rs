//! Checkpoint and resume for calculator sessions.
//!
//! A checkpoint captures the engine state, the operation line and the theme
//! so an in-progress calculation survives a restart. The recovery timer is
//! not captured.

use crate::core::State;
use crate::engine::{Calculator, EngineState, OperationLine};
use crate::shell::{Session, Theme};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable capture of a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    pub state: EngineState,

    pub line: OperationLine,

    pub theme: Theme,
}

impl Checkpoint {
    pub fn capture(session: &Session) -> Self {
        let calculator = session.calculator();
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            state: calculator.state().clone(),
            line: calculator.operation_line().clone(),
            theme: session.theme(),
        }
    }

    /// Check the format version, every engine invariant and that the
    /// operation line agrees with the state.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        self.state
            .check_with_line(&self.line)
            .map_err(CheckpointError::InvalidState)
    }

    /// Engine to resume with. A captured error sentinel resumes as the
    /// initial state.
    pub fn to_calculator(&self) -> Calculator {
        if self.state.is_error() {
            warn!(id = %self.id, "checkpoint captured an error; resuming from initial state");
            return Calculator::new();
        }
        Calculator::from_parts(self.state.clone(), self.line.clone())
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode and validate.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode and validate.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }
}
