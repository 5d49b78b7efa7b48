//! Tallyho: a sequential keypad calculator engine
//!
//! Tallyho follows a "pure core, imperative shell" layout. The core engine
//! is a pure state machine: typed input events go in, a display snapshot
//! comes out, and division by zero is an in-band `Error` state rather than a
//! returned error. The shell adds what a presentation layer needs around it:
//! key mapping, the timed recovery from `Error`, a persisted light/dark theme
//! and checkpoints.
//!
//! # Core Concepts
//!
//! - **Engine**: `Calculator` applies `InputEvent`s to an `EngineState`
//! - **Guards**: named pure predicates gating equals, toggle and percent
//! - **Session**: engine + recovery timer + theme, driven by an explicit clock
//!
//! This is an immediate-execution calculator: `3 + 4 *` evaluates `3 + 4`
//! before `*` is applied. There is no operator precedence.
//!
//! # Example
//!
//! ```rust
//! use tallyho::shell::Session;
//! use chrono::{Duration, Utc};
//!
//! let mut session = Session::new();
//! let now = Utc::now();
//!
//! for key in ["3", "+", "4", "+", "5", "Enter"] {
//!     session.press_key(key, now);
//! }
//! assert_eq!(session.snapshot().main, "12");
//!
//! for key in ["5", "/", "0", "Enter"] {
//!     session.press_key(key, now);
//! }
//! assert_eq!(session.snapshot().main, "Error");
//!
//! let recovered = session.tick(now + Duration::seconds(2)).unwrap();
//! assert_eq!(recovered.main, "0");
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod engine;
pub mod shell;
pub mod telemetry;

// Re-export commonly used types
pub use builder::{BuildError, SessionBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use core::{Guard, State};
pub use engine::{
    format_number, Calculator, Digit, DisplaySnapshot, EngineState, InputEvent, Operation,
    StepOutcome,
};
pub use shell::{Session, SessionConfig, Theme};
