//! Guard predicates for controlling state transitions.
//!
//! A guard is a named, pure boolean function over a state. Transitions whose
//! guard rejects the current state are skipped without touching the state.

use super::state::State;
use std::fmt;
use std::sync::Arc;

/// Named pure predicate that determines if a transition may execute.
///
/// # Example
///
/// ```rust
/// use tallyho::core::{Guard, State};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// struct Display(String);
///
/// impl State for Display {
///     fn name(&self) -> &str {
///         "Display"
///     }
/// }
///
/// let non_zero = Guard::new("non_zero", |d: &Display| d.0 != "0");
///
/// assert!(non_zero.check(&Display("12".to_string())));
/// assert!(!non_zero.check(&Display("0".to_string())));
/// assert_eq!(non_zero.name(), "non_zero");
/// ```
pub struct Guard<S: State> {
    name: &'static str,
    predicate: Arc<dyn Fn(&S) -> bool + Send + Sync>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and free of side effects.
    pub fn new<F>(name: &'static str, predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            name,
            predicate: Arc::new(predicate),
        }
    }

    /// Check if the guard allows a transition from this state.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }

    /// Name used when logging rejected transitions.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<S: State> Clone for Guard<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S: State> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").field("name", &self.name).finish()
    }
}
