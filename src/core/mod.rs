//! Generic state-machine vocabulary shared by the engine.
//!
//! - States describe themselves via the `State` trait
//! - Guards are named, pure preconditions over a state
//!
//! Nothing in this module performs I/O or keeps time.

mod guard;
mod state;

pub use guard::Guard;
pub use state::State;
