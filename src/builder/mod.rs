//! Builder API for assembling sessions.

pub mod error;
pub mod session;

pub use error::BuildError;
pub use session::SessionBuilder;
