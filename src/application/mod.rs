//! Application layer: the calculator session
//!
//! This layer sequences domain operations and enforces session preconditions.

pub mod error;
pub mod session;

pub use error::{ApplicationError, ApplicationResult};
pub use session::Session;
