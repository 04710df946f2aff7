pub mod config;
pub mod error;
pub mod scope;
pub mod session;
pub mod table;
pub mod transport;

// Re-export common error type
pub use error::{HrmsError, Result};
