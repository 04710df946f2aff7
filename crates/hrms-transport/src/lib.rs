//! Reqwest-backed HTTP transport for the HRMS backend.

pub mod rest;
pub mod url;

pub use crate::rest::RestTransport;
pub use crate::url::build_url;
