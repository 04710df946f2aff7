//! Session domain: model, response-shape extraction and storage contract.

pub mod extract;
pub mod model;
pub mod storage;

pub use model::{Session, UserIdentity};
pub use storage::SessionStorage;
