//! Storage implementations for session state and configuration.

pub mod atomic_toml;
pub mod file;
pub mod memory;

pub use atomic_toml::AtomicTomlFile;
pub use file::FileSessionStorage;
pub use memory::MemorySessionStorage;
