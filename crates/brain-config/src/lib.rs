//! Root directory discovery for the brain memory store (§6.3).

pub mod root;

pub use root::{discover_root, ConfigError};
