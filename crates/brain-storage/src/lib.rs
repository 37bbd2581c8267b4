//! The transactional writer, initializer, boot loader, and validator for
//! the brain memory store -- everything in §4.2, §4.3, §4.4, and §4.6
//! that touches the filesystem.

pub mod boot;
pub mod bwt;
pub mod error;
pub mod fsutil;
pub mod init;
pub mod paths;
pub mod validate;

pub use boot::{boot as run_boot, BootResult, DeclaredScope, DriftMismatch};
pub use bwt::{BwtEngine, BwtReport, BwtResponse};
pub use error::{BrainError, Result};
pub use init::{initialize, InitResult};
pub use paths::IndexPaths;
pub use validate::{validate, ValidateReport, ValidationMode};
