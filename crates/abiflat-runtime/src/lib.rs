//! abiflat Runtime
//!
//! Shared data model and error handling for the abiflat toolkit: the name
//! mappings that tie logical keys to compiler artifacts, the source roots
//! those artifacts live under, and the flattened export entries.

pub mod error;
pub mod types;

// Re-export core types for convenience
pub use error::{AbiflatError, Result};
pub use types::{ExportEntry, NameMapping, SourceRoot};
