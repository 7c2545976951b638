//! abiflat ABI Exporter
//!
//! Pulls the `abi` array out of compiled contract artifacts
//! (`<root>/<Name>.sol/<Name>.json`) and writes each one as
//! `<output_dir>/<key>.json`, keyed by a short logical name, so SDKs and
//! frontends can consume flat ABI files instead of the compiler's tree.
//!
//! ```no_run
//! use abiflat_exporter::{ExportOptions, Exporter, Manifest};
//!
//! let exporter = Exporter::with_options(Manifest::builtin()?, ExportOptions::default());
//! let report = exporter.export();
//! assert!(report.is_success());
//! # Ok::<(), abiflat_exporter::AbiflatError>(())
//! ```

pub mod artifact;
pub mod export;
pub mod manifest;

pub use artifact::{artifact_path, extract_abi, read_abi, to_compact_json, write_abi};
pub use export::{
    export_entry, EntryFailure, ExportOptions, ExportReport, Exporter, FailurePolicy,
    PlannedEntry, WrittenAbi,
};
pub use manifest::{Manifest, DEFAULT_OUTPUT_DIR, MANIFEST_FILE_NAME};

// Re-export runtime types for convenience
pub use abiflat_runtime::{AbiflatError, ExportEntry, NameMapping, Result, SourceRoot};
