//! Export driver
//!
//! Walks every manifest entry, reads its artifact and writes the flattened
//! ABI. Each entry yields its own `Result`; the [`FailurePolicy`] decides
//! whether the walk stops at the first failure.

use crate::{
    artifact::{artifact_path, read_abi, write_abi},
    manifest::Manifest,
};
use abiflat_runtime::{AbiflatError, ExportEntry, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What to do once an entry fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failed entry; later entries are skipped
    #[default]
    FailFast,
    /// Process every entry and collect all failures
    CollectAll,
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory that relative source roots and the output dir resolve against
    pub base_dir: PathBuf,
    /// Replaces the manifest's output directory when set
    pub output_dir: Option<PathBuf>,
    pub policy: FailurePolicy,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { base_dir: PathBuf::from("."), output_dir: None, policy: FailurePolicy::default() }
    }
}

/// An entry with its paths resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    pub entry: ExportEntry,
    pub artifact_path: PathBuf,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenAbi {
    pub entry: ExportEntry,
    pub output_path: PathBuf,
    pub abi_items: usize,
    pub bytes: usize,
}

#[derive(Debug)]
pub struct EntryFailure {
    pub entry: ExportEntry,
    pub error: AbiflatError,
}

/// Outcome of one export run
#[derive(Debug, Default)]
pub struct ExportReport {
    pub written: Vec<WrittenAbi>,
    pub failures: Vec<EntryFailure>,
    /// Entries never attempted because the run stopped early
    pub skipped: Vec<ExportEntry>,
}

impl ExportReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn first_failure(&self) -> Option<&EntryFailure> {
        self.failures.first()
    }

    /// Turns a failed report into the error of its first failed entry
    pub fn into_result(mut self) -> Result<Self> {
        if self.failures.is_empty() {
            Ok(self)
        } else {
            Err(self.failures.remove(0).error)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Exporter {
    manifest: Manifest,
    options: ExportOptions,
}

impl Exporter {
    pub fn new(manifest: Manifest) -> Self {
        Self { manifest, options: ExportOptions::default() }
    }

    pub fn with_options(manifest: Manifest, options: ExportOptions) -> Self {
        Self { manifest, options }
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Resolved output directory
    pub fn output_dir(&self) -> PathBuf {
        let dir = self.options.output_dir.as_deref().unwrap_or_else(|| self.manifest.output_dir());
        self.options.base_dir.join(dir)
    }

    /// Resolves every entry without touching the filesystem
    pub fn plan(&self) -> Vec<PlannedEntry> {
        for key in self.manifest.colliding_keys() {
            warn!(key = %key, "key declared by several sources, the last one wins");
        }

        let output_dir = self.output_dir();
        self.manifest
            .entries()
            .into_iter()
            .map(|entry| PlannedEntry {
                artifact_path: artifact_path(&self.options.base_dir, &entry),
                output_path: output_dir.join(entry.output_file_name()),
                entry,
            })
            .collect()
    }

    /// Runs the export, printing a progress line per entry
    pub fn export(&self) -> ExportReport {
        self.export_with_progress(|entry| println!("{} {}", entry.key(), entry.artifact()))
    }

    /// Runs the export, calling `progress` before each entry is processed
    pub fn export_with_progress<F>(&self, mut progress: F) -> ExportReport
    where
        F: FnMut(&ExportEntry),
    {
        let mut report = ExportReport::default();
        let mut planned = self.plan().into_iter();

        for item in planned.by_ref() {
            progress(&item.entry);

            match export_entry(&item.artifact_path, &item.output_path) {
                Ok((abi_items, bytes)) => report.written.push(WrittenAbi {
                    entry: item.entry,
                    output_path: item.output_path,
                    abi_items,
                    bytes,
                }),
                Err(error) => {
                    warn!(key = item.entry.key(), error = %error, "entry failed");
                    report.failures.push(EntryFailure { entry: item.entry, error });

                    if self.options.policy == FailurePolicy::FailFast {
                        break;
                    }
                }
            }
        }

        report.skipped = planned.map(|item| item.entry).collect();

        debug!(
            written = report.written.len(),
            failed = report.failures.len(),
            skipped = report.skipped.len(),
            "export finished"
        );

        report
    }
}

/// Reads one artifact and writes its ABI; nothing is written on a read failure
pub fn export_entry(artifact: &Path, output: &Path) -> Result<(usize, usize)> {
    let abi = read_abi(artifact)?;
    let bytes = write_abi(output, &abi)?;
    Ok((abi.len(), bytes))
}
