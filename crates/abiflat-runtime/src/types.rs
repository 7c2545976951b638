//! Core types for abiflat
//!
//! This module defines the data model shared by the exporter and the CLI:
//! name mappings from logical keys to compiler artifact names, the source
//! roots those artifacts are found under, and the flattened export entries
//! that form the unit of work.

use crate::error::{AbiflatError, Result};
use indexmap::IndexMap;
use serde::{
    de::{self, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// Ordered mapping from logical key to artifact name
///
/// The logical key becomes the output file stem; the artifact name matches
/// the compiler's per-contract folder and file stem. Keys are unique, while
/// several keys may point at the same artifact. Iteration follows insertion
/// order.
///
/// # Examples
///
/// ```
/// use abiflat_runtime::NameMapping;
///
/// let mapping = NameMapping::from_pairs(&[
///     ("perpFeed", "LyraSpotDiffFeed"),
///     ("iapFeed", "LyraSpotDiffFeed"),
/// ])
/// .unwrap();
/// assert_eq!(mapping.len(), 2);
/// assert_eq!(mapping.get("iapFeed"), Some("LyraSpotDiffFeed"));
/// ```
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct NameMapping {
    entries: IndexMap<String, String>,
}

impl NameMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Result<Self> {
        let mut mapping = Self::new();
        for (key, artifact) in pairs {
            mapping.insert(*key, *artifact)?;
        }
        Ok(mapping)
    }

    /// Adds a key, rejecting one that is already mapped
    pub fn insert(&mut self, key: impl Into<String>, artifact: impl Into<String>) -> Result<()> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(AbiflatError::invalid_manifest(format!("duplicate key '{}'", key)));
        }
        self.entries.insert(key, artifact.into());
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'de> Deserialize<'de> for NameMapping {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = NameMapping;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of logical keys to artifact names")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut mapping = NameMapping::new();
                while let Some((key, artifact)) = map.next_entry::<String, String>()? {
                    mapping.insert(key, artifact).map_err(de::Error::custom)?;
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}

/// A compiler output directory together with the contracts taken from it
///
/// `root` is resolved against the base directory unless it is absolute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceRoot {
    root: PathBuf,
    #[serde(default)]
    contracts: NameMapping,
}

impl SourceRoot {
    pub fn new(root: impl Into<PathBuf>, contracts: NameMapping) -> Self {
        Self { root: root.into(), contracts }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn contracts(&self) -> &NameMapping {
        &self.contracts
    }

    /// Flattens the mapping into export entries, in mapping order
    pub fn entries(&self) -> Vec<ExportEntry> {
        self.contracts
            .iter()
            .map(|(key, artifact)| ExportEntry::new(key, artifact, &self.root))
            .collect()
    }
}

/// One `{logical key, artifact name, source root}` record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExportEntry {
    key: String,
    artifact: String,
    root: PathBuf,
}

impl ExportEntry {
    pub fn new(
        key: impl Into<String>,
        artifact: impl Into<String>,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self { key: key.into(), artifact: artifact.into(), root: root.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File name of the flattened ABI, `<key>.json`
    pub fn output_file_name(&self) -> String {
        format!("{}.json", self.key)
    }
}
