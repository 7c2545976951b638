//! Error types for abiflat

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for abiflat operations
pub type Result<T> = std::result::Result<T, AbiflatError>;

/// Main error type for abiflat operations
#[derive(Debug, Error)]
pub enum AbiflatError {
    /// The build artifact for an entry does not exist
    #[error("Artifact not found: {}", path.display())]
    ArtifactNotFound { path: PathBuf },

    /// The artifact exists but is not a JSON object with an `abi` array
    #[error("Malformed artifact {}: {reason}", path.display())]
    MalformedArtifact { path: PathBuf, reason: String },

    /// The artifact has no top-level `abi` field
    #[error("Missing `abi` field in artifact {}", path.display())]
    MissingAbi { path: PathBuf },

    /// The extracted ABI could not be written
    #[error("Failed to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest could not be parsed or failed validation
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Other errors not covered by specific variants
    #[error("{0}")]
    Other(String),
}

impl AbiflatError {
    pub fn artifact_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ArtifactNotFound { path: path.into() }
    }

    pub fn malformed_artifact(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedArtifact { path: path.into(), reason: reason.into() }
    }

    pub fn missing_abi(path: impl Into<PathBuf>) -> Self {
        Self::MissingAbi { path: path.into() }
    }

    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWrite { path: path.into(), source }
    }

    pub fn invalid_manifest(msg: impl Into<String>) -> Self {
        Self::InvalidManifest(msg.into())
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
