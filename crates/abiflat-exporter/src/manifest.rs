//! Export manifest
//!
//! Describes which artifacts to flatten and where the results go. A manifest
//! is read from TOML; without one the built-in defaults are used.

use abiflat_runtime::{AbiflatError, ExportEntry, NameMapping, Result, SourceRoot};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

/// File picked up from the base directory when no manifest is given
pub const MANIFEST_FILE_NAME: &str = "abiflat.toml";

/// Output directory used when the manifest does not name one
pub const DEFAULT_OUTPUT_DIR: &str = "all_abis";

const MATCHING_ROOT: &str = "out";
const MATCHING_CONTRACTS: &[(&str, &str)] = &[
    ("matching", "Matching"),
    ("deposit", "DepositModule"),
    ("trade", "TradeModule"),
    ("transfer", "TransferModule"),
    ("withdrawal", "WithdrawalModule"),
    ("subAccountCreator", "SubAccountCreator"),
];

const CORE_ROOT: &str = "lib/v2-core/out";
const CORE_CONTRACTS: &[(&str, &str)] = &[
    ("subAccounts", "SubAccounts"),
    ("rateModel", "InterestRateModel"),
    ("cash", "CashAsset"),
    ("securityModule", "SecurityModule"),
    ("auction", "DutchAuction"),
    ("srm", "StandardManager"),
    ("srmViewer", "SRMPortfolioViewer"),
    ("stableFeed", "ISpotFeed"),
    ("dataSubmitter", "OracleDataSubmitter"),
    ("optionSettlementHelper", "OptionSettlementHelper"),
    ("perpSettlementHelper", "PerpSettlementHelper"),
    ("option", "OptionAsset"),
    ("perp", "PerpAsset"),
    ("base", "WrappedERC20Asset"),
    ("spotFeed", "LyraSpotFeed"),
    ("perpFeed", "LyraSpotDiffFeed"),
    ("iapFeed", "LyraSpotDiffFeed"),
    ("ibpFeed", "LyraSpotDiffFeed"),
    ("volFeed", "LyraVolFeed"),
    ("rateFeed", "LyraRateFeedStatic"),
    ("forwardFeed", "LyraForwardFeed"),
    ("pmrm", "PMRM"),
    ("pmrmLib", "PMRMLib"),
    ("pmrmViewer", "BasePortfolioViewer"),
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default = "default_output_dir")]
    output_dir: PathBuf,
    #[serde(default)]
    sources: Vec<SourceRoot>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

impl Manifest {
    /// The built-in mappings: the local build output plus the nested
    /// `v2-core` dependency
    pub fn builtin() -> Result<Self> {
        let sources = [(MATCHING_ROOT, MATCHING_CONTRACTS), (CORE_ROOT, CORE_CONTRACTS)]
            .into_iter()
            .map(|(root, contracts)| -> Result<SourceRoot> {
                Ok(SourceRoot::new(root, NameMapping::from_pairs(contracts)?))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { output_dir: default_output_dir(), sources })
    }

    pub fn new(output_dir: impl Into<PathBuf>, sources: Vec<SourceRoot>) -> Result<Self> {
        let manifest = Self { output_dir: output_dir.into(), sources };
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn from_toml_str(input: &str) -> Result<Self> {
        let manifest: Manifest =
            toml::from_str(input).map_err(|err| AbiflatError::invalid_manifest(err.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| {
            AbiflatError::invalid_manifest(format!("cannot read {}: {}", path.display(), err))
        })?;

        debug!(path = %path.display(), "loading manifest");

        Self::from_toml_str(&content)
    }

    /// Loads `<base>/abiflat.toml` when present, the defaults otherwise
    pub fn discover(base: &Path) -> Result<Self> {
        let path = base.join(MANIFEST_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            debug!(base = %base.display(), "no manifest found, using built-in defaults");
            Self::builtin()
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| AbiflatError::other(err.to_string()))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn sources(&self) -> &[SourceRoot] {
        &self.sources
    }

    /// All entries, sources in declaration order, each source in mapping order
    pub fn entries(&self) -> Vec<ExportEntry> {
        self.sources.iter().flat_map(SourceRoot::entries).collect()
    }

    /// Keys declared by more than one source; their outputs overwrite each other
    pub fn colliding_keys(&self) -> Vec<String> {
        let mut seen: IndexMap<&str, usize> = IndexMap::new();
        for source in &self.sources {
            for (key, _) in source.contracts().iter() {
                *seen.entry(key).or_default() += 1;
            }
        }

        seen.into_iter().filter(|(_, count)| *count > 1).map(|(key, _)| key.to_string()).collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(AbiflatError::invalid_manifest("output_dir must not be empty"));
        }

        if self.sources.is_empty() {
            return Err(AbiflatError::invalid_manifest("no sources declared"));
        }

        for source in &self.sources {
            if source.root().as_os_str().is_empty() {
                return Err(AbiflatError::invalid_manifest("source root must not be empty"));
            }

            for (key, artifact) in source.contracts().iter() {
                check_file_stem("key", key)?;
                check_file_stem("artifact name", artifact)?;
            }
        }

        Ok(())
    }
}

/// Keys and artifact names end up as single path components
fn check_file_stem(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AbiflatError::invalid_manifest(format!("empty {}", what)));
    }

    if value == "." || value == ".." || value.contains(['/', '\\']) {
        return Err(AbiflatError::invalid_manifest(format!(
            "{} '{}' must be a plain file name",
            what, value
        )));
    }

    Ok(())
}
