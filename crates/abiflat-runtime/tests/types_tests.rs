//! Integration tests for the abiflat data model

use abiflat_runtime::{AbiflatError, ExportEntry, NameMapping, SourceRoot};
use std::path::Path;

#[test]
fn test_name_mapping_preserves_insertion_order() {
    let mapping = NameMapping::from_pairs(&[
        ("withdrawal", "WithdrawalModule"),
        ("deposit", "DepositModule"),
        ("trade", "TradeModule"),
    ])
    .unwrap();

    let keys: Vec<&str> = mapping.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["withdrawal", "deposit", "trade"]);
}

#[test]
fn test_name_mapping_rejects_duplicate_key() {
    let result = NameMapping::from_pairs(&[("cash", "CashAsset"), ("cash", "OtherAsset")]);

    match result {
        Err(AbiflatError::InvalidManifest(msg)) => assert!(msg.contains("cash")),
        other => panic!("expected duplicate key error, got {:?}", other),
    }
}

#[test]
fn test_name_mapping_allows_shared_artifacts() {
    let mapping = NameMapping::from_pairs(&[
        ("perpFeed", "LyraSpotDiffFeed"),
        ("iapFeed", "LyraSpotDiffFeed"),
        ("ibpFeed", "LyraSpotDiffFeed"),
    ])
    .unwrap();

    assert_eq!(mapping.len(), 3);
    assert!(mapping.iter().all(|(_, artifact)| artifact == "LyraSpotDiffFeed"));
}

#[test]
fn test_empty_mapping() {
    let mapping = NameMapping::new();
    assert!(mapping.is_empty());
    assert_eq!(mapping.get("anything"), None);
}

#[test]
fn test_source_root_entries_follow_mapping() {
    let mapping = NameMapping::from_pairs(&[("srm", "StandardManager"), ("pmrm", "PMRM")]).unwrap();
    let source = SourceRoot::new("lib/v2-core/out", mapping);

    let entries = source.entries();
    assert_eq!(
        entries,
        vec![
            ExportEntry::new("srm", "StandardManager", "lib/v2-core/out"),
            ExportEntry::new("pmrm", "PMRM", "lib/v2-core/out"),
        ]
    );
    assert_eq!(source.root(), Path::new("lib/v2-core/out"));
}

#[test]
fn test_export_entry_output_file_name() {
    let entry = ExportEntry::new("subAccountCreator", "SubAccountCreator", "out");
    assert_eq!(entry.output_file_name(), "subAccountCreator.json");
}

#[test]
fn test_name_mapping_json_shape() {
    let mapping = NameMapping::from_pairs(&[("b", "B"), ("a", "A")]).unwrap();

    let json = serde_json::to_string(&mapping).unwrap();
    assert_eq!(json, r#"{"b":"B","a":"A"}"#);

    let back: NameMapping = serde_json::from_str(&json).unwrap();
    assert_eq!(back, mapping);
}

#[test]
fn test_name_mapping_deserialize_rejects_duplicate_key() {
    let result = serde_json::from_str::<NameMapping>(r#"{"cash":"CashAsset","cash":"Other"}"#);

    let error = result.unwrap_err();
    assert!(error.to_string().contains("duplicate key 'cash'"));
}

#[test]
fn test_source_root_contracts_default_to_empty() {
    let source: SourceRoot = serde_json::from_str(r#"{"root": "out"}"#).unwrap();
    assert!(source.contracts().is_empty());
    assert!(source.entries().is_empty());
}
