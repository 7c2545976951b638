//! Integration tests for error handling in abiflat-runtime

use abiflat_runtime::AbiflatError;
use std::error::Error;

#[test]
fn test_artifact_not_found_message() {
    let error = AbiflatError::artifact_not_found("out/Matching.sol/Matching.json");

    let error_msg = error.to_string();
    assert!(error_msg.contains("Artifact not found"));
    assert!(error_msg.contains("out/Matching.sol/Matching.json"));
}

#[test]
fn test_malformed_artifact_message() {
    let error = AbiflatError::malformed_artifact("out/A.sol/A.json", "expected value at line 1");

    let error_msg = error.to_string();
    assert!(error_msg.contains("Malformed artifact"));
    assert!(error_msg.contains("out/A.sol/A.json"));
    assert!(error_msg.contains("expected value at line 1"));
}

#[test]
fn test_missing_abi_message() {
    let error = AbiflatError::missing_abi("out/A.sol/A.json");

    let error_msg = error.to_string();
    assert!(error_msg.contains("Missing `abi` field"));
    assert!(error_msg.contains("out/A.sol/A.json"));
}

#[test]
fn test_output_write_keeps_source() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory");
    let error = AbiflatError::output_write("all_abis/cash.json", io_error);

    assert!(error.to_string().contains("all_abis/cash.json"));
    let source = error.source().expect("output write errors carry their io error");
    assert!(source.to_string().contains("no such directory"));
}

#[test]
fn test_invalid_manifest_message() {
    let error = AbiflatError::invalid_manifest("no sources declared");

    assert_eq!(error.to_string(), "Invalid manifest: no sources declared");
}

#[test]
fn test_other_error_message() {
    let error = AbiflatError::other("unexpected error occurred");

    assert_eq!(error.to_string(), "unexpected error occurred");
}

#[test]
fn test_io_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
    let error: AbiflatError = io_error.into();

    let error_msg = error.to_string();
    assert!(error_msg.contains("I/O error"));
    assert!(error_msg.contains("access denied"));
}

#[test]
fn test_error_debug_format() {
    let error = AbiflatError::missing_abi("x.json");
    let debug_output = format!("{:?}", error);

    assert!(debug_output.contains("MissingAbi"));
}
