use super::*;
use crate::config::{MANIFEST_ENV, VERSION_ENV};
use std::collections::HashMap;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn test_default_loads_latest() {
    let config = LibraryConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config, LibraryConfig::default());
    let library = config.load().unwrap();
    assert_eq!(library.version(), embedded::latest_version());
}

#[test]
fn test_version_variable() {
    let config = LibraryConfig::from_lookup(lookup(&[(VERSION_ENV, "1.0")])).unwrap();
    assert_eq!(config.version, Some(LibraryVersion::new(1, 0)));
    let library = config.load().unwrap();
    assert!(!library.contains_type("CSharp.Syntax.LocalFunctionStatementSyntax"));
}

#[test]
fn test_blank_variables_are_unset() {
    let config =
        LibraryConfig::from_lookup(lookup(&[(VERSION_ENV, "  "), (MANIFEST_ENV, "")])).unwrap();
    assert_eq!(config, LibraryConfig::default());
}

#[test]
fn test_invalid_version_variable() {
    let err = LibraryConfig::from_lookup(lookup(&[(VERSION_ENV, "two")])).unwrap_err();
    assert_eq!(err, SyntaxError::InvalidVersion("two".to_string()));
}

#[test]
fn test_unbundled_version_fails_on_load() {
    let config = LibraryConfig::default().with_version(LibraryVersion::new(7, 0));
    assert_eq!(
        config.load().unwrap_err(),
        SyntaxError::UnknownVersion("7.0".to_string())
    );
}

#[test]
fn test_manifest_path_wins() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.json");
    let manifest = LibraryManifest {
        name: "custom".to_string(),
        version: LibraryVersion::new(5, 1),
        types: vec![TypeManifest::new("Only").property("Token", ValueType::Token)],
    };
    std::fs::write(&path, manifest.to_json().unwrap()).unwrap();

    let path_text = path.to_string_lossy().into_owned();
    let config = LibraryConfig::from_lookup(lookup(&[
        (MANIFEST_ENV, path_text.as_str()),
        (VERSION_ENV, "1.0"),
    ]))
    .unwrap();
    let library = config.load().unwrap();
    assert_eq!(library.name(), "custom");
    assert_eq!(library.version(), LibraryVersion::new(5, 1));
    assert_eq!(library.type_count(), 1);
}

#[test]
fn test_missing_manifest_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = LibraryConfig::default().with_manifest_path(dir.path().join("absent.json"));
    assert!(matches!(config.load().unwrap_err(), SyntaxError::Io(_)));
}
