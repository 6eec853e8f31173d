use super::*;
use crate::fixtures::{self, SINGLE_DESIGNATION};
use crate::tracing_config::LogFormat;
use rayon::prelude::*;
use std::sync::Arc;
use synlight_syntax::{LibraryConfig, LibraryVersion, SyntaxToken};

#[test]
fn test_kind_is_built_once() {
    let registry = fixtures::registry(2);
    let first = registry.kind::<SingleVariableDesignationSyntaxWrapper>();
    let second = registry.kind::<SingleVariableDesignationSyntaxWrapper>();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.handle().name(), SINGLE_DESIGNATION);

    // One getter and one with-accessor for `Identifier`.
    assert_eq!(registry.stats().synthesized, 2);
    assert_eq!(registry.stats().sentinels, 0);
}

#[test]
fn test_kinds_are_per_registry() {
    let v2 = fixtures::registry(2);
    let v3 = fixtures::registry(3);
    let a = v2.kind::<LocalFunctionStatementSyntaxWrapper>();
    let b = v3.kind::<LocalFunctionStatementSyntaxWrapper>();
    assert!(!Arc::ptr_eq(&a, &b));

    // AttributeLists getter and with-accessor degrade on 2.0 only.
    assert_eq!(v2.stats().sentinels, 2);
    assert_eq!(v3.stats().sentinels, 0);
}

#[test]
fn test_supports() {
    let v1 = fixtures::registry(1);
    let v2 = fixtures::registry(2);
    assert!(!v1.supports::<ParenthesizedVariableDesignationSyntaxWrapper>());
    assert!(v2.supports::<ParenthesizedVariableDesignationSyntaxWrapper>());
    assert!(v2.supports::<VariableDesignationSyntaxWrapper>());
}

#[test]
fn test_feature_report_after_kind_init() {
    let registry = fixtures::registry(2);
    registry.kind::<DiscardDesignationSyntaxWrapper>();
    let report = registry.feature_report();
    assert_eq!(report.len(), 2);
    assert!(report.iter().all(|status| status.available));
    assert!(report
        .iter()
        .all(|status| &*status.property == "UnderscoreToken"));
}

#[test]
fn test_concurrent_first_use() {
    let registry = fixtures::registry(2);
    let nodes: Vec<_> = (0..64)
        .map(|i| fixtures::single_designation(&registry, &format!("v{i}")))
        .collect();

    let renamed: Vec<String> = nodes
        .into_par_iter()
        .map(|node| {
            let wrapper = SingleVariableDesignationSyntaxWrapper::cast(&registry, Some(node)).unwrap();
            let name = wrapper.identifier().unwrap();
            let renamed = wrapper
                .with_identifier(SyntaxToken::identifier(&format!("{}_renamed", name.text())))
                .unwrap();
            renamed.identifier().unwrap().text().to_string()
        })
        .collect();

    assert_eq!(renamed.len(), 64);
    assert_eq!(renamed[0], "v0_renamed");
    assert_eq!(renamed[63], "v63_renamed");

    // Racing kind builds share the accessor cache, so nothing is synthesized
    // twice.
    let stats = registry.stats();
    assert_eq!(stats.synthesized, 2);
    assert_eq!(stats.sentinels, 0);

    let kind = registry.kind::<SingleVariableDesignationSyntaxWrapper>();
    assert!(Arc::ptr_eq(
        &kind,
        &registry.kind::<SingleVariableDesignationSyntaxWrapper>()
    ));
}

#[test]
fn test_concurrent_resolution_of_one_name() {
    let registry = fixtures::registry(2);
    let handles: Vec<TypeHandle> = (0..32)
        .into_par_iter()
        .map(|_| registry.resolve_type(SINGLE_DESIGNATION))
        .collect();
    assert!(handles.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(registry.resolver().resolution_count(), 1);
}

#[test]
fn test_from_config() {
    let config = LibraryConfig::default().with_version(LibraryVersion::new(1, 0));
    let registry = LightupRegistry::from_config(&config).unwrap();
    assert_eq!(registry.library().version(), LibraryVersion::new(1, 0));
    assert!(!registry.supports::<SingleVariableDesignationSyntaxWrapper>());

    let bad = LibraryConfig::default().with_version(LibraryVersion::new(7, 0));
    assert!(LightupRegistry::from_config(&bad).is_err());
}

#[test]
fn test_clones_share_state() {
    let registry = fixtures::registry(2);
    let clone = registry.clone();
    assert!(registry.ptr_eq(&clone));
    assert!(!registry.ptr_eq(&fixtures::registry(2)));

    clone.kind::<SingleVariableDesignationSyntaxWrapper>();
    assert_eq!(registry.stats().synthesized, 2);
    assert!(format!("{registry:?}").contains("kinds: 1"));
}

// The only test in this binary that touches the process-wide registry.
#[test]
fn test_global_registry() {
    let config = LibraryConfig::default().with_version(LibraryVersion::new(2, 0));
    let global = LightupRegistry::global_or_init(&config).unwrap();
    assert_eq!(global.library().version(), LibraryVersion::new(2, 0));
    assert!(LightupRegistry::global().unwrap().ptr_eq(global));

    let again = LightupRegistry::global_or_init(&LibraryConfig::default()).unwrap();
    assert!(again.ptr_eq(global));

    let rejected = LightupRegistry::install(fixtures::registry(3)).unwrap_err();
    assert_eq!(rejected.library().version(), LibraryVersion::new(3, 0));
}

#[test]
fn test_log_format_parse() {
    assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
    assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
    assert_eq!(LogFormat::parse("text"), LogFormat::Text);
    assert_eq!(LogFormat::parse("fancy"), LogFormat::Text);
    assert_eq!(LogFormat::parse(""), LogFormat::Text);
}
