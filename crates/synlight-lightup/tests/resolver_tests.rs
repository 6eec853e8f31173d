use super::*;
use crate::fixtures::{self, LOCAL_FUNCTION, SINGLE_DESIGNATION};

#[test]
fn test_resolve_present_type() {
    let registry = fixtures::registry(2);
    let handle = registry.resolve_type(SINGLE_DESIGNATION);
    assert!(!handle.is_absent());
    assert_eq!(handle.name(), SINGLE_DESIGNATION);
    assert_eq!(handle.syntax_type().unwrap().name(), SINGLE_DESIGNATION);
}

#[test]
fn test_resolve_absent_type_does_not_fail() {
    let registry = fixtures::registry(1);
    let handle = registry.resolve_type(LOCAL_FUNCTION);
    assert!(handle.is_absent());
    assert_eq!(handle.name(), LOCAL_FUNCTION);
    assert!(handle.syntax_type().is_none());

    let node = fixtures::identifier_name(&registry, "x");
    assert!(!handle.can_wrap(&node));
}

#[test]
fn test_resolution_runs_once_per_name() {
    let registry = fixtures::registry(2);
    let resolver = registry.resolver();

    let first = resolver.resolve(SINGLE_DESIGNATION);
    let second = resolver.resolve(SINGLE_DESIGNATION);
    let missing = resolver.resolve("CSharp.Syntax.RecordDeclarationSyntax");
    let missing_again = resolver.resolve("CSharp.Syntax.RecordDeclarationSyntax");

    assert_eq!(first, second);
    assert_eq!(missing, missing_again);
    assert!(std::sync::Arc::ptr_eq(
        first.syntax_type().unwrap(),
        second.syntax_type().unwrap()
    ));
    assert_eq!(resolver.resolution_count(), 2);

    let names: Vec<String> = resolver.handles().iter().map(|h| h.name().to_string()).collect();
    assert_eq!(
        names,
        vec![
            "CSharp.Syntax.RecordDeclarationSyntax".to_string(),
            SINGLE_DESIGNATION.to_string()
        ]
    );
}

#[test]
fn test_can_wrap_accepts_derived_types() {
    let registry = fixtures::registry(2);
    let general = registry.resolve_type("CSharp.Syntax.VariableDesignationSyntax");
    let single = registry.resolve_type(SINGLE_DESIGNATION);
    let node = fixtures::single_designation(&registry, "x");
    let discard = fixtures::discard_designation(&registry);

    assert!(general.can_wrap(&node));
    assert!(general.can_wrap(&discard));
    assert!(single.can_wrap(&node));
    assert!(!single.can_wrap(&discard));
}

#[test]
fn test_handles_do_not_cross_libraries() {
    let first = fixtures::registry(2);
    let second = fixtures::registry(2);
    let handle = first.resolve_type(SINGLE_DESIGNATION);
    let foreign = fixtures::single_designation(&second, "x");
    assert!(!handle.can_wrap(&foreign));
}

#[test]
fn test_absent_handles_compare_by_name() {
    assert_eq!(TypeHandle::absent("A"), TypeHandle::absent("A"));
    assert_ne!(TypeHandle::absent("A"), TypeHandle::absent("B"));
    let debug = format!("{:?}", TypeHandle::absent("A"));
    assert!(debug.contains("absent: true"));
}
