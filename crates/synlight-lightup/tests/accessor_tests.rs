use super::*;
use crate::fixtures::{self, LOCAL_FUNCTION, PARENTHESIZED_DESIGNATION, SINGLE_DESIGNATION};
use std::sync::Arc;
use synlight_syntax::typed::{
    AttributeListSyntax, CSharpSyntaxNode, ExpressionSyntax, PredefinedTypeSyntax,
    TypeParameterConstraintClauseSyntax, TypeSyntax,
};
use synlight_syntax::{
    LibraryManifest, LibraryVersion, SeparatedSyntaxList, SyntaxKind, SyntaxLibrary, SyntaxNode,
    SyntaxToken, SyntaxTokenList, TypeManifest, TypedNode, TypedNodeList, ValueType,
};

fn assert_unavailable<T: std::fmt::Debug>(result: Result<T>, type_name: &str, member: &str) {
    assert_eq!(
        result.unwrap_err(),
        LightupError::FeatureUnavailable {
            type_name: type_name.to_string(),
            member: member.to_string(),
        }
    );
}

#[test]
fn test_getter_reads_property() {
    let registry = fixtures::registry(2);
    let handle = registry.resolve_type(SINGLE_DESIGNATION);
    let identifier = registry
        .synthesizer()
        .property_accessor::<SyntaxToken>(&handle, "Identifier");

    let node = fixtures::single_designation(&registry, "value");
    assert_eq!(identifier(&node).unwrap().text(), "value");
}

#[test]
fn test_getter_rejects_foreign_owner() {
    let registry = fixtures::registry(2);
    let handle = registry.resolve_type(SINGLE_DESIGNATION);
    let identifier = registry
        .synthesizer()
        .property_accessor::<SyntaxToken>(&handle, "Identifier");

    let discard = fixtures::discard_designation(&registry);
    assert_eq!(
        identifier(&discard).unwrap_err(),
        LightupError::invalid_cast("CSharp.Syntax.DiscardDesignationSyntax", SINGLE_DESIGNATION)
    );
}

#[test]
fn test_absent_type_synthesizes_sentinels() {
    let registry = fixtures::registry(1);
    let handle = registry.resolve_type(SINGLE_DESIGNATION);
    assert!(handle.is_absent());

    let synthesizer = registry.synthesizer();
    let getter = synthesizer.property_accessor::<SyntaxToken>(&handle, "Identifier");
    let setter = synthesizer.with_property_accessor::<SyntaxToken>(&handle, "Identifier");
    assert_eq!(
        synthesizer.stats(),
        SynthesisStats {
            synthesized: 2,
            sentinels: 2,
            cache_hits: 0,
        }
    );

    let any_node = fixtures::identifier_name(&registry, "x");
    assert_unavailable(getter(&any_node), SINGLE_DESIGNATION, "Identifier");
    assert_unavailable(
        setter(&any_node, SyntaxToken::identifier("y")),
        SINGLE_DESIGNATION,
        "Identifier",
    );
}

#[test]
fn test_inherited_property_depends_on_version() {
    let v2 = fixtures::registry(2);
    let handle = v2.resolve_type(LOCAL_FUNCTION);
    let getter = v2
        .synthesizer()
        .property_accessor::<TypedNodeList<AttributeListSyntax>>(&handle, "AttributeLists");
    let node = fixtures::local_function(&v2, "f");
    assert_unavailable(getter(&node), LOCAL_FUNCTION, "AttributeLists");

    let v3 = fixtures::registry(3);
    let handle = v3.resolve_type(LOCAL_FUNCTION);
    let getter = v3
        .synthesizer()
        .property_accessor::<TypedNodeList<AttributeListSyntax>>(&handle, "AttributeLists");
    let node = fixtures::local_function(&v3, "f");
    assert!(getter(&node).unwrap().is_empty());
}

#[test]
fn test_mismatched_shape_is_absent() {
    let registry = fixtures::registry(2);
    let handle = registry.resolve_type(SINGLE_DESIGNATION);
    let getter = registry
        .synthesizer()
        .property_accessor::<SyntaxTokenList>(&handle, "Identifier");
    let node = fixtures::single_designation(&registry, "x");
    assert_unavailable(getter(&node), SINGLE_DESIGNATION, "Identifier");
    assert_eq!(registry.stats().sentinels, 1);
}

#[test]
fn test_getter_accepts_more_derived_declaration() {
    let registry = fixtures::registry(2);
    let handle = registry.resolve_type(LOCAL_FUNCTION);
    let as_expression = registry
        .synthesizer()
        .property_accessor::<Option<TypedNode<ExpressionSyntax>>>(&handle, "ReturnType");

    let node = fixtures::local_function(&registry, "f");
    let return_type = as_expression(&node).unwrap().unwrap();
    assert_eq!(
        return_type.node().type_name(),
        "CSharp.Syntax.PredefinedTypeSyntax"
    );
}

#[test]
fn test_with_accessor_requires_assignable_value() {
    let registry = fixtures::registry(2);
    let handle = registry.resolve_type(LOCAL_FUNCTION);
    let synthesizer = registry.synthesizer();
    let node = fixtures::local_function(&registry, "f");

    // Any expression cannot be stored where a type is declared.
    let wider = synthesizer
        .with_property_accessor::<Option<TypedNode<ExpressionSyntax>>>(&handle, "ReturnType");
    assert_unavailable(wider(&node, None), LOCAL_FUNCTION, "ReturnType");

    let narrower = synthesizer
        .with_property_accessor::<Option<TypedNode<PredefinedTypeSyntax>>>(&handle, "ReturnType");
    let int_type = registry
        .library()
        .node("CSharp.Syntax.PredefinedTypeSyntax")
        .unwrap()
        .set("Keyword", SyntaxToken::of(SyntaxKind::IntKeyword))
        .unwrap()
        .build();
    let updated = narrower(&node, TypedNode::cast(int_type.clone())).unwrap();

    let read = synthesizer.property_accessor::<Option<TypedNode<TypeSyntax>>>(&handle, "ReturnType");
    assert_eq!(read(&updated).unwrap().unwrap().node(), &int_type);
    assert_ne!(read(&node).unwrap().unwrap().node(), &int_type);
}

#[test]
fn test_lists_are_invariant() {
    let registry = fixtures::registry(2);
    let handle = registry.resolve_type(LOCAL_FUNCTION);
    let synthesizer = registry.synthesizer();
    let node = fixtures::local_function(&registry, "f");

    let exact = synthesizer
        .property_accessor::<TypedNodeList<TypeParameterConstraintClauseSyntax>>(
            &handle,
            "ConstraintClauses",
        );
    assert!(exact(&node).unwrap().is_empty());

    let widened =
        synthesizer.property_accessor::<TypedNodeList<CSharpSyntaxNode>>(&handle, "ConstraintClauses");
    assert_unavailable(widened(&node), LOCAL_FUNCTION, "ConstraintClauses");
}

#[test]
fn test_null_child_is_not_absence() {
    let registry = fixtures::registry(2);
    let handle = registry.resolve_type(LOCAL_FUNCTION);
    let expression_body = registry
        .synthesizer()
        .property_accessor::<Option<TypedNode<synlight_syntax::typed::ArrowExpressionClauseSyntax>>>(
            &handle,
            "ExpressionBody",
        );
    let node = fixtures::local_function(&registry, "f");
    assert_eq!(expression_body(&node).unwrap(), None);
}

#[test]
fn test_with_accessor_leaves_original_unchanged() {
    let registry = fixtures::registry(2);
    let handle = registry.resolve_type(SINGLE_DESIGNATION);
    let synthesizer = registry.synthesizer();
    let get = synthesizer.property_accessor::<SyntaxToken>(&handle, "Identifier");
    let with = synthesizer.with_property_accessor::<SyntaxToken>(&handle, "Identifier");

    let original = fixtures::single_designation(&registry, "before");
    let updated = with(&original, SyntaxToken::identifier("after")).unwrap();

    assert_eq!(get(&original).unwrap().text(), "before");
    assert_eq!(get(&updated).unwrap().text(), "after");
    assert_eq!(updated.type_name(), SINGLE_DESIGNATION);
}

#[test]
fn test_read_only_property_has_no_with_accessor() {
    let manifest = LibraryManifest {
        name: "frozen".to_string(),
        version: LibraryVersion::new(9, 0),
        types: vec![
            TypeManifest::new("CSharp.Syntax.CSharpSyntaxNode").abstract_type(),
            TypeManifest::new("CSharp.Syntax.VariableDesignationSyntax")
                .with_base("CSharp.Syntax.CSharpSyntaxNode")
                .abstract_type(),
            TypeManifest::new(SINGLE_DESIGNATION)
                .with_base("CSharp.Syntax.VariableDesignationSyntax")
                .read_only_property("Identifier", ValueType::Token),
        ],
    };
    let registry = LightupRegistry::from_library(SyntaxLibrary::from_manifest(&manifest).unwrap());
    let handle = registry.resolve_type(SINGLE_DESIGNATION);
    let synthesizer = registry.synthesizer();

    let node = registry
        .library()
        .node(SINGLE_DESIGNATION)
        .unwrap()
        .set("Identifier", SyntaxToken::identifier("x"))
        .unwrap()
        .build();
    let get = synthesizer.property_accessor::<SyntaxToken>(&handle, "Identifier");
    let with = synthesizer.with_property_accessor::<SyntaxToken>(&handle, "Identifier");

    assert_eq!(get(&node).unwrap().text(), "x");
    assert_unavailable(
        with(&node, SyntaxToken::identifier("y")),
        SINGLE_DESIGNATION,
        "Identifier",
    );
}

#[test]
fn test_synthesis_is_cached() {
    let registry = fixtures::registry(2);
    let handle = registry.resolve_type(SINGLE_DESIGNATION);
    let synthesizer = registry.synthesizer();

    let first = synthesizer.property_accessor::<SyntaxToken>(&handle, "Identifier");
    let second = synthesizer.property_accessor::<SyntaxToken>(&handle, "Identifier");
    assert!(Arc::ptr_eq(&first, &second));

    // A different direction is a different accessor.
    let _with = synthesizer.with_property_accessor::<SyntaxToken>(&handle, "Identifier");
    assert_eq!(
        synthesizer.stats(),
        SynthesisStats {
            synthesized: 2,
            sentinels: 0,
            cache_hits: 1,
        }
    );

    let node = fixtures::single_designation(&registry, "x");
    assert_eq!(first(&node), second(&node));
}

#[test]
fn test_separated_list_accessor_is_invariant() {
    let registry = fixtures::registry(2);
    let handle = registry.resolve_type(PARENTHESIZED_DESIGNATION);
    let synthesizer = registry.synthesizer();
    let a = fixtures::single_designation(&registry, "a");
    let node = fixtures::parenthesized_designation(&registry, vec![a.clone()]);

    let variables = synthesizer.separated_list_accessor(
        &handle,
        "Variables",
        "CSharp.Syntax.VariableDesignationSyntax",
    );
    assert_eq!(variables(&node).unwrap().nodes(), &[a]);

    let narrowed = synthesizer.separated_list_accessor(&handle, "Variables", SINGLE_DESIGNATION);
    assert_unavailable(narrowed(&node), PARENTHESIZED_DESIGNATION, "Variables");
}

#[test]
fn test_library_value_mismatch_is_invalid_cast() {
    let registry = fixtures::registry(2);
    let handle = registry.resolve_type(PARENTHESIZED_DESIGNATION);
    let with_variables = registry.synthesizer().with_separated_list_accessor(
        &handle,
        "Variables",
        "CSharp.Syntax.VariableDesignationSyntax",
    );
    let node = fixtures::parenthesized_designation(&registry, Vec::new());
    let stray: SyntaxNode = fixtures::identifier_name(&registry, "x");

    let err = with_variables(&node, SeparatedSyntaxList::from_nodes(vec![stray])).unwrap_err();
    assert!(err.is_invalid_cast());
    assert!(err.to_string().contains("SeparatedSyntaxList<CSharp.Syntax.VariableDesignationSyntax>"));
}

#[test]
fn test_feature_report() {
    let registry = fixtures::registry(2);
    let synthesizer = registry.synthesizer();
    let local = registry.resolve_type(LOCAL_FUNCTION);
    let single = registry.resolve_type(SINGLE_DESIGNATION);
    synthesizer.property_accessor::<TypedNodeList<AttributeListSyntax>>(&local, "AttributeLists");
    synthesizer.with_property_accessor::<SyntaxToken>(&single, "Identifier");
    synthesizer.property_accessor::<SyntaxToken>(&single, "Identifier");

    let report = synthesizer.feature_report();
    let lines: Vec<String> = report.iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        vec![
            "get CSharp.Syntax.LocalFunctionStatementSyntax.AttributeLists: \
             SyntaxList<CSharp.Syntax.AttributeListSyntax> (unavailable)"
                .to_string(),
            "get CSharp.Syntax.SingleVariableDesignationSyntax.Identifier: SyntaxToken (available)"
                .to_string(),
            "with CSharp.Syntax.SingleVariableDesignationSyntax.Identifier: SyntaxToken (available)"
                .to_string(),
        ]
    );
}

#[test]
fn test_error_messages() {
    let cast = LightupError::invalid_cast("A.B", "C.D");
    assert_eq!(cast.to_string(), "Cannot cast 'A.B' to 'C.D'");
    assert!(cast.is_invalid_cast());
    assert!(!cast.is_feature_unavailable());

    let missing = LightupError::feature_unavailable("C.D", "Name");
    assert_eq!(
        missing.to_string(),
        "'C.D.Name' is not available in this version of the syntax library"
    );
    assert!(missing.is_feature_unavailable());
}

#[test]
fn test_absent_handle_does_not_reuse_resolved_accessor() {
    let registry = fixtures::registry(2);
    let synthesizer = registry.synthesizer();
    let node = fixtures::single_designation(&registry, "x");

    let present = registry.resolve_type(SINGLE_DESIGNATION);
    let working = synthesizer.property_accessor::<SyntaxToken>(&present, "Identifier");
    assert_eq!(working(&node).unwrap().text(), "x");

    let absent = TypeHandle::absent(SINGLE_DESIGNATION);
    let getter = synthesizer.property_accessor::<SyntaxToken>(&absent, "Identifier");
    let setter = synthesizer.with_property_accessor::<SyntaxToken>(&absent, "Identifier");
    assert_unavailable(getter(&node), SINGLE_DESIGNATION, "Identifier");
    assert_unavailable(
        setter(&node, SyntaxToken::identifier("y")),
        SINGLE_DESIGNATION,
        "Identifier",
    );

    // And the other way round: sentinels stay with the absent handle.
    let again = synthesizer.property_accessor::<SyntaxToken>(&present, "Identifier");
    assert!(Arc::ptr_eq(&working, &again));
    let with = synthesizer.with_property_accessor::<SyntaxToken>(&present, "Identifier");
    assert!(with(&node, SyntaxToken::identifier("y")).is_ok());
    assert_eq!(synthesizer.stats().sentinels, 2);
}

#[test]
fn test_feature_report_merges_equivalent_accessors() {
    let registry = fixtures::registry(2);
    let synthesizer = registry.synthesizer();
    let handle = registry.resolve_type("CSharp.Syntax.ParameterListSyntax");

    // Same declared type through two Rust types, with another entry between
    // them in cache order.
    synthesizer.separated_list_accessor(&handle, "Parameters", "CSharp.Syntax.ParameterSyntax");
    synthesizer.property_accessor::<SyntaxToken>(&handle, "OpenParenToken");
    synthesizer.property_accessor::<
        synlight_syntax::TypedSeparatedList<synlight_syntax::typed::ParameterSyntax>,
    >(&handle, "Parameters");
    assert_eq!(synthesizer.stats().synthesized, 3);

    let lines: Vec<String> = synthesizer
        .feature_report()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        lines,
        vec![
            "get CSharp.Syntax.ParameterListSyntax.OpenParenToken: SyntaxToken (available)"
                .to_string(),
            "get CSharp.Syntax.ParameterListSyntax.Parameters: \
             SeparatedSyntaxList<CSharp.Syntax.ParameterSyntax> (available)"
                .to_string(),
        ]
    );
}

#[test]
fn test_syntax_error_mapping() {
    let mismatch = synlight_syntax::SyntaxError::ValueMismatch {
        type_name: "A".to_string(),
        property: "P".to_string(),
        expected: "SyntaxToken".to_string(),
        actual: "a token list".to_string(),
    };
    assert_eq!(
        LightupError::from(mismatch),
        LightupError::invalid_cast("a token list", "SyntaxToken")
    );

    let no_with = synlight_syntax::SyntaxError::NoWithOperation {
        type_name: "A".to_string(),
        property: "P".to_string(),
    };
    assert_eq!(
        LightupError::from(no_with),
        LightupError::feature_unavailable("A", "P")
    );

    let io = synlight_syntax::SyntaxError::Io("denied".to_string());
    match LightupError::from(io) {
        LightupError::FeatureUnavailable { type_name, member } => {
            assert_eq!(type_name, crate::error::LIBRARY_OWNER);
            assert_eq!(member, "I/O error: denied");
        }
        other => panic!("unexpected mapping: {other:?}"),
    }
}
