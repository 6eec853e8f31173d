use crate::error::Result;
use crate::wrapper::syntax_wrapper;
use synlight_syntax::typed::{
    ArrowExpressionClauseSyntax, AttributeListSyntax, BlockSyntax, ParameterListSyntax,
    StatementSyntax, TypeParameterConstraintClauseSyntax, TypeParameterListSyntax, TypeSyntax,
};
use synlight_syntax::{SyntaxToken, SyntaxTokenList, TypedNode, TypedNodeList};

syntax_wrapper! {
    /// A function declared inside a block.
    ///
    /// `AttributeLists` is inherited from `StatementSyntax` and only exists
    /// from library 3.0 on; on 2.0 its accessors report the feature as
    /// unavailable while every other property works.
    pub struct LocalFunctionStatementSyntaxWrapper {
        wraps: "CSharp.Syntax.LocalFunctionStatementSyntax",
        base: StatementSyntax,
        accessors: LocalFunctionStatementAccessors,
        properties {
            attribute_lists, with_attribute_lists: TypedNodeList<AttributeListSyntax> = "AttributeLists";
            modifiers, with_modifiers: SyntaxTokenList = "Modifiers";
            return_type, with_return_type: Option<TypedNode<TypeSyntax>> = "ReturnType";
            identifier, with_identifier: SyntaxToken = "Identifier";
            type_parameter_list, with_type_parameter_list: Option<TypedNode<TypeParameterListSyntax>> = "TypeParameterList";
            parameter_list, with_parameter_list: Option<TypedNode<ParameterListSyntax>> = "ParameterList";
            constraint_clauses, with_constraint_clauses: TypedNodeList<TypeParameterConstraintClauseSyntax> = "ConstraintClauses";
            /// Block body; `None` for expression-bodied functions.
            body, with_body: Option<TypedNode<BlockSyntax>> = "Body";
            expression_body, with_expression_body: Option<TypedNode<ArrowExpressionClauseSyntax>> = "ExpressionBody";
            semicolon_token, with_semicolon_token: SyntaxToken = "SemicolonToken";
        }
        separated {}
    }
}

impl LocalFunctionStatementSyntaxWrapper {
    /// Copy with `items` appended to `Modifiers`.
    pub fn add_modifiers(&self, items: impl IntoIterator<Item = SyntaxToken>) -> Result<Self> {
        let modifiers = self
            .modifiers()?
            .iter()
            .cloned()
            .chain(items)
            .collect::<SyntaxTokenList>();
        self.with_modifiers(modifiers)
    }

    /// Copy with `items` appended to `AttributeLists`.
    pub fn add_attribute_lists(
        &self,
        items: impl IntoIterator<Item = TypedNode<AttributeListSyntax>>,
    ) -> Result<Self> {
        let attribute_lists = self.attribute_lists()?.add_range(items);
        self.with_attribute_lists(attribute_lists)
    }
}
