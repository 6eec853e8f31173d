use crate::wrapper::syntax_wrapper;
use synlight_syntax::SyntaxToken;
use synlight_syntax::typed::CSharpSyntaxNode;

syntax_wrapper! {
    /// A designation introducing one variable, as in `out var x`.
    pub struct SingleVariableDesignationSyntaxWrapper {
        wraps: "CSharp.Syntax.SingleVariableDesignationSyntax",
        base: CSharpSyntaxNode,
        accessors: SingleVariableDesignationAccessors,
        properties {
            /// The variable name.
            identifier, with_identifier: SyntaxToken = "Identifier";
        }
        separated {}
    }
}
