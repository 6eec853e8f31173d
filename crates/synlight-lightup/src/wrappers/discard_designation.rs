use crate::wrapper::syntax_wrapper;
use synlight_syntax::SyntaxToken;
use synlight_syntax::typed::CSharpSyntaxNode;

syntax_wrapper! {
    /// The `_` discard designation.
    pub struct DiscardDesignationSyntaxWrapper {
        wraps: "CSharp.Syntax.DiscardDesignationSyntax",
        base: CSharpSyntaxNode,
        accessors: DiscardDesignationAccessors,
        properties {
            underscore_token, with_underscore_token: SyntaxToken = "UnderscoreToken";
        }
        separated {}
    }
}
