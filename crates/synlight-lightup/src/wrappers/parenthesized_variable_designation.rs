use super::VariableDesignationSyntaxWrapper;
use crate::error::Result;
use crate::wrapper::syntax_wrapper;
use synlight_syntax::SyntaxToken;
use synlight_syntax::typed::CSharpSyntaxNode;

syntax_wrapper! {
    /// A parenthesized designation such as `(a, _, (b, c))`.
    pub struct ParenthesizedVariableDesignationSyntaxWrapper {
        wraps: "CSharp.Syntax.ParenthesizedVariableDesignationSyntax",
        base: CSharpSyntaxNode,
        accessors: ParenthesizedVariableDesignationAccessors,
        properties {
            open_paren_token, with_open_paren_token: SyntaxToken = "OpenParenToken";
            close_paren_token, with_close_paren_token: SyntaxToken = "CloseParenToken";
        }
        separated {
            /// The nested designations.
            variables, with_variables: VariableDesignationSyntaxWrapper = "Variables";
        }
    }
}

impl ParenthesizedVariableDesignationSyntaxWrapper {
    /// Copy with `items` appended to `Variables`.
    pub fn add_variables(
        &self,
        items: impl IntoIterator<Item = VariableDesignationSyntaxWrapper>,
    ) -> Result<Self> {
        let variables = self.variables()?.add_range(items)?;
        self.with_variables(variables)
    }
}
