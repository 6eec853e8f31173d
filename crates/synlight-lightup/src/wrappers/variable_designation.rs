use crate::wrapper::syntax_wrapper;
use synlight_syntax::typed::CSharpSyntaxNode;

syntax_wrapper! {
    /// Any variable designation.
    ///
    /// Specific designation kinds convert into this one with `From` and back
    /// with `TryFrom`.
    pub struct VariableDesignationSyntaxWrapper {
        wraps: "CSharp.Syntax.VariableDesignationSyntax",
        base: CSharpSyntaxNode,
        accessors: VariableDesignationAccessors,
        properties {}
        separated {}
    }
}

/// Implements the sibling conversions between the general designation
/// wrapper and a specific one.
macro_rules! designation_conversions {
    ($($specific:ty),* $(,)?) => {
        $(
            impl From<$specific> for VariableDesignationSyntaxWrapper {
                fn from(wrapper: $specific) -> Self {
                    crate::wrapper::SyntaxWrapper::wrapped(&wrapper).upcast()
                }
            }

            impl TryFrom<VariableDesignationSyntaxWrapper> for $specific {
                type Error = crate::error::LightupError;

                fn try_from(wrapper: VariableDesignationSyntaxWrapper) -> crate::error::Result<Self> {
                    wrapper.wrapped.downcast()
                }
            }
        )*
    };
}

designation_conversions!(
    super::SingleVariableDesignationSyntaxWrapper,
    super::DiscardDesignationSyntaxWrapper,
    super::ParenthesizedVariableDesignationSyntaxWrapper,
);
