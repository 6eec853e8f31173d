//! Wrapper kinds for version-dependent node types.
//!
//! | wrapper | target type | first library version |
//! |---|---|---|
//! | [`VariableDesignationSyntaxWrapper`] | `VariableDesignationSyntax` | 2.0 |
//! | [`SingleVariableDesignationSyntaxWrapper`] | `SingleVariableDesignationSyntax` | 2.0 |
//! | [`DiscardDesignationSyntaxWrapper`] | `DiscardDesignationSyntax` | 2.0 |
//! | [`ParenthesizedVariableDesignationSyntaxWrapper`] | `ParenthesizedVariableDesignationSyntax` | 2.0 |
//! | [`LocalFunctionStatementSyntaxWrapper`] | `LocalFunctionStatementSyntax` | 2.0 |

mod discard_designation;
mod local_function_statement;
mod parenthesized_variable_designation;
mod single_variable_designation;
mod variable_designation;

pub use discard_designation::{DiscardDesignationAccessors, DiscardDesignationSyntaxWrapper};
pub use local_function_statement::{LocalFunctionStatementAccessors, LocalFunctionStatementSyntaxWrapper};
pub use parenthesized_variable_designation::{
    ParenthesizedVariableDesignationAccessors, ParenthesizedVariableDesignationSyntaxWrapper,
};
pub use single_variable_designation::{
    SingleVariableDesignationAccessors, SingleVariableDesignationSyntaxWrapper,
};
pub use variable_designation::{VariableDesignationAccessors, VariableDesignationSyntaxWrapper};
