//! The abstract syntax tree (AST) for propositional formulas.
//!
//! This module also contains utilities for manipulating formulas, like substitutions and the
//! textual representations.

#[macro_use]
mod macros;
mod formula;
mod iter;
pub(crate) mod printer;
mod rule;
mod substitution;
mod symbol;

pub use formula::{Formula, FormulaError, Term};
pub use iter::{Postorder, Preorder};
pub use rule::InferenceRule;
pub use substitution::{OperatorSubstitution, SubstitutionError, VariableSubstitution};
pub use symbol::{is_binary, is_constant, is_unary, is_variable, Operator};
