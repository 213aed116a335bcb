#![deny(clippy::disallowed_methods)]
#![deny(clippy::self_named_module_files)]
#![deny(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::branches_sharing_code)]
#![warn(clippy::cloned_instead_of_copied)]
#![warn(clippy::copy_iterator)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::equatable_if_let)]
#![warn(clippy::explicit_into_iter_loop)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::from_iter_instead_of_collect)]
#![warn(clippy::get_unwrap)]
#![warn(clippy::implicit_clone)]
#![warn(clippy::inconsistent_struct_constructor)]
#![warn(clippy::index_refutable_slice)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::items_after_statements)]
#![warn(clippy::large_types_passed_by_value)]
#![warn(clippy::manual_assert)]
#![warn(clippy::manual_ok_or)]
#![warn(clippy::map_unwrap_or)]
#![warn(clippy::match_wildcard_for_single_variants)]
#![warn(clippy::mixed_read_write_in_expression)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::redundant_pub_crate)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::str_to_string)]
#![warn(clippy::string_to_string)]
#![warn(clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::unnecessary_wraps)]
#![warn(clippy::unnested_or_patterns)]
#![warn(clippy::unused_self)]

//! A propositional logic engine: parsing, evaluation, exhaustive semantic analysis and synthesis
//! of propositional formulas over `~`, `&`, `|`, `->`, `T` and `F`.

#[macro_use]
pub mod ast;
pub mod checker;
pub mod parser;
pub mod semantics;
mod utils;

use ast::{Formula, FormulaError, SubstitutionError};
use parser::{ParserError, Position};
use semantics::SemanticsError;
use thiserror::Error;

pub type PropResult<T> = Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("parser error: {0} (at column {1})")]
    Parser(ParserError, Position),

    #[error(transparent)]
    Formula(#[from] FormulaError),

    #[error(transparent)]
    Substitution(#[from] SubstitutionError),

    #[error(transparent)]
    Semantics(#[from] SemanticsError),
}

/// The configuration for all stages, from parsing to analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub parser: parser::Config,
    pub semantics: semantics::Config,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The semantic facts about a formula, as computed by [`analyze`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub formula: Formula,
    pub is_tautology: bool,
    pub is_contradiction: bool,
    pub is_satisfiable: bool,
}

/// Parses a formula in standard notation, and checks if it is a tautology, a contradiction, or
/// satisfiable.
pub fn analyze(input: &str, options: &Options) -> PropResult<Analysis> {
    let formula = parser::parse_with(input, options.parser)?;
    log::debug!(
        "analyzing '{}' over {} variables",
        formula,
        formula.variables().len()
    );
    let is_tautology = semantics::is_tautology_with(&formula, &options.semantics)?;

    // A tautology can't be a contradiction, so there is no need to check again
    let is_contradiction =
        !is_tautology && semantics::is_contradiction_with(&formula, &options.semantics)?;

    Ok(Analysis {
        formula,
        is_tautology,
        is_contradiction,
        is_satisfiable: !is_contradiction,
    })
}
