//! Semantics of propositional formulas: models, evaluation, and the exhaustive analyses and
//! synthesis that are built on top of them.

mod analysis;
mod evaluate;
mod models;
mod parallel;
mod synthesis;
mod table;

pub use analysis::{
    is_contradiction, is_contradiction_with, is_satisfiable, is_satisfiable_with, is_tautology,
    is_tautology_with, truth_table, truth_values,
};
pub use evaluate::evaluate;
pub use models::{all_models, AllModels};
pub use synthesis::{
    synthesize, synthesize_cnf, synthesize_for_all_except_model, synthesize_for_model,
};
pub use table::{render_truth_table, render_truth_table_with};

pub(crate) use evaluate::Program;
pub(crate) use models::num_models;
pub(crate) use parallel::all_indices;

use crate::ast::{is_variable, Formula};
use indexmap::IndexMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticsError {
    #[error("'{0}' is not a valid variable name")]
    InvalidVariable(String),

    #[error("model does not assign a value to variable '{0}'")]
    MissingVariable(String),

    #[error("variable '{0}' appears more than once")]
    DuplicateVariable(String),

    #[error("can't enumerate all models over {0} variables")]
    TooManyVariables(usize),

    #[error("expected a non-empty list of variables")]
    EmptyVariableList,

    #[error("expected a truth table with {expected} entries, got {got}")]
    WrongTableLength { expected: usize, got: usize },
}

/// The configuration for the exhaustive analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// The number of threads used to evaluate formulas over all models. With a single thread,
    /// everything runs on the calling thread.
    pub num_threads: usize,

    /// How many models each worker evaluates at a time.
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { num_threads: 1, chunk_size: 256 }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_threads(mut self, value: usize) -> Self {
        self.num_threads = value;
        self
    }

    pub fn chunk_size(mut self, value: usize) -> Self {
        self.chunk_size = value;
        self
    }
}

/// Returns `true` if every key of `map` is a valid variable name.
pub fn is_model<K: AsRef<str>, S>(map: &IndexMap<K, bool, S>) -> bool {
    map.keys().all(|k| is_variable(k.as_ref()))
}

/// An assignment of truth values to variables.
///
/// Every key of a `Model` is a valid variable name. Iteration follows insertion order. Equality
/// does not depend on the order, though.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model(IndexMap<String, bool>);

impl Model {
    /// Constructs an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a model from pairs of variable names and values. Returns an error if a name is
    /// not a valid variable name, or if it appears more than once.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, SemanticsError>
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        let mut model = Self::new();
        for (name, value) in pairs {
            let name = name.into();
            if model.contains(&name) {
                return Err(SemanticsError::DuplicateVariable(name));
            }
            model.insert(name, value)?;
        }
        Ok(model)
    }

    /// Builds a model from a list of names that were already validated.
    pub(crate) fn from_valid_pairs(pairs: impl IntoIterator<Item = (String, bool)>) -> Self {
        Self(pairs.into_iter().collect())
    }

    /// Assigns `value` to the variable `name`, returning the previous value if there was one.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: bool,
    ) -> Result<Option<bool>, SemanticsError> {
        let name = name.into();
        if !is_variable(&name) {
            return Err(SemanticsError::InvalidVariable(name));
        }
        Ok(self.0.insert(name, value))
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// The variables this model assigns a value to, in insertion order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if the model assigns a value to every variable of `formula`.
    pub fn covers(&self, formula: &Formula) -> bool {
        formula.variables().iter().all(|v| self.contains(v))
    }

    /// Returns the first variable of `formula` (in sorted order) the model does not assign a value
    /// to.
    pub(crate) fn first_missing<'a>(&self, formula: &'a Formula) -> Option<&'a String> {
        formula.variables().iter().find(|v| !self.contains(v))
    }
}

impl TryFrom<IndexMap<String, bool>> for Model {
    type Error = SemanticsError;

    fn try_from(map: IndexMap<String, bool>) -> Result<Self, Self::Error> {
        match map.keys().find(|k| !is_variable(k)) {
            Some(k) => Err(SemanticsError::InvalidVariable(k.clone())),
            None => Ok(Self(map)),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, if value { 'T' } else { 'F' })?;
        }
        write!(f, "}}")
    }
}
