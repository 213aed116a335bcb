use super::{Model, SemanticsError};
use crate::{ast::is_variable, utils::first_duplicate};
use std::iter::FusedIterator;

/// Returns the number of models over `num_variables` variables, or an error if that number is too
/// large to be indexed.
pub(crate) fn num_models(num_variables: usize) -> Result<usize, SemanticsError> {
    if num_variables >= usize::BITS as usize {
        return Err(SemanticsError::TooManyVariables(num_variables));
    }
    Ok(1 << num_variables)
}

/// Returns an iterator over all models over `variables`.
///
/// The models are yielded in lexicographic order according to the given order of the variables,
/// where `F` precedes `T`. That is, the model with index `i` assigns to each variable the
/// corresponding bit of `i`, with the first variable being the most significant bit. Over an empty
/// list of variables, this yields exactly one empty model.
pub fn all_models<I, S>(variables: I) -> Result<AllModels, SemanticsError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    AllModels::new(variables)
}

/// An iterator over all models over a list of variables. See [`all_models`].
#[derive(Debug, Clone)]
pub struct AllModels {
    variables: Vec<String>,
    next: usize,
    end: usize,
}

impl AllModels {
    pub fn new<I, S>(variables: I) -> Result<Self, SemanticsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variables: Vec<String> = variables.into_iter().map(Into::into).collect();
        if let Some(invalid) = variables.iter().find(|v| !is_variable(v)) {
            return Err(SemanticsError::InvalidVariable(invalid.clone()));
        }
        if let Some(duplicate) = first_duplicate(&variables) {
            return Err(SemanticsError::DuplicateVariable(duplicate.clone()));
        }
        let end = num_models(variables.len())?;
        log::debug!("enumerating {} models over {} variables", end, variables.len());
        Ok(Self { variables, next: 0, end })
    }

    /// The variables the models are over, in order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// The total number of models over the variables, including the ones already yielded.
    pub fn num_models(&self) -> usize {
        self.end
    }

    /// Returns the model with the given index, regardless of the current position of the iterator.
    pub fn model_at(&self, index: usize) -> Option<Model> {
        if index >= self.end {
            return None;
        }
        let n = self.variables.len();
        let pairs = self
            .variables
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), (index >> (n - 1 - i)) & 1 == 1));
        Some(Model::from_valid_pairs(pairs))
    }
}

impl Iterator for AllModels {
    type Item = Model;

    fn next(&mut self) -> Option<Self::Item> {
        let model = self.model_at(self.next)?;
        self.next += 1;
        Some(model)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.next = self.next.saturating_add(n).min(self.end);
        self.next()
    }
}

impl ExactSizeIterator for AllModels {}

impl FusedIterator for AllModels {}
