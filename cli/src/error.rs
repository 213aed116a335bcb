use proplogic::{ast::SubstitutionError, semantics::SemanticsError};
use std::io;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Proplogic(#[from] proplogic::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<SemanticsError> for CliError {
    fn from(e: SemanticsError) -> Self {
        Self::Proplogic(e.into())
    }
}

impl From<SubstitutionError> for CliError {
    fn from(e: SubstitutionError) -> Self {
        Self::Proplogic(e.into())
    }
}
