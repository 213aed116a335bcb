//! The types for parser errors.

use crate::parser::Token;
use thiserror::Error;

/// The error type for the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    /// The lexer encountered a character that can't start any token.
    #[error("unexpected character: '{0}'")]
    UnexpectedChar(char),

    /// The lexer encountered a `-` that is not followed by `>`.
    #[error("expected '>' after '-'")]
    IncompleteArrow,

    /// The parser encountered an unexpected token.
    #[error("unexpected token: '{0}'")]
    UnexpectedToken(Token),

    /// The input ended before a complete formula was read.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// The input contains more characters after a complete formula.
    #[error("unexpected input after formula: '{0}'")]
    TrailingInput(String),

    /// The formula is nested deeper than the configured limit.
    #[error("formula exceeds the maximum nesting depth of {0}")]
    TooDeep(usize),
}
