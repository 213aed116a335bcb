//! A parser for propositional formulas, in both standard and polish notation.

mod error;
mod lexer;

pub use error::ParserError;
pub use lexer::{Lexer, Position, Token};

use crate::{
    ast::{Formula, Operator},
    Error, PropResult,
};

/// The configuration for the parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// The maximum nesting depth of a formula, where a single variable or constant has depth 1.
    /// Deeper formulas are rejected with [`ParserError::TooDeep`]. By default there is no limit:
    /// the parser doesn't recurse, so any formula that fits in memory can be parsed.
    pub max_depth: Option<usize>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(mut self, value: usize) -> Self {
        self.max_depth = Some(value);
        self
    }
}

/// Parses a formula in standard notation, requiring the whole input to be consumed.
pub fn parse(input: &str) -> PropResult<Formula> {
    parse_with(input, Config::default())
}

/// Like [`parse`], but with a custom parser configuration.
pub fn parse_with(input: &str, config: Config) -> PropResult<Formula> {
    let mut parser = Parser::new(input, config);
    let formula = parser.parse_formula()?;
    parser.expect_end()?;
    Ok(formula)
}

/// Parses the longest prefix of `input` that is a formula in standard notation. Returns the parsed
/// formula and the unconsumed rest of the input.
pub fn parse_prefix(input: &str) -> PropResult<(Formula, &str)> {
    parse_prefix_with(input, Config::default())
}

/// Like [`parse_prefix`], but with a custom parser configuration.
pub fn parse_prefix_with(input: &str, config: Config) -> PropResult<(Formula, &str)> {
    let mut parser = Parser::new(input, config);
    let formula = parser.parse_formula()?;
    Ok((formula, parser.remaining()))
}

/// Returns `true` if `input` is a valid formula in standard notation. This never fails.
pub fn is_formula(input: &str) -> bool {
    parse(input).is_ok()
}

/// Parses a formula in polish notation, requiring the whole input to be consumed.
pub fn parse_polish(input: &str) -> PropResult<Formula> {
    parse_polish_with(input, Config::default())
}

/// Like [`parse_polish`], but with a custom parser configuration.
pub fn parse_polish_with(input: &str, config: Config) -> PropResult<Formula> {
    let mut parser = Parser::new(input, config);
    let formula = parser.parse_polish_formula()?;
    parser.expect_end()?;
    Ok(formula)
}

/// Returns `true` if `input` is a valid formula in polish notation. This never fails.
pub fn is_polish_formula(input: &str) -> bool {
    parse_polish(input).is_ok()
}

/// An operation whose operands are still being parsed.
enum Frame {
    /// A `~`, waiting for its operand.
    Not,

    /// A `(`, waiting for its first operand.
    First,

    /// A binary operation, waiting for its second operand and the closing `)`.
    Second(Formula, Operator),
}

/// A predictive parser for propositional formulas.
///
/// The grammar is LL(1) and every production starts by consuming a token, so the parser reads
/// tokens only when it needs them. After a successful parse, [`Parser::remaining`] is exactly the
/// input that comes after the formula. Unfinished productions are kept in an explicit stack, so
/// the nesting depth is only limited by the configuration.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    config: Config,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, config: Config) -> Self {
        Self { lexer: Lexer::new(input), config }
    }

    /// The part of the input that was not yet consumed.
    pub fn remaining(&self) -> &'a str {
        self.lexer.remaining()
    }

    /// Returns an error if there is any input left.
    pub fn expect_end(&self) -> PropResult<()> {
        let rest = self.remaining();
        if rest.is_empty() {
            Ok(())
        } else {
            Err(Error::Parser(
                ParserError::TrailingInput(rest.to_owned()),
                self.lexer.position(),
            ))
        }
    }

    /// Reads the next token, failing if the input has ended.
    fn next_token(&mut self) -> PropResult<(Token, Position)> {
        match self.lexer.next_token()? {
            (Token::Eof, pos) => Err(Error::Parser(ParserError::UnexpectedEof, pos)),
            other => Ok(other),
        }
    }

    /// Consumes the next token if it is a binary operator, and returns it. Returns an error
    /// otherwise.
    fn expect_binary_operator(&mut self) -> PropResult<Operator> {
        match self.next_token()? {
            (Token::Operator(op), _) if op.is_binary() => Ok(op),
            (other, pos) => Err(Error::Parser(ParserError::UnexpectedToken(other), pos)),
        }
    }

    /// Consumes the next token if it equals `expected`. Returns an error otherwise.
    fn expect_token(&mut self, expected: Token) -> PropResult<()> {
        let (got, pos) = self.next_token()?;
        if got == expected {
            Ok(())
        } else {
            Err(Error::Parser(ParserError::UnexpectedToken(got), pos))
        }
    }

    /// Fails if a formula that starts with `num_pending` enclosing operations would be deeper than
    /// the maximum depth.
    fn check_depth(&self, num_pending: usize) -> PropResult<()> {
        match self.config.max_depth {
            Some(max) if num_pending >= max => Err(Error::Parser(
                ParserError::TooDeep(max),
                self.lexer.position(),
            )),
            _ => Ok(()),
        }
    }

    /// Parses a formula in standard notation.
    pub fn parse_formula(&mut self) -> PropResult<Formula> {
        let mut pending: Vec<Frame> = Vec::new();
        loop {
            // Read tokens until an atomic formula is found, opening an operation for each
            // negation or parenthesis on the way
            let mut formula = loop {
                self.check_depth(pending.len())?;
                match self.next_token()? {
                    (Token::Variable(name), _) => break Formula::new_var(name)?,
                    (Token::Operator(op), _) if op.is_constant() => {
                        break Formula::new_op(op, Vec::new())?
                    }
                    (Token::Operator(Operator::Not), _) => pending.push(Frame::Not),
                    (Token::OpenParen, _) => pending.push(Frame::First),
                    (other, pos) => {
                        return Err(Error::Parser(ParserError::UnexpectedToken(other), pos))
                    }
                }
            };

            // Close every operation that is now complete, until one needs another operand
            loop {
                match pending.pop() {
                    None => return Ok(formula),
                    Some(Frame::Not) => formula = Formula::new_not(formula),
                    Some(Frame::First) => {
                        let op = self.expect_binary_operator()?;
                        pending.push(Frame::Second(formula, op));
                        break;
                    }
                    Some(Frame::Second(first, op)) => {
                        self.expect_token(Token::CloseParen)?;
                        formula = Formula::new_op(op, vec![first, formula])?;
                    }
                }
            }
        }
    }

    /// Parses a formula in polish notation: the root symbol followed by its operands, without
    /// any parentheses.
    pub fn parse_polish_formula(&mut self) -> PropResult<Formula> {
        // Each pending operator, with the operands parsed so far
        let mut pending: Vec<(Operator, Vec<Formula>)> = Vec::new();
        loop {
            self.check_depth(pending.len())?;
            let mut formula = match self.next_token()? {
                (Token::Variable(name), _) => Formula::new_var(name)?,
                (Token::Operator(op), _) if op.is_constant() => Formula::new_op(op, Vec::new())?,
                (Token::Operator(op), _) => {
                    pending.push((op, Vec::with_capacity(op.arity())));
                    continue;
                }
                (other, pos) => {
                    return Err(Error::Parser(ParserError::UnexpectedToken(other), pos))
                }
            };

            loop {
                match pending.pop() {
                    None => return Ok(formula),
                    Some((op, mut args)) => {
                        args.push(formula);
                        if args.len() < op.arity() {
                            pending.push((op, args));
                            break;
                        }
                        formula = Formula::new_op(op, args)?;
                    }
                }
            }
        }
    }
}
