//! A lexer for propositional formulas.

use crate::{ast::Operator, parser::ParserError, Error, PropResult};
use std::fmt;

/// A token of a propositional formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// The `(` token.
    OpenParen,

    /// The `)` token.
    CloseParen,

    /// A variable name, like `p` or `q76`.
    Variable(String),

    /// A constant or an operator.
    Operator(Operator),

    /// A signal token to indicate the end of the input.
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::OpenParen => write!(f, "("),
            Token::CloseParen => write!(f, ")"),
            Token::Variable(name) => write!(f, "{}", name),
            Token::Operator(op) => write!(f, "{}", op),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// Represents a position in the source input, as a 1-based column number.
pub type Position = usize;

/// A lexer for propositional formulas.
///
/// Tokens are read on demand, and the lexer never looks past the end of the last token it
/// returned. Whitespace is not skipped: it is an unexpected character like any other.
pub struct Lexer<'a> {
    input: &'a str,
    offset: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, offset: 0 }
    }

    /// The position of the next character to be read.
    pub fn position(&self) -> Position {
        self.offset + 1
    }

    /// The part of the input that was not yet consumed.
    pub fn remaining(&self) -> &'a str {
        &self.input[self.offset..]
    }

    fn current_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.offset).copied()
    }

    /// Reads a token from the input source.
    pub fn next_token(&mut self) -> PropResult<(Token, Position)> {
        let start_position = self.position();
        let Some(current) = self.current_byte() else {
            return Ok((Token::Eof, start_position));
        };

        let token = match current {
            b'(' => Token::OpenParen,
            b')' => Token::CloseParen,
            b'T' => Token::Operator(Operator::True),
            b'F' => Token::Operator(Operator::False),
            b'~' => Token::Operator(Operator::Not),
            b'&' => Token::Operator(Operator::And),
            b'|' => Token::Operator(Operator::Or),
            b'-' => {
                if self.input.as_bytes().get(self.offset + 1) != Some(&b'>') {
                    return Err(Error::Parser(ParserError::IncompleteArrow, start_position));
                }
                self.offset += 2;
                return Ok((Token::Operator(Operator::Implies), start_position));
            }
            b'p'..=b'z' => return Ok((self.read_variable(), start_position)),
            _ => {
                // The offset is always at a char boundary, since all tokens are ASCII
                let c = self.remaining().chars().next().unwrap_or_default();
                return Err(Error::Parser(
                    ParserError::UnexpectedChar(c),
                    start_position,
                ));
            }
        };
        self.offset += 1;
        Ok((token, start_position))
    }

    /// Reads a variable name: a letter followed by as many decimal digits as possible.
    fn read_variable(&mut self) -> Token {
        let start = self.offset;
        self.offset += 1;
        while self.current_byte().is_some_and(|b| b.is_ascii_digit()) {
            self.offset += 1;
        }
        Token::Variable(self.input[start..self.offset].to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(input: &str) -> PropResult<Vec<(Token, Position)>> {
        let mut lexer = Lexer::new(input);
        let mut result = Vec::new();
        loop {
            let (token, pos) = lexer.next_token()?;
            if token == Token::Eof {
                return Ok(result);
            }
            result.push((token, pos));
        }
    }

    #[test]
    fn test_tokens() {
        use Operator::*;

        let got = lex_all("(p76->~T)|&F").unwrap();
        let expected = vec![
            (Token::OpenParen, 1),
            (Token::Variable("p76".to_owned()), 2),
            (Token::Operator(Implies), 5),
            (Token::Operator(Not), 7),
            (Token::Operator(True), 8),
            (Token::CloseParen, 9),
            (Token::Operator(Or), 10),
            (Token::Operator(And), 11),
            (Token::Operator(False), 12),
        ];
        assert_eq!(expected, got);

        let got: Vec<_> = lex_all("p1p2q").unwrap().into_iter().map(|(t, _)| t).collect();
        assert_eq!(
            vec![
                Token::Variable("p1".to_owned()),
                Token::Variable("p2".to_owned()),
                Token::Variable("q".to_owned()),
            ],
            got
        );
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            lex_all("(p- >q)"),
            Err(Error::Parser(ParserError::IncompleteArrow, 3))
        ));
        assert!(matches!(
            lex_all("p-"),
            Err(Error::Parser(ParserError::IncompleteArrow, 2))
        ));
        assert!(matches!(
            lex_all("(p & q)"),
            Err(Error::Parser(ParserError::UnexpectedChar(' '), 3))
        ));
        assert!(matches!(
            lex_all("aλ"),
            Err(Error::Parser(ParserError::UnexpectedChar('a'), 1))
        ));
        assert!(matches!(
            lex_all("pλ"),
            Err(Error::Parser(ParserError::UnexpectedChar('λ'), 2))
        ));
    }

    #[test]
    fn test_lexing_is_lazy() {
        let mut lexer = Lexer::new("~p12 garbage");
        assert_eq!(Token::Operator(Operator::Not), lexer.next_token().unwrap().0);
        assert_eq!(Token::Variable("p12".to_owned()), lexer.next_token().unwrap().0);
        assert_eq!(" garbage", lexer.remaining());
        assert_eq!(5, lexer.position());
    }
}
