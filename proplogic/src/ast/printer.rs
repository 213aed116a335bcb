//! The standard and polish textual representations of formulas.

use super::{Formula, Term};
use std::fmt;

impl Formula {
    /// Returns the standard string representation of the formula. Binary operations are wrapped
    /// in parentheses, negations are not.
    pub fn text(&self) -> &str {
        self.cached_text(|| {
            let mut result = String::new();
            write_standard(&mut result, self);
            result
        })
    }

    /// Returns the polish notation representation of the formula: the root symbol followed by the
    /// polish representations of its operands, without any separators.
    pub fn polish(&self) -> String {
        self.preorder().map(Formula::root).collect()
    }
}

/// A pending piece of the standard representation: either a subformula that still has to be
/// written, or a symbol.
enum Piece<'a> {
    Formula(&'a Formula),
    Symbol(&'static str),
}

fn write_standard(dest: &mut String, formula: &Formula) {
    // Pieces are popped in the order they are written, so they are pushed in reverse
    let mut stack = vec![Piece::Formula(formula)];
    while let Some(piece) = stack.pop() {
        let formula = match piece {
            Piece::Symbol(s) => {
                dest.push_str(s);
                continue;
            }
            Piece::Formula(f) => f,
        };
        if let Some(text) = formula.text_if_cached() {
            dest.push_str(text);
            continue;
        }
        match formula.term() {
            Term::Var(name) => dest.push_str(name),
            Term::Op(op, args) => match args.as_slice() {
                [] => dest.push_str(op.as_str()),
                [a] => {
                    dest.push_str(op.as_str());
                    stack.push(Piece::Formula(a));
                }
                [a, b] => {
                    dest.push('(');
                    stack.push(Piece::Symbol(")"));
                    stack.push(Piece::Formula(b));
                    stack.push(Piece::Symbol(op.as_str()));
                    stack.push(Piece::Formula(a));
                }
                _ => unreachable!(),
            },
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl fmt::Debug for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Formula({})", self.text())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::tests::parse_formula;

    #[test]
    fn test_standard_string() {
        let cases = ["p", "T", "~q76", "~~F", "(p&q)", "((x&y)&~z)", "~(p->(q|T))"];
        for s in cases {
            assert_eq!(s, parse_formula(s).to_string());
        }
    }

    #[test]
    fn test_polish() {
        let cases = [
            ("p", "p"),
            ("~(p&q76)", "~&pq76"),
            ("((x1&y)->~(F|z))", "->&x1y~|Fz"),
            ("(p12->(p1|p2))", "->p12|p1p2"),
        ];
        for (standard, polish) in cases {
            assert_eq!(polish, parse_formula(standard).polish());
        }
    }
}
