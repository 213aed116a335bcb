//! Classification of the raw symbols that may appear in a formula.

/// Returns `true` if `s` is a variable name: a letter between `p` and `z`, optionally followed by
/// decimal digits, like `p`, `x` or `q76`.
pub fn is_variable(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some('p'..='z') => chars.all(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// Returns `true` if `s` is one of the constants `T` or `F`.
pub fn is_constant(s: &str) -> bool {
    s == "T" || s == "F"
}

/// Returns `true` if `s` is the unary operator `~`.
pub fn is_unary(s: &str) -> bool {
    s == "~"
}

/// Returns `true` if `s` is one of the binary operators `&`, `|` or `->`.
pub fn is_binary(s: &str) -> bool {
    matches!(s, "&" | "|" | "->")
}

/// A non-variable symbol of a formula. This includes the two constants, which are treated as
/// operators of arity zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operator {
    /// The `T` constant.
    True,

    /// The `F` constant.
    False,

    /// The `~` operator.
    Not,

    /// The `&` operator.
    And,

    /// The `|` operator.
    Or,

    /// The `->` operator.
    Implies,
}

impl_str_conversion_traits!(Operator {
    True: "T",
    False: "F",
    Not: "~",
    And: "&",
    Or: "|",
    Implies: "->",
});

impl Operator {
    pub const ALL: [Operator; 6] = [
        Operator::True,
        Operator::False,
        Operator::Not,
        Operator::And,
        Operator::Or,
        Operator::Implies,
    ];

    /// Returns the constant operator corresponding to `value`.
    pub fn constant(value: bool) -> Self {
        match value {
            true => Operator::True,
            false => Operator::False,
        }
    }

    /// The number of operands this operator takes.
    pub fn arity(self) -> usize {
        match self {
            Operator::True | Operator::False => 0,
            Operator::Not => 1,
            Operator::And | Operator::Or | Operator::Implies => 2,
        }
    }

    pub fn is_constant(self) -> bool {
        self.arity() == 0
    }

    pub fn is_unary(self) -> bool {
        self.arity() == 1
    }

    pub fn is_binary(self) -> bool {
        self.arity() == 2
    }

    /// Applies the operator to already evaluated operands. `args` must have exactly as many
    /// elements as the operator's arity.
    pub(crate) fn apply(self, args: &[bool]) -> bool {
        match (self, args) {
            (Operator::True, []) => true,
            (Operator::False, []) => false,
            (Operator::Not, [a]) => !a,
            (Operator::And, [a, b]) => *a && *b,
            (Operator::Or, [a, b]) => *a || *b,
            (Operator::Implies, [a, b]) => !a || *b,
            _ => unreachable!("operator '{}' applied to {} arguments", self, args.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_variable() {
        for s in ["p", "q", "z", "q76", "x0", "p12345"] {
            assert!(is_variable(s), "{s}");
        }
        for s in ["", "a", "o", "P", "T", "p1a", "pq", "76", "~p", "x-1"] {
            assert!(!is_variable(s), "{s}");
        }
    }

    #[test]
    fn test_operator_classifiers() {
        assert!(is_constant("T") && is_constant("F"));
        assert!(!is_constant("t") && !is_constant("TF"));
        assert!(is_unary("~") && !is_unary("-"));
        for s in ["&", "|", "->"] {
            assert!(is_binary(s));
        }
        for s in ["-", ">", "<->", "+", "-&", "~"] {
            assert!(!is_binary(s));
        }
    }

    #[test]
    fn test_arity() {
        for op in Operator::ALL {
            let s = op.as_str();
            assert_eq!(op.is_constant(), is_constant(s));
            assert_eq!(op.is_unary(), is_unary(s));
            assert_eq!(op.is_binary(), is_binary(s));
        }
    }

    #[test]
    fn test_apply() {
        assert!(Operator::Implies.apply(&[false, false]));
        assert!(Operator::Implies.apply(&[false, true]));
        assert!(!Operator::Implies.apply(&[true, false]));
        assert!(Operator::Implies.apply(&[true, true]));
        assert!(!Operator::Not.apply(&[true]));
        assert!(Operator::Or.apply(&[false, true]));
        assert!(!Operator::And.apply(&[false, true]));
    }
}
