use super::{is_variable, Operator};
use ahash::{AHashSet, AHasher};
use indexmap::IndexSet;
use std::{
    hash::{Hash, Hasher},
    str::FromStr,
    sync::{Arc, OnceLock},
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    #[error("symbol '{symbol}' expects {expected} operands, got {got}")]
    InvalidArity {
        symbol: String,
        expected: usize,
        got: usize,
    },

    #[error("'{0}' is not a valid variable name")]
    InvalidVariable(String),

    #[error("'{0}' is not a variable, constant or operator")]
    UnknownSymbol(String),
}

/// The root of a formula tree.
///
/// Constants are represented as operators with no operands. A `Term` on its own carries no
/// guarantees; a `Formula` can only be built from a `Term` whose operator arity matches its number
/// of operands.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A variable, like `p` or `q76`.
    Var(String),

    /// An application of an operator (or a constant) to its operands.
    Op(Operator, Vec<Formula>),
}

struct Node {
    term: Term,

    /// Computed when the node is built, from the operands' values.
    hash: u64,
    size: usize,
    depth: usize,

    text: OnceLock<String>,
    variables: OnceLock<IndexSet<String>>,
    operators: OnceLock<IndexSet<Operator>>,
}

impl Drop for Node {
    fn drop(&mut self) {
        // Nodes that are about to be freed hand their operands over to a worklist, so dropping a
        // formula never recurses on its structure
        let Term::Op(_, args) = &mut self.term else {
            return;
        };
        let mut worklist = std::mem::take(args);
        while let Some(formula) = worklist.pop() {
            if let Ok(mut node) = Arc::try_unwrap(formula.0) {
                if let Term::Op(_, args) = &mut node.term {
                    worklist.append(args);
                }
            }
        }
    }
}

/// An immutable propositional formula.
///
/// Cloning a `Formula` is cheap, and clones share the same allocation. Subtrees are never mutated,
/// so they may be freely shared between different formulas. Two formulas are equal if and only if
/// their standard string representations are equal, and hashing is consistent with that.
///
/// The standard string, the set of variables and the set of operators of a formula are computed
/// the first time they are requested, and then kept for the lifetime of the formula. None of the
/// operations on formulas recurse on their structure, so formulas may be arbitrarily deep.
#[derive(Clone)]
pub struct Formula(Arc<Node>);

fn structural_hash(term: &Term) -> u64 {
    let mut hasher = AHasher::default();
    match term {
        Term::Var(name) => {
            hasher.write_u8(0);
            name.hash(&mut hasher);
        }
        Term::Op(op, args) => {
            hasher.write_u8(1);
            op.hash(&mut hasher);
            for arg in args {
                hasher.write_u64(arg.0.hash);
            }
        }
    }
    hasher.finish()
}

impl Formula {
    /// Builds a formula from a term, without checking the arity of its operator.
    fn from_term_unchecked(term: Term) -> Self {
        let hash = structural_hash(&term);
        let (size, depth) = match &term {
            Term::Var(_) => (1, 1),
            Term::Op(_, args) => {
                let size = args.iter().fold(1usize, |acc, arg| acc.saturating_add(arg.0.size));
                let depth = 1 + args.iter().map(|arg| arg.0.depth).max().unwrap_or(0);
                (size, depth)
            }
        };
        Self(Arc::new(Node {
            term,
            hash,
            size,
            depth,
            text: OnceLock::new(),
            variables: OnceLock::new(),
            operators: OnceLock::new(),
        }))
    }

    /// Builds a formula from a term, checking that variable names are valid and that operators
    /// receive exactly as many operands as their arity.
    pub fn from_term(term: Term) -> Result<Self, FormulaError> {
        match &term {
            Term::Var(name) if !is_variable(name) => {
                return Err(FormulaError::InvalidVariable(name.clone()))
            }
            Term::Op(op, args) if args.len() != op.arity() => {
                return Err(FormulaError::InvalidArity {
                    symbol: op.to_string(),
                    expected: op.arity(),
                    got: args.len(),
                })
            }
            _ => (),
        }
        Ok(Self::from_term_unchecked(term))
    }

    /// Builds a formula from its root symbol and the formulas of its operands.
    pub fn from_root(root: &str, children: Vec<Formula>) -> Result<Self, FormulaError> {
        if is_variable(root) {
            if !children.is_empty() {
                return Err(FormulaError::InvalidArity {
                    symbol: root.to_owned(),
                    expected: 0,
                    got: children.len(),
                });
            }
            return Ok(Self::from_term_unchecked(Term::Var(root.to_owned())));
        }
        let op = Operator::from_str(root)
            .map_err(|()| FormulaError::UnknownSymbol(root.to_owned()))?;
        Self::new_op(op, children)
    }

    /// Constructs a new variable formula.
    pub fn new_var(name: impl Into<String>) -> Result<Self, FormulaError> {
        Self::from_term(Term::Var(name.into()))
    }

    /// Constructs the constant `T` or `F`.
    pub fn new_bool(value: bool) -> Self {
        Self::from_term_unchecked(Term::Op(Operator::constant(value), Vec::new()))
    }

    /// Constructs an operation formula, checking the operator's arity.
    pub fn new_op(op: Operator, args: Vec<Formula>) -> Result<Self, FormulaError> {
        Self::from_term(Term::Op(op, args))
    }

    pub fn new_not(arg: Formula) -> Self {
        Self::from_term_unchecked(Term::Op(Operator::Not, vec![arg]))
    }

    pub fn new_and(first: Formula, second: Formula) -> Self {
        Self::from_term_unchecked(Term::Op(Operator::And, vec![first, second]))
    }

    pub fn new_or(first: Formula, second: Formula) -> Self {
        Self::from_term_unchecked(Term::Op(Operator::Or, vec![first, second]))
    }

    pub fn new_implies(first: Formula, second: Formula) -> Self {
        Self::from_term_unchecked(Term::Op(Operator::Implies, vec![first, second]))
    }

    /// Returns the term at the root of this formula.
    pub fn term(&self) -> &Term {
        &self.0.term
    }

    /// Returns the symbol at the root of this formula: a variable name, a constant or an operator.
    pub fn root(&self) -> &str {
        match self.term() {
            Term::Var(name) => name,
            Term::Op(op, _) => op.as_str(),
        }
    }

    /// Returns the operands of the root operator. This is empty for variables and constants.
    pub fn args(&self) -> &[Formula] {
        match self.term() {
            Term::Var(_) => &[],
            Term::Op(_, args) => args,
        }
    }

    /// The first operand, if the root is a unary or binary operator.
    pub fn first(&self) -> Option<&Formula> {
        self.args().first()
    }

    /// The second operand, if the root is a binary operator.
    pub fn second(&self) -> Option<&Formula> {
        self.args().get(1)
    }

    /// Returns `true` if the formula is a variable.
    pub fn is_var(&self) -> bool {
        matches!(self.term(), Term::Var(_))
    }

    /// Tries to extract the variable name from a formula. Returns `Some` if the formula is a
    /// variable.
    pub fn as_var(&self) -> Option<&str> {
        match self.term() {
            Term::Var(name) => Some(name),
            Term::Op(..) => None,
        }
    }

    /// Tries to extract the operator and its operands from a formula. Returns `Some` if the
    /// formula is not a variable.
    pub fn as_op(&self) -> Option<(Operator, &[Formula])> {
        match self.term() {
            Term::Op(op, args) => Some((*op, args)),
            Term::Var(_) => None,
        }
    }

    /// Tries to extract a `bool` from a formula. Returns `Some` if the formula is a constant.
    pub fn as_bool(&self) -> Option<bool> {
        match self.term() {
            Term::Op(Operator::True, _) => Some(true),
            Term::Op(Operator::False, _) => Some(false),
            _ => None,
        }
    }

    /// Returns `true` if both formulas share the same allocation. This implies equality, but not
    /// the other way around.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Visits the nodes of the formula in preorder, calling `visit` once for each distinct node.
    /// The operands of a node are only visited if `visit` returns `true` for it.
    fn visit_distinct(&self, mut visit: impl FnMut(&Formula) -> bool) {
        let mut seen: AHashSet<*const Node> = AHashSet::new();
        let mut stack = vec![self];
        while let Some(formula) = stack.pop() {
            // Only nodes with more than one owner can be reached more than once
            if Arc::strong_count(&formula.0) > 1 && !seen.insert(Arc::as_ptr(&formula.0)) {
                continue;
            }
            if visit(formula) {
                stack.extend(formula.args().iter().rev());
            }
        }
    }

    /// The set of all variables that occur in this formula, sorted by name.
    pub fn variables(&self) -> &IndexSet<String> {
        self.0.variables.get_or_init(|| {
            let mut result = IndexSet::new();
            self.visit_distinct(|f| match (f.0.variables.get(), f.term()) {
                (Some(cached), _) => {
                    result.extend(cached.iter().cloned());
                    false
                }
                (None, Term::Var(name)) => {
                    result.insert(name.clone());
                    false
                }
                (None, Term::Op(..)) => true,
            });
            result.sort();
            result
        })
    }

    /// The set of all operators (including the constants `T` and `F`) that occur in this formula.
    pub fn operators(&self) -> &IndexSet<Operator> {
        self.0.operators.get_or_init(|| {
            let mut result = IndexSet::new();
            self.visit_distinct(|f| match (f.0.operators.get(), f.term()) {
                (Some(cached), _) => {
                    result.extend(cached.iter().copied());
                    false
                }
                (None, Term::Var(_)) => false,
                (None, Term::Op(op, _)) => {
                    result.insert(*op);
                    true
                }
            });
            result.sort();
            result
        })
    }

    /// The number of nodes in the formula tree, counting shared subtrees once for each
    /// occurrence. This saturates at `usize::MAX`.
    pub fn size(&self) -> usize {
        self.0.size
    }

    /// The length of the longest path from the root to a leaf, where a single variable or
    /// constant has depth 1.
    pub fn depth(&self) -> usize {
        self.0.depth
    }

    pub(super) fn cached_text(&self, compute: impl FnOnce() -> String) -> &str {
        self.0.text.get_or_init(compute)
    }

    /// The standard string of the formula, if it was already computed.
    pub(super) fn text_if_cached(&self) -> Option<&str> {
        self.0.text.get().map(String::as_str)
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if a.ptr_eq(b) {
                continue;
            }
            if a.0.hash != b.0.hash || a.0.size != b.0.size {
                return false;
            }
            match (a.term(), b.term()) {
                (Term::Var(x), Term::Var(y)) if x == y => (),
                (Term::Op(f, xs), Term::Op(g, ys)) if f == g => stack.extend(xs.iter().zip(ys)),
                _ => return false,
            }
        }
        true
    }
}

impl Eq for Formula {}

impl Hash for Formula {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash);
    }
}

impl FromStr for Formula {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse(s)
    }
}
