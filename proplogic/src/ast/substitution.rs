use super::{is_variable, Formula, Operator, Term};
use ahash::AHashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubstitutionError {
    #[error("trying to substitute '{0}', which is not a variable")]
    NotAVariable(String),

    #[error("template '{template}' for operator '{op}' uses variable '{var}', expected only 'p' and 'q'")]
    InvalidTemplate {
        op: Operator,
        template: Formula,
        var: String,
    },
}

type SubstitutionResult<T> = Result<T, SubstitutionError>;

/// Rebuilds `original` with new operands, reusing the original allocation if none of the operands
/// changed.
fn rebuild(original: &Formula, op: Operator, new_args: Vec<Formula>) -> Formula {
    if new_args.iter().zip(original.args()).all(|(a, b)| a.ptr_eq(b)) {
        original.clone()
    } else {
        // The operator and the number of operands are the same as in the original formula
        match Formula::new_op(op, new_args) {
            Ok(f) => f,
            Err(e) => unreachable!("{}", e),
        }
    }
}

/// Rewrites `formula` from the leaves up, without recursing on its structure. `rewrite` receives
/// each node together with its already rewritten operands. Results are kept in `cache`, so
/// identical subformulas are only rewritten once.
fn rewrite_bottom_up<F>(
    formula: &Formula,
    cache: &mut AHashMap<Formula, Formula>,
    mut rewrite: F,
) -> Formula
where
    F: FnMut(&Formula, Vec<Formula>) -> Formula,
{
    // Each entry holds a node, and whether its operands were already pushed
    let mut stack = vec![(formula, false)];
    let mut results: Vec<Formula> = Vec::new();
    while let Some((current, expanded)) = stack.pop() {
        if !expanded {
            if let Some(cached) = cache.get(current) {
                results.push(cached.clone());
                continue;
            }
            if !current.args().is_empty() {
                stack.push((current, true));
                stack.extend(current.args().iter().rev().map(|arg| (arg, false)));
                continue;
            }
        }
        let new_args = results.split_off(results.len() - current.args().len());
        let result = rewrite(current, new_args);
        cache.insert(current.clone(), result.clone());
        results.push(result);
    }
    match results.pop() {
        Some(result) => result,
        None => unreachable!("the root is always rewritten"),
    }
}

/// A substitution of variables by formulas.
///
/// The substitution is applied in a single pass: only variables that occur in the original
/// formula are replaced, and the replacement formulas are never themselves substituted. For
/// example, applying `{p -> (q&r), r -> p}` to `((p->p)|r)` results in `(((q&r)->(q&r))|p)`.
pub struct VariableSubstitution {
    map: AHashMap<String, Formula>,
    cache: AHashMap<Formula, Formula>,
}

impl VariableSubstitution {
    pub fn empty() -> Self {
        Self {
            map: AHashMap::new(),
            cache: AHashMap::new(),
        }
    }

    pub fn single(x: impl Into<String>, t: Formula) -> SubstitutionResult<Self> {
        let mut this = Self::empty();
        this.insert(x, t)?;
        Ok(this)
    }

    pub fn new<I, S>(map: I) -> SubstitutionResult<Self>
    where
        I: IntoIterator<Item = (S, Formula)>,
        S: Into<String>,
    {
        let mut this = Self::empty();
        for (x, t) in map {
            this.insert(x, t)?;
        }
        Ok(this)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Extends the substitution by adding a new mapping from the variable `x` to `t`.
    pub fn insert(&mut self, x: impl Into<String>, t: Formula) -> SubstitutionResult<()> {
        let x = x.into();
        if !is_variable(&x) {
            return Err(SubstitutionError::NotAVariable(x));
        }

        // Cached results for terms containing `x` may no longer be valid
        self.cache.retain(|k, _| !k.variables().contains(&x));
        self.map.insert(x, t);
        Ok(())
    }

    pub fn apply(&mut self, formula: &Formula) -> Formula {
        let map = &self.map;
        rewrite_bottom_up(formula, &mut self.cache, |f, new_args| match f.term() {
            Term::Var(name) => map.get(name).cloned().unwrap_or_else(|| f.clone()),
            Term::Op(op, _) => rebuild(f, *op, new_args),
        })
    }
}

/// A substitution of operators (and constants) by template formulas.
///
/// A template may only use the variables `p` and `q`, which stand for the first and second operands
/// of the original operation. Each matching node is rewritten bottom-up: first its operands are
/// rewritten, and then the template is instantiated with them. Operators that come from the
/// templates are not rewritten again. For example, substituting `&` with `~(~p|~q)` in
/// `((x&y)&~z)` results in `~(~~(~x|~y)|~~z)`.
pub struct OperatorSubstitution {
    map: AHashMap<Operator, Formula>,
    cache: AHashMap<Formula, Formula>,
}

impl OperatorSubstitution {
    /// The variable that stands for the first operand in a template.
    pub const FIRST: &'static str = "p";

    /// The variable that stands for the second operand in a template.
    pub const SECOND: &'static str = "q";

    pub fn empty() -> Self {
        Self {
            map: AHashMap::new(),
            cache: AHashMap::new(),
        }
    }

    pub fn new(map: impl IntoIterator<Item = (Operator, Formula)>) -> SubstitutionResult<Self> {
        let mut this = Self::empty();
        for (op, template) in map {
            this.insert(op, template)?;
        }
        Ok(this)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Extends the substitution by adding a template for `op`.
    pub fn insert(&mut self, op: Operator, template: Formula) -> SubstitutionResult<()> {
        if let Some(var) = template
            .variables()
            .iter()
            .find(|v| *v != Self::FIRST && *v != Self::SECOND)
        {
            return Err(SubstitutionError::InvalidTemplate {
                op,
                var: var.clone(),
                template,
            });
        }
        self.cache.clear();
        self.map.insert(op, template);
        Ok(())
    }

    pub fn apply(&mut self, formula: &Formula) -> Formula {
        let map = &self.map;
        rewrite_bottom_up(formula, &mut self.cache, |f, new_args| match f.term() {
            Term::Var(_) => f.clone(),
            Term::Op(op, _) => match map.get(op) {
                Some(template) => instantiate(template, new_args),
                None => rebuild(f, *op, new_args),
            },
        })
    }
}

/// Replaces `p` and `q` in `template` with the given operands.
fn instantiate(template: &Formula, operands: Vec<Formula>) -> Formula {
    let names = [OperatorSubstitution::FIRST, OperatorSubstitution::SECOND];
    let mut substitution = VariableSubstitution::empty();
    substitution
        .map
        .extend(names.into_iter().map(str::to_owned).zip(operands));
    substitution.apply(template)
}

impl Formula {
    /// Substitutes each variable of this formula that is a key in `map` with the associated
    /// formula. See [`VariableSubstitution`].
    pub fn substitute_variables<I, S>(&self, map: I) -> SubstitutionResult<Formula>
    where
        I: IntoIterator<Item = (S, Formula)>,
        S: Into<String>,
    {
        Ok(VariableSubstitution::new(map)?.apply(self))
    }

    /// Substitutes each operator of this formula that is a key in `map` with the associated
    /// template. See [`OperatorSubstitution`].
    pub fn substitute_operators(
        &self,
        map: impl IntoIterator<Item = (Operator, Formula)>,
    ) -> SubstitutionResult<Formula> {
        Ok(OperatorSubstitution::new(map)?.apply(self))
    }
}
