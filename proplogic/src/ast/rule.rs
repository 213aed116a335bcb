use super::Formula;
use crate::utils::sorted_union;
use indexmap::IndexSet;
use std::fmt;

/// An inference rule: a list of assumptions, and a conclusion that should follow from them.
///
/// A rule with no assumptions is sound exactly when its conclusion is a tautology.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InferenceRule {
    pub assumptions: Vec<Formula>,
    pub conclusion: Formula,
}

impl InferenceRule {
    pub fn new(assumptions: Vec<Formula>, conclusion: Formula) -> Self {
        Self { assumptions, conclusion }
    }

    /// The set of all variables that occur in the assumptions or in the conclusion, sorted by
    /// name.
    pub fn variables(&self) -> IndexSet<String> {
        let formulas = self.assumptions.iter().chain(std::iter::once(&self.conclusion));
        sorted_union(formulas.map(Formula::variables))
    }
}

impl fmt::Display for InferenceRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        if let [head, tail @ ..] = self.assumptions.as_slice() {
            write!(f, "{}", head)?;
            for a in tail {
                write!(f, ", {}", a)?;
            }
        }
        write!(f, "] ==> {}", self.conclusion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tests::parse_formulas;

    #[test]
    fn test_rule() {
        let [a, b, c] = parse_formulas(["(p|q)", "~r", "(z->p)"]);
        let rule = InferenceRule::new(vec![a, b], c.clone());
        assert_eq!("[(p|q), ~r] ==> (z->p)", rule.to_string());
        assert_eq!(
            vec!["p", "q", "r", "z"],
            rule.variables().iter().collect::<Vec<_>>()
        );

        let axiom = InferenceRule::new(Vec::new(), c);
        assert_eq!("[] ==> (z->p)", axiom.to_string());
    }
}
