use super::{
    evaluate, models::num_models, parallel, Config, Model, Program, SemanticsError,
};
use crate::ast::Formula;
use std::borrow::Borrow;

/// Lazily calculates the truth value of `formula` in each of `models`, in order.
pub fn truth_values<'a, I>(
    formula: &'a Formula,
    models: I,
) -> impl Iterator<Item = Result<bool, SemanticsError>> + 'a
where
    I: IntoIterator,
    I::IntoIter: 'a,
    I::Item: Borrow<Model>,
{
    models.into_iter().map(move |m| evaluate(formula, m.borrow()))
}

/// Calculates the truth value of `formula` in every model over its variables, in the order of
/// [`all_models`](super::all_models).
pub fn truth_table(formula: &Formula, config: &Config) -> Result<Vec<bool>, SemanticsError> {
    let variables = formula.variables();
    let len = num_models(variables.len())?;
    let program = Program::compile(formula, variables)?;
    Ok(parallel::map_indices(len, config, |i| program.eval(i)))
}

fn holds_in_all_models(formula: &Formula, config: &Config) -> Result<bool, SemanticsError> {
    let variables = formula.variables();
    let len = num_models(variables.len())?;
    let program = Program::compile(formula, variables)?;
    Ok(parallel::all_indices(len, config, |i| program.eval(i)))
}

/// Checks if `formula` is a tautology, that is, if it holds in every model over its variables.
pub fn is_tautology(formula: &Formula) -> Result<bool, SemanticsError> {
    is_tautology_with(formula, &Config::default())
}

pub fn is_tautology_with(formula: &Formula, config: &Config) -> Result<bool, SemanticsError> {
    holds_in_all_models(formula, config)
}

/// Checks if `formula` is a contradiction, that is, if its negation is a tautology.
pub fn is_contradiction(formula: &Formula) -> Result<bool, SemanticsError> {
    is_contradiction_with(formula, &Config::default())
}

pub fn is_contradiction_with(formula: &Formula, config: &Config) -> Result<bool, SemanticsError> {
    is_tautology_with(&Formula::new_not(formula.clone()), config)
}

/// Checks if `formula` is satisfiable, that is, if it is not a contradiction.
pub fn is_satisfiable(formula: &Formula) -> Result<bool, SemanticsError> {
    is_satisfiable_with(formula, &Config::default())
}

pub fn is_satisfiable_with(formula: &Formula, config: &Config) -> Result<bool, SemanticsError> {
    is_contradiction_with(formula, config).map(|c| !c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parser::tests::parse_formula, semantics::all_models};

    #[test]
    fn test_truth_values() {
        let f = parse_formula("~(p&q76)");
        let models = all_models(["p", "q76"]).unwrap();
        let got: Result<Vec<_>, _> = truth_values(&f, models).collect();
        assert_eq!(Ok(vec![true, true, true, false]), got);

        // Models can also be borrowed
        let models: Vec<_> = all_models(["q76", "p", "r"]).unwrap().collect();
        assert_eq!(8, truth_values(&f, &models).count());

        let models: Vec<_> = all_models(["p"]).unwrap().collect();
        let got: Vec<_> = truth_values(&f, &models).collect();
        assert!(got.iter().all(Result::is_err));
    }

    #[test]
    fn test_truth_table() {
        let f = parse_formula("~(p&q76)");
        assert_eq!(Ok(vec![true, true, true, false]), truth_table(&f, &Config::new()));
        assert_eq!(Ok(vec![false]), truth_table(&parse_formula("(T&F)"), &Config::new()));
    }

    #[test]
    fn test_analysis() {
        // (formula, tautology, contradiction, satisfiable)
        let cases = [
            ("T", true, false, true),
            ("F", false, true, false),
            ("p", false, false, true),
            ("(p|~p)", true, false, true),
            ("(p&~p)", false, true, false),
            ("((p->q)->(~q->~p))", true, false, true),
            ("(~(p|q)&(p->q))", false, false, true),
            ("((x&y)&~(y|z))", false, true, false),
            ("(((p->q)&(q->r))->(p->r))", true, false, true),
        ];
        for (s, tautology, contradiction, satisfiable) in cases {
            let f = parse_formula(s);
            assert_eq!(Ok(tautology), is_tautology(&f), "{s}");
            assert_eq!(Ok(contradiction), is_contradiction(&f), "{s}");
            assert_eq!(Ok(satisfiable), is_satisfiable(&f), "{s}");
        }
    }

    #[test]
    fn test_parallel_analysis() {
        let config = Config::new().num_threads(4).chunk_size(2);
        let f = parse_formula("((((p&q)|(r&s))|(t&u))->(((p|r)|t)&((q|s)|u)))");
        assert_eq!(Ok(true), is_tautology_with(&f, &config));
        assert_eq!(Ok(false), is_contradiction_with(&f, &config));

        let g = parse_formula("((p->q)&(r|(s&~t)))");
        assert_eq!(truth_table(&g, &Config::new()), truth_table(&g, &config));
        assert_eq!(Ok(true), is_satisfiable_with(&g, &config));
    }
}
