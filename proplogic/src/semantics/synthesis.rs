//! Synthesis of formulas from truth tables, in disjunctive and conjunctive normal forms.

use super::{all_models, AllModels, Model, SemanticsError};
use crate::ast::Formula;
use std::{
    iter::{Copied, Zip},
    slice,
};

fn variable(name: &str) -> Result<Formula, SemanticsError> {
    Formula::new_var(name).map_err(|_| SemanticsError::InvalidVariable(name.to_owned()))
}

/// Builds the literal `name` if `positive` is true, and `~name` otherwise.
fn literal(name: &str, positive: bool) -> Result<Formula, SemanticsError> {
    let var = variable(name)?;
    Ok(if positive { var } else { Formula::new_not(var) })
}

/// Joins the literals of `model` from left to right with `join`. `polarity` decides which value
/// makes a variable appear as a positive literal.
fn clause<F>(model: &Model, polarity: bool, join: F) -> Result<Formula, SemanticsError>
where
    F: Fn(Formula, Formula) -> Formula,
{
    model
        .iter()
        .map(|(name, value)| literal(name, value == polarity))
        .reduce(|acc, lit| Ok(join(acc?, lit?)))
        .unwrap_or(Err(SemanticsError::EmptyVariableList))
}

/// Synthesizes a conjunctive clause that is true in `model`, and false in every other model over
/// the same variables. For example, the model `{p: T, q: F}` results in `(p&~q)`.
///
/// The literals follow the order of the model and are joined from left to right, so the first
/// ones are the most deeply nested: `{p: T, q: F, r12: T}` results in `((p&~q)&r12)`, and not in
/// `(p&(~q&r12))`.
pub fn synthesize_for_model(model: &Model) -> Result<Formula, SemanticsError> {
    clause(model, true, Formula::new_and)
}

/// Synthesizes a disjunctive clause that is false in `model`, and true in every other model over
/// the same variables. For example, the model `{p: T, q: F}` results in `(~p|q)`.
pub fn synthesize_for_all_except_model(model: &Model) -> Result<Formula, SemanticsError> {
    clause(model, false, Formula::new_or)
}

/// Checks the preconditions shared by both kinds of synthesis, and returns the models that
/// correspond to each entry of the truth table.
fn table_models<'a, S: AsRef<str>>(
    variables: &[S],
    values: &'a [bool],
) -> Result<Zip<AllModels, Copied<slice::Iter<'a, bool>>>, SemanticsError> {
    if variables.is_empty() {
        return Err(SemanticsError::EmptyVariableList);
    }
    let models = all_models(variables.iter().map(AsRef::as_ref))?;
    if models.len() != values.len() {
        return Err(SemanticsError::WrongTableLength {
            expected: models.len(),
            got: values.len(),
        });
    }
    Ok(models.zip(values.iter().copied()))
}

/// Synthesizes a formula in disjunctive normal form over `variables` whose truth table is
/// `values`. The values must be in the order of [`all_models`].
///
/// There is one clause for each model in which the formula should be true, and the clauses are
/// joined from left to right. If the formula is never true, the result is `(v&~v)`, where `v` is
/// the first variable.
pub fn synthesize<S: AsRef<str>>(
    variables: &[S],
    values: &[bool],
) -> Result<Formula, SemanticsError> {
    let mut num_clauses = 0;
    let mut result: Option<Formula> = None;
    for (model, _) in table_models(variables, values)?.filter(|(_, value)| *value) {
        let clause = synthesize_for_model(&model)?;
        num_clauses += 1;
        result = Some(match result {
            Some(acc) => Formula::new_or(acc, clause),
            None => clause,
        });
    }
    log::debug!("synthesized DNF with {} clauses", num_clauses);

    match result {
        Some(f) => Ok(f),
        None => {
            let v = variable(variables[0].as_ref())?;
            Ok(Formula::new_and(v.clone(), Formula::new_not(v)))
        }
    }
}

/// Synthesizes a formula in conjunctive normal form over `variables` whose truth table is
/// `values`. The values must be in the order of [`all_models`].
///
/// There is one clause for each model in which the formula should be false, and the clauses are
/// joined from left to right. If the formula is always true, the result is `(v|~v)`, where `v` is
/// the first variable.
pub fn synthesize_cnf<S: AsRef<str>>(
    variables: &[S],
    values: &[bool],
) -> Result<Formula, SemanticsError> {
    let mut num_clauses = 0;
    let mut result: Option<Formula> = None;
    for (model, _) in table_models(variables, values)?.filter(|(_, value)| !*value) {
        let clause = synthesize_for_all_except_model(&model)?;
        num_clauses += 1;
        result = Some(match result {
            Some(acc) => Formula::new_and(acc, clause),
            None => clause,
        });
    }
    log::debug!("synthesized CNF with {} clauses", num_clauses);

    match result {
        Some(f) => Ok(f),
        None => {
            let v = variable(variables[0].as_ref())?;
            Ok(Formula::new_or(v.clone(), Formula::new_not(v)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantics::{evaluate, is_contradiction, is_tautology, truth_table, Config};

    fn model(pairs: &[(&str, bool)]) -> Model {
        Model::from_pairs(pairs.iter().copied()).unwrap()
    }

    fn check_synthesis(variables: &[&str], values: &[bool]) {
        for synth in [synthesize::<&str>, synthesize_cnf::<&str>] {
            let f = synth(variables, values).unwrap();

            // The synthesized formula may not mention every variable, so we evaluate it over all
            // models of the given variables
            let models = all_models(variables.iter().copied()).unwrap();
            for (m, expected) in models.zip(values) {
                assert_eq!(Ok(*expected), evaluate(&f, &m), "{f} in {m}");
            }
        }
    }

    #[test]
    fn test_clauses() {
        let m = model(&[("p", true), ("q", false), ("r12", true)]);
        let clause = synthesize_for_model(&m).unwrap();
        assert_eq!("((p&~q)&r12)", clause.to_string());
        assert_eq!(Some("r12"), clause.second().and_then(Formula::as_var));
        assert_eq!(
            "((~p|q)|~r12)",
            synthesize_for_all_except_model(&m).unwrap().to_string()
        );

        let m = model(&[("x", false)]);
        assert_eq!("~x", synthesize_for_model(&m).unwrap().to_string());
        assert_eq!("x", synthesize_for_all_except_model(&m).unwrap().to_string());

        assert_eq!(
            Err(SemanticsError::EmptyVariableList),
            synthesize_for_model(&Model::new())
        );
    }

    #[test]
    fn test_synthesize() {
        let f = synthesize(&["p", "q"], &[true, true, true, false]).unwrap();
        assert_eq!("(((~p&~q)|(~p&q))|(p&~q))", f.to_string());
        assert_eq!(Ok(vec![true, true, true, false]), truth_table(&f, &Config::new()));

        let f = synthesize_cnf(&["p", "q"], &[true, true, true, false]).unwrap();
        assert_eq!("(~p|~q)", f.to_string());

        check_synthesis(&["p"], &[false, true]);
        check_synthesis(&["x", "y", "z"], &[true, false, false, true, true, true, false, true]);
        check_synthesis(&["q", "p"], &[false, true, false, false]);
    }

    #[test]
    fn test_constant_tables() {
        let f = synthesize(&["p", "q"], &[false; 4]).unwrap();
        assert_eq!("(p&~p)", f.to_string());
        assert_eq!(Ok(true), is_contradiction(&f));

        let f = synthesize_cnf(&["p", "q"], &[true; 4]).unwrap();
        assert_eq!("(p|~p)", f.to_string());
        assert_eq!(Ok(true), is_tautology(&f));

        check_synthesis(&["p", "q"], &[false; 4]);
        check_synthesis(&["p", "q"], &[true; 4]);
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(
            Err(SemanticsError::EmptyVariableList),
            synthesize::<&str>(&[], &[true])
        );
        assert_eq!(
            Err(SemanticsError::WrongTableLength { expected: 4, got: 3 }),
            synthesize(&["p", "q"], &[true, false, true])
        );
        assert_eq!(
            Err(SemanticsError::InvalidVariable("a".to_owned())),
            synthesize_cnf(&["p", "a"], &[true; 4])
        );
        assert_eq!(
            Err(SemanticsError::DuplicateVariable("p".to_owned())),
            synthesize(&["p", "p"], &[true; 4])
        );
    }
}
