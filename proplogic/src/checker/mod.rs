//! Checking inference rules against the semantics of their formulas.

use crate::{
    ast::InferenceRule,
    semantics::{all_indices, evaluate, num_models, Config, Model, Program, SemanticsError},
};

/// Checks if `rule` holds in `model`, that is, if the conclusion is true in the model or any of the
/// assumptions is false in it. The model must assign a value to every variable of the rule.
pub fn evaluate_inference(rule: &InferenceRule, model: &Model) -> Result<bool, SemanticsError> {
    let mut formulas = rule.assumptions.iter().chain(std::iter::once(&rule.conclusion));
    if let Some(missing) = formulas.find_map(|f| model.first_missing(f)) {
        return Err(SemanticsError::MissingVariable(missing.clone()));
    }

    for assumption in &rule.assumptions {
        if !evaluate(assumption, model)? {
            return Ok(true);
        }
    }
    evaluate(&rule.conclusion, model)
}

/// Checks if `rule` is sound, that is, if it holds in every model over its variables.
pub fn is_sound_inference(rule: &InferenceRule) -> Result<bool, SemanticsError> {
    is_sound_inference_with(rule, &Config::default())
}

pub fn is_sound_inference_with(
    rule: &InferenceRule,
    config: &Config,
) -> Result<bool, SemanticsError> {
    let variables = rule.variables();
    let len = num_models(variables.len())?;
    let assumptions = rule
        .assumptions
        .iter()
        .map(|a| Program::compile(a, &variables))
        .collect::<Result<Vec<_>, _>>()?;
    let conclusion = Program::compile(&rule.conclusion, &variables)?;
    log::debug!(
        "checking rule with {} assumptions over {} models",
        assumptions.len(),
        len
    );

    Ok(all_indices(len, config, |i| {
        assumptions.iter().any(|a| !a.eval(i)) || conclusion.eval(i)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parser::tests::parse_formula, semantics::is_tautology};

    fn rule(assumptions: &[&str], conclusion: &str) -> InferenceRule {
        let assumptions = assumptions.iter().map(|s| parse_formula(s)).collect();
        InferenceRule::new(assumptions, parse_formula(conclusion))
    }

    fn model(pairs: &[(&str, bool)]) -> Model {
        Model::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_evaluate_inference() {
        let r = rule(&["p"], "q");
        assert_eq!(Ok(false), evaluate_inference(&r, &model(&[("p", true), ("q", false)])));
        assert_eq!(Ok(true), evaluate_inference(&r, &model(&[("p", false), ("q", false)])));
        assert_eq!(Ok(true), evaluate_inference(&r, &model(&[("p", true), ("q", true)])));

        let axiom = rule(&[], "(x|y)");
        assert_eq!(Ok(false), evaluate_inference(&axiom, &model(&[("x", false), ("y", false)])));
    }

    #[test]
    fn test_missing_variable() {
        // Even when an assumption is false, the model must cover the conclusion
        let r = rule(&["p"], "(q|r)");
        assert_eq!(
            Err(SemanticsError::MissingVariable("r".to_owned())),
            evaluate_inference(&r, &model(&[("p", false), ("q", true)]))
        );
    }

    #[test]
    fn test_is_sound_inference() {
        let sound = [
            rule(&["p", "(p->q)"], "q"),
            rule(&["(p->q)", "~q"], "~p"),
            rule(&["(p|q)", "~p"], "q"),
            rule(&["(p->q)", "(q->r)"], "(p->r)"),
            rule(&["(p&q)"], "p"),
            rule(&[], "(p|~p)"),
            rule(&["p", "~p"], "q"),
            rule(&["F"], "x"),
        ];
        let unsound = [
            rule(&["(p->q)", "q"], "p"),
            rule(&["(p->q)", "~p"], "~q"),
            rule(&["(p|q)"], "p"),
            rule(&[], "p"),
            rule(&["T"], "F"),
        ];
        let configs = [Config::new(), Config::new().num_threads(3).chunk_size(1)];
        for config in &configs {
            for r in &sound {
                assert_eq!(Ok(true), is_sound_inference_with(r, config), "{r}");
            }
            for r in &unsound {
                assert_eq!(Ok(false), is_sound_inference_with(r, config), "{r}");
            }
        }
    }

    #[test]
    fn test_axioms_are_tautologies() {
        for s in ["(p|~p)", "(p->q)", "((p->q)->(~q->~p))", "T", "F"] {
            let f = parse_formula(s);
            let axiom = InferenceRule::new(Vec::new(), f.clone());
            assert_eq!(is_tautology(&f), is_sound_inference(&axiom));
        }
    }
}
