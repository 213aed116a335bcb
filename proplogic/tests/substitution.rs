use proplogic::{
    ast::{Formula, InferenceRule, Operator},
    checker::{evaluate_inference, is_sound_inference},
    parser::parse,
    semantics::{self, all_models, evaluate},
};

fn run_operator_test(original: &str, templates: &[(Operator, &str)]) -> Formula {
    let original = parse(original).unwrap();
    let templates = templates.iter().map(|&(op, t)| (op, parse(t).unwrap()));
    let got = original.substitute_operators(templates).unwrap();

    // The templates used in these tests are all equivalent to the operators they replace
    let equivalent = Formula::new_and(
        Formula::new_implies(original.clone(), got.clone()),
        Formula::new_implies(got.clone(), original),
    );
    assert!(semantics::is_tautology(&equivalent).unwrap(), "{equivalent}");
    got
}

#[test]
fn test_operator_elimination() {
    use Operator::*;

    let got = run_operator_test("((x&y)&~z)", &[(And, "~(~p|~q)")]);
    assert_eq!("~(~~(~x|~y)|~~z)", got.to_string());
    assert!(!got.operators().contains(&And));

    let got = run_operator_test(
        "((p->q)|(T&~r))",
        &[(Implies, "(~p|q)"), (True, "~F"), (And, "~(~p|~q)")],
    );
    assert_eq!(
        [False, Not, Or].as_slice(),
        got.operators().iter().copied().collect::<Vec<_>>()
    );
}

#[test]
fn test_variable_substitution_preserves_soundness() {
    // Substituting variables in a sound rule gives another sound rule
    let modus_ponens = InferenceRule::new(
        vec![parse("p").unwrap(), parse("(p->q)").unwrap()],
        parse("q").unwrap(),
    );
    assert_eq!(Ok(true), is_sound_inference(&modus_ponens));

    let map = [("p", parse("(x|y)").unwrap()), ("q", parse("~z").unwrap())];
    let substitute = |f: &Formula| f.substitute_variables(map.clone()).unwrap();
    let instance = InferenceRule::new(
        modus_ponens.assumptions.iter().map(substitute).collect(),
        substitute(&modus_ponens.conclusion),
    );
    assert_eq!("[(x|y), ((x|y)->~z)] ==> ~z", instance.to_string());
    assert_eq!(Ok(true), is_sound_inference(&instance));

    for model in all_models(instance.variables()).unwrap() {
        assert_eq!(Ok(true), evaluate_inference(&instance, &model));
        let premise = evaluate(&instance.assumptions[0], &model).unwrap();
        let implication = evaluate(&instance.assumptions[1], &model).unwrap();
        if premise && implication {
            assert_eq!(Ok(true), evaluate(&instance.conclusion, &model));
        }
    }
}
