use proplogic::{
    ast::Formula,
    parser,
    semantics::{self, all_models, Config},
};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

const VARIABLES: [&str; 5] = ["p", "q", "r12", "x", "z3"];

fn random_formula(rng: &mut StdRng, depth: usize) -> Formula {
    if depth == 0 || rng.gen_bool(0.2) {
        return match rng.gen_range(0..6) {
            0 => Formula::new_bool(rng.gen_bool(0.5)),
            _ => Formula::new_var(*VARIABLES.choose(rng).unwrap()).unwrap(),
        };
    }
    let first = random_formula(rng, depth - 1);
    match rng.gen_range(0..4) {
        0 => Formula::new_not(first),
        1 => Formula::new_and(first, random_formula(rng, depth - 1)),
        2 => Formula::new_or(first, random_formula(rng, depth - 1)),
        _ => Formula::new_implies(first, random_formula(rng, depth - 1)),
    }
}

fn random_formulas(seed: u64, count: usize) -> Vec<Formula> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| random_formula(&mut rng, 6)).collect()
}

#[test]
fn test_round_trip() {
    for f in random_formulas(0, 200) {
        let text = f.to_string();
        assert!(parser::is_formula(&text), "{text}");
        assert_eq!(f, parser::parse(&text).unwrap());
        assert_eq!(f, parser::parse_polish(&f.polish()).unwrap());
        assert_eq!(f, text.parse::<Formula>().unwrap());
    }
}

#[test]
fn test_truncated_formulas_are_rejected() {
    for f in random_formulas(1, 100) {
        let text = f.to_string();
        if let Some(truncated) = text.strip_suffix(')') {
            assert!(!parser::is_formula(truncated), "{text}");
        }
        let doubled = format!("{text}{text}");
        let (prefix, rest) = parser::parse_prefix(&doubled).unwrap();
        assert_eq!(f, prefix);
        assert_eq!(text, rest);
    }
}

#[test]
fn test_duality() {
    for f in random_formulas(2, 100) {
        let negated = Formula::new_not(f.clone());
        let contradiction = semantics::is_contradiction(&f).unwrap();
        assert_eq!(contradiction, semantics::is_tautology(&negated).unwrap());
        assert_eq!(!contradiction, semantics::is_satisfiable(&f).unwrap());
    }
}

#[test]
fn test_synthesis_reproduces_truth_table() {
    let mut rng = StdRng::seed_from_u64(3);
    for num_variables in 1..=4 {
        let variables = &VARIABLES[..num_variables];
        for _ in 0..20 {
            let values: Vec<bool> = (0..1 << num_variables).map(|_| rng.gen_bool(0.5)).collect();
            for f in [
                semantics::synthesize(variables, &values).unwrap(),
                semantics::synthesize_cnf(variables, &values).unwrap(),
            ] {
                let models = all_models(variables.iter().copied()).unwrap();
                let got: Result<Vec<_>, _> = semantics::truth_values(&f, models).collect();
                assert_eq!(Ok(values.clone()), got, "{f}");
            }
        }
    }
}

#[test]
fn test_synthesis_of_formula_table() {
    for f in random_formulas(4, 50) {
        let variables: Vec<&str> = f.variables().iter().map(String::as_str).collect();
        if variables.is_empty() {
            continue;
        }
        let values = semantics::truth_table(&f, &Config::new()).unwrap();
        let synthesized = semantics::synthesize(&variables, &values).unwrap();
        let equivalent = Formula::new_and(
            Formula::new_implies(f.clone(), synthesized.clone()),
            Formula::new_implies(synthesized, f.clone()),
        );
        assert!(semantics::is_tautology(&equivalent).unwrap(), "{f}");
    }
}

#[test]
fn test_parallel_agrees_with_sequential() {
    let sequential = Config::new();
    let parallel = Config::new().num_threads(4).chunk_size(3);
    for f in random_formulas(5, 50) {
        assert_eq!(
            semantics::truth_table(&f, &sequential),
            semantics::truth_table(&f, &parallel)
        );
        assert_eq!(
            semantics::is_tautology_with(&f, &sequential),
            semantics::is_tautology_with(&f, &parallel)
        );
        assert_eq!(
            semantics::is_contradiction_with(&f, &sequential),
            semantics::is_contradiction_with(&f, &parallel)
        );
    }
}
