mod error;
mod logger;

use clap::{AppSettings, ArgEnum, Args, Parser, Subcommand};
use const_format::{formatcp, str_index};
use error::{CliError, CliResult};
use git_version::git_version;
use proplogic::{
    analyze,
    ast::{Formula, InferenceRule, Operator, OperatorSubstitution, VariableSubstitution},
    checker, parser, semantics, Options,
};
use std::{
    io::{self, BufRead, IsTerminal},
    str::FromStr,
};

// `git describe --all` will try to find any ref (including tags) that describes the current commit.
// Release tags look like `proplogic-0.1.0`, so we exclude them to get the branch name.
const GIT_BRANCH_NAME: &str = git_version!(
    args = ["--all", "--exclude", "proplogic-*"],
    fallback = "heads/none",
);
const GIT_COMMIT_HASH: &str = git_version!(fallback = "unknown");
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const VERSION_STRING: &str = formatcp!(
    "{} [git {} {}]",
    APP_VERSION,
    // By default, `git describe` returns something like "heads/main". We ignore the "heads/" part
    // to get only the branch name
    str_index!(GIT_BRANCH_NAME, 6..),
    GIT_COMMIT_HASH,
);

#[derive(Parser)]
#[clap(
    name = "proplogic",
    version = VERSION_STRING,
    setting = AppSettings::DeriveDisplayOrder
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Sets the maximum logging level.
    #[clap(arg_enum, global = true, long = "log", default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    /// Disables output coloring.
    #[clap(global = true, long)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Parses a formula and prints it back, in standard and polish notation.
    Parse(ParseCommandOptions),

    /// Evaluates a formula in a model.
    Eval(EvalCommandOptions),

    /// Prints the truth table of a formula.
    Table(TableCommandOptions),

    /// Checks if a formula is a tautology, a contradiction, or satisfiable.
    Analyze(AnalyzeCommandOptions),

    /// Synthesizes a formula from a truth table.
    Synth(SynthCommandOptions),

    /// Substitutes operators (or variables) in a formula.
    Subst(SubstCommandOptions),

    /// Checks an inference rule.
    Infer(InferCommandOptions),
}

#[derive(Args)]
struct Input {
    /// The formula, in standard notation. If this is `-`, the formula is read from stdin.
    formula: String,
}

#[derive(Args, Clone, Copy)]
struct ParsingOptions {
    /// Rejects formulas nested deeper than this. By default, there is no limit.
    #[clap(long)]
    max_depth: Option<usize>,
}

impl ParsingOptions {
    fn config(self) -> parser::Config {
        parser::Config { max_depth: self.max_depth }
    }
}

#[derive(Args, Clone, Copy)]
struct SemanticsOptions {
    /// The number of threads used to evaluate formulas over all models.
    #[clap(short = 'u', long, required = false, default_value = "1", validator = |s: &str| -> Result<(), String> {
        if let Ok(n) = s.parse::<u32>() {
            if n < 1 {
                Err(format!("The threads number can't be {n}."))
            } else {
                Ok(())
            }
        } else {
            Err(String::from("Not a number."))
        }
    })]
    num_threads: usize,

    /// How many models each thread evaluates at a time.
    #[clap(long, default_value_t = 256)]
    chunk_size: usize,
}

fn build_options(parsing: ParsingOptions, semantics: SemanticsOptions) -> Options {
    Options {
        parser: parsing.config(),
        semantics: semantics::Config::new()
            .num_threads(semantics.num_threads)
            .chunk_size(semantics.chunk_size),
    }
}

#[derive(Args)]
struct ParseCommandOptions {
    #[clap(flatten)]
    input: Input,

    #[clap(flatten)]
    parsing: ParsingOptions,

    /// Reads the formula in polish notation instead.
    #[clap(long)]
    polish: bool,
}

#[derive(Args)]
struct EvalCommandOptions {
    #[clap(flatten)]
    input: Input,

    #[clap(flatten)]
    parsing: ParsingOptions,

    /// The values of the variables, like `p=T` or `q76=F`.
    assignments: Vec<String>,
}

#[derive(Args)]
struct TableCommandOptions {
    #[clap(flatten)]
    input: Input,

    #[clap(flatten)]
    parsing: ParsingOptions,

    #[clap(flatten)]
    semantics: SemanticsOptions,
}

#[derive(Args)]
struct AnalyzeCommandOptions {
    #[clap(flatten)]
    input: Input,

    #[clap(flatten)]
    parsing: ParsingOptions,

    #[clap(flatten)]
    semantics: SemanticsOptions,
}

#[derive(Args)]
struct SynthCommandOptions {
    /// The variables of the truth table, separated by commas, like `p,q,r`.
    variables: String,

    /// The truth table, as a sequence of `T`s and `F`s in the order of all models over the
    /// variables, like `TTTF`.
    values: String,

    /// Synthesizes a formula in conjunctive normal form, instead of disjunctive normal form.
    #[clap(long)]
    cnf: bool,
}

#[derive(Args)]
struct SubstCommandOptions {
    #[clap(flatten)]
    input: Input,

    #[clap(flatten)]
    parsing: ParsingOptions,

    /// The substitutions, like `&=~(~p|~q)`. Templates may only use the variables `p` and `q`,
    /// which stand for the operands of the replaced operator.
    substitutions: Vec<String>,

    /// Substitutes variables instead of operators. Substitutions look like `p=(q&r)`.
    #[clap(long)]
    vars: bool,
}

#[derive(Args)]
struct InferCommandOptions {
    /// The conclusion of the rule.
    conclusion: String,

    /// An assumption of the rule. Can be passed multiple times.
    #[clap(short, long = "assumption")]
    assumptions: Vec<String>,

    /// Also evaluates the rule in the model given by these values, like `p=T`. Can be passed
    /// multiple times.
    #[clap(short, long = "model")]
    model: Vec<String>,

    #[clap(flatten)]
    parsing: ParsingOptions,

    #[clap(flatten)]
    semantics: SemanticsOptions,
}

#[derive(ArgEnum, Clone)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let colors_enabled = !cli.no_color && std::io::stderr().is_terminal();
    logger::init(cli.log_level.into(), colors_enabled);

    let result = match cli.command {
        Command::Parse(options) => parse_command(options),
        Command::Eval(options) => eval_command(options),
        Command::Table(options) => table_command(options),
        Command::Analyze(options) => analyze_command(options),
        Command::Synth(options) => synth_command(options),
        Command::Subst(options) => subst_command(options),
        Command::Infer(options) => infer_command(options),
    };
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Returns the formula text given on the command line, reading it from stdin if it is `-`.
fn read_input(input: &str) -> CliResult<String> {
    if input != "-" {
        return Ok(input.to_owned());
    }
    let mut buf = String::new();
    io::stdin().lock().read_line(&mut buf)?;
    Ok(buf.trim_end_matches(['\n', '\r']).to_owned())
}

fn parse_formula(input: &str, parsing: ParsingOptions) -> CliResult<Formula> {
    Ok(parser::parse_with(input, parsing.config())?)
}

fn parse_bool(s: &str) -> CliResult<bool> {
    match s {
        "T" | "true" | "1" => Ok(true),
        "F" | "false" | "0" => Ok(false),
        other => Err(CliError::InvalidArgument(format!(
            "expected truth value, got '{}'",
            other
        ))),
    }
}

/// Splits an argument like `key=value` at the first `=`.
fn split_pair(arg: &str) -> CliResult<(&str, &str)> {
    arg.split_once('=').ok_or_else(|| {
        CliError::InvalidArgument(format!("expected 'key=value', got '{}'", arg))
    })
}

fn parse_model(assignments: &[String]) -> CliResult<semantics::Model> {
    let pairs = assignments
        .iter()
        .map(|a| -> CliResult<_> {
            let (name, value) = split_pair(a)?;
            Ok((name, parse_bool(value)?))
        })
        .collect::<CliResult<Vec<_>>>()?;
    Ok(semantics::Model::from_pairs(pairs)?)
}

fn parse_command(options: ParseCommandOptions) -> CliResult<()> {
    let input = read_input(&options.input.formula)?;
    let formula = if options.polish {
        parser::parse_polish_with(&input, options.parsing.config())?
    } else {
        parse_formula(&input, options.parsing)?
    };
    println!("{}", formula);
    println!("{}", formula.polish());
    Ok(())
}

fn eval_command(options: EvalCommandOptions) -> CliResult<()> {
    let formula = parse_formula(&read_input(&options.input.formula)?, options.parsing)?;
    let model = parse_model(&options.assignments)?;
    log::info!("evaluating '{}' in {}", formula, model);
    let value = semantics::evaluate(&formula, &model)?;
    println!("{}", if value { "T" } else { "F" });
    Ok(())
}

fn table_command(options: TableCommandOptions) -> CliResult<()> {
    let formula = parse_formula(&read_input(&options.input.formula)?, options.parsing)?;
    let config = build_options(options.parsing, options.semantics).semantics;
    println!("{}", semantics::render_truth_table_with(&formula, &config)?);
    Ok(())
}

fn analyze_command(options: AnalyzeCommandOptions) -> CliResult<()> {
    let input = read_input(&options.input.formula)?;
    let result = analyze(&input, &build_options(options.parsing, options.semantics))?;
    println!("tautology: {}", result.is_tautology);
    println!("contradiction: {}", result.is_contradiction);
    println!("satisfiable: {}", result.is_satisfiable);
    Ok(())
}

fn synth_command(options: SynthCommandOptions) -> CliResult<()> {
    let variables: Vec<&str> = options
        .variables
        .split(',')
        .filter(|v| !v.is_empty())
        .collect();
    let values = options
        .values
        .chars()
        .map(|c| parse_bool(c.encode_utf8(&mut [0; 4])))
        .collect::<CliResult<Vec<_>>>()?;
    let formula = if options.cnf {
        semantics::synthesize_cnf(&variables, &values)?
    } else {
        semantics::synthesize(&variables, &values)?
    };
    println!("{}", formula);
    Ok(())
}

fn subst_command(options: SubstCommandOptions) -> CliResult<()> {
    let formula = parse_formula(&read_input(&options.input.formula)?, options.parsing)?;
    let result = if options.vars {
        let mut substitution = VariableSubstitution::empty();
        for arg in &options.substitutions {
            let (name, replacement) = split_pair(arg)?;
            substitution.insert(name, parse_formula(replacement, options.parsing)?)?;
        }
        substitution.apply(&formula)
    } else {
        let mut substitution = OperatorSubstitution::empty();
        for arg in &options.substitutions {
            let (op, template) = split_pair(arg)?;
            let op = Operator::from_str(op).map_err(|()| {
                CliError::InvalidArgument(format!("'{}' is not an operator", op))
            })?;
            substitution.insert(op, parse_formula(template, options.parsing)?)?;
        }
        substitution.apply(&formula)
    };
    println!("{}", result);
    Ok(())
}

fn infer_command(options: InferCommandOptions) -> CliResult<()> {
    let assumptions = options
        .assumptions
        .iter()
        .map(|a| parse_formula(a, options.parsing))
        .collect::<CliResult<Vec<_>>>()?;
    let conclusion = parse_formula(&read_input(&options.conclusion)?, options.parsing)?;
    let rule = InferenceRule::new(assumptions, conclusion);
    log::info!("checking rule {}", rule);

    let config = build_options(options.parsing, options.semantics).semantics;
    let sound = checker::is_sound_inference_with(&rule, &config)?;
    println!("{}", if sound { "sound" } else { "unsound" });

    if !options.model.is_empty() {
        let model = parse_model(&options.model)?;
        let holds = checker::evaluate_inference(&rule, &model)?;
        println!("{} in {}", if holds { "holds" } else { "does not hold" }, model);
    }
    Ok(())
}
