use super::{Model, SemanticsError};
use crate::ast::{Formula, Operator, Term};
use indexmap::IndexSet;

/// Calculates the truth value of `formula` in `model`. The model must assign a value to every
/// variable of the formula, otherwise an error is returned and nothing is evaluated.
pub fn evaluate(formula: &Formula, model: &Model) -> Result<bool, SemanticsError> {
    if let Some(missing) = model.first_missing(formula) {
        return Err(SemanticsError::MissingVariable(missing.clone()));
    }
    evaluate_covered(formula, model)
}

fn evaluate_covered(formula: &Formula, model: &Model) -> Result<bool, SemanticsError> {
    let mut values: Vec<bool> = Vec::new();
    for node in formula.postorder() {
        let value = match node.term() {
            Term::Var(name) => model
                .get(name)
                .ok_or_else(|| SemanticsError::MissingVariable(name.clone()))?,
            Term::Op(op, _) => {
                let start = values.len() - op.arity();
                let value = op.apply(&values[start..]);
                values.truncate(start);
                value
            }
        };
        values.push(value);
    }
    match values.as_slice() {
        [result] => Ok(*result),
        _ => unreachable!("evaluation left {} values", values.len()),
    }
}

#[derive(Debug, Clone, Copy)]
enum Instruction {
    Variable(usize),
    Apply(Operator),
}

/// A formula compiled for fast evaluation over the models of a fixed, ordered list of variables.
///
/// Models are identified by their index in [`all_models`](super::all_models): the first variable
/// corresponds to the most significant bit of the index. Variable names are resolved once, when
/// compiling, so evaluating a program can't fail.
#[derive(Debug, Clone)]
pub(crate) struct Program {
    instructions: Vec<Instruction>,
    num_variables: usize,
    max_stack: usize,
}

impl Program {
    pub fn compile(
        formula: &Formula,
        variables: &IndexSet<String>,
    ) -> Result<Self, SemanticsError> {
        let mut instructions = Vec::new();
        let (mut stack_len, mut max_stack) = (0, 0);
        for node in formula.postorder() {
            match node.term() {
                Term::Var(name) => {
                    let index = variables
                        .get_index_of(name)
                        .ok_or_else(|| SemanticsError::MissingVariable(name.clone()))?;
                    instructions.push(Instruction::Variable(index));
                }
                Term::Op(op, _) => {
                    stack_len -= op.arity();
                    instructions.push(Instruction::Apply(*op));
                }
            }
            stack_len += 1;
            max_stack = max_stack.max(stack_len);
        }
        Ok(Self {
            instructions,
            num_variables: variables.len(),
            max_stack,
        })
    }

    /// Evaluates the program in the model with the given index.
    pub fn eval(&self, model_index: usize) -> bool {
        let mut stack: Vec<bool> = Vec::with_capacity(self.max_stack);
        for instruction in &self.instructions {
            match *instruction {
                Instruction::Variable(i) => {
                    let shift = self.num_variables - 1 - i;
                    stack.push((model_index >> shift) & 1 == 1);
                }
                Instruction::Apply(op) => {
                    let start = stack.len() - op.arity();
                    let result = op.apply(&stack[start..]);
                    stack.truncate(start);
                    stack.push(result);
                }
            }
        }
        match stack.as_slice() {
            [result] => *result,
            _ => unreachable!("program left {} values on the stack", stack.len()),
        }
    }
}
