use super::{analysis::truth_table, Config, SemanticsError};
use crate::ast::Formula;
use std::fmt::Write;

fn cell(value: bool) -> &'static str {
    if value {
        "T"
    } else {
        "F"
    }
}

fn write_row<'a>(dest: &mut String, widths: &[usize], cells: impl IntoIterator<Item = &'a str>) {
    dest.push('|');
    for (cell, width) in cells.into_iter().zip(widths) {
        // Writing to a `String` never fails
        let _ = write!(dest, " {:<width$} |", cell, width = width);
    }
    dest.push('\n');
}

/// Renders the truth table of `formula` as a markdown table. There is a column for each variable
/// of the formula, in sorted order, and a last column for the formula itself. The rows are in the
/// order of [`all_models`](super::all_models).
///
/// ```text
/// | p | q76 | ~(p&q76) |
/// |---|-----|----------|
/// | F | F   | T        |
/// | F | T   | T        |
/// | T | F   | T        |
/// | T | T   | F        |
/// ```
pub fn render_truth_table(formula: &Formula) -> Result<String, SemanticsError> {
    render_truth_table_with(formula, &Config::default())
}

pub fn render_truth_table_with(
    formula: &Formula,
    config: &Config,
) -> Result<String, SemanticsError> {
    let values = truth_table(formula, config)?;
    let variables = formula.variables();
    let headers: Vec<&str> = variables
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(formula.text()))
        .collect();
    let widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();

    let mut result = String::new();
    write_row(&mut result, &widths, headers.iter().copied());
    result.push('|');
    for w in &widths {
        result.push_str(&"-".repeat(w + 2));
        result.push('|');
    }
    result.push('\n');

    let n = variables.len();
    for (index, value) in values.into_iter().enumerate() {
        let assignment = (0..n).map(|i| cell((index >> (n - 1 - i)) & 1 == 1));
        write_row(&mut result, &widths, assignment.chain([cell(value)]));
    }

    // No trailing newline
    result.pop();
    Ok(result)
}
