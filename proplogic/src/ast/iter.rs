//! Iterators over the nodes of a formula. They keep their own stack, so formulas of any depth can
//! be traversed without growing the call stack.

use super::Formula;
use std::iter::FusedIterator;

/// An iterator over the nodes of a formula in preorder: every node is yielded before its operands,
/// and the operands are visited from left to right.
///
/// This struct is created by the [`preorder`](Formula::preorder) method on formulas.
///
/// # Examples
///
/// ```
/// # use proplogic::parser::parse;
/// let f = parse("(~p->(q&T))").unwrap();
/// let roots: Vec<_> = f.preorder().map(|node| node.root()).collect();
/// assert_eq!(roots, ["->", "~", "p", "&", "q", "T"]);
/// ```
#[derive(Debug, Clone)]
pub struct Preorder<'a> {
    stack: Vec<&'a Formula>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Formula;

    fn next(&mut self) -> Option<Self::Item> {
        let formula = self.stack.pop()?;
        self.stack.extend(formula.args().iter().rev());
        Some(formula)
    }
}

impl FusedIterator for Preorder<'_> {}

/// An iterator over the nodes of a formula in postorder: every node is yielded after all of its
/// operands, and the operands are visited from left to right.
///
/// This struct is created by the [`postorder`](Formula::postorder) method on formulas.
///
/// # Examples
///
/// ```
/// # use proplogic::parser::parse;
/// let f = parse("(~p->(q&T))").unwrap();
/// let roots: Vec<_> = f.postorder().map(|node| node.root()).collect();
/// assert_eq!(roots, ["p", "~", "q", "T", "&", "->"]);
/// ```
#[derive(Debug, Clone)]
pub struct Postorder<'a> {
    /// Each entry holds a node, and whether its operands were already pushed.
    stack: Vec<(&'a Formula, bool)>,
}

impl<'a> Iterator for Postorder<'a> {
    type Item = &'a Formula;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (formula, expanded) = self.stack.pop()?;
            if expanded || formula.args().is_empty() {
                return Some(formula);
            }
            self.stack.push((formula, true));
            self.stack
                .extend(formula.args().iter().rev().map(|arg| (arg, false)));
        }
    }
}

impl FusedIterator for Postorder<'_> {}

impl Formula {
    /// Returns an iterator over the nodes of this formula in preorder. Shared subtrees are visited
    /// once for each occurrence.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }

    /// Returns an iterator over the nodes of this formula in postorder. Shared subtrees are
    /// visited once for each occurrence.
    pub fn postorder(&self) -> Postorder<'_> {
        Postorder { stack: vec![(self, false)] }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::tests::parse_formula;

    #[test]
    fn test_orders() {
        let f = parse_formula("((x1&~y)|(F->z))");
        let pre: Vec<_> = f.preorder().map(|n| n.root()).collect();
        assert_eq!(vec!["|", "&", "x1", "~", "y", "->", "F", "z"], pre);
        let post: Vec<_> = f.postorder().map(|n| n.root()).collect();
        assert_eq!(vec!["x1", "y", "~", "&", "F", "z", "->", "|"], post);

        let leaf = parse_formula("q");
        assert_eq!(1, leaf.preorder().count());
        assert_eq!(1, leaf.postorder().count());
    }

    #[test]
    fn test_deep_formula() {
        let depth = 200_000;
        let f = parse_formula(&format!("{}p", "~".repeat(depth)));
        assert_eq!(depth + 1, f.postorder().count());
        assert_eq!(Some("p"), f.preorder().last().map(|n| n.root()));
    }
}
