use indexmap::IndexSet;
use std::hash::Hash;

/// Collects the union of `sets` into a new set, sorted in ascending order.
pub fn sorted_union<'a, T, I>(sets: I) -> IndexSet<T>
where
    T: Clone + Hash + Ord + 'a,
    I: IntoIterator<Item = &'a IndexSet<T>>,
{
    let mut result: IndexSet<T> = sets.into_iter().flatten().cloned().collect();
    result.sort();
    result
}

/// Returns the first element of `iter` that is equal to an element that came before it.
pub fn first_duplicate<T, I>(iter: I) -> Option<T>
where
    T: Hash + Eq,
    I: IntoIterator<Item = T>,
{
    let mut seen = IndexSet::new();
    for item in iter {
        if seen.contains(&item) {
            return Some(item);
        }
        seen.insert(item);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_union() {
        let a: IndexSet<_> = ["z", "p"].into_iter().collect();
        let b: IndexSet<_> = ["q", "z"].into_iter().collect();
        let got: Vec<_> = sorted_union([&a, &b]).into_iter().collect();
        assert_eq!(vec!["p", "q", "z"], got);
        assert!(sorted_union::<&str, [&IndexSet<&str>; 0]>([]).is_empty());
    }

    #[test]
    fn test_first_duplicate() {
        assert_eq!(Some("q"), first_duplicate(["p", "q", "r", "q", "p"]));
        assert_eq!(None, first_duplicate(["p", "q", "r"]));
        assert_eq!(None, first_duplicate(Vec::<usize>::new()));
    }
}
