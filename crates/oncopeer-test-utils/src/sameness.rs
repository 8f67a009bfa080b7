//! Order-insensitive comparisons for identifier lists and grouped maps.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// True if both lists hold the same elements, regardless of order.
pub fn same_lists<T: Ord + Clone>(list1: &[T], list2: &[T]) -> bool {
    sorted(list1) == sorted(list2)
}

/// True if both maps have the same keys and each key's lists are the same
/// regardless of element order.
pub fn same_key_to_list_maps<K, T>(map1: &HashMap<K, Vec<T>>, map2: &HashMap<K, Vec<T>>) -> bool
where
    K: Eq + Hash,
    T: Ord + Clone,
{
    map1.len() == map2.len()
        && map1
            .iter()
            .all(|(key, list)| map2.get(key).is_some_and(|other| same_lists(list, other)))
}

/// Panicking variant of [`same_lists`] with a readable diff.
pub fn assert_same_lists<T: Ord + Clone + Debug>(actual: &[T], expected: &[T]) {
    pretty_assertions::assert_eq!(sorted(actual), sorted(expected));
}

fn sorted<T: Ord + Clone>(list: &[T]) -> Vec<T> {
    let mut copy = list.to_vec();
    copy.sort();
    copy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: Vec<(&'static str, Vec<&'static str>)>) -> HashMap<&'static str, Vec<&'static str>> {
        entries.into_iter().collect()
    }

    #[test]
    fn test_same_lists() {
        assert!(same_lists(&["x", "y", "z"], &["y", "z", "x"]));
        assert!(!same_lists(&["x", "y", "k"], &["y", "z", "x"]));
        assert!(!same_lists(&["x", "x"], &["x"]));
    }

    #[test]
    fn test_same_key_to_list_maps() {
        let a = map(vec![("a", vec![]), ("b", vec!["x"]), ("c", vec!["x", "y", "z"])]);
        let b = map(vec![("a", vec![]), ("b", vec!["x"]), ("c", vec!["y", "z", "x"])]);
        let c = map(vec![("a", vec![]), ("b", vec!["x"]), ("c", vec!["y", "z", "w"])]);
        let d = map(vec![("a", vec![]), ("b", vec!["x"]), ("d", vec!["x", "y", "z"])]);
        assert!(same_key_to_list_maps(&a, &b));
        assert!(!same_key_to_list_maps(&a, &c));
        assert!(!same_key_to_list_maps(&d, &b));
    }
}
