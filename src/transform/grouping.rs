use std::collections::HashSet;
use std::hash::Hash;

use indexmap::IndexMap;

/// Buckets `items` by `key`, keeping buckets in first-occurrence order and
/// items in input order within each bucket.
pub fn group_by<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> IndexMap<K, Vec<T>>
where
    K: Hash + Eq,
    F: FnMut(&T) -> K,
{
    let mut groups: IndexMap<K, Vec<T>> = IndexMap::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups
}

/// Drops repeated values, keeping the first occurrence of each.
pub fn unique<T>(values: impl IntoIterator<Item = T>) -> Vec<T>
where
    T: Hash + Eq + Clone,
{
    let mut out: Vec<T> = Vec::new();
    let mut seen: HashSet<T> = HashSet::new();
    for value in values {
        if seen.insert(value.clone()) {
            out.push(value);
        }
    }
    out
}
