//! Partitioning of series positions by facet values.

use crate::datum::Datum;
use indexmap::IndexMap;

/// Composite key over the facets that were supplied. An absent facet is `None` and never takes
/// part in the comparison as a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GroupKey {
    pub color: Option<Datum>,
    pub style: Option<Datum>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: GroupKey,
    pub indices: Vec<usize>,
}

/// Groups `0..n` by the composite `(color, style)` key, in order of first appearance.
///
/// Facet vectors are index-aligned with the series; a facet shorter than `n` reads as missing past
/// its end.
pub fn group_indices(n: usize, color: Option<&[Datum]>, style: Option<&[Datum]>) -> Vec<Group> {
    let at = |facet: &[Datum], i: usize| facet.get(i).cloned().unwrap_or(Datum::Missing);

    let mut groups: IndexMap<GroupKey, Vec<usize>> = IndexMap::new();
    for i in 0..n {
        let key = GroupKey {
            color: color.map(|c| at(c, i)),
            style: style.map(|s| at(s, i)),
        };
        groups.entry(key).or_default().push(i);
    }

    groups
        .into_iter()
        .map(|(key, indices)| Group { key, indices })
        .collect()
}

/// Picks the elements at `indices`, in that order.
pub fn values_at<T: Clone>(values: &[T], indices: &[usize]) -> Vec<T> {
    indices
        .iter()
        .filter_map(|&i| values.get(i).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<Datum> {
        items.iter().map(|s| Datum::from(*s)).collect()
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let color = labels(&["A", "B", "A", "C", "B"]);
        let groups = group_indices(5, Some(&color), None);
        let keys: Vec<_> = groups
            .iter()
            .map(|g| g.key.color.clone().unwrap())
            .collect();
        assert_eq!(keys, labels(&["A", "B", "C"]));
        assert_eq!(groups[0].indices, vec![0, 2]);
        assert_eq!(groups[1].indices, vec![1, 4]);
        assert_eq!(groups[2].indices, vec![3]);
    }

    #[test]
    fn composite_keys_split_on_either_facet() {
        let color = labels(&["A", "A", "B", "A"]);
        let style = labels(&["x", "y", "x", "x"]);
        let groups = group_indices(4, Some(&color), Some(&style));
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].indices, vec![0, 3]);
        assert_eq!(
            groups[1].key,
            GroupKey {
                color: Some(Datum::from("A")),
                style: Some(Datum::from("y")),
            }
        );
    }

    #[test]
    fn absent_facets_are_not_part_of_the_key() {
        let style = labels(&["x", "x"]);
        let groups = group_indices(2, None, Some(&style));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key.color, None);
    }

    #[test]
    fn values_at_picks_in_index_order() {
        assert_eq!(values_at(&[10, 20, 30], &[2, 0]), vec![30, 10]);
    }
}
