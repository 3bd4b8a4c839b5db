//! Grouping, sorting, and filtering over record sequences.
//!
//! All functions are pure: inputs are consumed or borrowed, never mutated,
//! and a fresh collection is returned. Pass `items.iter()` to work on
//! references and `items` to move the records.

use std::collections::BTreeMap;

use serde::Serialize;

/// Sort direction for [`sort_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// Records that carry an editorial/publication status.
pub trait HasStatus {
    fn status_str(&self) -> Option<&str>;
}

/// Records with a "current / ongoing" flag.
pub trait HasCurrentFlag {
    fn is_current(&self) -> bool;
}

/// Records attributable to a calendar year.
pub trait HasYear {
    fn year(&self) -> Option<i32>;
}

/// Records tagged with research areas.
pub trait HasResearchAreas {
    fn research_area_names(&self) -> Vec<&str>;
}

/// Partition `items` by a derived key.
///
/// Every item lands in exactly one group; within a group the input order
/// is preserved.
pub fn group_by<T, K, I, F>(items: I, key_fn: F) -> BTreeMap<K, Vec<T>>
where
    I: IntoIterator<Item = T>,
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for item in items {
        groups.entry(key_fn(&item)).or_default().push(item);
    }
    groups
}

/// Stable sort by a derived key in the given direction.
pub fn sort_by<T, K, I, F>(items: I, key_fn: F, direction: Direction) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut sorted: Vec<T> = items.into_iter().collect();
    match direction {
        Direction::Asc => sorted.sort_by(|a, b| key_fn(a).cmp(&key_fn(b))),
        Direction::Desc => sorted.sort_by(|a, b| key_fn(b).cmp(&key_fn(a))),
    }
    sorted
}

/// Curry a predicate into a reusable filter over slices.
pub fn filter_by<T, P>(predicate: P) -> impl Fn(&[T]) -> Vec<T>
where
    T: Clone,
    P: Fn(&T) -> bool,
{
    move |items: &[T]| items.iter().filter(|i| predicate(*i)).cloned().collect()
}

/// Keep records whose status is `published`.
pub fn only_published<T: HasStatus + Clone>() -> impl Fn(&[T]) -> Vec<T> {
    filter_by(|item: &T| item.status_str() == Some("published"))
}

/// Keep records flagged as current.
pub fn only_current<T: HasCurrentFlag + Clone>() -> impl Fn(&[T]) -> Vec<T> {
    filter_by(|item: &T| item.is_current())
}

/// Keep records from a given year.
pub fn only_year<T: HasYear + Clone>(year: i32) -> impl Fn(&[T]) -> Vec<T> {
    filter_by(move |item: &T| item.year() == Some(year))
}

/// Names of the given areas, in order.
pub fn research_area_names<'a, I, A>(areas: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a A>,
    A: AsRef<str> + 'a,
{
    areas.into_iter().map(|a| a.as_ref()).collect()
}

/// Predicate matching records tagged with the named research area.
pub fn in_research_area<T: HasResearchAreas>(name: &str) -> impl Fn(&T) -> bool + '_ {
    move |item: &T| item.research_area_names().contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        id: u32,
        category: &'static str,
        year: i32,
        status: &'static str,
        current: bool,
        areas: Vec<&'static str>,
    }

    impl HasStatus for Entry {
        fn status_str(&self) -> Option<&str> {
            Some(self.status)
        }
    }
    impl HasCurrentFlag for Entry {
        fn is_current(&self) -> bool {
            self.current
        }
    }
    impl HasYear for Entry {
        fn year(&self) -> Option<i32> {
            Some(self.year)
        }
    }
    impl HasResearchAreas for Entry {
        fn research_area_names(&self) -> Vec<&str> {
            self.areas.clone()
        }
    }

    fn entry(id: u32, category: &'static str, year: i32, status: &'static str) -> Entry {
        Entry {
            id,
            category,
            year,
            status,
            current: id % 2 == 0,
            areas: if id < 3 { vec!["Topology"] } else { vec!["Number Theory"] },
        }
    }

    fn sample() -> Vec<Entry> {
        vec![
            entry(1, "awards", 2019, "published"),
            entry(2, "education", 2010, "draft"),
            entry(3, "awards", 2021, "published"),
            entry(4, "grants", 2019, "submitted"),
            entry(5, "education", 2014, "published"),
            entry(6, "awards", 2019, "published"),
        ]
    }

    #[test]
    fn test_group_by_is_stable_partition() {
        let items = sample();
        let groups = group_by(items.iter(), |e| e.category);

        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, items.len());

        let awards: Vec<u32> = groups["awards"].iter().map(|e| e.id).collect();
        assert_eq!(awards, vec![1, 3, 6]);
        let education: Vec<u32> = groups["education"].iter().map(|e| e.id).collect();
        assert_eq!(education, vec![2, 5]);

        let mut seen: Vec<u32> = groups.values().flatten().map(|e| e.id).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_group_by_empty() {
        let groups = group_by(Vec::<Entry>::new(), |e| e.category);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_sort_by_asc_is_stable() {
        let sorted = sort_by(sample(), |e| e.year, Direction::Asc);
        assert_eq!(sorted.len(), 6);
        for pair in sorted.windows(2) {
            assert!(pair[0].year <= pair[1].year);
        }
        let ties: Vec<u32> = sorted.iter().filter(|e| e.year == 2019).map(|e| e.id).collect();
        assert_eq!(ties, vec![1, 4, 6]);
    }

    #[test]
    fn test_sort_by_desc_is_stable() {
        let sorted = sort_by(sample(), |e| e.year, Direction::Desc);
        let ids: Vec<u32> = sorted.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 1, 4, 6, 5, 2]);
    }

    #[test]
    fn test_sort_by_does_not_touch_input() {
        let items = sample();
        let sorted = sort_by(items.iter(), |e| e.category, Direction::Asc);
        assert_eq!(sorted[0].category, "awards");
        assert_eq!(items[1].id, 2);
    }

    #[test]
    fn test_sort_by_string_and_date_keys() {
        let dates = vec!["2021-03-01", "2019-12-31", "2020-06-15"];
        let sorted = sort_by(
            dates,
            |d| chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d").ok(),
            Direction::Asc,
        );
        assert_eq!(sorted, vec!["2019-12-31", "2020-06-15", "2021-03-01"]);
    }

    #[test]
    fn test_filter_presets() {
        let items = sample();
        let published = only_published::<Entry>()(&items);
        assert_eq!(published.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 3, 5, 6]);

        let current = only_current::<Entry>()(&items);
        assert!(current.iter().all(|e| e.current));

        let in_2019 = only_year::<Entry>(2019)(&items);
        assert_eq!(in_2019.len(), 3);

        let topology = filter_by(in_research_area::<Entry>("Topology"))(&items);
        assert_eq!(topology.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_research_area_names() {
        let areas = vec!["Topology".to_string(), "Geometry".to_string()];
        assert_eq!(research_area_names(&areas), vec!["Topology", "Geometry"]);
    }
}
