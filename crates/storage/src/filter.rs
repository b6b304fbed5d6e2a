//! Sparse predicate evaluation over in-memory collections.
//!
//! Every filter key is optional; an absent key never constrains. Present keys
//! are AND-combined and the output keeps the input order.

use chrono::{DateTime, Utc};

/// A sparse set of field predicates over `T`.
pub trait Filter<T> {
    fn matches(&self, item: &T) -> bool;
}

/// Keeps the items matching `filter`, preserving their relative order.
pub fn apply<T, F>(items: Vec<T>, filter: &F) -> Vec<T>
where
    F: Filter<T> + ?Sized,
{
    items.into_iter().filter(|item| filter.matches(item)).collect()
}

/// Exact match; `None` accepts anything.
pub fn matches_eq<T: PartialEq>(expected: Option<&T>, actual: &T) -> bool {
    expected.is_none_or(|expected| expected == actual)
}

/// Exact match against an optional field; a present expectation rejects
/// items where the field is unset.
pub fn matches_eq_opt<T: PartialEq>(expected: Option<&T>, actual: Option<&T>) -> bool {
    match expected {
        None => true,
        Some(expected) => actual == Some(expected),
    }
}

/// Case-insensitive substring search, OR-combined across `fields`.
pub fn matches_search<'a>(
    needle: Option<&str>,
    fields: impl IntoIterator<Item = Option<&'a str>>,
) -> bool {
    let Some(needle) = needle.map(str::trim).filter(|n| !n.is_empty()) else {
        return true;
    };
    let needle = needle.to_lowercase();

    fields
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Inclusive range check; an unset bound is unconstrained.
pub fn matches_date_range(
    value: DateTime<Utc>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> bool {
    from.is_none_or(|from| value >= from) && to.is_none_or(|to| value <= to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    struct Even;

    impl Filter<i32> for Even {
        fn matches(&self, item: &i32) -> bool {
            item % 2 == 0
        }
    }

    #[test]
    fn test_apply_preserves_order() {
        let filtered = apply(vec![6, 1, 4, 3, 2], &Even);
        assert_eq!(filtered, vec![6, 4, 2]);
    }

    #[test]
    fn test_absent_expectation_matches_everything() {
        assert!(matches_eq::<i32>(None, &5));
        assert!(matches_eq(Some(&5), &5));
        assert!(!matches_eq(Some(&4), &5));
    }

    #[test]
    fn test_optional_field_requires_value_when_constrained() {
        assert!(matches_eq_opt::<i32>(None, None));
        assert!(!matches_eq_opt(Some(&1), None));
        assert!(matches_eq_opt(Some(&1), Some(&1)));
    }

    #[test]
    fn test_search_is_or_across_fields() {
        assert!(matches_search(Some("day"), [Some("Leg Day"), None]));
        assert!(matches_search(Some("quads"), [Some("Leg Day"), Some("Heavy QUADS focus")]));
        assert!(!matches_search(Some("arms"), [Some("Leg Day"), None]));
        assert!(matches_search(Some("  "), [None]));
        assert!(matches_search(None, [None]));
    }

    #[test]
    fn test_date_range_bounds_are_inclusive() {
        let now = Utc::now();
        let before = now - Duration::days(1);
        let after = now + Duration::days(1);

        assert!(matches_date_range(now, Some(now), Some(now)));
        assert!(matches_date_range(now, Some(before), None));
        assert!(matches_date_range(now, None, Some(after)));
        assert!(!matches_date_range(now, Some(after), None));
        assert!(!matches_date_range(now, None, Some(before)));
        assert!(matches_date_range(now, None, None));
    }
}
