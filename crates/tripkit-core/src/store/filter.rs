// ── Filter engine ──
//
// Recomputes the filtered view from (list, query, filter). Filters are
// plain structs of optional predicates; absent fields impose no
// constraint and present fields combine with AND.

use std::fmt::Debug;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::model::Entity;

/// A structured, field-by-field predicate over one entity type.
pub trait FilterSpec<E>:
    Debug + Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    fn matches(&self, entity: &E) -> bool;

    /// Whether no field is set. An empty filter matches everything.
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ── Predicate primitives ─────────────────────────────────────────────

/// Inclusive range with independently optional bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<T>,
}

impl<T> Range<T> {
    pub fn between(min: T, max: T) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn at_least(min: T) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: T) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }
}

impl<T: PartialOrd> Range<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.min.as_ref().is_none_or(|min| value >= min)
            && self.max.as_ref().is_none_or(|max| value <= max)
    }
}

/// An absent range accepts everything.
pub(crate) fn in_range<T: PartialOrd>(range: Option<&Range<T>>, value: &T) -> bool {
    range.is_none_or(|r| r.contains(value))
}

/// A range over an optional attribute: a missing attribute never matches a
/// present range.
pub(crate) fn in_range_opt<T: PartialOrd>(range: Option<&Range<T>>, value: Option<&T>) -> bool {
    match (range, value) {
        (None, _) => true,
        (Some(r), Some(v)) => r.contains(v),
        (Some(_), None) => false,
    }
}

/// Set membership. An absent or empty set imposes no constraint.
pub(crate) fn in_set<V: PartialEq>(set: Option<&Vec<V>>, value: &V) -> bool {
    set.is_none_or(|s| s.is_empty() || s.contains(value))
}

/// Set membership over an optional attribute.
pub(crate) fn in_set_opt<V: PartialEq>(set: Option<&Vec<V>>, value: Option<&V>) -> bool {
    match set {
        None => true,
        Some(s) if s.is_empty() => true,
        Some(s) => value.is_some_and(|v| s.contains(v)),
    }
}

/// Case-insensitive string set membership.
pub(crate) fn in_set_ci(set: Option<&Vec<String>>, value: Option<&str>) -> bool {
    match set {
        None => true,
        Some(s) if s.is_empty() => true,
        Some(s) => value.is_some_and(|v| s.iter().any(|c| c.eq_ignore_ascii_case(v))),
    }
}

/// `true` when any wanted value appears among `values` (case-insensitive).
pub(crate) fn overlaps_ci(set: Option<&Vec<String>>, values: &[String]) -> bool {
    match set {
        None => true,
        Some(s) if s.is_empty() => true,
        Some(s) => s
            .iter()
            .any(|want| values.iter().any(|v| v.eq_ignore_ascii_case(want))),
    }
}

pub(crate) fn flag(wanted: Option<bool>, actual: bool) -> bool {
    wanted.is_none_or(|w| w == actual)
}

pub(crate) fn same<V: PartialEq>(wanted: Option<&V>, actual: Option<&V>) -> bool {
    match wanted {
        None => true,
        Some(w) => actual == Some(w),
    }
}

// ── View recomputation ───────────────────────────────────────────────

/// Whether `entity` contains `needle` (already lowercased) in any of its
/// search fields.
pub fn matches_query<E: Entity>(entity: &E, needle: &str) -> bool {
    needle.is_empty()
        || entity
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}

/// Derive the filtered view. Pure and order-preserving; it only ever
/// returns elements of `items`.
pub fn apply<E: Entity>(items: &[Arc<E>], query: &str, filter: &E::Filter) -> Vec<Arc<E>> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .filter(|e| matches_query::<E>(e, &needle))
        .filter(|e| filter.matches(e))
        .cloned()
        .collect()
}
