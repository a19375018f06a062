//! Filter / search / sort over a fixed in-memory table.

use std::{borrow::Cow, cmp::Ordering, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{domain::MonthLabel, error::ParseError};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(ParseError::unknown("SortDirection", value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: Copy + PartialEq> SortSpec<K> {
    pub fn new(key: K, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Column-header click: the active column flips direction, a new column
    /// starts descending.
    pub fn toggled(current: Option<Self>, key: K) -> Self {
        match current {
            Some(spec) if spec.key == key => Self::new(key, spec.direction.reversed()),
            _ => Self::new(key, SortDirection::Descending),
        }
    }
}

/// Comparable projection of one cell. A given sort key always yields the
/// same variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Rank(u32),
    Number(Decimal),
    Date(NaiveDate),
    Month(MonthLabel),
    Text(String),
}

impl SortValue {
    /// Case-insensitive text key.
    pub fn text(value: &str) -> Self {
        SortValue::Text(value.to_lowercase())
    }
}

pub trait QueryRecord {
    type Filter;
    type SortKey: Copy + PartialEq;

    fn matches(&self, filter: &Self::Filter) -> bool;
    fn search_text(&self) -> Cow<'_, str>;
    fn sort_value(&self, key: Self::SortKey) -> SortValue;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery<F, K> {
    pub filter: F,
    pub search: String,
    pub sort: Option<SortSpec<K>>,
}

impl<F: Default, K> Default for TableQuery<F, K> {
    fn default() -> Self {
        Self {
            filter: F::default(),
            search: String::new(),
            sort: None,
        }
    }
}

pub struct TableQueryEngine<R> {
    records: Vec<R>,
}

impl<R: QueryRecord> TableQueryEngine<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Returns the matching records in display order. The sort is stable, so
    /// equal keys keep their original relative order in both directions.
    pub fn run(&self, query: &TableQuery<R::Filter, R::SortKey>) -> Vec<&R> {
        let needle = query.search.to_lowercase();
        let mut rows: Vec<&R> = self
            .records
            .iter()
            .filter(|record| record.matches(&query.filter))
            .filter(|record| {
                needle.is_empty() || record.search_text().to_lowercase().contains(&needle)
            })
            .collect();

        if let Some(sort) = query.sort {
            rows.sort_by(|a, b| {
                sort.direction
                    .apply(a.sort_value(sort.key).cmp(&b.sort_value(sort.key)))
            });
        }

        debug!(
            total = self.records.len(),
            matched = rows.len(),
            search = %query.search,
            "table query"
        );
        rows
    }
}

#[cfg(test)]
#[path = "tests/query_tests.rs"]
mod tests;
