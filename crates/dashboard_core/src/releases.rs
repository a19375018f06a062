//! Release status page: the release table, its status filter and the detail view.

use std::{borrow::Cow, fmt, str::FromStr};

use serde::Serialize;
use shared::{
    domain::{ReleaseId, ReleaseStatus},
    error::ParseError,
    records::ReleaseRecord,
};
use tracing::debug;

use crate::query::{QueryRecord, SortSpec, SortValue, TableQuery, TableQueryEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ReleaseStatus),
}

impl StatusFilter {
    /// Dropdown entries in display order.
    pub fn options() -> Vec<StatusFilter> {
        std::iter::once(StatusFilter::All)
            .chain(
                [
                    ReleaseStatus::Live,
                    ReleaseStatus::Processing,
                    ReleaseStatus::Review,
                    ReleaseStatus::Scheduled,
                    ReleaseStatus::Draft,
                    ReleaseStatus::Rejected,
                ]
                .map(StatusFilter::Only),
            )
            .collect()
    }

    pub fn accepts(self, status: ReleaseStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(status) => status.label(),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Status: {}", self.label())
    }
}

impl FromStr for StatusFilter {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        value.parse::<ReleaseStatus>().map(StatusFilter::Only)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseColumn {
    Title,
    Type,
    Status,
    Submitted,
    ReleaseDate,
}

impl FromStr for ReleaseColumn {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "title" | "release" => Ok(ReleaseColumn::Title),
            "type" => Ok(ReleaseColumn::Type),
            "status" => Ok(ReleaseColumn::Status),
            "submitted" | "submitteddate" => Ok(ReleaseColumn::Submitted),
            "releasedate" | "date" => Ok(ReleaseColumn::ReleaseDate),
            _ => Err(ParseError::unknown("ReleaseColumn", value)),
        }
    }
}

impl QueryRecord for ReleaseRecord {
    type Filter = StatusFilter;
    type SortKey = ReleaseColumn;

    fn matches(&self, filter: &StatusFilter) -> bool {
        filter.accepts(self.status)
    }

    fn search_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.title)
    }

    fn sort_value(&self, key: ReleaseColumn) -> SortValue {
        match key {
            ReleaseColumn::Title => SortValue::text(&self.title),
            ReleaseColumn::Type => SortValue::Rank(self.release_type as u32),
            ReleaseColumn::Status => SortValue::Rank(self.status as u32),
            ReleaseColumn::Submitted => SortValue::Date(self.submitted_date),
            ReleaseColumn::ReleaseDate => SortValue::Date(self.release_date),
        }
    }
}

pub type ReleaseQuery = TableQuery<StatusFilter, ReleaseColumn>;

/// Colour family a front-end uses for a status or per-platform status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Success,
    Pending,
    Info,
    Draft,
    Error,
    Neutral,
}

pub fn status_tone(status_text: &str) -> StatusTone {
    match status_text.to_lowercase().as_str() {
        "live" => StatusTone::Success,
        "processing" | "review" => StatusTone::Pending,
        "scheduled" | "ready" => StatusTone::Info,
        "draft" => StatusTone::Draft,
        "rejected" => StatusTone::Error,
        _ => StatusTone::Neutral,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineStage {
    pub label: &'static str,
    pub reached: bool,
}

pub fn timeline(status: ReleaseStatus) -> Vec<TimelineStage> {
    use ReleaseStatus::*;

    vec![
        TimelineStage {
            label: "Submitted",
            reached: true,
        },
        TimelineStage {
            label: "Processing",
            reached: matches!(status, Live | Processing | Review | Scheduled),
        },
        TimelineStage {
            label: "Scheduled for Release",
            reached: matches!(status, Live | Scheduled),
        },
        TimelineStage {
            label: "Live on All Platforms",
            reached: status == Live,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseDetail<'a> {
    pub record: &'a ReleaseRecord,
    pub tone: StatusTone,
    pub timeline: Vec<TimelineStage>,
}

impl<'a> ReleaseDetail<'a> {
    pub fn new(record: &'a ReleaseRecord) -> Self {
        Self {
            record,
            tone: status_tone(record.status.label()),
            timeline: timeline(record.status),
        }
    }
}

/// State behind the release status page.
pub struct ReleaseBrowser {
    engine: TableQueryEngine<ReleaseRecord>,
    query: ReleaseQuery,
    selected: Option<ReleaseId>,
}

impl ReleaseBrowser {
    pub fn new(releases: Vec<ReleaseRecord>) -> Self {
        Self {
            engine: TableQueryEngine::new(releases),
            query: ReleaseQuery::default(),
            selected: None,
        }
    }

    pub fn query(&self) -> &ReleaseQuery {
        &self.query
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.query.filter = filter;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    pub fn sort_by(&mut self, column: ReleaseColumn) {
        self.query.sort = Some(SortSpec::toggled(self.query.sort, column));
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec<ReleaseColumn>>) {
        self.query.sort = sort;
    }

    pub fn rows(&self) -> Vec<&ReleaseRecord> {
        self.engine.run(&self.query)
    }

    /// Message shown when the table is empty.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.rows()
            .is_empty()
            .then_some("No releases found matching your criteria")
    }

    pub fn select(&mut self, id: ReleaseId) -> Option<ReleaseDetail<'_>> {
        let found = self.engine.records().iter().any(|record| record.id == id);
        if !found {
            debug!(release_id = %id, "select ignored for unknown release");
            return None;
        }
        self.selected = Some(id);
        self.details()
    }

    pub fn close_details(&mut self) {
        self.selected = None;
    }

    pub fn details(&self) -> Option<ReleaseDetail<'_>> {
        let id = self.selected?;
        self.engine
            .records()
            .iter()
            .find(|record| record.id == id)
            .map(ReleaseDetail::new)
    }
}

#[cfg(test)]
#[path = "tests/releases_tests.rs"]
mod tests;
