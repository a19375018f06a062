//! Revenue page: monthly table, timeframe window and aggregate report.

use std::{borrow::Cow, collections::BTreeMap, fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use shared::{
    domain::{MonthLabel, RevenuePlatform},
    error::ParseError,
    records::RevenueRow,
};

use crate::query::{QueryRecord, SortDirection, SortSpec, SortValue, TableQuery, TableQueryEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueColumn {
    Month,
    Platform(RevenuePlatform),
    Total,
}

impl FromStr for RevenueColumn {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(RevenueColumn::Month),
            "total" => Ok(RevenueColumn::Total),
            _ => value
                .parse::<RevenuePlatform>()
                .map(RevenueColumn::Platform)
                .map_err(|_| ParseError::unknown("RevenueColumn", value)),
        }
    }
}

/// Inclusive month window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthRange {
    pub from: MonthLabel,
    pub to: MonthLabel,
}

impl MonthRange {
    pub fn contains(&self, month: MonthLabel) -> bool {
        self.from <= month && month <= self.to
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    #[default]
    Last12Months,
    ThisYear,
    LastYear,
    Custom(MonthRange),
}

impl Timeframe {
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Last12Months => "Last 12 Months",
            Timeframe::ThisYear => "This Year",
            Timeframe::LastYear => "Last Year",
            Timeframe::Custom(_) => "Custom Range",
        }
    }

    /// Resolves the window against the most recent month of data.
    pub fn resolve(&self, latest: MonthLabel) -> Option<MonthRange> {
        match *self {
            Timeframe::Last12Months => Some(MonthRange {
                from: latest.offset(-11)?,
                to: latest,
            }),
            Timeframe::ThisYear => Some(MonthRange {
                from: MonthLabel::new(latest.year(), 1)?,
                to: latest,
            }),
            Timeframe::LastYear => Some(MonthRange {
                from: MonthLabel::new(latest.year() - 1, 1)?,
                to: MonthLabel::new(latest.year() - 1, 12)?,
            }),
            Timeframe::Custom(range) => Some(range),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "last-12-months" | "last12months" => Ok(Timeframe::Last12Months),
            "this-year" => Ok(Timeframe::ThisYear),
            "last-year" => Ok(Timeframe::LastYear),
            _ => Err(ParseError::unknown("Timeframe", value)),
        }
    }
}

impl QueryRecord for RevenueRow {
    /// `None` disables the month window.
    type Filter = Option<MonthRange>;
    type SortKey = RevenueColumn;

    fn matches(&self, filter: &Option<MonthRange>) -> bool {
        filter.map_or(true, |range| range.contains(self.month))
    }

    fn search_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.month.to_string())
    }

    fn sort_value(&self, key: RevenueColumn) -> SortValue {
        match key {
            RevenueColumn::Month => SortValue::Month(self.month),
            RevenueColumn::Platform(platform) => SortValue::Number(self.amount(platform)),
            RevenueColumn::Total => SortValue::Number(self.total()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevenueReport {
    pub platform_totals: BTreeMap<RevenuePlatform, Decimal>,
    pub grand_total: Decimal,
}

impl RevenueReport {
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a RevenueRow>) -> Self {
        let mut platform_totals: BTreeMap<RevenuePlatform, Decimal> = RevenuePlatform::ALL
            .iter()
            .map(|platform| (*platform, Decimal::ZERO))
            .collect();
        for row in rows {
            for (platform, amount) in row.amounts() {
                *platform_totals.entry(platform).or_default() += amount;
            }
        }
        let grand_total = platform_totals.values().copied().sum();
        Self {
            platform_totals,
            grand_total,
        }
    }

    pub fn platform_total(&self, platform: RevenuePlatform) -> Decimal {
        self.platform_totals
            .get(&platform)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Percentage of the grand total, rounded to two places. Zero when
    /// there is no revenue at all.
    pub fn share_percent(&self, platform: RevenuePlatform) -> Decimal {
        if self.grand_total.is_zero() {
            return Decimal::ZERO;
        }
        (self.platform_total(platform) / self.grand_total * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Formats an amount as dollars with thousands separators, e.g. `$26,577.93`.
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let fixed = format!("{:.2}", rounded.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Inserts `,` every three digits from the right of an unsigned integer.
pub(crate) fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

pub type RevenueQuery = TableQuery<Option<MonthRange>, RevenueColumn>;

/// State behind the revenue page. Starts sorted by month, newest first.
pub struct RevenueBrowser {
    engine: TableQueryEngine<RevenueRow>,
    timeframe: Timeframe,
    search: String,
    sort: SortSpec<RevenueColumn>,
}

impl RevenueBrowser {
    pub fn new(rows: Vec<RevenueRow>) -> Self {
        Self {
            engine: TableQueryEngine::new(rows),
            timeframe: Timeframe::default(),
            search: String::new(),
            sort: SortSpec::new(RevenueColumn::Month, SortDirection::Descending),
        }
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn set_timeframe(&mut self, timeframe: Timeframe) {
        self.timeframe = timeframe;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn sort(&self) -> SortSpec<RevenueColumn> {
        self.sort
    }

    pub fn sort_by(&mut self, column: RevenueColumn) {
        self.sort = SortSpec::toggled(Some(self.sort), column);
    }

    pub fn set_sort(&mut self, sort: SortSpec<RevenueColumn>) {
        self.sort = sort;
    }

    fn latest_month(&self) -> Option<MonthLabel> {
        self.engine.records().iter().map(|row| row.month).max()
    }

    pub fn query(&self) -> RevenueQuery {
        RevenueQuery {
            filter: self
                .latest_month()
                .and_then(|latest| self.timeframe.resolve(latest)),
            search: self.search.clone(),
            sort: Some(self.sort),
        }
    }

    pub fn rows(&self) -> Vec<&RevenueRow> {
        self.engine.run(&self.query())
    }

    /// Aggregates over the rows currently shown.
    pub fn report(&self) -> RevenueReport {
        RevenueReport::from_rows(self.rows())
    }
}

#[cfg(test)]
#[path = "tests/revenue_tests.rs"]
mod tests;
