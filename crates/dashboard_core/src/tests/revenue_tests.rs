use super::*;
use catalog::Catalog;
use rust_decimal_macros::dec;

fn month(raw: &str) -> MonthLabel {
    raw.parse().expect("month")
}

fn row(label: &str, spotify: Decimal, other: Decimal) -> RevenueRow {
    RevenueRow::new(
        month(label),
        [
            (RevenuePlatform::Spotify, spotify),
            (RevenuePlatform::Other, other),
        ],
    )
}

fn fixture_browser() -> RevenueBrowser {
    RevenueBrowser::new(Catalog::fixture().revenue().to_vec())
}

fn months(rows: &[&RevenueRow]) -> Vec<String> {
    rows.iter().map(|r| r.month.to_string()).collect()
}

#[test]
fn total_descending_keeps_order_and_ascending_reverses() {
    let first = RevenueRow::new(
        month("Jun 2023"),
        [(RevenuePlatform::Spotify, dec!(2700.57))],
    );
    let last = RevenueRow::new(
        month("Jul 2022"),
        [(RevenuePlatform::Spotify, dec!(1825.14))],
    );
    let engine = TableQueryEngine::new(vec![first, last]);

    let descending = engine.run(&RevenueQuery {
        sort: Some(SortSpec::new(RevenueColumn::Total, SortDirection::Descending)),
        ..RevenueQuery::default()
    });
    assert_eq!(months(&descending), vec!["Jun 2023", "Jul 2022"]);

    let ascending = engine.run(&RevenueQuery {
        sort: Some(SortSpec::new(RevenueColumn::Total, SortDirection::Ascending)),
        ..RevenueQuery::default()
    });
    assert_eq!(months(&ascending), vec!["Jul 2022", "Jun 2023"]);
}

#[test]
fn default_view_is_month_descending_over_twelve_months() {
    let browser = fixture_browser();
    let rows = browser.rows();
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0].month.to_string(), "Jun 2023");
    assert_eq!(rows[11].month.to_string(), "Jul 2022");
    assert_eq!(browser.timeframe().label(), "Last 12 Months");
}

#[test]
fn month_sort_is_chronological_not_alphabetical() {
    let mut browser = fixture_browser();
    browser.sort_by(RevenueColumn::Month);
    assert_eq!(browser.sort().direction, SortDirection::Ascending);
    let rows = months(&browser.rows());
    assert_eq!(&rows[..3], &["Jul 2022", "Aug 2022", "Sep 2022"]);
    assert_eq!(&rows[6..8], &["Jan 2023", "Feb 2023"]);
}

#[test]
fn every_numeric_column_reverses_exactly() {
    let mut columns = vec![RevenueColumn::Total];
    columns.extend(RevenuePlatform::ALL.iter().copied().map(RevenueColumn::Platform));

    let mut browser = fixture_browser();
    for column in columns {
        browser.set_sort(SortSpec::new(column, SortDirection::Ascending));
        let ascending = months(&browser.rows());
        browser.set_sort(SortSpec::new(column, SortDirection::Descending));
        let mut descending = months(&browser.rows());
        descending.reverse();

        let distinct: std::collections::HashSet<_> = Catalog::fixture()
            .revenue()
            .iter()
            .map(|r| match column {
                RevenueColumn::Platform(p) => r.amount(p),
                _ => r.total(),
            })
            .collect();
        if distinct.len() == 12 {
            assert_eq!(ascending, descending, "{column:?}");
        }
    }
}

#[test]
fn new_column_starts_descending() {
    let mut browser = fixture_browser();
    browser.sort_by(RevenueColumn::Total);
    assert_eq!(
        browser.sort(),
        SortSpec::new(RevenueColumn::Total, SortDirection::Descending)
    );
    assert_eq!(browser.rows()[0].month.to_string(), "Jun 2023");
    assert_eq!(browser.rows()[1].month.to_string(), "Dec 2022");
}

#[test]
fn this_year_and_last_year_windows_follow_latest_month() {
    let mut browser = fixture_browser();
    browser.set_timeframe(Timeframe::ThisYear);
    assert_eq!(browser.rows().len(), 6);

    browser.set_timeframe(Timeframe::LastYear);
    let rows = months(&browser.rows());
    assert_eq!(rows.len(), 6);
    assert!(rows.iter().all(|m| m.ends_with("2022")));
}

#[test]
fn custom_window_is_inclusive() {
    let mut browser = fixture_browser();
    browser.set_timeframe(Timeframe::Custom(MonthRange {
        from: month("Nov 2022"),
        to: month("Jan 2023"),
    }));
    assert_eq!(months(&browser.rows()), vec!["Jan 2023", "Dec 2022", "Nov 2022"]);
    assert_eq!(browser.timeframe().label(), "Custom Range");
}

#[test]
fn search_matches_month_labels_case_insensitively() {
    let mut browser = fixture_browser();
    browser.set_search("2022");
    assert_eq!(browser.rows().len(), 6);
    browser.set_search("JUN");
    assert_eq!(months(&browser.rows()), vec!["Jun 2023"]);
}

#[test]
fn report_matches_fixture_totals() {
    let report = fixture_browser().report();
    assert_eq!(report.grand_total, dec!(26577.93));
    assert_eq!(report.platform_total(RevenuePlatform::Spotify), dec!(11983.15));
    assert_eq!(report.platform_total(RevenuePlatform::Other), dec!(931.93));
    assert_eq!(report.share_percent(RevenuePlatform::Spotify), dec!(45.09));
    assert_eq!(report.share_percent(RevenuePlatform::Apple), dec!(32.81));
    assert_eq!(report.share_percent(RevenuePlatform::Other), dec!(3.51));
}

#[test]
fn report_over_no_rows_has_zero_shares() {
    let report = RevenueReport::from_rows(std::iter::empty());
    assert_eq!(report.grand_total, Decimal::ZERO);
    for platform in RevenuePlatform::ALL {
        assert_eq!(report.share_percent(*platform), Decimal::ZERO);
    }
}

#[test]
fn report_follows_visible_rows() {
    let mut browser = RevenueBrowser::new(vec![
        row("Jan 2023", dec!(10), dec!(5)),
        row("Feb 2023", dec!(20), dec!(5)),
    ]);
    browser.set_search("feb");
    let report = browser.report();
    assert_eq!(report.grand_total, dec!(25));
    assert_eq!(report.share_percent(RevenuePlatform::Spotify), dec!(80));
}

#[test]
fn formats_dollars_with_grouping() {
    assert_eq!(format_usd(dec!(26577.93)), "$26,577.93");
    assert_eq!(format_usd(dec!(178.9)), "$178.90");
    assert_eq!(format_usd(dec!(1234567.005)), "$1,234,567.01");
    assert_eq!(format_usd(Decimal::ZERO), "$0.00");
    assert_eq!(format_usd(dec!(-42.5)), "-$42.50");
}

#[test]
fn parses_columns_and_timeframes() {
    assert_eq!("total".parse::<RevenueColumn>(), Ok(RevenueColumn::Total));
    assert_eq!(
        "youtube".parse::<RevenueColumn>(),
        Ok(RevenueColumn::Platform(RevenuePlatform::Youtube))
    );
    assert!("streams".parse::<RevenueColumn>().is_err());
    assert_eq!("this-year".parse::<Timeframe>(), Ok(Timeframe::ThisYear));
    assert!("custom".parse::<Timeframe>().is_err());
}
