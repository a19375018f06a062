//! Dashboard landing page.

use catalog::Catalog;
use chrono::NaiveDate;
use serde::Serialize;
use shared::{
    domain::{ReleaseId, ReleaseStatus},
    records::{OverviewStat, PlatformShare, RecentRelease, ReleaseRecord, SessionUser},
};

use crate::{
    releases::{status_tone, StatusTone},
    revenue::{format_usd, group_thousands},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentReleaseRow {
    pub id: ReleaseId,
    pub title: String,
    pub type_label: &'static str,
    pub streams: String,
    pub revenue: String,
    pub release_date: NaiveDate,
}

impl From<&RecentRelease> for RecentReleaseRow {
    fn from(release: &RecentRelease) -> Self {
        Self {
            id: release.id,
            title: release.title.clone(),
            type_label: release.release_type.label(),
            streams: group_thousands(&release.streams.to_string()),
            revenue: format_usd(release.revenue),
            release_date: release.release_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingRelease {
    pub id: ReleaseId,
    pub title: String,
    pub cover_url: Option<String>,
    /// e.g. `Single • Scheduled for Jun 28`.
    pub schedule: String,
    pub badge: &'static str,
    pub tone: StatusTone,
}

impl From<&ReleaseRecord> for UpcomingRelease {
    fn from(record: &ReleaseRecord) -> Self {
        let badge = match record.status {
            ReleaseStatus::Scheduled => "Ready",
            other => other.label(),
        };
        Self {
            id: record.id,
            title: record.title.clone(),
            cover_url: record.cover_url.clone(),
            schedule: format!(
                "{} • Scheduled for {}",
                record.release_type.label(),
                record.release_date.format("%b %-d")
            ),
            badge,
            tone: status_tone(badge),
        }
    }
}

/// Releases still in the pipeline, soonest first.
pub fn upcoming_releases(releases: &[ReleaseRecord]) -> Vec<UpcomingRelease> {
    let mut pending: Vec<&ReleaseRecord> = releases
        .iter()
        .filter(|record| {
            matches!(
                record.status,
                ReleaseStatus::Processing | ReleaseStatus::Scheduled | ReleaseStatus::Draft
            )
        })
        .collect();
    pending.sort_by_key(|record| record.release_date);
    pending.into_iter().map(UpcomingRelease::from).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardOverview {
    pub greeting: String,
    pub stats: Vec<OverviewStat>,
    pub recent_releases: Vec<RecentReleaseRow>,
    pub upcoming_releases: Vec<UpcomingRelease>,
    pub distribution: Vec<PlatformShare>,
}

impl DashboardOverview {
    pub fn build(catalog: &Catalog, user: Option<&SessionUser>) -> Self {
        let name = user.map(|u| u.name.as_str()).unwrap_or_default();
        Self {
            greeting: format!("Welcome back, {name}"),
            stats: catalog.overview_stats().to_vec(),
            recent_releases: catalog
                .recent_releases()
                .iter()
                .map(RecentReleaseRow::from)
                .collect(),
            upcoming_releases: upcoming_releases(catalog.releases()),
            distribution: catalog.platform_distribution().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> SessionUser {
        SessionUser {
            name: name.into(),
            email: "artist@example.com".into(),
            avatar_url: None,
        }
    }

    #[test]
    fn upcoming_lists_pipeline_releases_by_date() {
        let overview = DashboardOverview::build(&Catalog::fixture(), Some(&user("Nova")));
        assert_eq!(overview.greeting, "Welcome back, Nova");

        let upcoming: Vec<_> = overview
            .upcoming_releases
            .iter()
            .map(|u| (u.title.as_str(), u.schedule.as_str(), u.badge))
            .collect();
        assert_eq!(
            upcoming,
            vec![
                ("Electric Dreams", "Single • Scheduled for Jun 28", "Processing"),
                ("Night Rider", "Single • Scheduled for Jul 15", "Ready"),
                ("Sunset Boulevard", "EP • Scheduled for Aug 5", "Draft"),
            ]
        );
        assert_eq!(overview.upcoming_releases[1].tone, StatusTone::Info);
    }

    #[test]
    fn recent_releases_are_formatted() {
        let overview = DashboardOverview::build(&Catalog::fixture(), None);
        assert_eq!(overview.greeting, "Welcome back, ");
        let elevation = &overview.recent_releases[2];
        assert_eq!(elevation.type_label, "Album");
        assert_eq!(elevation.streams, "153,420");
        assert_eq!(elevation.revenue, "$3,254.80");
        assert_eq!(overview.stats.len(), 4);
        assert_eq!(
            overview
                .distribution
                .iter()
                .map(|share| u32::from(share.percent))
                .sum::<u32>(),
            100
        );
    }
}
