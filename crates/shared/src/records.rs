use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{MonthLabel, ReleaseId, ReleaseStatus, ReleaseType, RevenuePlatform};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformStatus {
    pub platform_name: String,
    pub status_text: String,
}

impl PlatformStatus {
    pub fn new(platform_name: impl Into<String>, status_text: impl Into<String>) -> Self {
        Self {
            platform_name: platform_name.into(),
            status_text: status_text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    pub id: ReleaseId,
    pub title: String,
    #[serde(rename = "type")]
    pub release_type: ReleaseType,
    pub status: ReleaseStatus,
    pub submitted_date: NaiveDate,
    pub release_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    pub platforms: Vec<PlatformStatus>,
}

/// One month of earnings. The total is always derived from the
/// per-platform amounts and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueRow {
    pub month: MonthLabel,
    amounts: BTreeMap<RevenuePlatform, Decimal>,
}

impl RevenueRow {
    pub fn new(
        month: MonthLabel,
        amounts: impl IntoIterator<Item = (RevenuePlatform, Decimal)>,
    ) -> Self {
        Self {
            month,
            amounts: amounts.into_iter().collect(),
        }
    }

    pub fn amount(&self, platform: RevenuePlatform) -> Decimal {
        self.amounts.get(&platform).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn amounts(&self) -> impl Iterator<Item = (RevenuePlatform, Decimal)> + '_ {
        RevenuePlatform::ALL
            .iter()
            .map(|platform| (*platform, self.amount(*platform)))
    }

    pub fn total(&self) -> Decimal {
        self.amounts.values().copied().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistProfile {
    pub name: String,
    pub bio: String,
    pub genre: String,
    pub location: String,
    pub website: String,
    pub social_links: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewStat {
    pub label: String,
    pub value: String,
    pub trend: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentRelease {
    pub id: ReleaseId,
    pub title: String,
    #[serde(rename = "type")]
    pub release_type: ReleaseType,
    pub streams: u64,
    pub revenue: Decimal,
    pub release_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformShare {
    pub platform_name: String,
    pub percent: u8,
}
