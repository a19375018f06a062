//! Fixture datasets that stand in for backend responses.
//!
//! The dashboard never talks to a server; every page reads from a [`Catalog`]
//! built either from the bundled fixtures or from a JSON file with the same
//! shape.

use std::{collections::HashSet, fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use shared::{
    domain::ReleaseId,
    records::{
        ArtistProfile, OverviewStat, PlatformShare, RecentRelease, ReleaseRecord, RevenueRow,
    },
};
use tracing::{debug, info};

mod fixtures;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    releases: Vec<ReleaseRecord>,
    revenue: Vec<RevenueRow>,
    #[serde(default)]
    recent_releases: Vec<RecentRelease>,
    #[serde(default)]
    overview_stats: Vec<OverviewStat>,
    #[serde(default)]
    platform_distribution: Vec<PlatformShare>,
    profile: ArtistProfile,
}

impl Catalog {
    /// The bundled mock dataset.
    pub fn fixture() -> Self {
        Self {
            releases: fixtures::releases(),
            revenue: fixtures::revenue(),
            recent_releases: fixtures::recent_releases(),
            overview_stats: fixtures::overview_stats(),
            platform_distribution: fixtures::platform_distribution(),
            profile: fixtures::profile(),
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(raw).context("failed to parse catalog json")?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Loads a catalog file, or the bundled fixture when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            debug!("using bundled fixture catalog");
            return Ok(Self::fixture());
        };

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog file '{}'", path.display()))?;
        let catalog = Self::from_json_str(&raw)
            .with_context(|| format!("invalid catalog file '{}'", path.display()))?;
        info!(
            path = %path.display(),
            releases = catalog.releases.len(),
            revenue_rows = catalog.revenue.len(),
            "loaded catalog file"
        );
        Ok(catalog)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize catalog")
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for release in &self.releases {
            if !seen.insert(release.id) {
                bail!("duplicate release id {}", release.id);
            }
            if release.title.trim().is_empty() {
                bail!("release {} has an empty title", release.id);
            }
        }

        let mut months = HashSet::new();
        for row in &self.revenue {
            if !months.insert(row.month) {
                bail!("duplicate revenue month {}", row.month);
            }
        }
        Ok(())
    }

    pub fn releases(&self) -> &[ReleaseRecord] {
        &self.releases
    }

    pub fn release(&self, id: ReleaseId) -> Option<&ReleaseRecord> {
        self.releases.iter().find(|release| release.id == id)
    }

    pub fn revenue(&self) -> &[RevenueRow] {
        &self.revenue
    }

    pub fn recent_releases(&self) -> &[RecentRelease] {
        &self.recent_releases
    }

    pub fn overview_stats(&self) -> &[OverviewStat] {
        &self.overview_stats
    }

    pub fn platform_distribution(&self) -> &[PlatformShare] {
        &self.platform_distribution
    }

    pub fn profile(&self) -> &ArtistProfile {
        &self.profile
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::fixture()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
