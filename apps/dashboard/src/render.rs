//! Plain-text rendering of each page.

use std::fmt::{self, Write as _};

use dashboard_core::{
    releases::ReleaseDetail,
    revenue::{format_usd, RevenueReport},
    DashboardOverview,
};
use shared::{
    domain::RevenuePlatform,
    records::{ArtistProfile, ReleaseRecord, RevenueRow},
};

use crate::UploadOutcome;

const DATE_FORMAT: &str = "%b %-d, %Y";

pub fn overview(overview: &DashboardOverview) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}\n", overview.greeting)?;
    for stat in &overview.stats {
        writeln!(out, "{:<18} {:>10}  {}", stat.label, stat.value, stat.trend)?;
    }

    writeln!(out, "\nRecent Releases")?;
    for release in &overview.recent_releases {
        writeln!(
            out,
            "  {:<18} {:<7} {:>9} streams {:>10}  {}",
            release.title,
            release.type_label,
            release.streams,
            release.revenue,
            release.release_date.format(DATE_FORMAT)
        )?;
    }

    writeln!(out, "\nUpcoming Releases")?;
    for upcoming in &overview.upcoming_releases {
        writeln!(
            out,
            "  {:<18} {:<32} [{}]",
            upcoming.title, upcoming.schedule, upcoming.badge
        )?;
    }

    writeln!(out, "\nPlatform Distribution")?;
    for share in &overview.distribution {
        writeln!(out, "  {:<14} {:>3}%", share.platform_name, share.percent)?;
    }
    Ok(out)
}

pub fn releases(
    rows: &[&ReleaseRecord],
    empty_message: Option<&str>,
) -> Result<String, fmt::Error> {
    if let Some(message) = empty_message {
        return Ok(format!("{message}\n"));
    }
    let mut out = format!(
        "{:<4} {:<18} {:<7} {:<11} {:<14} {}\n",
        "ID", "Release", "Type", "Status", "Submitted", "Release Date"
    );
    for record in rows {
        writeln!(
            out,
            "{:<4} {:<18} {:<7} {:<11} {:<14} {}",
            record.id.to_string(),
            record.title,
            record.release_type.label(),
            record.status.label(),
            record.submitted_date.format(DATE_FORMAT).to_string(),
            record.release_date.format(DATE_FORMAT)
        )?;
    }
    Ok(out)
}

pub fn release_detail(detail: &ReleaseDetail<'_>) -> Result<String, fmt::Error> {
    let record = detail.record;
    let mut out = String::new();
    writeln!(
        out,
        "{} ({}) - {}",
        record.title,
        record.release_type.label(),
        record.status.label()
    )?;
    writeln!(out, "Submitted:    {}", record.submitted_date.format(DATE_FORMAT))?;
    writeln!(out, "Release date: {}", record.release_date.format(DATE_FORMAT))?;

    writeln!(out, "\nPlatforms")?;
    for platform in &record.platforms {
        writeln!(out, "  {:<14} {}", platform.platform_name, platform.status_text)?;
    }

    writeln!(out, "\nTimeline")?;
    for stage in &detail.timeline {
        let mark = if stage.reached { "x" } else { " " };
        writeln!(out, "  [{mark}] {}", stage.label)?;
    }
    Ok(out)
}

pub fn revenue(
    timeframe: &str,
    rows: &[&RevenueRow],
    report: &RevenueReport,
) -> Result<String, fmt::Error> {
    let mut out = format!("Revenue: {timeframe}\n\n{:<10}", "Month");
    for platform in RevenuePlatform::ALL {
        write!(out, " {:>13}", platform.label())?;
    }
    writeln!(out, " {:>13}", "Total")?;

    for row in rows {
        write!(out, "{:<10}", row.month.to_string())?;
        for (_, amount) in row.amounts() {
            write!(out, " {:>13}", format_usd(amount))?;
        }
        writeln!(out, " {:>13}", format_usd(row.total()))?;
    }

    writeln!(out, "\nTotal Revenue: {}", format_usd(report.grand_total))?;
    for platform in RevenuePlatform::ALL {
        writeln!(
            out,
            "  {:<14} {:>13}  {}%",
            platform.label(),
            format_usd(report.platform_total(*platform)),
            report.share_percent(*platform)
        )?;
    }
    Ok(out)
}

pub(crate) fn upload_outcome(outcome: &UploadOutcome<'_>) -> Result<String, fmt::Error> {
    let draft = outcome.draft;
    let platforms: Vec<_> = draft.selected_platforms().map(|p| p.label()).collect();
    let mut out = String::new();
    writeln!(out, "{} ({}%)", outcome.state.title(), outcome.progress)?;
    writeln!(out, "Title:     {}", draft.title)?;
    writeln!(out, "Artist:    {}", draft.artist)?;
    if let Some(album) = &draft.album {
        writeln!(out, "Album:     {album}")?;
    }
    if let Some(audio) = draft.audio_file() {
        writeln!(out, "Audio:     {} ({})", audio.file_name, audio.size_label())?;
    }
    writeln!(out, "Platforms: {}", platforms.join(", "))?;
    Ok(out)
}

pub fn profile(profile: &ArtistProfile) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}", profile.name)?;
    writeln!(out, "{} | {} | {}", profile.genre, profile.location, profile.website)?;
    writeln!(out, "\n{}\n", profile.bio)?;
    for link in &profile.social_links {
        writeln!(out, "  {:<10} {}", link.platform, link.url)?;
    }
    Ok(out)
}
