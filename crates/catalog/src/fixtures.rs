use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shared::{
    domain::{MonthLabel, ReleaseId, ReleaseStatus, ReleaseType, RevenuePlatform},
    records::{
        ArtistProfile, OverviewStat, PlatformShare, PlatformStatus, RecentRelease,
        ReleaseRecord, RevenueRow, SocialLink,
    },
};

const DISTRIBUTION_PLATFORMS: [&str; 4] = ["Spotify", "Apple Music", "Amazon Music", "YouTube Music"];

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn cover(photo_id: u32) -> Option<String> {
    Some(format!(
        "https://images.pexels.com/photos/{photo_id}/pexels-photo-{photo_id}.jpeg"
    ))
}

fn same_status_everywhere(status_text: &str) -> Vec<PlatformStatus> {
    DISTRIBUTION_PLATFORMS
        .iter()
        .map(|name| PlatformStatus::new(*name, status_text))
        .collect()
}

pub(crate) fn releases() -> Vec<ReleaseRecord> {
    let release = |id: i64,
                   title: &str,
                   release_type: ReleaseType,
                   status: ReleaseStatus,
                   submitted: NaiveDate,
                   released: NaiveDate,
                   photo_id: u32,
                   platform_status: &str| ReleaseRecord {
        id: ReleaseId(id),
        title: title.to_string(),
        release_type,
        status,
        submitted_date: submitted,
        release_date: released,
        cover_url: cover(photo_id),
        platforms: same_status_everywhere(platform_status),
    };

    vec![
        release(
            1,
            "Summer Vibes",
            ReleaseType::Single,
            ReleaseStatus::Live,
            date(2023, 5, 10),
            date(2023, 6, 15),
            167092,
            "Live",
        ),
        release(
            2,
            "Midnight Dreams",
            ReleaseType::Ep,
            ReleaseStatus::Live,
            date(2023, 3, 5),
            date(2023, 4, 20),
            1389429,
            "Live",
        ),
        release(
            3,
            "Electric Dreams",
            ReleaseType::Single,
            ReleaseStatus::Processing,
            date(2023, 6, 10),
            date(2023, 6, 28),
            1540406,
            "Processing",
        ),
        release(
            4,
            "Night Rider",
            ReleaseType::Single,
            ReleaseStatus::Scheduled,
            date(2023, 6, 15),
            date(2023, 7, 15),
            1036936,
            "Ready",
        ),
        release(
            5,
            "Sunset Boulevard",
            ReleaseType::Ep,
            ReleaseStatus::Draft,
            date(2023, 6, 20),
            date(2023, 8, 5),
            354271,
            "Not submitted",
        ),
        release(
            6,
            "Urban Jungle",
            ReleaseType::Single,
            ReleaseStatus::Rejected,
            date(2023, 5, 25),
            date(2023, 6, 20),
            2739075,
            "Rejected - Copyright issue",
        ),
    ]
}

pub(crate) fn revenue() -> Vec<RevenueRow> {
    let rows: [(i32, u32, [Decimal; 5]); 12] = [
        (2023, 6, [dec!(1245.32), dec!(856.12), dec!(324.56), dec!(178.90), dec!(95.67)]),
        (2023, 5, [dec!(1189.45), dec!(798.34), dec!(312.56), dec!(165.23), dec!(87.56)]),
        (2023, 4, [dec!(1078.67), dec!(765.23), dec!(298.45), dec!(154.67), dec!(82.34)]),
        (2023, 3, [dec!(956.34), dec!(723.45), dec!(267.34), dec!(143.56), dec!(76.98)]),
        (2023, 2, [dec!(876.45), dec!(687.23), dec!(245.67), dec!(132.45), dec!(72.34)]),
        (2023, 1, [dec!(945.67), dec!(712.34), dec!(256.78), dec!(138.90), dec!(74.56)]),
        (2022, 12, [dec!(1234.56), dec!(845.67), dec!(312.45), dec!(167.89), dec!(92.45)]),
        (2022, 11, [dec!(987.45), dec!(732.56), dec!(278.90), dec!(145.67), dec!(78.45)]),
        (2022, 10, [dec!(923.67), dec!(698.45), dec!(256.78), dec!(132.45), dec!(74.56)]),
        (2022, 9, [dec!(876.45), dec!(654.32), dec!(234.56), dec!(124.67), dec!(68.90)]),
        (2022, 8, [dec!(845.67), dec!(634.56), dec!(223.45), dec!(119.34), dec!(65.78)]),
        (2022, 7, [dec!(823.45), dec!(612.34), dec!(212.45), dec!(114.56), dec!(62.34)]),
    ];

    rows.into_iter()
        .filter_map(|(year, month, amounts)| {
            let month = MonthLabel::new(year, month)?;
            Some(RevenueRow::new(
                month,
                RevenuePlatform::ALL.iter().copied().zip(amounts),
            ))
        })
        .collect()
}

pub(crate) fn recent_releases() -> Vec<RecentRelease> {
    vec![
        RecentRelease {
            id: ReleaseId(1),
            title: "Summer Vibes".into(),
            release_type: ReleaseType::Single,
            streams: 12_540,
            revenue: dec!(276.50),
            release_date: date(2023, 6, 15),
            cover_url: cover(167092),
        },
        RecentRelease {
            id: ReleaseId(2),
            title: "Midnight Dreams".into(),
            release_type: ReleaseType::Ep,
            streams: 45_230,
            revenue: dec!(987.45),
            release_date: date(2023, 4, 20),
            cover_url: cover(1389429),
        },
        RecentRelease {
            id: ReleaseId(3),
            title: "Elevation".into(),
            release_type: ReleaseType::Album,
            streams: 153_420,
            revenue: dec!(3254.80),
            release_date: date(2023, 1, 10),
            cover_url: cover(167491),
        },
    ]
}

pub(crate) fn overview_stats() -> Vec<OverviewStat> {
    [
        ("Total Streams", "1.2M", "8.2% increase"),
        ("Monthly Revenue", "$4,624.90", "12.3% increase"),
        ("Active Releases", "24", "3 pending releases"),
        ("Monthly Listeners", "245.8K", "5.7% increase"),
    ]
    .into_iter()
    .map(|(label, value, trend)| OverviewStat {
        label: label.into(),
        value: value.into(),
        trend: trend.into(),
    })
    .collect()
}

pub(crate) fn platform_distribution() -> Vec<PlatformShare> {
    [
        ("Spotify", 45),
        ("Apple Music", 30),
        ("Amazon Music", 15),
        ("YouTube Music", 7),
        ("Others", 3),
    ]
    .into_iter()
    .map(|(platform_name, percent)| PlatformShare {
        platform_name: platform_name.into(),
        percent,
    })
    .collect()
}

pub(crate) fn profile() -> ArtistProfile {
    ArtistProfile {
        name: String::new(),
        bio: "Electronic music producer and DJ based in Los Angeles. Creating beats since 2015."
            .into(),
        genre: "Electronic".into(),
        location: "Los Angeles, CA".into(),
        website: "https://example.com".into(),
        social_links: ["Instagram", "Twitter", "Facebook", "YouTube"]
            .into_iter()
            .map(|platform| SocialLink {
                platform: platform.into(),
                url: format!("https://{}.com/artistname", platform.to_ascii_lowercase()),
            })
            .collect(),
    }
}
