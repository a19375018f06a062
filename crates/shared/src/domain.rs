use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

/// Declares a closed set of labelled values with a stable slug, a display
/// label, and case-insensitive parsing from either form.
macro_rules! slug_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => ($slug:literal, $label:literal)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $slug)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn slug(self) -> &'static str {
                match self {
                    $($name::$variant => $slug,)+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let needle = value.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| {
                        candidate.slug().eq_ignore_ascii_case(needle)
                            || candidate.label().eq_ignore_ascii_case(needle)
                    })
                    .ok_or_else(|| ParseError::unknown(stringify!($name), value))
            }
        }
    };
}

id_newtype!(ReleaseId);

slug_enum!(ReleaseType {
    Single => ("single", "Single"),
    Ep => ("ep", "EP"),
    Album => ("album", "Album"),
});

slug_enum!(
    /// Release pipeline status. Declaration order is pipeline order and is
    /// what status sorting uses.
    ReleaseStatus {
        Draft => ("draft", "Draft"),
        Processing => ("processing", "Processing"),
        Review => ("review", "Review"),
        Scheduled => ("scheduled", "Scheduled"),
        Live => ("live", "Live"),
        Rejected => ("rejected", "Rejected"),
    }
);

slug_enum!(
    /// Distribution targets offered by the upload wizard.
    PlatformId {
        Spotify => ("spotify", "Spotify"),
        AppleMusic => ("apple", "Apple Music"),
        AmazonMusic => ("amazon", "Amazon Music"),
        YoutubeMusic => ("youtube", "YouTube Music"),
        Deezer => ("deezer", "Deezer"),
        Tidal => ("tidal", "Tidal"),
    }
);

impl PlatformId {
    pub fn selected_by_default(self) -> bool {
        matches!(
            self,
            PlatformId::Spotify
                | PlatformId::AppleMusic
                | PlatformId::AmazonMusic
                | PlatformId::YoutubeMusic
        )
    }
}

slug_enum!(
    /// Revenue report columns.
    RevenuePlatform {
        Spotify => ("spotify", "Spotify"),
        Apple => ("apple", "Apple Music"),
        Amazon => ("amazon", "Amazon Music"),
        Youtube => ("youtube", "YouTube"),
        Other => ("other", "Other"),
    }
);

slug_enum!(Genre {
    Pop => ("pop", "Pop"),
    Rock => ("rock", "Rock"),
    HipHop => ("hiphop", "Hip Hop"),
    RnB => ("rnb", "R&B"),
    Electronic => ("electronic", "Electronic"),
    Jazz => ("jazz", "Jazz"),
    Classical => ("classical", "Classical"),
    Country => ("country", "Country"),
    Folk => ("folk", "Folk"),
    Metal => ("metal", "Metal"),
    Other => ("other", "Other"),
});

/// Calendar month shown as "MMM YYYY" (e.g. "Jun 2023"). Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthLabel {
    year: i32,
    month: u32,
}

impl MonthLabel {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Months elapsed since year 0, used for window arithmetic.
    pub fn ordinal(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    pub fn offset(self, months: i64) -> Option<Self> {
        let ordinal = self.ordinal() + months;
        let year = i32::try_from(ordinal.div_euclid(12)).ok()?;
        let month = u32::try_from(ordinal.rem_euclid(12)).ok()? + 1;
        Self::new(year, month)
    }
}

impl From<NaiveDate> for MonthLabel {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day().format("%b %Y"))
    }
}

impl FromStr for MonthLabel {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut parts = value.split_whitespace();
        let (Some(month), Some(year), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ParseError::InvalidMonthLabel(value.to_string()));
        };
        NaiveDate::parse_from_str(&format!("1 {month} {year}"), "%d %b %Y")
            .map(Self::from)
            .map_err(|_| ParseError::InvalidMonthLabel(value.to_string()))
    }
}

impl TryFrom<String> for MonthLabel {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthLabel> for String {
    fn from(value: MonthLabel) -> Self {
        value.to_string()
    }
}

pub fn parse_iso_date(value: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ParseError::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_from_slug_and_label_case_insensitively() {
        assert_eq!("live".parse::<ReleaseStatus>(), Ok(ReleaseStatus::Live));
        assert_eq!("LIVE".parse::<ReleaseStatus>(), Ok(ReleaseStatus::Live));
        assert_eq!(" Draft ".parse::<ReleaseStatus>(), Ok(ReleaseStatus::Draft));
        assert_eq!(
            "archived".parse::<ReleaseStatus>(),
            Err(ParseError::unknown("ReleaseStatus", "archived"))
        );
    }

    #[test]
    fn genre_accepts_display_labels() {
        assert_eq!("R&B".parse::<Genre>(), Ok(Genre::RnB));
        assert_eq!("hiphop".parse::<Genre>(), Ok(Genre::HipHop));
        assert_eq!(Genre::HipHop.to_string(), "Hip Hop");
    }

    #[test]
    fn default_platform_selection_matches_wizard_defaults() {
        let selected: Vec<_> = PlatformId::ALL
            .iter()
            .copied()
            .filter(|p| p.selected_by_default())
            .collect();
        assert_eq!(
            selected,
            vec![
                PlatformId::Spotify,
                PlatformId::AppleMusic,
                PlatformId::AmazonMusic,
                PlatformId::YoutubeMusic
            ]
        );
    }

    #[test]
    fn month_label_round_trips_display_form() {
        let label: MonthLabel = "Jun 2023".parse().expect("month");
        assert_eq!(label.year(), 2023);
        assert_eq!(label.month(), 6);
        assert_eq!(label.to_string(), "Jun 2023");
    }

    #[test]
    fn month_labels_order_chronologically_across_years() {
        let dec: MonthLabel = "Dec 2022".parse().expect("dec");
        let jan: MonthLabel = "Jan 2023".parse().expect("jan");
        let jul: MonthLabel = "Jul 2022".parse().expect("jul");
        assert!(jul < dec);
        assert!(dec < jan);
    }

    #[test]
    fn month_label_rejects_malformed_input() {
        for raw in ["", "June", "2023 Jun", "Foo 2023", "Jun 2023 extra"] {
            assert!(raw.parse::<MonthLabel>().is_err(), "accepted {raw:?}");
        }
    }

    #[test]
    fn month_offset_crosses_year_boundaries() {
        let jun: MonthLabel = "Jun 2023".parse().expect("jun");
        assert_eq!(jun.offset(-11).expect("offset").to_string(), "Jul 2022");
        assert_eq!(jun.offset(7).expect("offset").to_string(), "Jan 2024");
    }

    #[test]
    fn month_label_serializes_as_display_string() {
        let label: MonthLabel = "Mar 2023".parse().expect("month");
        let json = serde_json::to_string(&label).expect("serialize");
        assert_eq!(json, "\"Mar 2023\"");
        let back: MonthLabel = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, label);
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_iso_date("2023-06-15").expect("date"),
            NaiveDate::from_ymd_opt(2023, 6, 15).expect("valid")
        );
        assert!(parse_iso_date("15/06/2023").is_err());
    }
}
