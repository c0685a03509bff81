//! Domain types for the grant funnel
//!
//! - [`OrganizationType`] / [`FocusArea`] - the two select fields of the form
//! - [`Deadline`] - a grant's closing date (or rolling)
//! - [`GrantMatch`] - a single funding opportunity shown as a result card

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

// ─────────────────────────────────────────────────────────────────
// Organization Type
// ─────────────────────────────────────────────────────────────────

/// Kind of organization applying for funding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganizationType {
    Nonprofit,
    Startup,
    Education,
    Research,
    Government,
    Other,
}

impl OrganizationType {
    /// All options in the order the form presents them
    pub const ALL: [OrganizationType; 6] = [
        OrganizationType::Nonprofit,
        OrganizationType::Startup,
        OrganizationType::Education,
        OrganizationType::Research,
        OrganizationType::Government,
        OrganizationType::Other,
    ];

    /// Wire value (`"nonprofit"`, `"startup"`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizationType::Nonprofit => "nonprofit",
            OrganizationType::Startup => "startup",
            OrganizationType::Education => "education",
            OrganizationType::Research => "research",
            OrganizationType::Government => "government",
            OrganizationType::Other => "other",
        }
    }

    /// Human-readable option label
    pub fn label(&self) -> &'static str {
        match self {
            OrganizationType::Nonprofit => "Nonprofit Organization",
            OrganizationType::Startup => "Startup / Small Business",
            OrganizationType::Education => "Educational Institution",
            OrganizationType::Research => "Research Organization",
            OrganizationType::Government => "Government Agency",
            OrganizationType::Other => "Other",
        }
    }

    /// Plural noun phrase used when writing grant descriptions
    pub fn audience(&self) -> &'static str {
        match self {
            OrganizationType::Nonprofit => "nonprofit organizations",
            OrganizationType::Startup => "startups and small businesses",
            OrganizationType::Education => "schools, colleges, and universities",
            OrganizationType::Research => "research institutions",
            OrganizationType::Government => "state, local, and tribal governments",
            OrganizationType::Other => "eligible organizations",
        }
    }
}

impl fmt::Display for OrganizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrganizationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| Error::invalid_field("organization_type", s))
    }
}

// ─────────────────────────────────────────────────────────────────
// Focus Area
// ─────────────────────────────────────────────────────────────────

/// Primary focus area of the project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusArea {
    Climate,
    Education,
    Health,
    Technology,
    Community,
    Arts,
    Other,
}

impl FocusArea {
    /// All options in the order the form presents them
    pub const ALL: [FocusArea; 7] = [
        FocusArea::Climate,
        FocusArea::Education,
        FocusArea::Health,
        FocusArea::Technology,
        FocusArea::Community,
        FocusArea::Arts,
        FocusArea::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FocusArea::Climate => "climate",
            FocusArea::Education => "education",
            FocusArea::Health => "health",
            FocusArea::Technology => "technology",
            FocusArea::Community => "community",
            FocusArea::Arts => "arts",
            FocusArea::Other => "other",
        }
    }

    /// Label shown in the select and in the results heading
    pub fn label(&self) -> &'static str {
        match self {
            FocusArea::Climate => "Climate & Environment",
            FocusArea::Education => "Education",
            FocusArea::Health => "Health & Wellness",
            FocusArea::Technology => "Technology & Innovation",
            FocusArea::Community => "Community Development",
            FocusArea::Arts => "Arts & Culture",
            FocusArea::Other => "Various",
        }
    }
}

impl fmt::Display for FocusArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FocusArea {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s.trim())
            .ok_or_else(|| Error::invalid_field("focus_area", s))
    }
}

// ─────────────────────────────────────────────────────────────────
// Deadline
// ─────────────────────────────────────────────────────────────────

/// Closing date of a grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Deadline {
    /// Applications close on this date
    On(NaiveDate),
    /// Applications are accepted on a rolling basis
    Rolling,
}

impl Deadline {
    /// Format for display, e.g. `Sep 15, 2025`
    pub fn display(&self) -> String {
        match self {
            Deadline::On(date) => date.format("%b %-d, %Y").to_string(),
            Deadline::Rolling => "Rolling".to_string(),
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Deadline::On(date) => Some(*date),
            Deadline::Rolling => None,
        }
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deadline::On(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Deadline::Rolling => f.write_str("Rolling"),
        }
    }
}

impl FromStr for Deadline {
    type Err = Error;

    /// Accepts `YYYY-MM-DD`, an ISO date-time (the date part is kept), or
    /// `Rolling`/empty.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("rolling") {
            return Ok(Deadline::Rolling);
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Deadline::On(date));
        }

        let date_part = s.get(..10);
        let separator = s.as_bytes().get(10).copied();
        match (date_part, separator) {
            (Some(date), Some(b'T' | b' ')) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map(Deadline::On)
                .map_err(|_| Error::invalid_field("deadline", s)),
            _ => Err(Error::invalid_field("deadline", s)),
        }
    }
}

impl Serialize for Deadline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Deadline {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ─────────────────────────────────────────────────────────────────
// Grant Match
// ─────────────────────────────────────────────────────────────────

/// A funding opportunity shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantMatch {
    pub id: u32,
    pub title: String,
    pub funder: String,
    pub description: String,
    pub deadline: Deadline,
    /// Free-form amount range, e.g. `$50,000 - $250,000`
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl GrantMatch {
    /// Text placed on the clipboard when the card is copied
    pub fn clipboard_text(&self) -> String {
        format!(
            "{}\nFunder: {}\n{}\nDeadline: {}\nAmount: {}",
            self.title, self.funder, self.description, self.deadline, self.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_type_round_trips_through_str() {
        for org in OrganizationType::ALL {
            assert_eq!(org.as_str().parse::<OrganizationType>().unwrap(), org);
        }
    }

    #[test]
    fn test_unknown_organization_type_is_rejected() {
        let err = "guild".parse::<OrganizationType>().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidField {
                field: "organization_type",
                ..
            }
        ));
        assert!("".parse::<OrganizationType>().is_err());
    }

    #[test]
    fn test_focus_area_labels() {
        assert_eq!(FocusArea::Climate.label(), "Climate & Environment");
        assert_eq!(FocusArea::Other.label(), "Various");
        assert_eq!("arts".parse::<FocusArea>().unwrap(), FocusArea::Arts);
    }

    #[test]
    fn test_focus_area_serde_is_lowercase() {
        let json = serde_json::to_string(&FocusArea::Technology).unwrap();
        assert_eq!(json, "\"technology\"");
    }

    #[test]
    fn test_deadline_parses_plain_date() {
        let deadline: Deadline = "2025-09-15".parse().unwrap();
        assert_eq!(
            deadline,
            Deadline::On(NaiveDate::from_ymd_opt(2025, 9, 15).unwrap())
        );
    }

    #[test]
    fn test_deadline_parses_iso_datetime() {
        let deadline: Deadline = "2025-10-01T12:30:00.123456".parse().unwrap();
        assert_eq!(
            deadline.date(),
            Some(NaiveDate::from_ymd_opt(2025, 10, 1).unwrap())
        );
    }

    #[test]
    fn test_deadline_rolling_and_empty() {
        assert_eq!("Rolling".parse::<Deadline>().unwrap(), Deadline::Rolling);
        assert_eq!("".parse::<Deadline>().unwrap(), Deadline::Rolling);
    }

    #[test]
    fn test_deadline_rejects_garbage() {
        assert!("next tuesday".parse::<Deadline>().is_err());
        assert!("2025-13-45".parse::<Deadline>().is_err());
    }

    #[test]
    fn test_deadline_display_format() {
        let deadline = Deadline::On(NaiveDate::from_ymd_opt(2025, 9, 5).unwrap());
        assert_eq!(deadline.display(), "Sep 5, 2025");
        assert_eq!(Deadline::Rolling.display(), "Rolling");
    }

    #[test]
    fn test_clipboard_text_layout() {
        let grant = GrantMatch {
            id: 1,
            title: "Climate Action Innovation Fund".into(),
            funder: "Environmental Protection Agency".into(),
            description: "Supports emission reductions.".into(),
            deadline: "2025-10-01".parse().unwrap(),
            amount: "$75,000 - $300,000".into(),
            url: None,
        };

        assert_eq!(
            grant.clipboard_text(),
            "Climate Action Innovation Fund\n\
             Funder: Environmental Protection Agency\n\
             Supports emission reductions.\n\
             Deadline: 2025-10-01\n\
             Amount: $75,000 - $300,000"
        );
    }

    #[test]
    fn test_grant_deserializes_without_url() {
        let json = r#"{"id":3,"title":"T","funder":"F","description":"D","deadline":"2025-10-01","amount":"$1"}"#;
        let grant: GrantMatch = serde_json::from_str(json).unwrap();
        assert_eq!(grant.url, None);
        assert_eq!(grant.id, 3);
    }
}
