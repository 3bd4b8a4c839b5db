//! Display formatting for academic content: author lists, citations,
//! date ranges, and status classification.
//!
//! Every function here degrades to placeholder text rather than failing.
//! Missing authors render as `Unknown Author`, a missing year as `n.d.`,
//! and unparseable dates as an empty string.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate};

use crate::models::{Author, Publication};
use crate::text::truncate;

/// Length of list-preview subtitles before truncation.
pub const PREVIEW_SUBTITLE_CHARS: usize = 100;

const UNKNOWN_AUTHOR: &str = "Unknown Author";
const UNTITLED: &str = "Untitled";
const NO_DATE: &str = "n.d.";

/// Join author names with `", "` in list order. Blank names are skipped.
pub fn format_authors_list(authors: &[Author]) -> String {
    authors
        .iter()
        .filter_map(|a| non_empty(Some(a.name.as_str())))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Citation template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CitationStyle {
    #[default]
    Apa,
    Mla,
    Chicago,
    /// `authors. title. venue year.`, used for unrecognized style names.
    Minimal,
}

impl CitationStyle {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apa => "apa",
            Self::Mla => "mla",
            Self::Chicago => "chicago",
            Self::Minimal => "minimal",
        }
    }
}

impl fmt::Display for CitationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CitationStyle {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "apa" => Self::Apa,
            "mla" => Self::Mla,
            "chicago" => Self::Chicago,
            _ => Self::Minimal,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Render a publication citation in the given style.
///
/// Absent venue and pages are omitted entirely; the year falls back to
/// `n.d.` in the APA and MLA templates.
pub fn format_citation(publication: &Publication, style: CitationStyle) -> String {
    let authors = match format_authors_list(&publication.authors) {
        names if names.is_empty() => UNKNOWN_AUTHOR.to_string(),
        names => names,
    };
    let title = non_empty(Some(publication.title.as_str())).unwrap_or(UNTITLED);
    let venue = non_empty(publication.venue.as_deref());
    let pages = non_empty(publication.pages.as_deref());
    let year = publication.year;
    let year_or_nd = year
        .map(|y| y.to_string())
        .unwrap_or_else(|| NO_DATE.to_string());

    let mut out = String::new();
    match style {
        CitationStyle::Apa => {
            out.push_str(&format!("{} ({}). {}.", authors, year_or_nd, title));
            if let Some(v) = venue {
                out.push_str(&format!(" {}.", v));
            }
            if let Some(p) = pages {
                out.push_str(&format!(" pp. {}.", p));
            }
        }
        CitationStyle::Mla => {
            out.push_str(&format!("{}. \"{}.\" ", authors, title));
            if let Some(v) = venue {
                out.push_str(&format!("{}, ", v));
            }
            out.push_str(&format!("{}.", year_or_nd));
            if let Some(p) = pages {
                out.push_str(&format!(" {}.", p));
            }
        }
        CitationStyle::Chicago => {
            out.push_str(&format!("{}. \"{}.\"", authors, title));
            let group: Vec<String> = venue
                .map(str::to_string)
                .into_iter()
                .chain(year.map(|y| format!("({})", y)))
                .collect();
            if !group.is_empty() {
                out.push_str(&format!(" {}.", group.join(" ")));
            }
            if let Some(p) = pages {
                out.push_str(&format!(" {}.", p));
            }
        }
        CitationStyle::Minimal => {
            out.push_str(&format!("{}. {}.", authors, title));
            let tail: Vec<String> = venue
                .map(str::to_string)
                .into_iter()
                .chain(year.map(|y| y.to_string()))
                .collect();
            if !tail.is_empty() {
                out.push_str(&format!(" {}.", tail.join(" ")));
            }
        }
    }
    out
}

/// Parse an ISO date or RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(value.get(..10)?, "%Y-%m-%d").ok()
}

/// Four-digit year of a date string, or `""` when unparseable.
pub fn format_year(date: &str) -> String {
    parse_date(date)
        .map(|d| d.year().to_string())
        .unwrap_or_default()
}

/// Long-form date such as `January 5, 2024`, or `""` when unparseable.
pub fn format_date(date: &str) -> String {
    parse_date(date)
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_default()
}

/// Year range for CV entries and project timelines.
///
/// ```rust
/// use folio_core::format::format_date_range;
///
/// assert_eq!(format_date_range(Some("2020-01-01"), None, false), "2020");
/// assert_eq!(format_date_range(Some("2020-01-01"), Some("2023-01-01"), false), "2020-2023");
/// assert_eq!(format_date_range(Some("2020-01-01"), None, true), "2020-present");
/// assert_eq!(format_date_range(None, Some("2023-01-01"), true), "");
/// ```
pub fn format_date_range(start: Option<&str>, end: Option<&str>, is_current: bool) -> String {
    let start = match non_empty(start).map(format_year) {
        Some(s) if !s.is_empty() => s,
        _ => return String::new(),
    };
    if is_current {
        return format!("{}-present", start);
    }
    let end = match non_empty(end) {
        Some(e) => format_year(e),
        None => return start,
    };
    if start == end || end.is_empty() {
        start
    } else {
        format!("{}-{}", start, end)
    }
}

/// A named set of status values used for display grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSet {
    pub name: &'static str,
    pub statuses: &'static [&'static str],
}

pub const ACTIVE_STATUSES: StatusSet = StatusSet {
    name: "active",
    statuses: &["active", "current", "published", "ongoing"],
};

pub const COMPLETED_STATUSES: StatusSet = StatusSet {
    name: "completed",
    statuses: &["completed", "published", "finished"],
};

impl StatusSet {
    pub fn contains(&self, status: &str) -> bool {
        self.statuses.contains(&status)
    }
}

/// Membership test of `status` in `set`.
pub fn classify_status(status: &str, set: &StatusSet) -> bool {
    set.contains(status)
}

pub fn is_active_status(status: &str) -> bool {
    classify_status(status, &ACTIVE_STATUSES)
}

pub fn is_completed_status(status: &str) -> bool {
    classify_status(status, &COMPLETED_STATUSES)
}

/// Whole years between the doctorate and `today`, counting 365.25-day years.
pub fn academic_age(phd_date: NaiveDate, today: NaiveDate) -> i64 {
    let days = (today - phd_date).num_days().abs() as f64;
    (days / 365.25).floor() as i64
}

/// Subtitle for list previews: the first 100 characters plus `...`.
pub fn preview_subtitle(text: Option<&str>) -> Option<String> {
    text.map(|t| truncate(t, PREVIEW_SUBTITLE_CHARS))
}
