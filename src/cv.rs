//! `folio cv`: the public CV grouped by category.

use anyhow::Result;
use chrono::NaiveDate;
use folio_core::collections::group_by;
use folio_core::facade::QueryFacade;
use folio_core::format::{academic_age, format_date_range, parse_date};
use folio_core::models::{CvCategory, CvEntry, DegreeType};
use std::fmt::Write;

use crate::client::create_client;
use crate::config::Config;

/// Date of the doctorate, taken from the first PhD education entry.
fn phd_date(entries: &[CvEntry]) -> Option<NaiveDate> {
    entries
        .iter()
        .filter(|e| e.degree_type == Some(DegreeType::Phd))
        .find_map(|e| e.end_date.as_deref().or(e.start_date.as_deref()))
        .and_then(parse_date)
}

/// Render CV entries as plain text, one section per category.
pub fn render_cv(entries: &[CvEntry], today: NaiveDate) -> String {
    let mut out = String::new();

    if let Some(phd) = phd_date(entries) {
        let _ = writeln!(out, "Academic age: {} years", academic_age(phd, today));
        out.push('\n');
    }

    let groups = group_by(entries.iter(), |e| e.category.unwrap_or(CvCategory::Unknown));
    for (category, items) in &groups {
        let _ = writeln!(out, "## {}", category.title());
        for entry in items {
            let range = format_date_range(
                entry.start_date.as_deref(),
                entry.end_date.as_deref(),
                entry.is_current.unwrap_or(false),
            );
            let _ = write!(out, "  {:<14} {}", range, entry.title);
            if let Some(institution) = &entry.institution {
                let _ = write!(out, ", {}", institution);
            }
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

pub async fn run_cv(config: &Config) -> Result<()> {
    let facade = QueryFacade::new(create_client(config)?);
    let entries = facade.cv_entries().await?;

    if entries.is_empty() {
        println!("No CV entries.");
        return Ok(());
    }

    let today = chrono::Utc::now().date_naive();
    print!("{}", render_cv(&entries, today));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(
        title: &str,
        category: CvCategory,
        start: &str,
        end: Option<&str>,
        current: bool,
    ) -> CvEntry {
        CvEntry {
            title: title.to_string(),
            category: Some(category),
            start_date: Some(start.to_string()),
            end_date: end.map(str::to_string),
            is_current: Some(current),
            ..CvEntry::default()
        }
    }

    #[test]
    fn test_render_groups_and_ranges() {
        let mut phd = entry(
            "PhD",
            CvCategory::Education,
            "2008-09-01",
            Some("2013-05-15"),
            false,
        );
        phd.degree_type = Some(DegreeType::Phd);
        let entries = vec![
            phd,
            entry("Professor", CvCategory::Positions, "2019-08-15", None, true),
            entry("Lecturer", CvCategory::Positions, "2014-01-01", Some("2019-06-30"), false),
        ];
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let rendered = render_cv(&entries, today);
        assert_eq!(
            rendered,
            "Academic age: 11 years\n\n\
             ## Education\n  2008-2013      PhD\n\n\
             ## Academic Positions\n  2019-present   Professor\n  2014-2019      Lecturer\n\n"
        );
    }

    #[test]
    fn test_render_without_phd() {
        let entries = vec![entry("Award", CvCategory::Awards, "2020-01-01", None, false)];
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(
            render_cv(&entries, today),
            "## Awards & Honors\n  2020           Award\n\n"
        );
    }
}
