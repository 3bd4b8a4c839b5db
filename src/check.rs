//! `folio check`: audit an NDJSON export against the document schemas.
//!
//! Every published document with a known `_type` is validated field by
//! field. The export as a whole must also load as a dataset (unique ids,
//! at most one professor profile).

use anyhow::{Context, Result};
use folio_core::schema::{schema_for, validate_document};
use folio_core::store::Dataset;
use std::path::Path;

/// One problem found in an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckIssue {
    pub document: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct CheckReport {
    pub documents: usize,
    pub validated: usize,
    pub drafts_skipped: usize,
    pub issues: Vec<CheckIssue>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Validate an export held in memory.
pub fn check_export(input: &str) -> CheckReport {
    let mut report = CheckReport::default();

    let dataset = match Dataset::from_ndjson(input) {
        Ok(ds) => ds,
        Err(e) => {
            report.issues.push(CheckIssue {
                document: "-".to_string(),
                message: e.to_string(),
            });
            return report;
        }
    };

    report.documents = dataset.len();
    report.drafts_skipped = dataset.drafts_skipped();

    for doc in dataset.iter() {
        let Some(schema) = doc["_type"].as_str().and_then(schema_for) else {
            continue;
        };
        report.validated += 1;
        let id = doc["_id"].as_str().unwrap_or("-");
        for issue in validate_document(&schema, doc) {
            report.issues.push(CheckIssue {
                document: id.to_string(),
                message: issue.to_string(),
            });
        }
    }

    report
}

/// CLI entry point. Returns whether the export is clean.
pub fn run_check(path: &Path) -> Result<bool> {
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read export: {}", path.display()))?;
    let report = check_export(&input);

    for issue in &report.issues {
        println!("{}: {}", issue.document, issue.message);
    }
    println!(
        "checked {} documents ({} validated, {} drafts skipped): {} issues",
        report.documents,
        report.validated,
        report.drafts_skipped,
        report.issues.len()
    );

    Ok(report.is_clean())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_export() {
        let input = concat!(
            r#"{"_id":"a1","_type":"researchArea","name":"Topology","slug":{"current":"topology"}}"#,
            "\n",
            r#"{"_id":"image-x","_type":"sanity.imageAsset","url":"https://cdn/x.png"}"#,
            "\n",
        );
        let report = check_export(input);
        assert!(report.is_clean(), "{:?}", report.issues);
        assert_eq!(report.documents, 2);
        assert_eq!(report.validated, 1);
    }

    #[test]
    fn test_field_issues_are_reported_per_document() {
        let input = r#"{"_id":"c1","_type":"cvEntry","title":"PhD","category":"degrees"}"#;
        let report = check_export(input);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].document, "c1");
        assert!(report.issues[0].message.starts_with("category:"));
    }

    #[test]
    fn test_load_errors_are_issues() {
        let input = concat!(
            r#"{"_id":"p1","_type":"professor","fullName":"Ada Lovelace"}"#,
            "\n",
            r#"{"_id":"p2","_type":"professor","fullName":"Charles Babbage"}"#,
        );
        let report = check_export(input);
        assert!(!report.is_clean());
        assert_eq!(report.issues[0].document, "-");
    }
}
