//! Field validation predicates and composable validators.
//!
//! Predicates are plain `fn(&T) -> bool`. A [`Validator`] pairs a predicate
//! with the message an editor sees when it fails; validators compose by
//! conjunction with [`Validator::and`].
//!
//! ```rust
//! use folio_core::validation::{doi_validator, is_valid_doi};
//!
//! assert!(is_valid_doi("10.1000/182"));
//! assert!(doi_validator().check("doi:10.1000/182").is_err());
//! ```

use chrono::Datelike;
use thiserror::Error;

/// Earliest accepted publication or course year.
pub const MIN_YEAR: i64 = 1900;

/// How far into the future a year may lie.
pub const MAX_YEARS_AHEAD: i64 = 10;

/// A failed validation, carrying the validator's message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

/// Trimmed length greater than zero.
pub fn is_non_empty_string(value: &str) -> bool {
    !value.trim().is_empty()
}

/// `local@domain.tld` shape: one `@`, no whitespace, and a domain with at
/// least one dot that is neither its first nor its last character.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(l), Some(d), None) => (l, d),
        _ => return false,
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i < domain.len() - 1)
}

/// Year in `[1900, current_year + 10]`, using today's UTC year.
pub fn is_valid_year(year: i64) -> bool {
    is_valid_year_at(year, i64::from(chrono::Utc::now().year()))
}

/// Year in `[1900, current_year + 10]` against an explicit current year.
pub fn is_valid_year_at(year: i64, current_year: i64) -> bool {
    (MIN_YEAR..=current_year + MAX_YEARS_AHEAD).contains(&year)
}

/// DOI shape: `10.` + at least four digits + `/` + a non-whitespace suffix.
pub fn is_valid_doi(value: &str) -> bool {
    let rest = match value.strip_prefix("10.") {
        Some(r) => r,
        None => return false,
    };
    let (registrant, suffix) = match rest.split_once('/') {
        Some(pair) => pair,
        None => return false,
    };
    registrant.len() >= 4
        && registrant.chars().all(|c| c.is_ascii_digit())
        && !suffix.is_empty()
        && !suffix.chars().any(char::is_whitespace)
}

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// A predicate paired with a human-readable failure message.
pub struct Validator<T: ?Sized> {
    rules: Vec<(Predicate<T>, String)>,
}

impl<T: ?Sized> Validator<T> {
    pub fn new<F>(predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            rules: vec![(Box::new(predicate), message.into())],
        }
    }

    /// Conjunction: `self` is checked first, then `other`.
    pub fn and(mut self, other: Validator<T>) -> Self {
        self.rules.extend(other.rules);
        self
    }

    /// Returns the message of the first failing rule.
    pub fn check(&self, value: &T) -> Result<(), ValidationError> {
        for (predicate, message) in &self.rules {
            if !predicate(value) {
                return Err(ValidationError {
                    message: message.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn is_valid(&self, value: &T) -> bool {
        self.check(value).is_ok()
    }
}

pub fn title_validator() -> Validator<str> {
    Validator::new(
        |v: &str| {
            let len = v.chars().count();
            is_non_empty_string(v) && (3..=200).contains(&len)
        },
        "Title must be between 3 and 200 characters",
    )
}

pub fn email_validator() -> Validator<str> {
    Validator::new(is_valid_email, "Please enter a valid email address")
}

pub fn publication_year_validator() -> Validator<i64> {
    Validator::new(
        |y: &i64| is_valid_year(*y),
        "Year must be between 1900 and 10 years in the future",
    )
}

pub fn doi_validator() -> Validator<str> {
    Validator::new(is_valid_doi, "DOI must be in format 10.xxxx/xxxxx")
}
