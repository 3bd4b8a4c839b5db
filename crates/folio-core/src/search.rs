//! Cross-type keyword search.
//!
//! Searches research projects, publications, blog posts and courses. A
//! search term is split into lowercase tokens; each token matches any word
//! in a field that starts with it, so `topo` finds `topology`.
//!
//! # Scoring
//!
//! 1. A field matches when every query token prefix-matches some word in it.
//! 2. A document matches when at least one searchable field matches.
//! 3. `score = Σ weight(field) × prefix hits(field)` over matching fields,
//!    with weights title 3, keywords 2, everything else 1.
//! 4. Sort by score (desc), date (desc, absent last), id (asc).
//! 5. Truncate to the limit.
//!
//! Rich-text descriptions are searched by their plain text.

use std::cmp::Ordering;

use serde_json::{json, Value};

use crate::content::value_plain_text;
use crate::query::eval::field;
use crate::store::Dataset;

/// Maximum hits returned by the search contract.
pub const SEARCH_LIMIT: usize = 20;

/// Document types covered by search.
pub const SEARCHABLE_TYPES: [&str; 4] = ["research", "publication", "blogPost", "course"];

/// Searchable fields and their weights.
pub const FIELD_WEIGHTS: [(&str, f64); 5] = [
    ("title", 3.0),
    ("keywords", 2.0),
    ("abstract", 1.0),
    ("description", 1.0),
    ("excerpt", 1.0),
];

/// A matching document before projection.
#[derive(Debug, Clone)]
pub struct ScoredDocument<'a> {
    pub doc: &'a Value,
    pub score: f64,
    pub matched_fields: Vec<&'static str>,
}

/// Lowercase alphanumeric tokens of `text`.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn field_text(doc: &Value, name: &str) -> String {
    match field(doc, name) {
        Value::Array(items) if name == "keywords" => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" "),
        other => value_plain_text(other),
    }
}

/// Score one document against the query tokens; `None` when nothing matches.
pub fn score_document<'a>(doc: &'a Value, terms: &[String]) -> Option<ScoredDocument<'a>> {
    if terms.is_empty() {
        return None;
    }
    let mut score = 0.0;
    let mut matched_fields = Vec::new();
    for (name, weight) in FIELD_WEIGHTS {
        let words = tokenize(&field_text(doc, name));
        if words.is_empty() {
            continue;
        }
        let hits: Vec<usize> = terms
            .iter()
            .map(|t| words.iter().filter(|w| w.starts_with(t.as_str())).count())
            .collect();
        if hits.iter().all(|&h| h > 0) {
            score += weight * hits.iter().sum::<usize>() as f64;
            matched_fields.push(name);
        }
    }
    if matched_fields.is_empty() {
        None
    } else {
        Some(ScoredDocument {
            doc,
            score,
            matched_fields,
        })
    }
}

/// Type-dependent preview text.
pub fn preview_of(doc: &Value) -> Value {
    let source = match field(doc, "_type").as_str() {
        Some("research") | Some("publication") => "abstract",
        Some("blogPost") => "excerpt",
        Some("course") => "description",
        _ => return Value::Null,
    };
    field(doc, source).clone()
}

/// Type-dependent date: project start, publication date (or January 1st
/// of its year), post publish timestamp. Courses have none.
pub fn date_of(doc: &Value) -> Value {
    match field(doc, "_type").as_str() {
        Some("research") => field(doc, "startDate").clone(),
        Some("publication") => match field(doc, "publishedDate") {
            Value::Null => match field(doc, "year") {
                Value::Number(year) => Value::String(format!("{}-01-01", year)),
                Value::String(year) => Value::String(format!("{}-01-01", year)),
                _ => Value::Null,
            },
            date => date.clone(),
        },
        Some("blogPost") => field(doc, "publishedAt").clone(),
        _ => Value::Null,
    }
}

/// Project a matching document into the search hit shape.
pub fn hit(doc: &Value) -> Value {
    json!({
        "_id": field(doc, "_id"),
        "_type": field(doc, "_type"),
        "title": field(doc, "title"),
        "slug": field(doc, "slug"),
        "preview": preview_of(doc),
        "date": date_of(doc),
    })
}

/// Rank matching documents without projecting them.
pub fn rank<'a>(dataset: &'a Dataset, term: &str) -> Vec<ScoredDocument<'a>> {
    let terms = tokenize(term);
    let mut scored: Vec<(ScoredDocument<'a>, Value)> = SEARCHABLE_TYPES
        .iter()
        .flat_map(|t| dataset.of_type(t))
        .filter_map(|doc| score_document(doc, &terms))
        .map(|s| {
            let date = date_of(s.doc);
            (s, date)
        })
        .collect();

    scored.sort_by(|(a, a_date), (b, b_date)| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| match (a_date.as_str(), b_date.as_str()) {
                (Some(x), Some(y)) => y.cmp(x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| {
                let a_id = field(a.doc, "_id").as_str().unwrap_or_default();
                let b_id = field(b.doc, "_id").as_str().unwrap_or_default();
                a_id.cmp(b_id)
            })
    });

    scored.into_iter().map(|(s, _)| s).collect()
}

/// Run a search and return up to `limit` hits.
pub fn search(dataset: &Dataset, term: &str, limit: usize) -> Vec<Value> {
    let ranked = rank(dataset, term);
    tracing::debug!(term, matches = ranked.len(), limit, "search ranked");
    ranked.into_iter().take(limit).map(|s| hit(s.doc)).collect()
}
