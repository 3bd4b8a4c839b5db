//! Document schemas as data.
//!
//! Each content type is described by a [`DocumentSchema`]: an ordered list
//! of [`FieldDescriptor`]s plus the editor's list orderings. Conditional
//! fields carry a visibility predicate evaluated on the whole document, so
//! a grant number is only checked on grant and award CV entries.
//!
//! [`validate_document`] runs every visible field's rules against a raw
//! JSON document and collects the issues; it is what `folio check` uses to
//! audit an export before it is served.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::collections::Direction;
use crate::format::parse_date;
use crate::text::{slugify, DEFAULT_SLUG_MAX_LENGTH};
use crate::validation::{doi_validator, email_validator, publication_year_validator};

/// Storage type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Text,
    Slug,
    Number,
    Boolean,
    Date,
    Datetime,
    Url,
    Image,
    File,
    Reference,
    Array,
    /// Rich content (an array of typed blocks).
    Blocks,
}

/// Extra format rule on top of the storage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldFormat {
    Email,
    Doi,
    Year,
}

type VisibleWhen = fn(&Value) -> bool;

#[derive(Debug, Clone, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Minimum length (strings, arrays) or value (numbers).
    pub min: Option<f64>,
    /// Maximum length (strings, arrays) or value (numbers).
    pub max: Option<f64>,
    pub options: &'static [&'static str],
    pub format: Option<FieldFormat>,
    #[serde(skip)]
    pub visible_when: Option<VisibleWhen>,
}

impl FieldDescriptor {
    pub fn new(name: &'static str, title: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            title,
            kind,
            required: false,
            min: None,
            max: None,
            options: &[],
            format: None,
            visible_when: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn options(mut self, options: &'static [&'static str]) -> Self {
        self.options = options;
        self
    }

    pub fn format(mut self, format: FieldFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn visible_when(mut self, predicate: VisibleWhen) -> Self {
        self.visible_when = Some(predicate);
        self
    }

    /// Whether the field is shown (and validated) for `doc`.
    pub fn is_visible(&self, doc: &Value) -> bool {
        self.visible_when.map_or(true, |p| p(doc))
    }
}

/// A named list ordering offered in the editor.
#[derive(Debug, Clone, Serialize)]
pub struct ListOrdering {
    pub name: &'static str,
    pub title: &'static str,
    /// `(field, direction)` keys, most significant first.
    pub by: &'static [(&'static str, Direction)],
}

impl ListOrdering {
    /// Stable sort of raw documents by this ordering's keys.
    ///
    /// Missing and `null` keys sort last in either direction. Strings
    /// compare lexicographically, numbers numerically; mismatched types
    /// compare equal.
    pub fn sort(&self, docs: &mut [&Value]) {
        docs.sort_by(|a, b| {
            self.by
                .iter()
                .map(|&(field, direction)| compare_key(a.get(field), b.get(field), direction))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        });
    }
}

fn compare_key(a: Option<&Value>, b: Option<&Value>, direction: Direction) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ord = match (a, b) {
                (Value::String(x), Value::String(y)) => x.cmp(y),
                (Value::Number(x), Value::Number(y)) => x
                    .as_f64()
                    .partial_cmp(&y.as_f64())
                    .unwrap_or(Ordering::Equal),
                (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
                _ => Ordering::Equal,
            };
            match direction {
                Direction::Asc => ord,
                Direction::Desc => ord.reverse(),
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentSchema {
    pub name: &'static str,
    pub title: &'static str,
    /// Exactly one document of this type exists.
    pub singleton: bool,
    pub fields: Vec<FieldDescriptor>,
    pub orderings: Vec<ListOrdering>,
}

impl DocumentSchema {
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn ordering(&self, name: &str) -> Option<&ListOrdering> {
        self.orderings.iter().find(|o| o.name == name)
    }

    /// The field editors see as a document's title (the first field).
    pub fn title_field(&self) -> Option<&'static str> {
        self.fields.first().map(|f| f.name)
    }
}

/// One validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

const RESEARCH_STATUSES: &[&str] = &["planning", "active", "on-hold", "completed", "published"];
const PUBLICATION_TYPES: &[&str] = &[
    "journal-article",
    "conference-paper",
    "book",
    "book-chapter",
    "preprint",
    "thesis",
    "technical-report",
    "working-paper",
    "review-article",
    "editorial",
];
const PUBLICATION_STATUSES: &[&str] = &[
    "draft",
    "submitted",
    "under-review",
    "accepted",
    "published",
    "in-press",
];
const POST_STATUSES: &[&str] = &["draft", "published", "archived"];
const CV_CATEGORIES: &[&str] = &[
    "education",
    "positions",
    "awards",
    "grants",
    "service",
    "editorial",
    "presentations",
    "teaching",
    "memberships",
    "other",
];
const DEGREE_TYPES: &[&str] = &["phd", "masters", "bachelors", "postdoc", "certificate", "other"];
const COURSE_LEVELS: &[&str] = &[
    "undergrad-intro",
    "undergrad-intermediate",
    "undergrad-advanced",
    "graduate-masters",
    "graduate-doctoral",
    "graduate-advanced",
];
const AREA_COLORS: &[&str] = &["blue", "green", "purple", "red", "orange", "teal", "gray"];

fn str_field<'a>(doc: &'a Value, name: &str) -> &'a str {
    doc.get(name).and_then(Value::as_str).unwrap_or_default()
}

fn is_grant_or_award(doc: &Value) -> bool {
    matches!(str_field(doc, "category"), "grants" | "awards")
}

fn is_grant(doc: &Value) -> bool {
    str_field(doc, "category") == "grants"
}

fn is_education(doc: &Value) -> bool {
    str_field(doc, "category") == "education"
}

fn is_book(doc: &Value) -> bool {
    matches!(str_field(doc, "type"), "book" | "book-chapter")
}

fn is_finished(doc: &Value) -> bool {
    matches!(str_field(doc, "status"), "completed" | "published")
}

fn is_unfinished(doc: &Value) -> bool {
    !is_finished(doc)
}

fn slug() -> FieldDescriptor {
    FieldDescriptor::new("slug", "Slug", FieldKind::Slug).required()
}

use FieldDescriptor as F;
use FieldKind as K;

pub fn professor_schema() -> DocumentSchema {
    DocumentSchema {
        name: "professor",
        title: "Professor Profile",
        singleton: true,
        fields: vec![
            F::new("fullName", "Full Name", K::String).required().min(2.0).max(100.0),
            F::new("displayName", "Display Name", K::String),
            F::new("titles", "Academic Titles", K::Array),
            F::new("profileImage", "Profile Image", K::Image),
            F::new("shortBio", "Short Biography", K::Text).max(300.0),
            F::new("fullBio", "Full Biography", K::Blocks),
            F::new("currentPosition", "Current Position", K::String),
            F::new("department", "Department", K::String),
            F::new("institution", "Institution", K::String),
            F::new("officeLocation", "Office Location", K::String),
            F::new("email", "Email Address", K::String).format(FieldFormat::Email),
            F::new("phone", "Phone Number", K::String),
            F::new("officeHours", "Office Hours", K::Text),
            F::new("socialLinks", "Social & Academic Links", K::Array),
            F::new("primaryResearchAreas", "Primary Research Areas", K::Array),
            F::new("cvFile", "CV File", K::File),
        ],
        orderings: Vec::new(),
    }
}

pub fn research_area_schema() -> DocumentSchema {
    DocumentSchema {
        name: "researchArea",
        title: "Research Area",
        singleton: false,
        fields: vec![
            F::new("name", "Research Area Name", K::String).required().min(2.0).max(100.0),
            slug(),
            F::new("description", "Description", K::Text),
            F::new("parentArea", "Parent Research Area", K::Reference),
            F::new("mscClassification", "MSC Classification", K::String),
            F::new("color", "Color", K::String).options(AREA_COLORS),
        ],
        orderings: vec![
            ListOrdering {
                name: "nameAsc",
                title: "Name A-Z",
                by: &[("name", Direction::Asc)],
            },
            ListOrdering {
                name: "nameDesc",
                title: "Name Z-A",
                by: &[("name", Direction::Desc)],
            },
        ],
    }
}

pub fn research_schema() -> DocumentSchema {
    DocumentSchema {
        name: "research",
        title: "Research Project",
        singleton: false,
        fields: vec![
            F::new("title", "Research Title", K::String).required().min(5.0).max(200.0),
            slug(),
            F::new("abstract", "Abstract", K::Text).required().min(50.0),
            F::new("description", "Detailed Description", K::Blocks),
            F::new("researchAreas", "Research Areas", K::Array).required().min(1.0),
            F::new("status", "Project Status", K::String)
                .required()
                .options(RESEARCH_STATUSES),
            F::new("startDate", "Start Date", K::Date),
            F::new("expectedCompletion", "Expected Completion", K::Date)
                .visible_when(is_unfinished),
            F::new("completionDate", "Completion Date", K::Date).visible_when(is_finished),
            F::new("collaborators", "Collaborators", K::Array),
            F::new("fundingSource", "Funding Source", K::String),
            F::new("grantNumber", "Grant Number", K::String),
            F::new("relatedPublications", "Related Publications", K::Array),
            F::new("keywords", "Keywords", K::Array),
            F::new("featured", "Featured Research", K::Boolean),
        ],
        orderings: vec![
            ListOrdering {
                name: "startDateDesc",
                title: "Most Recent",
                by: &[("startDate", Direction::Desc)],
            },
            ListOrdering {
                name: "titleAsc",
                title: "Title A-Z",
                by: &[("title", Direction::Asc)],
            },
        ],
    }
}

pub fn publication_schema() -> DocumentSchema {
    DocumentSchema {
        name: "publication",
        title: "Publication",
        singleton: false,
        fields: vec![
            F::new("title", "Title", K::String).required().min(5.0).max(300.0),
            slug(),
            F::new("type", "Publication Type", K::String)
                .required()
                .options(PUBLICATION_TYPES),
            F::new("authors", "Authors", K::Array).required().min(1.0),
            F::new("abstract", "Abstract", K::Text),
            F::new("venue", "Venue", K::String),
            F::new("volume", "Volume", K::String),
            F::new("issue", "Issue", K::String),
            F::new("pages", "Pages", K::String),
            F::new("publishedDate", "Publication Date", K::Date),
            F::new("year", "Year", K::Number).format(FieldFormat::Year),
            F::new("doi", "DOI", K::String).format(FieldFormat::Doi),
            F::new("isbn", "ISBN", K::String).visible_when(is_book),
            F::new("arxivId", "arXiv ID", K::String),
            F::new("status", "Publication Status", K::String)
                .required()
                .options(PUBLICATION_STATUSES),
            F::new("pdfFile", "PDF File", K::File),
            F::new("externalLinks", "External Links", K::Array),
            F::new("researchAreas", "Research Areas", K::Array),
            F::new("keywords", "Keywords", K::Array),
            F::new("relatedResearch", "Related Research Projects", K::Array),
            F::new("citationCount", "Citation Count", K::Number).min(0.0),
            F::new("featured", "Featured Publication", K::Boolean),
        ],
        orderings: vec![
            ListOrdering {
                name: "yearDesc",
                title: "Most Recent",
                by: &[("year", Direction::Desc)],
            },
            ListOrdering {
                name: "titleAsc",
                title: "Title A-Z",
                by: &[("title", Direction::Asc)],
            },
            ListOrdering {
                name: "type",
                title: "Type",
                by: &[("type", Direction::Asc)],
            },
        ],
    }
}

pub fn blog_post_schema() -> DocumentSchema {
    DocumentSchema {
        name: "blogPost",
        title: "Blog Post",
        singleton: false,
        fields: vec![
            F::new("title", "Title", K::String).required().min(5.0).max(100.0),
            slug(),
            F::new("excerpt", "Excerpt", K::Text).max(300.0),
            F::new("featuredImage", "Featured Image", K::Image),
            F::new("content", "Content", K::Blocks).required(),
            F::new("publishedAt", "Published At", K::Datetime),
            F::new("status", "Status", K::String).required().options(POST_STATUSES),
            F::new("categories", "Categories", K::Array),
            F::new("tags", "Tags", K::Array),
            F::new("relatedPosts", "Related Posts", K::Array).max(3.0),
            F::new("relatedResearch", "Related Research", K::Array),
            F::new("seoTitle", "SEO Title", K::String).max(60.0),
            F::new("seoDescription", "SEO Description", K::Text).max(160.0),
            F::new("seoKeywords", "SEO Keywords", K::Array),
        ],
        orderings: vec![
            ListOrdering {
                name: "publishedAtDesc",
                title: "Published Date (Newest)",
                by: &[("publishedAt", Direction::Desc)],
            },
            ListOrdering {
                name: "titleAsc",
                title: "Title A-Z",
                by: &[("title", Direction::Asc)],
            },
        ],
    }
}

pub fn cv_entry_schema() -> DocumentSchema {
    DocumentSchema {
        name: "cvEntry",
        title: "CV Entry",
        singleton: false,
        fields: vec![
            F::new("title", "Title", K::String).required().min(3.0).max(200.0),
            F::new("category", "Category", K::String)
                .required()
                .options(CV_CATEGORIES),
            F::new("institution", "Institution/Organization", K::String),
            F::new("location", "Location", K::String),
            F::new("startDate", "Start Date", K::Date),
            F::new("endDate", "End Date", K::Date),
            F::new("isCurrent", "Current Position", K::Boolean),
            F::new("description", "Description", K::Blocks),
            F::new("details", "Additional Details", K::Array),
            F::new("amount", "Amount", K::String).visible_when(is_grant_or_award),
            F::new("grantNumber", "Grant Number", K::String).visible_when(is_grant_or_award),
            F::new("coInvestigators", "Co-Investigators", K::Array).visible_when(is_grant),
            F::new("degreeType", "Degree Type", K::String)
                .options(DEGREE_TYPES)
                .visible_when(is_education),
            F::new("fieldOfStudy", "Field of Study", K::String).visible_when(is_education),
            F::new("thesisTitle", "Thesis Title", K::String).visible_when(is_education),
            F::new("advisor", "Advisor", K::String).visible_when(is_education),
            F::new("url", "URL", K::Url),
            F::new("sortOrder", "Sort Order", K::Number),
            F::new("isHidden", "Hide from Public CV", K::Boolean),
            F::new("tags", "Tags", K::Array),
        ],
        orderings: vec![
            ListOrdering {
                name: "category",
                title: "Category",
                by: &[("category", Direction::Asc), ("startDate", Direction::Desc)],
            },
            ListOrdering {
                name: "sortOrder",
                title: "Custom Sort Order",
                by: &[
                    ("category", Direction::Asc),
                    ("sortOrder", Direction::Asc),
                    ("startDate", Direction::Desc),
                ],
            },
            ListOrdering {
                name: "titleAsc",
                title: "Title A-Z",
                by: &[("title", Direction::Asc)],
            },
        ],
    }
}

pub fn course_schema() -> DocumentSchema {
    DocumentSchema {
        name: "course",
        title: "Course",
        singleton: false,
        fields: vec![
            F::new("title", "Course Title", K::String).required().min(3.0).max(200.0),
            F::new("courseNumber", "Course Number", K::String),
            slug(),
            F::new("level", "Course Level", K::String).options(COURSE_LEVELS),
            F::new("credits", "Credit Hours", K::Number).min(0.0).max(20.0),
            F::new("description", "Course Description", K::Text),
            F::new("prerequisites", "Prerequisites", K::Array),
            F::new("learningObjectives", "Learning Objectives", K::Blocks),
            F::new("topics", "Course Topics", K::Array),
            F::new("textbooks", "Textbooks & Materials", K::Array),
            F::new("semesters", "Semesters Taught", K::Array),
            F::new("gradingStructure", "Grading Structure", K::Array),
            F::new("researchAreas", "Related Research Areas", K::Array),
            F::new("courseWebsite", "Course Website", K::Url),
            F::new("isCurrentlyTeaching", "Currently Teaching", K::Boolean),
            F::new("notes", "Teaching Notes", K::Text),
        ],
        orderings: vec![
            ListOrdering {
                name: "courseNumber",
                title: "Course Number",
                by: &[("courseNumber", Direction::Asc)],
            },
            ListOrdering {
                name: "titleAsc",
                title: "Title A-Z",
                by: &[("title", Direction::Asc)],
            },
        ],
    }
}

/// Every document schema.
pub fn all_schemas() -> Vec<DocumentSchema> {
    vec![
        professor_schema(),
        research_area_schema(),
        research_schema(),
        publication_schema(),
        blog_post_schema(),
        cv_entry_schema(),
        course_schema(),
    ]
}

pub fn schema_for(type_name: &str) -> Option<DocumentSchema> {
    all_schemas().into_iter().find(|s| s.name == type_name)
}

fn kind_matches(kind: FieldKind, value: &Value) -> bool {
    match kind {
        K::String | K::Text | K::Url | K::Date | K::Datetime => value.is_string(),
        K::Number => value.is_number(),
        K::Boolean => value.is_boolean(),
        K::Array | K::Blocks => value.is_array(),
        K::Slug | K::Image | K::File => value.is_object(),
        K::Reference => value.get("_ref").is_some_and(Value::is_string),
    }
}

fn measure(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Array(items) => Some(items.len() as f64),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

fn check_field(field: &FieldDescriptor, value: &Value) -> Option<String> {
    if !kind_matches(field.kind, value) {
        return Some(format!("expected {:?}", field.kind).to_lowercase());
    }

    if let Some(m) = measure(value) {
        let what = if value.is_number() { "value" } else { "length" };
        if let Some(min) = field.min {
            if m < min {
                return Some(format!("{} must be at least {}", what, min));
            }
        }
        if let Some(max) = field.max {
            if m > max {
                return Some(format!("{} must be at most {}", what, max));
            }
        }
    }

    if !field.options.is_empty() {
        if let Some(s) = value.as_str() {
            if !field.options.contains(&s) {
                return Some(format!("'{}' is not one of {}", s, field.options.join(", ")));
            }
        }
    }

    match field.kind {
        K::Date | K::Datetime => {
            if value.as_str().and_then(parse_date).is_none() {
                return Some("not a valid date".to_string());
            }
        }
        K::Url => {
            let url = value.as_str().unwrap_or_default();
            if !(url.starts_with("http://") || url.starts_with("https://") || url.starts_with("mailto:")) {
                return Some("not a valid URL".to_string());
            }
        }
        K::Slug => {
            let current = value.get("current").and_then(Value::as_str).unwrap_or_default();
            if current.is_empty() {
                return Some("slug is empty".to_string());
            }
            if current.chars().count() > DEFAULT_SLUG_MAX_LENGTH || slugify(current) != current {
                return Some(format!("'{}' is not a normalized slug", current));
            }
        }
        _ => {}
    }

    let format_result = match (field.format, value) {
        (Some(FieldFormat::Email), Value::String(s)) => email_validator().check(s),
        (Some(FieldFormat::Doi), Value::String(s)) => doi_validator().check(s),
        (Some(FieldFormat::Year), Value::Number(n)) => match n.as_i64() {
            Some(year) => publication_year_validator().check(&year),
            None => return Some("year must be a whole number".to_string()),
        },
        _ => Ok(()),
    };
    format_result.err().map(|e| e.message)
}

/// Validate a raw document against its schema, skipping hidden fields.
pub fn validate_document(schema: &DocumentSchema, doc: &Value) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    for field in &schema.fields {
        if !field.is_visible(doc) {
            continue;
        }
        match doc.get(field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    issues.push(FieldIssue {
                        field: field.name,
                        message: format!("{} is required", field.title),
                    });
                }
            }
            Some(value) => {
                if let Some(message) = check_field(field, value) {
                    issues.push(FieldIssue {
                        field: field.name,
                        message,
                    });
                }
            }
        }
    }
    issues
}
