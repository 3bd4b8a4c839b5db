//! Read models for the portfolio's content types.
//!
//! These types describe what the query contracts return: documents with
//! references already expanded into the target's projection. A contract
//! that projects fewer fields simply leaves the others at their defaults,
//! so one struct per content type serves both list and detail queries.
//!
//! The store returns `null` for missing arrays and for projected fields the
//! document lacks; every `Vec` and plain `String` field accepts `null` as
//! empty via [`nullable`].

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::collections::{HasCurrentFlag, HasResearchAreas, HasStatus, HasYear};
use crate::content::ContentBlock;

/// Deserialize `null` as `T::default()`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
            /// A value this version does not know about.
            #[serde(other)]
            Unknown,
        }

        impl $name {
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                    Self::Unknown => "unknown",
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum!(
    /// Lifecycle of a research project.
    ResearchStatus {
        Planning => "planning",
        Active => "active",
        OnHold => "on-hold",
        Completed => "completed",
        Published => "published",
    }
);

string_enum!(
    PublicationType {
        JournalArticle => "journal-article",
        ConferencePaper => "conference-paper",
        Book => "book",
        BookChapter => "book-chapter",
        Preprint => "preprint",
        Thesis => "thesis",
        TechnicalReport => "technical-report",
        WorkingPaper => "working-paper",
        ReviewArticle => "review-article",
        Editorial => "editorial",
    }
);

string_enum!(
    /// Editorial pipeline of a publication, `draft` through `published`.
    PublicationStatus {
        Draft => "draft",
        Submitted => "submitted",
        UnderReview => "under-review",
        Accepted => "accepted",
        Published => "published",
        InPress => "in-press",
    }
);

string_enum!(
    PostStatus {
        Draft => "draft",
        Published => "published",
        Archived => "archived",
    }
);

string_enum!(
    /// CV section an entry belongs to.
    CvCategory {
        Education => "education",
        Positions => "positions",
        Awards => "awards",
        Grants => "grants",
        Service => "service",
        Editorial => "editorial",
        Presentations => "presentations",
        Teaching => "teaching",
        Memberships => "memberships",
        Other => "other",
    }
);

string_enum!(
    DegreeType {
        Phd => "phd",
        Masters => "masters",
        Bachelors => "bachelors",
        Postdoc => "postdoc",
        Certificate => "certificate",
        Other => "other",
    }
);

string_enum!(
    CourseLevel {
        UndergradIntro => "undergrad-intro",
        UndergradIntermediate => "undergrad-intermediate",
        UndergradAdvanced => "undergrad-advanced",
        GraduateMasters => "graduate-masters",
        GraduateDoctoral => "graduate-doctoral",
        GraduateAdvanced => "graduate-advanced",
    }
);

string_enum!(
    Term {
        Spring => "spring",
        Summer => "summer",
        Fall => "fall",
        Winter => "winter",
    }
);

string_enum!(
    /// Display color of a research area tag.
    AreaColor {
        Blue => "blue",
        Green => "green",
        Purple => "purple",
        Red => "red",
        Orange => "orange",
        Teal => "teal",
        Gray => "gray",
    }
);

string_enum!(
    CollaboratorRole {
        CoPi => "co-pi",
        Collaborator => "collaborator",
        GradStudent => "grad-student",
        Postdoc => "postdoc",
        ResearchAssistant => "research-assistant",
    }
);

string_enum!(
    /// Document types stored in the content platform.
    ContentType {
        Professor => "professor",
        ResearchArea => "researchArea",
        Research => "research",
        Publication => "publication",
        BlogPost => "blogPost",
        CvEntry => "cvEntry",
        Course => "course",
    }
);

impl CvCategory {
    /// Section heading shown on the CV page.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Education => "Education",
            Self::Positions => "Academic Positions",
            Self::Awards => "Awards & Honors",
            Self::Grants => "Grants & Funding",
            Self::Service => "Professional Service",
            Self::Editorial => "Editorial Activities",
            Self::Presentations => "Conference Presentations",
            Self::Teaching => "Teaching",
            Self::Memberships => "Memberships",
            Self::Other | Self::Unknown => "Other",
        }
    }
}

// ---------------------------------------------------------------------------
// Shared field shapes
// ---------------------------------------------------------------------------

/// Unresolved pointer to another document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "_ref")]
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slug {
    pub current: String,
}

impl Slug {
    pub fn as_str(&self) -> &str {
        &self.current
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub aspect_ratio: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    /// Low-quality image placeholder (base64 data URL).
    #[serde(default)]
    pub lqip: Option<String>,
}

/// An image asset, either as a raw `_ref` or expanded with its URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageAsset {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ImageMetadata>,
}

/// An image field with its editorial extras.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageField {
    #[serde(default)]
    pub asset: Option<ImageAsset>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotspot: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAsset {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub original_filename: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileField {
    #[serde(default)]
    pub asset: Option<FileAsset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalLink {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

// ---------------------------------------------------------------------------
// Content types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchArea {
    #[serde(rename = "_id", default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<AreaColor>,
    #[serde(default)]
    pub msc_classification: Option<String>,
    /// Computed by the taxonomy listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_count: Option<u64>,
    /// Computed by the taxonomy listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_count: Option<u64>,
}

impl AsRef<str> for ResearchArea {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

/// The singleton profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professor {
    #[serde(rename = "_id", default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub full_name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub titles: Vec<String>,
    #[serde(default)]
    pub profile_image: Option<ImageField>,
    #[serde(default)]
    pub short_bio: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub full_bio: Vec<ContentBlock>,
    #[serde(default)]
    pub current_position: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub office_location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub office_hours: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub social_links: Vec<SocialLink>,
    #[serde(default, deserialize_with = "nullable")]
    pub primary_research_areas: Vec<ResearchArea>,
    #[serde(default)]
    pub cv_file: Option<FileField>,
}

impl Professor {
    /// Name for headers: the display name when set, else the full name.
    pub fn header_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.full_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collaborator {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default)]
    pub affiliation: Option<String>,
    #[serde(default)]
    pub role: Option<CollaboratorRole>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A research project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Research {
    #[serde(rename = "_id", default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(rename = "abstract", default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Vec<ContentBlock>,
    #[serde(default)]
    pub status: Option<ResearchStatus>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub expected_completion: Option<String>,
    #[serde(default)]
    pub completion_date: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub research_areas: Vec<ResearchArea>,
    #[serde(default, deserialize_with = "nullable")]
    pub collaborators: Vec<Collaborator>,
    #[serde(default)]
    pub funding_source: Option<String>,
    #[serde(default)]
    pub grant_number: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub related_publications: Vec<Publication>,
    #[serde(default, deserialize_with = "nullable")]
    pub keywords: Vec<String>,
    /// First inline image of the description (featured listing only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default)]
    pub affiliation: Option<String>,
    #[serde(default)]
    pub is_corresponding: Option<bool>,
    #[serde(default)]
    pub orcid: Option<String>,
}

impl Author {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    #[serde(rename = "_id", default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(rename = "type", default)]
    pub kind: Option<PublicationType>,
    #[serde(default, deserialize_with = "nullable")]
    pub authors: Vec<Author>,
    #[serde(rename = "abstract", default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub issue: Option<String>,
    #[serde(default)]
    pub pages: Option<String>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub arxiv_id: Option<String>,
    #[serde(default)]
    pub status: Option<PublicationStatus>,
    #[serde(default)]
    pub pdf_file: Option<FileField>,
    #[serde(default, deserialize_with = "nullable")]
    pub external_links: Vec<ExternalLink>,
    #[serde(default, deserialize_with = "nullable")]
    pub research_areas: Vec<ResearchArea>,
    #[serde(default, deserialize_with = "nullable")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub related_research: Vec<Research>,
    #[serde(default)]
    pub citation_count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(rename = "_id", default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(rename = "_type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ContentType>,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub featured_image: Option<ImageField>,
    #[serde(default, deserialize_with = "nullable")]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub status: Option<PostStatus>,
    #[serde(default, deserialize_with = "nullable")]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub related_posts: Vec<BlogPost>,
    #[serde(default, deserialize_with = "nullable")]
    pub related_research: Vec<RelatedDocument>,
    #[serde(default)]
    pub seo_title: Option<String>,
    #[serde(default)]
    pub seo_description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub seo_keywords: Vec<String>,
}

/// A referenced document of any type, projected to its identity fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelatedDocument {
    #[serde(rename = "_id", default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(rename = "_type", default)]
    pub kind: Option<ContentType>,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default)]
    pub slug: Option<Slug>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Detail {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvEntry {
    #[serde(rename = "_id", default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default)]
    pub category: Option<CvCategory>,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_current: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Vec<ContentBlock>,
    #[serde(default, deserialize_with = "nullable")]
    pub details: Vec<Detail>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub grant_number: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub co_investigators: Vec<String>,
    #[serde(default)]
    pub degree_type: Option<DegreeType>,
    #[serde(default)]
    pub field_of_study: Option<String>,
    #[serde(default)]
    pub thesis_title: Option<String>,
    #[serde(default)]
    pub advisor: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub week_number: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Textbook {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default)]
    pub authors: Option<String>,
    #[serde(default)]
    pub edition: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// One offering of a course.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    #[serde(default)]
    pub term: Option<Term>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub enrollment: Option<u32>,
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub syllabus_file: Option<FileField>,
}

impl Semester {
    /// `Fall 2024`, with placeholders for missing parts.
    pub fn label(&self) -> String {
        let term = match self.term {
            Some(t) if t != Term::Unknown => {
                let s = t.as_str();
                let mut chars = s.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
            _ => "Unknown".to_string(),
        };
        match self.year {
            Some(y) => format!("{} {}", term, y),
            None => format!("{} Unknown Year", term),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradingComponent {
    #[serde(default, deserialize_with = "nullable")]
    pub component: String,
    #[serde(default)]
    pub percentage: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id", default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default)]
    pub course_number: Option<String>,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default)]
    pub level: Option<CourseLevel>,
    #[serde(default)]
    pub credits: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub prerequisites: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub learning_objectives: Vec<ContentBlock>,
    #[serde(default, deserialize_with = "nullable")]
    pub topics: Vec<Topic>,
    #[serde(default, deserialize_with = "nullable")]
    pub textbooks: Vec<Textbook>,
    #[serde(default, deserialize_with = "nullable")]
    pub semesters: Vec<Semester>,
    #[serde(default, deserialize_with = "nullable")]
    pub grading_structure: Vec<GradingComponent>,
    #[serde(default, deserialize_with = "nullable")]
    pub research_areas: Vec<ResearchArea>,
    #[serde(default)]
    pub course_website: Option<String>,
    #[serde(default)]
    pub is_currently_teaching: Option<bool>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A course in the "currently teaching" listing, carrying only its most
/// recent offering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentCourse {
    #[serde(rename = "_id", default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default)]
    pub course_number: Option<String>,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default)]
    pub level: Option<CourseLevel>,
    #[serde(default)]
    pub credits: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub course_website: Option<String>,
    #[serde(rename = "semesters", default)]
    pub latest_semester: Option<Semester>,
}

/// One row of the cross-type search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_type")]
    pub kind: ContentType,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default)]
    pub preview: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

// ---------------------------------------------------------------------------
// Collection trait impls
// ---------------------------------------------------------------------------

fn year_of(date: Option<&str>) -> Option<i32> {
    let date = date?;
    NaiveDate::parse_from_str(date.get(..10)?, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

impl HasStatus for Publication {
    fn status_str(&self) -> Option<&str> {
        self.status.map(PublicationStatus::as_str)
    }
}

impl HasStatus for Research {
    fn status_str(&self) -> Option<&str> {
        self.status.map(ResearchStatus::as_str)
    }
}

impl HasStatus for BlogPost {
    fn status_str(&self) -> Option<&str> {
        self.status.map(PostStatus::as_str)
    }
}

impl HasCurrentFlag for CvEntry {
    fn is_current(&self) -> bool {
        self.is_current.unwrap_or(false)
    }
}

impl HasCurrentFlag for Course {
    fn is_current(&self) -> bool {
        self.is_currently_teaching.unwrap_or(false)
    }
}

impl HasYear for Publication {
    fn year(&self) -> Option<i32> {
        self.year.or_else(|| year_of(self.published_date.as_deref()))
    }
}

impl HasYear for BlogPost {
    fn year(&self) -> Option<i32> {
        year_of(self.published_at.as_deref())
    }
}

impl HasResearchAreas for Publication {
    fn research_area_names(&self) -> Vec<&str> {
        self.research_areas.iter().map(|a| a.name.as_str()).collect()
    }
}

impl HasResearchAreas for Research {
    fn research_area_names(&self) -> Vec<&str> {
        self.research_areas.iter().map(|a| a.name.as_str()).collect()
    }
}

impl HasResearchAreas for Course {
    fn research_area_names(&self) -> Vec<&str> {
        self.research_areas.iter().map(|a| a.name.as_str()).collect()
    }
}
