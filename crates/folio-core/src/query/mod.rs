//! Named, parameterized read-only queries.
//!
//! Each [`QueryContract`] fixes a filter, an ordering, a page size and an
//! output projection. The `groq` text is what the hosted store executes;
//! [`eval`] implements the same contracts natively over a
//! [`Dataset`](crate::store::Dataset) so that both backends return the same
//! shapes. References are always resolved to their target projection.
//!
//! | Contract | Params | Result |
//! |----------|--------|--------|
//! | `professor` | | object or `null` |
//! | `featuredResearch` | | up to 3 projects |
//! | `recentPublications` | | up to 5 publications |
//! | `recentBlogPosts` | | up to 3 posts |
//! | `currentCourses` | | courses with their latest semester |
//! | `researchAreas` | | areas with usage counts |
//! | `researchProject` | `slug` | object or `null` |
//! | `publication` | `slug` | object or `null` |
//! | `blogPost` | `slug` | object or `null` |
//! | `cvEntries` | | visible CV entries |
//! | `course` | `slug` | object or `null` |
//! | `search` | `searchTerm` | up to 20 hits |

pub mod eval;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Which contract a [`QueryContract`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryKind {
    Professor,
    FeaturedResearch,
    RecentPublications,
    RecentBlogPosts,
    CurrentCourses,
    ResearchAreas,
    ResearchProject,
    Publication,
    BlogPost,
    CvEntries,
    Course,
    Search,
}

/// A named query with its declared parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueryContract {
    pub kind: QueryKind,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    pub groq: &'static str,
    pub params: &'static [&'static str],
}

impl QueryContract {
    /// Whether the contract yields a single document (or `null`).
    pub fn is_single(&self) -> bool {
        matches!(
            self.kind,
            QueryKind::Professor
                | QueryKind::ResearchProject
                | QueryKind::Publication
                | QueryKind::BlogPost
                | QueryKind::Course
        )
    }
}

impl fmt::Display for QueryContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("query '{contract}' requires parameter '{param}'")]
    Missing {
        contract: &'static str,
        param: &'static str,
    },
    #[error("query '{contract}' does not declare parameter '{param}'")]
    Undeclared {
        contract: &'static str,
        param: String,
    },
    #[error("parameter '{param}' of query '{contract}' must be a string")]
    NotAString {
        contract: &'static str,
        param: &'static str,
    },
}

/// Query parameters, ordered by name so equal sets serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, Value>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check these parameters against a contract's declaration: every
    /// declared parameter present as a string, nothing undeclared.
    pub fn bind(&self, contract: &QueryContract) -> Result<(), ParamError> {
        if let Some(extra) = self.0.keys().find(|k| !contract.params.contains(&k.as_str())) {
            return Err(ParamError::Undeclared {
                contract: contract.name,
                param: extra.clone(),
            });
        }
        for &param in contract.params {
            match self.0.get(param) {
                None | Some(Value::Null) => {
                    return Err(ParamError::Missing {
                        contract: contract.name,
                        param,
                    })
                }
                Some(Value::String(_)) => {}
                Some(_) => {
                    return Err(ParamError::NotAString {
                        contract: contract.name,
                        param,
                    })
                }
            }
        }
        Ok(())
    }
}

impl From<BTreeMap<String, Value>> for QueryParams {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

pub const PROFESSOR: QueryContract = QueryContract {
    kind: QueryKind::Professor,
    name: "professor",
    description: "The professor profile singleton",
    groq: r#"*[_id == "professor-profile"][0]{
  _id, fullName, displayName, titles[],
  profileImage{ asset->{ _id, url, metadata{ dimensions, lqip } }, alt, hotspot, crop },
  shortBio,
  fullBio[]{ ..., _type == "block" => { ..., markDefs[]{ ..., _type == "link" => { ..., href } } } },
  currentPosition, department, institution, officeLocation, email, phone, officeHours,
  socialLinks[]{ platform, url },
  primaryResearchAreas[]->{ _id, name, slug, description, color },
  cvFile{ asset->{ _id, url, originalFilename, size } }
}"#,
    params: &[],
};

pub const FEATURED_RESEARCH: QueryContract = QueryContract {
    kind: QueryKind::FeaturedResearch,
    name: "featuredResearch",
    description: "Up to three featured projects that are active, completed or published",
    groq: r#"*[_type == "research" && featured == true && status in ["active", "completed", "published"]]
| order(startDate desc) [0...3]{
  _id, title, slug, abstract, status, startDate,
  researchAreas[]->{ name, color },
  "imageUrl": description[_type == "image"][0].asset->url
}"#,
    params: &[],
};

pub const RECENT_PUBLICATIONS: QueryContract = QueryContract {
    kind: QueryKind::RecentPublications,
    name: "recentPublications",
    description: "The five most recent published publications",
    groq: r#"*[_type == "publication" && status == "published"]
| order(year desc, publishedDate desc) [0...5]{
  _id, title, slug, authors[]{ name, affiliation }, type, venue, year, doi, arxivId, abstract,
  researchAreas[]->{ name, color }
}"#,
    params: &[],
};

pub const RECENT_BLOG_POSTS: QueryContract = QueryContract {
    kind: QueryKind::RecentBlogPosts,
    name: "recentBlogPosts",
    description: "The three most recent published blog posts",
    groq: r#"*[_type == "blogPost" && status == "published"]
| order(publishedAt desc) [0...3]{
  _id, title, slug, excerpt, publishedAt,
  featuredImage{ asset->{ _id, url, metadata{ dimensions, lqip } }, alt },
  categories[], tags[]
}"#,
    params: &[],
};

pub const CURRENT_COURSES: QueryContract = QueryContract {
    kind: QueryKind::CurrentCourses,
    name: "currentCourses",
    description: "Courses currently taught, each with its latest semester",
    groq: r#"*[_type == "course" && isCurrentlyTeaching == true]
| order(courseNumber asc){
  _id, title, courseNumber, slug, level, credits, description, courseWebsite,
  semesters[]{ term, year, schedule, location } | order(year desc, term desc)[0]
}"#,
    params: &[],
};

pub const RESEARCH_AREAS: QueryContract = QueryContract {
    kind: QueryKind::ResearchAreas,
    name: "researchAreas",
    description: "Research area taxonomy with publication and project counts",
    groq: r#"*[_type == "researchArea"]
| order(name asc){
  _id, name, slug, description, color, mscClassification,
  "publicationCount": count(*[_type == "publication" && references(^._id)]),
  "researchCount": count(*[_type == "research" && references(^._id)])
}"#,
    params: &[],
};

pub const RESEARCH_PROJECT: QueryContract = QueryContract {
    kind: QueryKind::ResearchProject,
    name: "researchProject",
    description: "One research project by slug",
    groq: r#"*[_type == "research" && slug.current == $slug][0]{
  _id, title, slug, abstract,
  description[]{ ..., _type == "image" => { ..., asset->{ _id, url, metadata{ dimensions, lqip } } } },
  status, startDate, expectedCompletion, completionDate,
  researchAreas[]->{ _id, name, slug, color },
  collaborators[]{ name, affiliation, role, email },
  fundingSource, grantNumber,
  relatedPublications[]->{ _id, title, slug, type, year, venue },
  keywords[]
}"#,
    params: &["slug"],
};

pub const PUBLICATION: QueryContract = QueryContract {
    kind: QueryKind::Publication,
    name: "publication",
    description: "One publication by slug",
    groq: r#"*[_type == "publication" && slug.current == $slug][0]{
  _id, title, slug, type, authors[]{ name, affiliation, isCorresponding, orcid },
  abstract, venue, volume, issue, pages, publishedDate, year, doi, isbn, arxivId, status,
  pdfFile{ asset->{ _id, url, originalFilename } },
  externalLinks[]{ label, url },
  researchAreas[]->{ _id, name, slug, color },
  keywords[],
  relatedResearch[]->{ _id, title, slug, status },
  citationCount
}"#,
    params: &["slug"],
};

pub const BLOG_POST: QueryContract = QueryContract {
    kind: QueryKind::BlogPost,
    name: "blogPost",
    description: "One blog post by slug",
    groq: r#"*[_type == "blogPost" && slug.current == $slug][0]{
  _id, title, slug, excerpt,
  featuredImage{ asset->{ _id, url, metadata{ dimensions, lqip } }, alt, caption },
  content[]{ ..., _type == "image" => { ..., asset->{ _id, url, metadata{ dimensions, lqip } } } },
  publishedAt, status, categories[], tags[],
  relatedPosts[]->{ _id, title, slug, excerpt, publishedAt },
  relatedResearch[]->{ _id, title, slug, _type },
  seoTitle, seoDescription, seoKeywords[]
}"#,
    params: &["slug"],
};

pub const CV_ENTRIES: QueryContract = QueryContract {
    kind: QueryKind::CvEntries,
    name: "cvEntries",
    description: "Visible CV entries ordered by category, sort order and start date",
    groq: r#"*[_type == "cvEntry" && isHidden != true]
| order(category asc, sortOrder asc, startDate desc){
  _id, title, category, institution, location, startDate, endDate, isCurrent,
  description[]{ ..., _type == "block" => { ..., markDefs[]{ ..., _type == "link" => { ..., href } } } },
  details[]{ label, value },
  amount, grantNumber, coInvestigators[], degreeType, fieldOfStudy, thesisTitle, advisor, url, tags[]
}"#,
    params: &[],
};

pub const COURSE: QueryContract = QueryContract {
    kind: QueryKind::Course,
    name: "course",
    description: "One course by slug",
    groq: r#"*[_type == "course" && slug.current == $slug][0]{
  _id, title, courseNumber, slug, level, credits, description, prerequisites[],
  learningObjectives[]{ ..., _type == "block" => { ... } },
  topics[]{ title, description, weekNumber } | order(weekNumber asc),
  textbooks[]{ title, authors, edition, publisher, year, isbn, type, url },
  semesters[]{ term, year, enrollment, schedule, location,
    syllabusFile{ asset->{ _id, url, originalFilename } } } | order(year desc, term desc),
  gradingStructure[]{ component, percentage, description },
  researchAreas[]->{ _id, name, color },
  courseWebsite, isCurrentlyTeaching, notes
}"#,
    params: &["slug"],
};

pub const SEARCH: QueryContract = QueryContract {
    kind: QueryKind::Search,
    name: "search",
    description: "Keyword search across projects, publications, posts and courses",
    groq: r#"*[_type in ["research", "publication", "blogPost", "course"] &&
  (title match $searchTerm + "*" ||
   abstract match $searchTerm + "*" ||
   pt::text(description) match $searchTerm + "*" ||
   description match $searchTerm + "*" ||
   excerpt match $searchTerm + "*" ||
   keywords[] match $searchTerm + "*")]
| score(
    boost(title match $searchTerm + "*", 3),
    boost(keywords[] match $searchTerm + "*", 2),
    abstract match $searchTerm + "*",
    description match $searchTerm + "*",
    excerpt match $searchTerm + "*")
| order(_score desc) [0...20]{
  _id, _type, title, slug,
  "preview": select(
    _type == "research" => abstract,
    _type == "publication" => abstract,
    _type == "blogPost" => excerpt,
    _type == "course" => description),
  "date": select(
    _type == "research" => startDate,
    _type == "publication" => coalesce(publishedDate, string(year) + "-01-01"),
    _type == "blogPost" => publishedAt,
    _type == "course" => null)
}"#,
    params: &["searchTerm"],
};

/// Every contract, in catalog order.
pub const ALL: &[QueryContract] = &[
    PROFESSOR,
    FEATURED_RESEARCH,
    RECENT_PUBLICATIONS,
    RECENT_BLOG_POSTS,
    CURRENT_COURSES,
    RESEARCH_AREAS,
    RESEARCH_PROJECT,
    PUBLICATION,
    BLOG_POST,
    CV_ENTRIES,
    COURSE,
    SEARCH,
];

/// Look up a contract by its name.
pub fn by_name(name: &str) -> Option<&'static QueryContract> {
    ALL.iter().find(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog_names_unique() {
        let mut names: Vec<&str> = ALL.iter().map(|c| c.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ALL.len());
        assert_eq!(by_name("cvEntries").map(|c| c.kind), Some(QueryKind::CvEntries));
        assert!(by_name("nope").is_none());
    }

    #[test]
    fn test_declared_params_appear_in_query_text() {
        for contract in ALL {
            for param in contract.params {
                assert!(
                    contract.groq.contains(&format!("${}", param)),
                    "{} does not use ${}",
                    contract.name,
                    param
                );
            }
        }
    }

    #[test]
    fn test_bind_checks_params() {
        assert!(QueryParams::new().bind(&CV_ENTRIES).is_ok());
        assert!(QueryParams::new().with("slug", "x").bind(&COURSE).is_ok());

        assert_eq!(
            QueryParams::new().bind(&COURSE),
            Err(ParamError::Missing {
                contract: "course",
                param: "slug"
            })
        );
        assert!(matches!(
            QueryParams::new().with("slug", "x").bind(&CV_ENTRIES),
            Err(ParamError::Undeclared { .. })
        ));
        assert!(matches!(
            QueryParams::new().with("slug", json!(3)).bind(&COURSE),
            Err(ParamError::NotAString { .. })
        ));
    }

    #[test]
    fn test_params_serialize_in_key_order() {
        let a = QueryParams::new().with("b", 1).with("a", 2);
        let b = QueryParams::new().with("a", 2).with("b", 1);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
