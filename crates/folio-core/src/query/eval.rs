//! Native evaluation of query contracts over a [`Dataset`].
//!
//! Each contract is implemented as filter → order → slice → project, with
//! reference fields expanded through [`Dataset::get`]. The output matches
//! what the hosted store returns for the contract's query text:
//!
//! - missing scalar fields project as `null`;
//! - broken references inside arrays are dropped, a broken single reference is `null`;
//! - `null` sort keys order after every value in both directions;
//! - ties keep document id order.

use std::borrow::Borrow;
use std::cmp::Ordering;

use anyhow::Result;
use serde_json::{Map, Value};

use super::{QueryContract, QueryKind, QueryParams};
use crate::collections::Direction;
use crate::search;
use crate::store::{Dataset, SingletonSlot};

static NULL: Value = Value::Null;

const FEATURED_STATUSES: [&str; 3] = ["active", "completed", "published"];
const FEATURED_LIMIT: usize = 3;
const RECENT_PUBLICATIONS_LIMIT: usize = 5;
const RECENT_POSTS_LIMIT: usize = 3;

/// Run `contract` over `dataset`.
///
/// Parameters are checked against the contract first; a by-slug contract
/// with no matching document yields `null`.
pub fn evaluate(dataset: &Dataset, contract: &QueryContract, params: &QueryParams) -> Result<Value> {
    params.bind(contract)?;
    let slug = params.get_str("slug").unwrap_or_default();

    let value = match contract.kind {
        QueryKind::Professor => dataset
            .singleton(SingletonSlot::Professor)
            .map(|doc| professor(dataset, doc))
            .unwrap_or(Value::Null),
        QueryKind::FeaturedResearch => {
            let mut docs: Vec<&Value> = dataset
                .of_type("research")
                .filter(|d| field(d, "featured").as_bool() == Some(true))
                .filter(|d| {
                    field(d, "status")
                        .as_str()
                        .is_some_and(|s| FEATURED_STATUSES.contains(&s))
                })
                .collect();
            order_by(&mut docs, &[("startDate", Direction::Desc)]);
            list(docs, FEATURED_LIMIT, |d| featured_research(dataset, d))
        }
        QueryKind::RecentPublications => {
            let mut docs = published(dataset, "publication");
            order_by(
                &mut docs,
                &[("year", Direction::Desc), ("publishedDate", Direction::Desc)],
            );
            list(docs, RECENT_PUBLICATIONS_LIMIT, |d| {
                recent_publication(dataset, d)
            })
        }
        QueryKind::RecentBlogPosts => {
            let mut docs = published(dataset, "blogPost");
            order_by(&mut docs, &[("publishedAt", Direction::Desc)]);
            list(docs, RECENT_POSTS_LIMIT, |d| recent_blog_post(dataset, d))
        }
        QueryKind::CurrentCourses => {
            let mut docs: Vec<&Value> = dataset
                .of_type("course")
                .filter(|d| field(d, "isCurrentlyTeaching").as_bool() == Some(true))
                .collect();
            order_by(&mut docs, &[("courseNumber", Direction::Asc)]);
            list(docs, usize::MAX, current_course)
        }
        QueryKind::ResearchAreas => {
            let mut docs: Vec<&Value> = dataset.of_type("researchArea").collect();
            order_by(&mut docs, &[("name", Direction::Asc)]);
            list(docs, usize::MAX, |d| research_area(dataset, d))
        }
        QueryKind::ResearchProject => by_slug(dataset, "research", slug)
            .map(|d| research_project(dataset, d))
            .unwrap_or(Value::Null),
        QueryKind::Publication => by_slug(dataset, "publication", slug)
            .map(|d| publication(dataset, d))
            .unwrap_or(Value::Null),
        QueryKind::BlogPost => by_slug(dataset, "blogPost", slug)
            .map(|d| blog_post(dataset, d))
            .unwrap_or(Value::Null),
        QueryKind::CvEntries => {
            let mut docs: Vec<&Value> = dataset
                .of_type("cvEntry")
                .filter(|d| field(d, "isHidden").as_bool() != Some(true))
                .collect();
            order_by(
                &mut docs,
                &[
                    ("category", Direction::Asc),
                    ("sortOrder", Direction::Asc),
                    ("startDate", Direction::Desc),
                ],
            );
            list(docs, usize::MAX, cv_entry)
        }
        QueryKind::Course => by_slug(dataset, "course", slug)
            .map(|d| course(dataset, d))
            .unwrap_or(Value::Null),
        QueryKind::Search => {
            let term = params.get_str("searchTerm").unwrap_or_default();
            Value::Array(search::search(dataset, term, search::SEARCH_LIMIT))
        }
    };
    Ok(value)
}

// ---------------------------------------------------------------------------
// Value helpers
// ---------------------------------------------------------------------------

/// Dotted-path lookup; missing segments yield `null`.
pub(crate) fn field<'a>(doc: &'a Value, path: &str) -> &'a Value {
    path.split('.')
        .try_fold(doc, |v, key| v.get(key))
        .unwrap_or(&NULL)
}

fn pick(doc: &Value, fields: &[&str]) -> Value {
    let mut out = Map::new();
    for &name in fields {
        out.insert(name.to_string(), field(doc, name).clone());
    }
    Value::Object(out)
}

/// [`pick`] for an optional embedded object: `null` stays `null`.
fn pick_object(value: &Value, fields: &[&str]) -> Value {
    if value.is_object() {
        pick(value, fields)
    } else {
        Value::Null
    }
}

fn pick_each(value: &Value, fields: &[&str]) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(|i| pick(i, fields)).collect()),
        _ => Value::Null,
    }
}

fn deref<'a>(dataset: &'a Dataset, value: &Value) -> Option<&'a Value> {
    let id = value.get("_ref")?.as_str()?;
    dataset.get(id)
}

fn deref_each(dataset: &Dataset, value: &Value, fields: &[&str]) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .filter_map(|i| deref(dataset, i))
                .map(|d| pick(d, fields))
                .collect(),
        ),
        _ => Value::Null,
    }
}

fn image_asset(dataset: &Dataset, reference: &Value) -> Value {
    match deref(dataset, reference) {
        Some(asset) => {
            let mut out = pick(asset, &["_id", "url"]);
            out["metadata"] = pick_object(field(asset, "metadata"), &["dimensions", "lqip"]);
            out
        }
        None => Value::Null,
    }
}

fn image(dataset: &Dataset, value: &Value, extra: &[&str]) -> Value {
    if !value.is_object() {
        return Value::Null;
    }
    let mut out = pick(value, extra);
    out["asset"] = image_asset(dataset, field(value, "asset"));
    out
}

fn file(dataset: &Dataset, value: &Value, asset_fields: &[&str]) -> Value {
    if !value.is_object() {
        return Value::Null;
    }
    let asset = deref(dataset, field(value, "asset"))
        .map(|a| pick(a, asset_fields))
        .unwrap_or(Value::Null);
    let mut out = Map::new();
    out.insert("asset".to_string(), asset);
    Value::Object(out)
}

/// Rich content with inline image assets expanded.
fn rich_content(dataset: &Dataset, value: &Value) -> Value {
    match value {
        Value::Array(blocks) => Value::Array(
            blocks
                .iter()
                .map(|block| {
                    if field(block, "_type").as_str() == Some("image") {
                        let mut out = block.clone();
                        out["asset"] = image_asset(dataset, field(block, "asset"));
                        out
                    } else {
                        block.clone()
                    }
                })
                .collect(),
        ),
        _ => Value::Null,
    }
}

/// Whether any `_ref` anywhere inside `value` points at `id`.
pub(crate) fn references(value: &Value, id: &str) -> bool {
    match value {
        Value::Object(map) => {
            map.get("_ref").and_then(Value::as_str) == Some(id)
                || map.values().any(|v| references(v, id))
        }
        Value::Array(items) => items.iter().any(|v| references(v, id)),
        _ => false,
    }
}

fn compare(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Bool(_) => 0,
            Value::Number(_) => 1,
            Value::String(_) => 2,
            Value::Array(_) => 3,
            Value::Object(_) => 4,
            Value::Null => 5,
        }
    }
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// Stable multi-key sort; `null` keys go last whatever the direction.
fn order_by<T: Borrow<Value>>(items: &mut [T], keys: &[(&str, Direction)]) {
    items.sort_by(|a, b| {
        let (a, b): (&Value, &Value) = (a.borrow(), b.borrow());
        for &(path, direction) in keys {
            let (x, y) = (field(a, path), field(b, path));
            let ord = match (x.is_null(), y.is_null()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => match direction {
                    Direction::Asc => compare(x, y),
                    Direction::Desc => compare(y, x),
                },
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
}

fn list<F>(docs: Vec<&Value>, limit: usize, project: F) -> Value
where
    F: Fn(&Value) -> Value,
{
    Value::Array(docs.into_iter().take(limit).map(project).collect())
}

fn published<'a>(dataset: &'a Dataset, type_name: &'a str) -> Vec<&'a Value> {
    dataset
        .of_type(type_name)
        .filter(|d| field(d, "status").as_str() == Some("published"))
        .collect()
}

fn by_slug<'a>(dataset: &'a Dataset, type_name: &'a str, slug: &str) -> Option<&'a Value> {
    dataset
        .of_type(type_name)
        .find(|d| field(d, "slug.current").as_str() == Some(slug))
}

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

const MEDIA_EXTRAS: &[&str] = &["alt", "hotspot", "crop"];

fn professor(dataset: &Dataset, doc: &Value) -> Value {
    let mut out = pick(
        doc,
        &[
            "_id",
            "fullName",
            "displayName",
            "titles",
            "shortBio",
            "currentPosition",
            "department",
            "institution",
            "officeLocation",
            "email",
            "phone",
            "officeHours",
        ],
    );
    out["profileImage"] = image(dataset, field(doc, "profileImage"), MEDIA_EXTRAS);
    out["fullBio"] = rich_content(dataset, field(doc, "fullBio"));
    out["socialLinks"] = pick_each(field(doc, "socialLinks"), &["platform", "url"]);
    out["primaryResearchAreas"] = deref_each(
        dataset,
        field(doc, "primaryResearchAreas"),
        &["_id", "name", "slug", "description", "color"],
    );
    out["cvFile"] = file(
        dataset,
        field(doc, "cvFile"),
        &["_id", "url", "originalFilename", "size"],
    );
    out
}

fn featured_research(dataset: &Dataset, doc: &Value) -> Value {
    let mut out = pick(doc, &["_id", "title", "slug", "abstract", "status", "startDate"]);
    out["researchAreas"] = deref_each(dataset, field(doc, "researchAreas"), &["name", "color"]);
    out["imageUrl"] = field(doc, "description")
        .as_array()
        .and_then(|blocks| {
            blocks
                .iter()
                .find(|b| field(b, "_type").as_str() == Some("image"))
        })
        .and_then(|b| deref(dataset, field(b, "asset")))
        .map(|asset| field(asset, "url").clone())
        .unwrap_or(Value::Null);
    out
}

fn recent_publication(dataset: &Dataset, doc: &Value) -> Value {
    let mut out = pick(
        doc,
        &[
            "_id", "title", "slug", "type", "venue", "year", "doi", "arxivId", "abstract",
        ],
    );
    out["authors"] = pick_each(field(doc, "authors"), &["name", "affiliation"]);
    out["researchAreas"] = deref_each(dataset, field(doc, "researchAreas"), &["name", "color"]);
    out
}

fn recent_blog_post(dataset: &Dataset, doc: &Value) -> Value {
    let mut out = pick(
        doc,
        &["_id", "title", "slug", "excerpt", "publishedAt", "categories", "tags"],
    );
    out["featuredImage"] = image(dataset, field(doc, "featuredImage"), &["alt"]);
    out
}

fn current_course(doc: &Value) -> Value {
    let mut out = pick(
        doc,
        &[
            "_id",
            "title",
            "courseNumber",
            "slug",
            "level",
            "credits",
            "description",
            "courseWebsite",
        ],
    );
    let mut semesters = match pick_each(field(doc, "semesters"), &["term", "year", "schedule", "location"]) {
        Value::Array(items) => items,
        _ => Vec::new(),
    };
    order_by(
        &mut semesters,
        &[("year", Direction::Desc), ("term", Direction::Desc)],
    );
    out["semesters"] = semesters.into_iter().next().unwrap_or(Value::Null);
    out
}

fn research_area(dataset: &Dataset, doc: &Value) -> Value {
    let mut out = pick(
        doc,
        &["_id", "name", "slug", "description", "color", "mscClassification"],
    );
    let id = field(doc, "_id").as_str().unwrap_or_default();
    let count = |type_name: &str| {
        dataset
            .of_type(type_name)
            .filter(|d| references(d, id))
            .count()
    };
    out["publicationCount"] = count("publication").into();
    out["researchCount"] = count("research").into();
    out
}

fn research_project(dataset: &Dataset, doc: &Value) -> Value {
    let mut out = pick(
        doc,
        &[
            "_id",
            "title",
            "slug",
            "abstract",
            "status",
            "startDate",
            "expectedCompletion",
            "completionDate",
            "fundingSource",
            "grantNumber",
            "keywords",
        ],
    );
    out["description"] = rich_content(dataset, field(doc, "description"));
    out["researchAreas"] = deref_each(
        dataset,
        field(doc, "researchAreas"),
        &["_id", "name", "slug", "color"],
    );
    out["collaborators"] = pick_each(
        field(doc, "collaborators"),
        &["name", "affiliation", "role", "email"],
    );
    out["relatedPublications"] = deref_each(
        dataset,
        field(doc, "relatedPublications"),
        &["_id", "title", "slug", "type", "year", "venue"],
    );
    out
}

fn publication(dataset: &Dataset, doc: &Value) -> Value {
    let mut out = pick(
        doc,
        &[
            "_id",
            "title",
            "slug",
            "type",
            "abstract",
            "venue",
            "volume",
            "issue",
            "pages",
            "publishedDate",
            "year",
            "doi",
            "isbn",
            "arxivId",
            "status",
            "keywords",
            "citationCount",
        ],
    );
    out["authors"] = pick_each(
        field(doc, "authors"),
        &["name", "affiliation", "isCorresponding", "orcid"],
    );
    out["pdfFile"] = file(
        dataset,
        field(doc, "pdfFile"),
        &["_id", "url", "originalFilename"],
    );
    out["externalLinks"] = pick_each(field(doc, "externalLinks"), &["label", "url"]);
    out["researchAreas"] = deref_each(
        dataset,
        field(doc, "researchAreas"),
        &["_id", "name", "slug", "color"],
    );
    out["relatedResearch"] = deref_each(
        dataset,
        field(doc, "relatedResearch"),
        &["_id", "title", "slug", "status"],
    );
    out
}

fn blog_post(dataset: &Dataset, doc: &Value) -> Value {
    let mut out = pick(
        doc,
        &[
            "_id",
            "title",
            "slug",
            "excerpt",
            "publishedAt",
            "status",
            "categories",
            "tags",
            "seoTitle",
            "seoDescription",
            "seoKeywords",
        ],
    );
    out["featuredImage"] = image(dataset, field(doc, "featuredImage"), &["alt", "caption"]);
    out["content"] = rich_content(dataset, field(doc, "content"));
    out["relatedPosts"] = deref_each(
        dataset,
        field(doc, "relatedPosts"),
        &["_id", "title", "slug", "excerpt", "publishedAt"],
    );
    out["relatedResearch"] = deref_each(
        dataset,
        field(doc, "relatedResearch"),
        &["_id", "title", "slug", "_type"],
    );
    out
}

fn cv_entry(doc: &Value) -> Value {
    let mut out = pick(
        doc,
        &[
            "_id",
            "title",
            "category",
            "institution",
            "location",
            "startDate",
            "endDate",
            "isCurrent",
            "description",
            "amount",
            "grantNumber",
            "coInvestigators",
            "degreeType",
            "fieldOfStudy",
            "thesisTitle",
            "advisor",
            "url",
            "tags",
        ],
    );
    out["details"] = pick_each(field(doc, "details"), &["label", "value"]);
    out
}

fn course(dataset: &Dataset, doc: &Value) -> Value {
    let mut out = pick(
        doc,
        &[
            "_id",
            "title",
            "courseNumber",
            "slug",
            "level",
            "credits",
            "description",
            "prerequisites",
            "learningObjectives",
            "courseWebsite",
            "isCurrentlyTeaching",
            "notes",
        ],
    );

    if let Value::Array(mut topics) =
        pick_each(field(doc, "topics"), &["title", "description", "weekNumber"])
    {
        order_by(&mut topics, &[("weekNumber", Direction::Asc)]);
        out["topics"] = Value::Array(topics);
    } else {
        out["topics"] = Value::Null;
    }

    out["textbooks"] = pick_each(
        field(doc, "textbooks"),
        &[
            "title",
            "authors",
            "edition",
            "publisher",
            "year",
            "isbn",
            "type",
            "url",
        ],
    );

    out["semesters"] = match field(doc, "semesters") {
        Value::Array(items) => {
            let mut semesters: Vec<Value> = items
                .iter()
                .map(|s| {
                    let mut sem = pick(s, &["term", "year", "enrollment", "schedule", "location"]);
                    sem["syllabusFile"] = file(
                        dataset,
                        field(s, "syllabusFile"),
                        &["_id", "url", "originalFilename"],
                    );
                    sem
                })
                .collect();
            order_by(
                &mut semesters,
                &[("year", Direction::Desc), ("term", Direction::Desc)],
            );
            Value::Array(semesters)
        }
        _ => Value::Null,
    };

    out["gradingStructure"] = pick_each(
        field(doc, "gradingStructure"),
        &["component", "percentage", "description"],
    );
    out["researchAreas"] = deref_each(
        dataset,
        field(doc, "researchAreas"),
        &["_id", "name", "color"],
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{
        BLOG_POST, COURSE, CURRENT_COURSES, CV_ENTRIES, FEATURED_RESEARCH, PROFESSOR,
        RECENT_PUBLICATIONS, RESEARCH_AREAS,
    };
    use serde_json::json;

    fn dataset(docs: Vec<Value>) -> Dataset {
        let mut ds = Dataset::new();
        for doc in docs {
            ds.insert(doc).unwrap();
        }
        ds
    }

    fn ids(value: &Value) -> Vec<&str> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["_id"].as_str().unwrap())
            .collect()
    }

    #[test]
    fn test_field_path() {
        let doc = json!({"slug": {"current": "knots"}});
        assert_eq!(field(&doc, "slug.current"), "knots");
        assert!(field(&doc, "slug.missing").is_null());
        assert!(field(&doc, "nope.current").is_null());
    }

    #[test]
    fn test_featured_research_filter_order_limit() {
        let ds = dataset(vec![
            json!({"_id": "r1", "_type": "research", "featured": true, "status": "active", "startDate": "2020-01-01"}),
            json!({"_id": "r2", "_type": "research", "featured": true, "status": "planning", "startDate": "2023-01-01"}),
            json!({"_id": "r3", "_type": "research", "featured": false, "status": "active", "startDate": "2023-01-01"}),
            json!({"_id": "r4", "_type": "research", "featured": true, "status": "completed", "startDate": "2022-01-01"}),
            json!({"_id": "r5", "_type": "research", "featured": true, "status": "published", "startDate": "2019-01-01"}),
            json!({"_id": "r6", "_type": "research", "featured": true, "status": "active", "startDate": "2021-01-01"}),
        ]);
        let result = evaluate(&ds, &FEATURED_RESEARCH, &QueryParams::new()).unwrap();
        assert_eq!(ids(&result), vec!["r4", "r6", "r1"]);
        assert!(result[0]["imageUrl"].is_null());
    }

    #[test]
    fn test_featured_research_image_url_from_first_inline_image() {
        let ds = dataset(vec![
            json!({"_id": "image-a-10x10-png", "_type": "sanity.imageAsset", "url": "https://cdn/a.png"}),
            json!({"_id": "r1", "_type": "research", "featured": true, "status": "active",
                   "description": [
                       {"_type": "block", "children": []},
                       {"_type": "image", "asset": {"_ref": "image-a-10x10-png"}}
                   ]}),
        ]);
        let result = evaluate(&ds, &FEATURED_RESEARCH, &QueryParams::new()).unwrap();
        assert_eq!(result[0]["imageUrl"], "https://cdn/a.png");
    }

    #[test]
    fn test_recent_publications_order() {
        let ds = dataset(vec![
            json!({"_id": "p1", "_type": "publication", "status": "published", "year": 2020, "publishedDate": "2020-03-01"}),
            json!({"_id": "p2", "_type": "publication", "status": "published", "year": 2021}),
            json!({"_id": "p3", "_type": "publication", "status": "draft", "year": 2024}),
            json!({"_id": "p4", "_type": "publication", "status": "published", "year": 2020, "publishedDate": "2020-09-01"}),
        ]);
        let result = evaluate(&ds, &RECENT_PUBLICATIONS, &QueryParams::new()).unwrap();
        assert_eq!(ids(&result), vec!["p2", "p4", "p1"]);
    }

    #[test]
    fn test_current_courses_latest_semester() {
        let ds = dataset(vec![json!({
            "_id": "c1", "_type": "course", "isCurrentlyTeaching": true, "courseNumber": "MATH 101",
            "semesters": [
                {"term": "spring", "year": 2023},
                {"term": "fall", "year": 2024},
                {"term": "spring", "year": 2024}
            ]
        })]);
        let result = evaluate(&ds, &CURRENT_COURSES, &QueryParams::new()).unwrap();
        assert_eq!(result[0]["semesters"]["year"], 2024);
        assert_eq!(result[0]["semesters"]["term"], "spring");
    }

    #[test]
    fn test_research_area_counts_use_references() {
        let ds = dataset(vec![
            json!({"_id": "a1", "_type": "researchArea", "name": "Topology"}),
            json!({"_id": "p1", "_type": "publication", "researchAreas": [{"_ref": "a1"}]}),
            json!({"_id": "p2", "_type": "publication", "researchAreas": []}),
            json!({"_id": "r1", "_type": "research", "researchAreas": [{"_ref": "a1"}]}),
        ]);
        let result = evaluate(&ds, &RESEARCH_AREAS, &QueryParams::new()).unwrap();
        assert_eq!(result[0]["publicationCount"], 1);
        assert_eq!(result[0]["researchCount"], 1);
    }

    #[test]
    fn test_cv_entries_hidden_and_order() {
        let ds = dataset(vec![
            json!({"_id": "e1", "_type": "cvEntry", "category": "grants", "sortOrder": 1}),
            json!({"_id": "e2", "_type": "cvEntry", "category": "awards", "sortOrder": 2, "startDate": "2019-01-01"}),
            json!({"_id": "e3", "_type": "cvEntry", "category": "awards", "sortOrder": 2, "startDate": "2021-01-01"}),
            json!({"_id": "e4", "_type": "cvEntry", "category": "awards", "isHidden": true}),
            json!({"_id": "e5", "_type": "cvEntry", "category": "awards", "sortOrder": 1}),
        ]);
        let result = evaluate(&ds, &CV_ENTRIES, &QueryParams::new()).unwrap();
        assert_eq!(ids(&result), vec!["e5", "e3", "e2", "e1"]);
    }

    #[test]
    fn test_by_slug_resolves_references_and_drops_broken_ones() {
        let ds = dataset(vec![
            json!({"_id": "a1", "_type": "researchArea", "name": "Topology", "color": "blue"}),
            json!({"_id": "b1", "_type": "blogPost", "title": "Knots", "slug": {"current": "knots"},
                   "relatedResearch": [{"_ref": "a1"}, {"_ref": "missing"}]}),
        ]);
        let params = QueryParams::new().with("slug", "knots");
        let post = evaluate(&ds, &BLOG_POST, &params).unwrap();
        assert_eq!(post["title"], "Knots");
        assert_eq!(post["relatedResearch"].as_array().unwrap().len(), 1);
        assert!(post["featuredImage"].is_null());
        assert!(post["seoTitle"].is_null());
    }

    #[test]
    fn test_course_sorts_topics_and_semesters() {
        let ds = dataset(vec![json!({
            "_id": "c1", "_type": "course", "slug": {"current": "math-101"},
            "topics": [{"title": "B", "weekNumber": 2}, {"title": "A", "weekNumber": 1}],
            "semesters": [{"term": "fall", "year": 2022}, {"term": "fall", "year": 2024}]
        })]);
        let params = QueryParams::new().with("slug", "math-101");
        let course = evaluate(&ds, &COURSE, &params).unwrap();
        assert_eq!(course["topics"][0]["title"], "A");
        assert_eq!(course["semesters"][0]["year"], 2024);
        assert!(course["semesters"][0]["syllabusFile"].is_null());
    }

    #[test]
    fn test_professor_singleton() {
        let empty = Dataset::new();
        assert!(evaluate(&empty, &PROFESSOR, &QueryParams::new())
            .unwrap()
            .is_null());

        let ds = dataset(vec![
            json!({"_id": "a1", "_type": "researchArea", "name": "Topology"}),
            json!({"_id": "professor-profile", "_type": "professor", "fullName": "Ada",
                   "primaryResearchAreas": [{"_ref": "a1"}]}),
        ]);
        let prof = evaluate(&ds, &PROFESSOR, &QueryParams::new()).unwrap();
        assert_eq!(prof["fullName"], "Ada");
        assert_eq!(prof["primaryResearchAreas"][0]["name"], "Topology");
    }

    #[test]
    fn test_params_are_checked() {
        let ds = Dataset::new();
        assert!(evaluate(&ds, &COURSE, &QueryParams::new()).is_err());
    }
}
