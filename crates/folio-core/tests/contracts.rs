//! Every query contract evaluated against the fixture export.

use folio_core::collections::group_by;
use folio_core::format::{format_citation, format_date_range, CitationStyle};
use folio_core::image::{ImageOptions, ImageSource, ImageUrlBuilder};
use folio_core::models::{CvCategory, ResearchStatus, Term};
use folio_core::query::{self, QueryParams};
use folio_core::schema::{schema_for, validate_document};
use folio_core::store::memory::InMemoryStore;
use folio_core::facade::QueryFacade;
use folio_core::store::{ContentClient, Dataset};
use pretty_assertions::assert_eq;

const FIXTURE: &str = include_str!("fixtures/portfolio.ndjson");

fn facade() -> QueryFacade<InMemoryStore> {
    QueryFacade::new(InMemoryStore::from_ndjson(FIXTURE).unwrap())
}

#[test]
fn fixture_loads_without_drafts() {
    let ds = Dataset::from_ndjson(FIXTURE).unwrap();
    assert_eq!(ds.drafts_skipped(), 1);
    assert_eq!(ds.len(), 21);
}

#[test]
fn fixture_documents_pass_their_schemas() {
    let ds = Dataset::from_ndjson(FIXTURE).unwrap();
    for doc in ds.iter() {
        let type_name = doc["_type"].as_str().unwrap();
        let Some(schema) = schema_for(type_name) else {
            continue;
        };
        let issues = validate_document(&schema, doc);
        assert!(issues.is_empty(), "{}: {:?}", doc["_id"], issues);
    }
}

#[tokio::test]
async fn every_contract_returns_its_declared_shape() {
    let store = InMemoryStore::from_ndjson(FIXTURE).unwrap();
    for contract in query::ALL {
        let mut params = QueryParams::new();
        for &name in contract.params {
            params.insert(name, "topology");
        }
        let result = store.fetch(contract, &params).await.unwrap();
        if contract.is_single() {
            assert!(result.is_object() || result.is_null(), "{}", contract.name);
        } else {
            assert!(result.is_array(), "{}", contract.name);
        }
    }
}

#[tokio::test]
async fn featured_research_excludes_planning_projects() {
    let projects = facade().featured_research().await.unwrap();
    let titles: Vec<&str> = projects.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Quantum Invariants of Knots", "Bounded Gaps Between Primes"]
    );
    assert_eq!(projects[0].status, Some(ResearchStatus::Active));
    assert!(projects[0]
        .image_url
        .as_deref()
        .is_some_and(|u| u.ends_with(".jpg")));
    assert_eq!(projects[0].research_areas[0].name, "Low-Dimensional Topology");
}

#[tokio::test]
async fn recent_publications_are_published_and_cite_cleanly() {
    let publications = facade().recent_publications().await.unwrap();
    let ids: Vec<&str> = publications.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["pub-khovanov", "pub-prime-gaps"]);
    assert_eq!(
        format_citation(&publications[0], CitationStyle::Apa),
        "Ada Lovelace, Charles Babbage (2023). Khovanov Homology and Braid Closures. Journal of Knot Theory."
    );
}

#[tokio::test]
async fn publication_detail_cites_with_pages() {
    let publication = facade()
        .publication("small-gaps-between-primes")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        format_citation(&publication, CitationStyle::Apa),
        "Ada Lovelace (2021). Small Gaps Between Primes. Annals of Number Theory. pp. 1-10."
    );
}

#[tokio::test]
async fn recent_blog_posts_newest_first() {
    let posts = facade().recent_blog_posts().await.unwrap();
    let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["post-teaching-topology", "post-conference"]);
}

#[tokio::test]
async fn blog_post_detail_keeps_rich_content() {
    let post = facade().blog_post("teaching-topology").await.unwrap().unwrap();
    assert_eq!(post.content.len(), 2);
    assert_eq!(
        folio_core::content::to_plain_text(&post.content),
        "A coffee cup is a donut.\n\n\\chi(T^2) = 0"
    );
    assert_eq!(post.related_research[0].title, "Quantum Invariants of Knots");
}

#[tokio::test]
async fn current_courses_carry_latest_semester() {
    let courses = facade().current_courses().await.unwrap();
    let numbers: Vec<&str> = courses
        .iter()
        .filter_map(|c| c.course_number.as_deref())
        .collect();
    assert_eq!(numbers, vec!["MATH 1010", "MATH 5210"]);
    let latest = courses[1].latest_semester.as_ref().unwrap();
    assert_eq!(latest.term, Some(Term::Fall));
    assert_eq!(latest.year, Some(2024));
}

#[tokio::test]
async fn course_detail_orders_topics_by_week() {
    let course = facade()
        .course("math-5210-algebraic-topology")
        .await
        .unwrap()
        .unwrap();
    let weeks: Vec<u32> = course.topics.iter().filter_map(|t| t.week_number).collect();
    assert_eq!(weeks, vec![1, 3, 7]);
    assert_eq!(course.semesters[0].label(), "Fall 2024");
    assert_eq!(
        folio_core::text::compose_slug(&[course.course_number.as_deref(), Some(&course.title)]),
        "math-5210-algebraic-topology"
    );
}

#[tokio::test]
async fn research_areas_count_references() {
    let areas = facade().research_areas().await.unwrap();
    let summary: Vec<(&str, Option<u64>, Option<u64>)> = areas
        .iter()
        .map(|a| (a.name.as_str(), a.publication_count, a.research_count))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Analytic Number Theory", Some(1), Some(1)),
            ("Low-Dimensional Topology", Some(2), Some(2)),
        ]
    );
}

#[tokio::test]
async fn cv_entries_group_by_category_without_hidden() {
    let entries = facade().cv_entries().await.unwrap();
    assert!(entries.iter().all(|e| e.id != "cv-hidden"));

    let groups = group_by(entries.iter(), |e| e.category.unwrap_or(CvCategory::Unknown));
    let education: Vec<&str> = groups[&CvCategory::Education]
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(education, vec!["cv-phd", "cv-bsc"]);

    let position = groups[&CvCategory::Positions][0];
    assert_eq!(
        format_date_range(
            position.start_date.as_deref(),
            position.end_date.as_deref(),
            position.is_current.unwrap_or(false)
        ),
        "2019-present"
    );
}

#[tokio::test]
async fn search_preview_and_date_follow_the_type() {
    let facade = facade();

    let hits = facade.search("derivatives").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "course-math-1010");
    assert_eq!(hits[0].date, None);
    assert_eq!(
        hits[0].preview.as_deref(),
        Some("Limits, derivatives, and integrals of one variable.")
    );

    let hits = facade.search("sieve").await.unwrap();
    let dates: Vec<(&str, Option<&str>)> = hits
        .iter()
        .map(|h| (h.id.as_str(), h.date.as_deref()))
        .collect();
    assert_eq!(
        dates,
        vec![
            ("research-prime-gaps", Some("2019-01-15")),
            ("pub-prime-gaps", Some("2021-01-01")),
        ]
    );
}

#[tokio::test]
async fn profile_image_resolves_to_cdn_url() {
    let profile = facade().professor().await.unwrap().unwrap();
    let source = profile.profile_image.map(ImageSource::Field);
    let builder = ImageUrlBuilder::new("acnnui6u", "production");
    let url = builder
        .resolve(source.as_ref(), &ImageOptions::default())
        .unwrap();
    assert_eq!(
        url,
        "https://cdn.sanity.io/images/acnnui6u/production/Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg?w=800&q=80&fm=webp&fit=fill"
    );
    assert_eq!(builder.resolve(None, &ImageOptions::default()), None);
}
