//! `folio search`: cross-type keyword search.

use anyhow::Result;
use folio_core::facade::QueryFacade;
use folio_core::format::{format_date, preview_subtitle};

use crate::client::create_client;
use crate::config::Config;

pub async fn run_search(config: &Config, term: &str) -> Result<()> {
    if term.trim().is_empty() {
        println!("No results.");
        return Ok(());
    }

    let facade = QueryFacade::new(create_client(config)?);
    let hits = facade.search(term).await?;

    if hits.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, hit) in hits.iter().enumerate() {
        let slug = hit.slug.as_ref().map(|s| s.as_str()).unwrap_or("-");
        let date = hit.date.as_deref().map(format_date).unwrap_or_default();
        println!(
            "{}. [{}] {} ({})",
            i + 1,
            hit.kind,
            hit.title.as_deref().unwrap_or("Untitled"),
            slug
        );
        if !date.is_empty() {
            println!("    date: {}", date);
        }
        if let Some(preview) = preview_subtitle(hit.preview.as_deref()) {
            println!("    {}", preview);
        }
    }

    Ok(())
}
