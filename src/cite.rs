//! `folio cite`: format a publication citation.

use anyhow::{bail, Result};
use folio_core::facade::QueryFacade;
use folio_core::format::{format_citation, CitationStyle};

use crate::client::create_client;
use crate::config::Config;

/// Fetch a publication by slug and return its citation.
pub async fn cite(config: &Config, slug: &str, style: CitationStyle) -> Result<String> {
    let facade = QueryFacade::new(create_client(config)?);
    match facade.publication(slug).await? {
        Some(publication) => Ok(format_citation(&publication, style)),
        None => bail!("publication not found: {}", slug),
    }
}

pub async fn run_cite(config: &Config, slug: &str, style: &str) -> Result<()> {
    // Unknown style names select the minimal template.
    let style: CitationStyle = style.parse().unwrap_or_default();
    let citation = cite(config, slug, style).await?;
    println!("{}", citation);
    Ok(())
}
