//! `folio list`: documents of one type from an export, in an editor ordering.

use anyhow::{anyhow, bail, Context, Result};
use folio_core::schema::schema_for;
use folio_core::store::Dataset;
use serde_json::Value;
use std::path::Path;

/// `(id, title)` rows for `type_name`, sorted by the named ordering or the
/// schema's first one. Types without orderings stay in id order.
pub fn list_documents(
    input: &str,
    type_name: &str,
    order: Option<&str>,
) -> Result<Vec<(String, String)>> {
    let schema = schema_for(type_name)
        .ok_or_else(|| anyhow!("Unknown document type: '{}'", type_name))?;
    let dataset = Dataset::from_ndjson(input)?;

    let ordering = match order {
        Some(name) => match schema.ordering(name) {
            Some(ordering) => Some(ordering),
            None => {
                let known: Vec<&str> = schema.orderings.iter().map(|o| o.name).collect();
                bail!(
                    "Unknown ordering '{}' for {}. Known orderings: {}",
                    name,
                    type_name,
                    known.join(", ")
                );
            }
        },
        None => schema.orderings.first(),
    };

    let mut docs: Vec<&Value> = dataset
        .iter()
        .filter(|doc| doc["_type"].as_str() == Some(type_name))
        .collect();
    if let Some(ordering) = ordering {
        ordering.sort(&mut docs);
    }

    let title_field = schema.title_field().unwrap_or("title");
    Ok(docs
        .into_iter()
        .map(|doc| {
            let id = doc["_id"].as_str().unwrap_or("-").to_string();
            let title = doc[title_field].as_str().unwrap_or("Untitled").to_string();
            (id, title)
        })
        .collect())
}

pub fn run_list(path: &Path, type_name: &str, order: Option<&str>) -> Result<()> {
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read export: {}", path.display()))?;
    let rows = list_documents(&input, type_name, order)?;

    if rows.is_empty() {
        println!("No {} documents.", type_name);
        return Ok(());
    }
    for (id, title) in rows {
        println!("{:<28} {}", id, title);
    }
    Ok(())
}
