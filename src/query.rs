//! `folio queries` and `folio query`.
//!
//! Lists the named query contracts and runs one by name, printing the raw
//! JSON result.

use anyhow::{bail, Result};
use folio_core::facade::QueryFacade;
use folio_core::query::{self, QueryContract, QueryParams};
use serde_json::Value;

use crate::client::create_client;
use crate::config::Config;

/// Print every contract with its parameters.
pub fn list_queries() {
    println!("{:<20} {:<12} DESCRIPTION", "NAME", "PARAMS");
    for contract in query::ALL {
        let params = if contract.params.is_empty() {
            "-".to_string()
        } else {
            contract.params.join(",")
        };
        println!(
            "{:<20} {:<12} {}",
            contract.name, params, contract.description
        );
    }
}

/// Look up a contract by name.
pub fn find_contract(name: &str) -> Result<&'static QueryContract> {
    match query::by_name(name) {
        Some(contract) => Ok(contract),
        None => {
            let known: Vec<&str> = query::ALL.iter().map(|c| c.name).collect();
            bail!("Unknown query: '{}'. Known queries: {}", name, known.join(", "))
        }
    }
}

/// Run a contract and return its raw result.
pub async fn execute_query(
    config: &Config,
    name: &str,
    params: Vec<(String, String)>,
) -> Result<Value> {
    let contract = find_contract(name)?;
    let params: QueryParams = params
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect();

    let facade = QueryFacade::new(create_client(config)?);
    Ok(facade.execute(contract, &params).await?)
}

/// CLI entry point: run a contract and print pretty JSON.
pub async fn run_query(config: &Config, name: &str, params: Vec<(String, String)>) -> Result<()> {
    let result = execute_query(config, name, params).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
