//! # Folio CLI (`folio`)
//!
//! Runs the portfolio's named queries, formats citations and CVs, resolves
//! image URLs, audits store exports, and serves the JSON data API.
//!
//! ## Usage
//!
//! ```bash
//! folio --config ./config/folio.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `folio queries` | List named queries and their parameters |
//! | `folio query <name> --param k=v` | Run a named query and print JSON |
//! | `folio search "<term>"` | Search research, publications, posts and courses |
//! | `folio cite <slug>` | Print a publication citation |
//! | `folio cv` | Print the CV grouped by category |
//! | `folio slug <text>` | Slugify text |
//! | `folio image <ref>` | Resolve an image asset to a CDN URL |
//! | `folio check <export.ndjson>` | Validate an export against the schemas |
//! | `folio list <type> <export.ndjson>` | List documents in an editor ordering |
//! | `folio serve` | Start the JSON data API |
//!
//! Logging goes to stderr and is controlled by `FOLIO_LOG`
//! (e.g. `FOLIO_LOG=folio_core=debug`), `--verbose` or `--quiet`.

use clap::{Parser, Subcommand};
use folio::{check, cite, config, cv, image, list, query, search, server};
use folio_core::image::{FitMode, ImageFormat};
use folio_core::text::{slugify_with, SlugOptions, DEFAULT_SLUG_MAX_LENGTH};
use std::path::PathBuf;

/// Folio: academic portfolio content queries and formatting.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/folio.toml")]
    config: PathBuf,

    /// Debug-level logging.
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Errors only.
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the named queries and their parameters.
    Queries,

    /// Run a named query and print its JSON result.
    Query {
        /// Query name, e.g. `featuredResearch` or `course`.
        name: String,

        /// Query parameters as `key=value` pairs.
        #[arg(long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },

    /// Search research, publications, blog posts and courses.
    Search {
        /// The search term.
        term: String,
    },

    /// Print the citation of a publication.
    Cite {
        /// Publication slug.
        slug: String,

        /// `apa`, `mla`, `chicago`; anything else prints a minimal citation.
        #[arg(long, default_value = "apa")]
        style: String,
    },

    /// Print the public CV grouped by category.
    Cv,

    /// Slugify text the way the editor does.
    Slug {
        /// Text to slugify; multiple words are joined with spaces.
        #[arg(required = true)]
        text: Vec<String>,

        #[arg(long, default_value_t = DEFAULT_SLUG_MAX_LENGTH)]
        max_length: usize,
    },

    /// Resolve an image asset reference to a CDN URL.
    Image {
        /// Asset id (`image-<hash>-<w>x<h>-<ext>`) or a JSON image field.
        reference: String,

        #[arg(long)]
        width: Option<u32>,

        #[arg(long)]
        height: Option<u32>,

        #[arg(long)]
        quality: Option<u8>,

        /// `webp`, `jpg` or `png`.
        #[arg(long)]
        format: Option<ImageFormat>,

        /// CDN fit mode, e.g. `fill`, `crop`, `max`.
        #[arg(long)]
        fit: Option<FitMode>,
    },

    /// Validate an NDJSON export against the document schemas.
    ///
    /// Exits with status 1 when any document has issues.
    Check {
        /// Path to the export.
        path: PathBuf,
    },

    /// List one document type from an NDJSON export, sorted like the editor.
    List {
        /// Document type, e.g. `publication` or `cvEntry`.
        doc_type: String,

        /// Path to the export.
        path: PathBuf,

        /// Ordering name, e.g. `yearDesc`; defaults to the type's first.
        #[arg(long)]
        order: Option<String>,
    },

    /// Start the JSON data API on `[server].bind`.
    Serve,
}

/// Parse a `key=value` pair for `--param` arguments.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{}'", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("FOLIO_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    // Commands that don't require config
    match &cli.command {
        Commands::Queries => {
            query::list_queries();
            return Ok(());
        }
        Commands::Slug { text, max_length } => {
            let options = SlugOptions {
                max_length: *max_length,
                ..SlugOptions::default()
            };
            println!("{}", slugify_with(&text.join(" "), &options));
            return Ok(());
        }
        Commands::Check { path } => {
            if !check::run_check(path)? {
                std::process::exit(1);
            }
            return Ok(());
        }
        Commands::List {
            doc_type,
            path,
            order,
        } => {
            list::run_list(path, doc_type, order.as_deref())?;
            return Ok(());
        }
        _ => {}
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Query { name, params } => {
            query::run_query(&cfg, &name, params).await?;
        }
        Commands::Search { term } => {
            search::run_search(&cfg, &term).await?;
        }
        Commands::Cite { slug, style } => {
            cite::run_cite(&cfg, &slug, &style).await?;
        }
        Commands::Cv => {
            cv::run_cv(&cfg).await?;
        }
        Commands::Image {
            reference,
            width,
            height,
            quality,
            format,
            fit,
        } => {
            let args = image::ImageArgs {
                width,
                height,
                quality,
                format,
                fit,
            };
            image::run_image(&cfg, &reference, &args)?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Queries
        | Commands::Slug { .. }
        | Commands::Check { .. }
        | Commands::List { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
