//! Groups command handler.
//!
//! Non-interactive classification summary, for scripts and quick checks.

use std::io::Write;
use std::path::PathBuf;

use serde_json::json;
use tracing::info;

use crate::classify::Classification;
use crate::config::AppConfig;
use crate::error::{Result, StockdeckError};
use crate::listings::load_listing;
use crate::model::IndustryCatalog;
use crate::search::{SearchEngine, SearchResultSet};

/// Resolved configuration for the `groups` subcommand.
#[derive(Debug, Clone)]
pub struct GroupsConfig {
    pub listing_path: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub query: Option<String>,
    pub json: bool,
    pub config_path: Option<PathBuf>,
}

/// Run the groups command
pub fn run_groups(config: GroupsConfig) -> Result<i32> {
    let (app_config, _) = AppConfig::load_or_default(config.config_path.as_deref())?;

    let listing = load_listing(&config.listing_path)?;
    let catalog = match config.catalog_path.as_deref().or(app_config.catalog.path.as_deref()) {
        Some(path) => IndustryCatalog::from_path(path)?,
        None => IndustryCatalog::asx_default(),
    };

    let results = match &config.query {
        Some(query) => SearchEngine::new().search(&listing, query),
        None => SearchResultSet::inactive(),
    };
    let classification = Classification::compute(&listing, &catalog, &results);
    info!(
        groups = classification.groups().len(),
        companies = classification.company_count(),
        "classified listing"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if config.json {
        write_json(&mut out, &classification)?;
    } else {
        write_text(&mut out, &classification)?;
    }

    if config.query.is_some() && classification.is_empty() {
        return Ok(super::exit_codes::NO_MATCHES);
    }
    Ok(super::exit_codes::SUCCESS)
}

fn write_json(out: &mut impl Write, classification: &Classification) -> Result<()> {
    let groups: Vec<_> = classification
        .groups()
        .values()
        .map(|group| {
            json!({
                "key": group.key.value(),
                "title": group.title,
                "companies": group.companies.iter().map(|c| {
                    json!({
                        "code": c.code,
                        "name": c.name,
                        "sector": c.sector,
                    })
                }).collect::<Vec<_>>(),
            })
        })
        .collect();
    let doc = json!({ "groups": groups });
    serde_json::to_writer_pretty(&mut *out, &doc)
        .map_err(|e| StockdeckError::Export(format!("write groups json: {e}")))?;
    writeln!(out).map_err(|e| StockdeckError::Export(format!("write groups json: {e}")))?;
    Ok(())
}

fn write_text(out: &mut impl Write, classification: &Classification) -> Result<()> {
    let write = |out: &mut dyn Write, line: String| -> Result<()> {
        writeln!(out, "{line}").map_err(|e| StockdeckError::Export(format!("write groups: {e}")))
    };

    if classification.is_empty() {
        write(out, "no matching companies".to_string())?;
        return Ok(());
    }
    for group in classification.groups().values() {
        write(out, format!("{} ({})", group.title, group.companies.len()))?;
        for company in &group.companies {
            write(out, format!("  {:<6} {}", company.code, company.name))?;
        }
    }
    Ok(())
}
