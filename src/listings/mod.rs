//! Company listing loaders.
//!
//! Listings arrive as scraper output in one of two shapes: a JSON array of
//! company objects, or CSV with a header row. Format is detected from the
//! content itself so file extensions stay advisory.
//!
//! ```no_run
//! use std::path::Path;
//! use stockdeck::listings::load_listing;
//!
//! let listing = load_listing(Path::new("companies.csv")).unwrap();
//! println!("{} companies", listing.len());
//! ```

use crate::error::{ListingErrorKind, Result, StockdeckError};
use crate::model::{Company, Listing};
use std::path::Path;

/// Detected listing format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingFormat {
    Json,
    Csv,
}

/// Detect the listing format from content.
///
/// A leading `[` or `{` marks JSON; anything else with at least one comma in
/// the first line is treated as CSV with headers.
#[must_use]
pub fn detect_format(content: &str) -> Option<ListingFormat> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        return Some(ListingFormat::Json);
    }
    if trimmed.lines().next().is_some_and(|l| l.contains(',')) {
        return Some(ListingFormat::Csv);
    }
    None
}

/// Load a listing from a file, auto-detecting the format.
pub fn load_listing(path: &Path) -> Result<Listing> {
    let content = std::fs::read_to_string(path).map_err(|e| StockdeckError::io(path, e))?;
    parse_listing_str(&content).map_err(|e| match e {
        StockdeckError::Listing { source, .. } => {
            StockdeckError::listing(path.display().to_string(), source)
        }
        other => other,
    })
}

/// Parse a listing from string content, auto-detecting the format.
pub fn parse_listing_str(content: &str) -> Result<Listing> {
    match detect_format(content) {
        Some(ListingFormat::Json) => parse_json(content),
        Some(ListingFormat::Csv) => parse_csv(content),
        None => Err(StockdeckError::listing(
            "<content>",
            ListingErrorKind::UnknownFormat,
        )),
    }
}

fn parse_json(content: &str) -> Result<Listing> {
    let companies: Vec<Company> = serde_json::from_str(content).map_err(|e| {
        StockdeckError::listing("<json>", ListingErrorKind::InvalidJson(e.to_string()))
    })?;
    validate(&companies)?;
    Ok(Listing::new(companies))
}

fn parse_csv(content: &str) -> Result<Listing> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut companies = Vec::new();
    for record in reader.deserialize::<Company>() {
        let company = record.map_err(|e| {
            StockdeckError::listing("<csv>", ListingErrorKind::InvalidCsv(e.to_string()))
        })?;
        companies.push(company);
    }
    validate(&companies)?;
    Ok(Listing::new(companies))
}

/// Reject records missing the one field everything downstream keys on.
fn validate(companies: &[Company]) -> Result<()> {
    for company in companies {
        if company.code.is_empty() {
            return Err(StockdeckError::listing(
                "<record>",
                ListingErrorKind::MissingField {
                    field: "code".to_string(),
                },
            ));
        }
    }
    let missing_sector = companies.iter().filter(|c| c.sector.is_empty()).count();
    if missing_sector > 0 {
        tracing::debug!(
            count = missing_sector,
            "listing has companies without a sector; they will not appear in any group"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON_LISTING: &str = r#"[
        {"id": "1", "code": "BHP", "name": "BHP Group", "sector": "Materials"},
        {"id": "2", "code": "CSL", "name": "CSL Limited", "sector": "Health Care"}
    ]"#;

    const CSV_LISTING: &str = "\
id,code,name,sector
1,BHP,BHP Group,Materials
2,CSL,CSL Limited,Health Care
";

    #[test]
    fn test_detect_json() {
        assert_eq!(detect_format(JSON_LISTING), Some(ListingFormat::Json));
        assert_eq!(detect_format("  [\n]"), Some(ListingFormat::Json));
    }

    #[test]
    fn test_detect_csv() {
        assert_eq!(detect_format(CSV_LISTING), Some(ListingFormat::Csv));
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(detect_format("just some words"), None);
    }

    #[test]
    fn test_parse_json_listing() {
        let listing = parse_listing_str(JSON_LISTING).expect("valid JSON listing");
        assert_eq!(listing.len(), 2);
        assert_eq!(listing.companies()[0].code, "BHP");
        assert_eq!(listing.companies()[1].sector, "Health Care");
    }

    #[test]
    fn test_parse_csv_listing() {
        let listing = parse_listing_str(CSV_LISTING).expect("valid CSV listing");
        assert_eq!(listing.len(), 2);
        assert_eq!(listing.companies()[0].name, "BHP Group");
    }

    #[test]
    fn test_json_and_csv_agree() {
        let a = parse_listing_str(JSON_LISTING).expect("json");
        let b = parse_listing_str(CSV_LISTING).expect("csv");
        assert_eq!(a.companies(), b.companies());
    }

    #[test]
    fn test_missing_code_rejected() {
        let bad = r#"[{"code": "", "name": "Nameless", "sector": "Energy"}]"#;
        assert!(parse_listing_str(bad).is_err());
    }

    #[test]
    fn test_missing_sector_tolerated() {
        let ok = r#"[{"code": "XYZ", "name": "No Sector Ltd"}]"#;
        let listing = parse_listing_str(ok).expect("sector is optional");
        assert_eq!(listing.companies()[0].sector, "");
    }
}
