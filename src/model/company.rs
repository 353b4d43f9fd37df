//! Company records and listings.
//!
//! A [`Company`] is an immutable value once loaded; the rest of the crate
//! holds references into a [`Listing`] while computing filtered views.
//! Identity (for search intersection and watchlist membership) is the
//! [`CompanyId`], which stays stable across serialization round-trips.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a company.
///
/// Listings loaded from scraper output carry an explicit `id` column; when a
/// record has none, the ticker code is used (tickers are unique per exchange).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(String);

impl CompanyId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the underlying identifier string.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CompanyId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A single listed company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Stable identifier
    #[serde(default)]
    pub id: Option<CompanyId>,
    /// Ticker code (e.g. "BHP")
    pub code: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Sector name used for industry-group classification
    #[serde(default)]
    pub sector: String,
    /// Exchange the listing belongs to
    #[serde(default)]
    pub exchange: Option<String>,
    /// Market capitalisation in whole dollars, when the source provides it
    #[serde(default)]
    pub market_cap: Option<u64>,
}

impl Company {
    /// Create a company with the minimal fields.
    pub fn new(code: impl Into<String>, name: impl Into<String>, sector: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            id: Some(CompanyId::new(code.clone())),
            code,
            name: name.into(),
            sector: sector.into(),
            exchange: None,
            market_cap: None,
        }
    }

    /// Effective identity: explicit id when present, ticker code otherwise.
    #[must_use]
    pub fn identity(&self) -> CompanyId {
        self.id
            .clone()
            .unwrap_or_else(|| CompanyId::new(self.code.clone()))
    }

    /// Label used in the sidebar tree and tables.
    #[must_use]
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            self.code.clone()
        } else {
            format!("{} {}", self.code, self.name)
        }
    }
}

/// An ordered company listing, loaded once at application start.
///
/// Order is preserved from the source file; classification and search both
/// keep this order in their outputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Listing {
    companies: Vec<Company>,
}

impl Listing {
    #[must_use]
    pub fn new(companies: Vec<Company>) -> Self {
        Self { companies }
    }

    #[must_use]
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.companies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    /// Look a company up by identity.
    #[must_use]
    pub fn get(&self, id: &CompanyId) -> Option<&Company> {
        self.companies.iter().find(|c| &c.identity() == id)
    }

    /// Distinct sector names present in the listing, in first-seen order.
    #[must_use]
    pub fn sectors(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for company in &self.companies {
            if !company.sector.is_empty() && !seen.contains(&company.sector.as_str()) {
                seen.push(company.sector.as_str());
            }
        }
        seen
    }
}

impl FromIterator<Company> for Listing {
    fn from_iter<T: IntoIterator<Item = Company>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_falls_back_to_code() {
        let mut company = Company::new("BHP", "BHP Group", "Materials");
        company.id = None;
        assert_eq!(company.identity(), CompanyId::new("BHP"));
    }

    #[test]
    fn test_label_prefers_name() {
        let company = Company::new("WOW", "Woolworths Group", "Consumer Staples");
        assert_eq!(company.label(), "WOW Woolworths Group");

        let bare = Company::new("XYZ", "", "Unknown");
        assert_eq!(bare.label(), "XYZ");
    }

    #[test]
    fn test_listing_sectors_first_seen_order() {
        let listing: Listing = [
            Company::new("A", "A Ltd", "Software"),
            Company::new("B", "B Ltd", "Resources"),
            Company::new("C", "C Ltd", "Software"),
        ]
        .into_iter()
        .collect();

        assert_eq!(listing.sectors(), vec!["Software", "Resources"]);
    }

    #[test]
    fn test_listing_lookup_by_identity() {
        let listing: Listing = [Company::new("CBA", "Commonwealth Bank", "Banks")]
            .into_iter()
            .collect();
        assert!(listing.get(&CompanyId::new("CBA")).is_some());
        assert!(listing.get(&CompanyId::new("NAB")).is_none());
    }
}
