//! The industry catalog: a static mapping from industry-group key to a
//! display title and the sector names belonging to that group.
//!
//! The catalog is process-lifetime static data. A built-in table covering the
//! ASX/GICS industry groups ships with the crate; an external YAML file can
//! replace it so the catalog stays "supplied externally" for other markets.

use crate::error::{CatalogErrorKind, Result, StockdeckError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Key identifying one industry group (e.g. `materials`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GroupKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One industry group: a human-readable title plus its member sector names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryGroup {
    /// Display title. May be empty in malformed catalogs; rendering falls
    /// back to the group key rather than aborting.
    #[serde(default)]
    pub title: String,
    /// Sector names classified into this group, in display order.
    pub sectors: Vec<String>,
}

/// Immutable ordered catalog of industry groups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndustryCatalog {
    groups: IndexMap<GroupKey, IndustryGroup>,
}

impl IndustryCatalog {
    #[must_use]
    pub fn new(groups: IndexMap<GroupKey, IndustryGroup>) -> Self {
        Self { groups }
    }

    /// The built-in ASX industry group table.
    #[must_use]
    pub fn asx_default() -> Self {
        let mut groups = IndexMap::new();
        let table: &[(&str, &str, &[&str])] = &[
            ("energy", "Energy", &["Energy", "Oil & Gas"]),
            (
                "materials",
                "Materials",
                &["Materials", "Resources", "Metals & Mining"],
            ),
            (
                "industrials",
                "Industrials",
                &["Industrials", "Capital Goods", "Transportation"],
            ),
            (
                "consumer_disc",
                "Consumer Discretionary",
                &["Consumer Discretionary", "Retailing", "Consumer Services"],
            ),
            (
                "consumer_staples",
                "Consumer Staples",
                &["Consumer Staples", "Food & Beverage"],
            ),
            (
                "health_care",
                "Health Care",
                &["Health Care", "Pharmaceuticals", "Biotechnology"],
            ),
            (
                "financials",
                "Financials",
                &["Financials", "Banks", "Insurance"],
            ),
            (
                "info_tech",
                "Information Technology",
                &["Information Technology", "Software", "Software & Services"],
            ),
            (
                "comm_services",
                "Communication Services",
                &["Communication Services", "Telecommunications", "Media"],
            ),
            ("utilities", "Utilities", &["Utilities"]),
            ("real_estate", "Real Estate", &["Real Estate", "REITs"]),
        ];

        for (key, title, sectors) in table {
            groups.insert(
                GroupKey::new(*key),
                IndustryGroup {
                    title: (*title).to_string(),
                    sectors: sectors.iter().map(|s| (*s).to_string()).collect(),
                },
            );
        }
        Self { groups }
    }

    /// Load a catalog from a YAML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| StockdeckError::io(path, e))?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            StockdeckError::Catalog { source, .. } => {
                StockdeckError::catalog(path.display().to_string(), source)
            }
            other => other,
        })
    }

    /// Parse a catalog from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let groups: IndexMap<GroupKey, IndustryGroup> = serde_yaml::from_str(content)
            .map_err(|e| {
                StockdeckError::catalog("<yaml>", CatalogErrorKind::InvalidYaml(e.to_string()))
            })?;
        let catalog = Self { groups };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Validate structural invariants. A missing title is tolerated (render
    /// fallback), an empty sector list is not: the group could never match.
    pub fn validate(&self) -> Result<()> {
        if self.groups.is_empty() {
            return Err(StockdeckError::catalog("<catalog>", CatalogErrorKind::Empty));
        }
        for (key, group) in &self.groups {
            if group.sectors.is_empty() {
                return Err(StockdeckError::catalog(
                    "<catalog>",
                    CatalogErrorKind::EmptySectors {
                        key: key.value().to_string(),
                    },
                ));
            }
            if group.title.is_empty() {
                tracing::warn!(key = %key, "catalog group has no title; using key as title");
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, key: &GroupKey) -> Option<&IndustryGroup> {
        self.groups.get(key)
    }

    /// All group keys in catalog order.
    #[must_use]
    pub fn keys(&self) -> Vec<GroupKey> {
        self.groups.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &IndustryGroup)> {
        self.groups.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Display title for a group, falling back to the key when the catalog
    /// entry is missing a title (or missing entirely).
    #[must_use]
    pub fn title_for(&self, key: &GroupKey) -> String {
        match self.groups.get(key) {
            Some(group) if !group.title.is_empty() => group.title.clone(),
            _ => key.value().to_string(),
        }
    }

    /// Whether `sector` belongs to group `key`.
    #[must_use]
    pub fn sector_in_group(&self, key: &GroupKey, sector: &str) -> bool {
        self.groups
            .get(key)
            .is_some_and(|g| g.sectors.iter().any(|s| s == sector))
    }
}
