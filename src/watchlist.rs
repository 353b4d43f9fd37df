//! The watchlist: where the sidebar's add/remove intents land.
//!
//! The sidebar forwards `AddCompany`/`RemoveCompany` intents unmodified; the
//! application shell applies them here. The watchlist is ordered (insertion
//! order), deduplicated by company identity, and lives only in memory - the
//! one on-disk artifact is an explicit, user-triggered export.

use crate::error::{Result, StockdeckError};
use crate::model::{Company, CompanyId};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Export format for watchlist dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub(crate) const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Csv => "CSV",
        }
    }
}

/// Result of an export operation, for the status line.
#[derive(Debug)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub count: usize,
}

/// Ordered, identity-deduplicated set of watched companies.
#[derive(Debug, Clone, Default)]
pub struct Watchlist {
    entries: Vec<Company>,
}

impl Watchlist {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[Company] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &CompanyId) -> bool {
        self.entries.iter().any(|c| &c.identity() == id)
    }

    /// Add a company. Returns false if it was already watched.
    pub fn add(&mut self, company: &Company) -> bool {
        if self.contains(&company.identity()) {
            return false;
        }
        self.entries.push(company.clone());
        true
    }

    /// Remove a company by identity. Returns false if it was not watched.
    pub fn remove(&mut self, id: &CompanyId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|c| &c.identity() != id);
        self.entries.len() != before
    }

    /// Toggle membership; returns true if the company is now watched.
    pub fn toggle(&mut self, company: &Company) -> bool {
        if self.remove(&company.identity()) {
            false
        } else {
            self.entries.push(company.clone());
            true
        }
    }

    /// Export to a timestamped file in `output_dir` (cwd when None).
    pub fn export(&self, format: ExportFormat, output_dir: Option<&Path>) -> Result<ExportOutcome> {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let filename = format!("watchlist_{}.{}", timestamp, format.extension());
        let path = output_dir.map_or_else(|| PathBuf::from(&filename), |d| d.join(&filename));

        match format {
            ExportFormat::Json => self.export_json(&path)?,
            ExportFormat::Csv => self.export_csv(&path)?,
        }

        tracing::info!(path = %path.display(), count = self.entries.len(), "watchlist exported");
        Ok(ExportOutcome {
            path,
            count: self.entries.len(),
        })
    }

    fn export_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| StockdeckError::Export(e.to_string()))?;
        let mut file = std::fs::File::create(path).map_err(|e| StockdeckError::io(path, e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| StockdeckError::io(path, e))?;
        Ok(())
    }

    fn export_csv(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path).map_err(|e| StockdeckError::io(path, e))?;
        let mut writer = csv::Writer::from_writer(file);
        for company in &self.entries {
            writer
                .serialize(company)
                .map_err(|e| StockdeckError::Export(e.to_string()))?;
        }
        writer
            .flush()
            .map_err(|e| StockdeckError::io(path, e))?;
        Ok(())
    }
}
