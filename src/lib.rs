//! **Terminal dashboard for browsing stock listings by industry group.**
//!
//! `stockdeck` loads exchange listings (JSON or CSV), classifies the
//! companies into GICS-style industry groups, and presents them in an
//! interactive sidebar tree with search, a results table and a watchlist.
//! The classifier and search engine are plain library code and can be used
//! without the TUI.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The [`Listing`] of [`Company`] records and the
//!   [`IndustryCatalog`] mapping group keys to sector lists.
//! - **[`listings`]**: Format detection and parsing for listing files.
//! - **[`classify`]**: The [`classify`](classify::classify) function and the
//!   memoized [`Classification`] built from a listing, a catalog and the
//!   current search results.
//! - **[`search`]**: Ranked company search producing a [`SearchResultSet`].
//! - **[`watchlist`]**: Watchlist with timestamped JSON/CSV export.
//! - **[`tui`]**: The interactive dashboard.
//!
//! ## Getting Started: Classifying a Listing
//!
//! ```no_run
//! use std::path::Path;
//! use stockdeck::{classify::Classification, listings::load_listing,
//!     model::IndustryCatalog, search::SearchResultSet};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let listing = load_listing(Path::new("companies.json"))?;
//!     let catalog = IndustryCatalog::asx_default();
//!     let classification =
//!         Classification::compute(&listing, &catalog, &SearchResultSet::inactive());
//!
//!     for group in classification.groups().values() {
//!         println!("{}: {} companies", group.title, group.companies.len());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod listings;
pub mod model;
pub mod search;
pub mod tui;
pub mod watchlist;

// Re-export main types for convenience
pub use classify::{classify, Classification, FilteredGroup};
pub use config::{AppConfig, TuiPreferences};
pub use error::{Result, StockdeckError};
pub use listings::{detect_format, load_listing, ListingFormat};
pub use model::{Company, CompanyId, GroupKey, IndustryCatalog, IndustryGroup, Listing};
pub use search::{SearchEngine, SearchResultSet};
pub use watchlist::{ExportFormat, Watchlist};
