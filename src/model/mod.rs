//! Core data structures: companies and the industry catalog.

mod catalog;
mod company;

pub use catalog::{GroupKey, IndustryCatalog, IndustryGroup};
pub use company::{Company, CompanyId, Listing};
