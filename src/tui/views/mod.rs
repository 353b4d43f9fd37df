//! Panel rendering.

mod table;

pub use table::render_company_table;
