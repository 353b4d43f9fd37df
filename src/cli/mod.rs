//! CLI command handlers.
//!
//! Testable handlers invoked by main.rs; each returns the process exit code.

mod browse;
mod groups;

pub use browse::{run_browse, BrowseConfig};
pub use groups::{run_groups, GroupsConfig};

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    /// A query was given and matched nothing.
    pub const NO_MATCHES: i32 = 1;
}
