//! Terminal dashboard.
//!
//! `app` owns the state, `sidebar` the navigation tree, `events` the key
//! handling and `ui` the terminal lifecycle and layout.

pub mod app;
pub mod constants;
pub mod events;
pub mod sidebar;
pub mod state;
pub mod theme;
pub mod ui;
pub mod views;
pub mod widgets;

pub use app::App;
pub use ui::run_tui;
