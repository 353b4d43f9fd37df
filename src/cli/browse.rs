//! Browse command handler.
//!
//! Loads the listing and catalog, then hands off to the interactive
//! dashboard.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::{AppConfig, TuiPreferences};
use crate::error::Result;
use crate::listings::load_listing;
use crate::model::IndustryCatalog;
use crate::tui::{self, theme, App};

/// Resolved configuration for the `browse` subcommand.
#[derive(Debug, Clone)]
pub struct BrowseConfig {
    pub listing_path: PathBuf,
    pub catalog_path: Option<PathBuf>,
    /// Theme override from the command line, beats saved preferences.
    pub theme: Option<String>,
    pub export_dir: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
}

/// Run the browse command
pub fn run_browse(config: BrowseConfig) -> Result<i32> {
    let (app_config, config_file) = AppConfig::load_or_default(config.config_path.as_deref())?;
    if let Some(path) = &config_file {
        debug!("loaded config from {}", path.display());
    }

    let listing = load_listing(&config.listing_path)?;
    info!(
        companies = listing.len(),
        path = %config.listing_path.display(),
        "listing loaded"
    );

    let catalog = match config.catalog_path.as_deref().or(app_config.catalog.path.as_deref()) {
        Some(path) => IndustryCatalog::from_path(path)?,
        None => IndustryCatalog::asx_default(),
    };

    // Theme priority: CLI flag, then saved preference, then config file.
    let theme_name = config.theme.clone().unwrap_or_else(|| {
        let has_prefs = TuiPreferences::config_path().is_some_and(|p| p.exists());
        if has_prefs {
            TuiPreferences::load().theme
        } else {
            app_config.tui.theme.clone()
        }
    });
    theme::set_theme(theme::ThemeKind::from_name(&theme_name));

    let export_dir = config
        .export_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let app = App::new(listing, catalog, export_dir);
    tui::run_tui(app, app_config.tui.mouse_enabled)?;

    // Persist the theme the session ended on.
    let prefs = TuiPreferences {
        theme: theme::active().name().to_string(),
    };
    if let Err(err) = prefs.save() {
        debug!("could not save preferences: {err}");
    }

    Ok(super::exit_codes::SUCCESS)
}
