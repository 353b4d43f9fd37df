//! Application state for the dashboard.
//!
//! Owns the listing, catalog, search, classification and watchlist, and
//! applies the intents raised by the sidebar. Rendering and key dispatch
//! live in `ui` and `events`.

use std::path::PathBuf;

use ratatui::layout::Rect;
use tracing::debug;

use crate::classify::Classification;
use crate::model::{Company, CompanyId, IndustryCatalog, Listing};
use crate::search::{SearchEngine, SearchResultSet};
use crate::tui::constants::STATUS_TTL_TICKS;
use crate::tui::sidebar::{SidebarIntent, SidebarState};
use crate::tui::state::{ListNavigation, ListState, SearchBar};
use crate::watchlist::{ExportFormat, Watchlist};

/// Which panel has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Sidebar,
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    expires_at: u64,
}

pub struct App {
    pub listing: Listing,
    pub catalog: IndustryCatalog,
    pub search: SearchBar,
    pub sidebar: SidebarState,
    pub table: ListState,
    pub watchlist: Watchlist,
    pub focus: Panel,
    pub overlay: Overlay,
    pub status: Option<StatusMessage>,
    pub should_quit: bool,
    /// Last rendered sidebar rect, used to map clicks onto panels.
    pub sidebar_area: Rect,

    classification: Classification,
    engine: SearchEngine,
    results: SearchResultSet,
    revision: u64,
    export_dir: PathBuf,
    tick: u64,
}

impl App {
    #[must_use]
    pub fn new(listing: Listing, catalog: IndustryCatalog, export_dir: PathBuf) -> Self {
        let results = SearchResultSet::inactive();
        let classification = Classification::compute(&listing, &catalog, &results);
        let mut sidebar = SidebarState::default();
        sidebar.sync(&classification);

        Self {
            listing,
            catalog,
            search: SearchBar::default(),
            sidebar,
            table: ListState::default(),
            watchlist: Watchlist::default(),
            focus: Panel::Sidebar,
            overlay: Overlay::None,
            status: None,
            should_quit: false,
            sidebar_area: Rect::default(),
            classification,
            engine: SearchEngine::new(),
            results,
            revision: 0,
            export_dir,
            tick: 0,
        }
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Companies of the currently open group, in classification order.
    pub fn active_companies(&self) -> &[Company] {
        self.sidebar
            .active_key()
            .and_then(|key| self.classification.get(key))
            .map(|group| group.companies.as_slice())
            .unwrap_or(&[])
    }

    pub fn active_group_title(&self) -> Option<&str> {
        self.sidebar
            .active_key()
            .and_then(|key| self.classification.get(key))
            .map(|group| group.title.as_str())
    }

    /// Re-run search and classification after the query changed.
    pub fn apply_search(&mut self) {
        self.results = if self.search.has_valid_query() {
            self.engine.search(&self.listing, &self.search.query)
        } else {
            SearchResultSet::inactive()
        };
        self.revision = self.revision.wrapping_add(1);
        let industries = self.catalog.keys();
        self.classification.refresh(
            self.revision,
            &self.listing,
            &self.catalog,
            &industries,
            &self.results,
        );
        self.sidebar.sync(&self.classification);
        self.table.clamp(self.active_companies().len());
        debug!(
            query = %self.search.query,
            groups = self.classification.groups().len(),
            "search applied"
        );
    }

    /// Resync derived state after the open group changed.
    pub fn after_sidebar_change(&mut self) {
        self.table.reset();
    }

    pub fn handle_intent(&mut self, intent: SidebarIntent) {
        match intent {
            SidebarIntent::AddCompany(company) => self.add_company(company),
            SidebarIntent::RemoveCompany(id) => self.remove_company(&id),
        }
    }

    pub fn add_company(&mut self, company: Company) {
        let label = company.label();
        if self.watchlist.add(&company) {
            self.set_status(format!("Added {label} to watchlist"));
        } else {
            self.set_status(format!("{label} is already on the watchlist"));
        }
    }

    pub fn remove_company(&mut self, id: &CompanyId) {
        if self.watchlist.remove(id) {
            self.set_status(format!("Removed {} from watchlist", id.value()));
        } else {
            self.set_status(format!("{} is not on the watchlist", id.value()));
        }
    }

    /// Toggle watch state for the table's selected company.
    pub fn toggle_selected_watch(&mut self) {
        if let Some(company) = self.active_companies().get(self.table.selected).cloned() {
            let label = company.label();
            if self.watchlist.toggle(&company) {
                self.set_status(format!("Added {label} to watchlist"));
            } else {
                self.set_status(format!("Removed {label} from watchlist"));
            }
        }
    }

    pub fn export_watchlist(&mut self, format: ExportFormat) {
        if self.watchlist.is_empty() {
            self.set_status("Watchlist is empty, nothing to export".to_string());
            return;
        }
        match self.watchlist.export(format, Some(&self.export_dir)) {
            Ok(outcome) => self.set_status(format!(
                "Exported {} companies as {} to {}",
                outcome.count,
                format.label(),
                outcome.path.display()
            )),
            Err(err) => self.set_error(format!("Export failed: {err}")),
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Panel::Sidebar => Panel::Table,
            Panel::Table => Panel::Sidebar,
        };
    }

    pub fn set_status(&mut self, text: String) {
        self.status = Some(StatusMessage {
            text,
            kind: StatusKind::Info,
            expires_at: self.tick + STATUS_TTL_TICKS,
        });
    }

    pub fn set_error(&mut self, text: String) {
        self.status = Some(StatusMessage {
            text,
            kind: StatusKind::Error,
            expires_at: self.tick + STATUS_TTL_TICKS,
        });
    }

    pub fn on_tick(&mut self) {
        self.tick += 1;
        if let Some(status) = &self.status {
            if self.tick >= status.expires_at {
                self.status = None;
            }
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

impl ListNavigation for App {
    fn list_state(&mut self) -> &mut ListState {
        &mut self.table
    }

    fn list_len(&self) -> usize {
        self.active_companies().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::sidebar::SidebarRow;

    fn app() -> App {
        let listing: Listing = serde_json::from_str(
            r#"[
                {"code": "BHP", "name": "BHP Group", "sector": "Materials"},
                {"code": "CBA", "name": "Commonwealth Bank", "sector": "Banks"},
                {"code": "WBC", "name": "Westpac", "sector": "Banks"}
            ]"#,
        )
        .unwrap();
        App::new(listing, IndustryCatalog::asx_default(), PathBuf::from("."))
    }

    fn open_group(app: &mut App, key: &str) {
        let pos = app
            .sidebar
            .rows()
            .iter()
            .position(|row| {
                matches!(row, SidebarRow::Group { key: k, .. } if k.value() == key)
            })
            .unwrap();
        app.sidebar.list.selected = pos;
        let classification = app.classification.clone();
        app.sidebar.activate_selected(&classification);
        app.after_sidebar_change();
    }

    #[test]
    fn test_search_narrows_then_restores() {
        let mut app = app();
        assert_eq!(app.classification.groups().len(), 2);

        app.search.query = "westpac".to_string();
        app.apply_search();
        assert_eq!(app.classification.groups().len(), 1);
        assert_eq!(app.classification.company_count(), 1);

        app.search.clear();
        app.apply_search();
        assert_eq!(app.classification.groups().len(), 2);
    }

    #[test]
    fn test_short_query_is_inactive() {
        let mut app = app();
        app.search.query = "w".to_string();
        app.apply_search();
        assert_eq!(app.classification.company_count(), 3);
    }

    #[test]
    fn test_intents_drive_watchlist() {
        let mut app = app();
        open_group(&mut app, "financials");

        let classification = app.classification.clone();
        app.sidebar.list.selected += 1;
        if let Some(intent) = app.sidebar.activate_selected(&classification) {
            app.handle_intent(intent);
        }
        assert_eq!(app.watchlist.len(), 1);

        if let Some(intent) = app.sidebar.remove_selected() {
            app.handle_intent(intent);
        }
        assert!(app.watchlist.is_empty());
    }

    #[test]
    fn test_table_toggle_watch() {
        let mut app = app();
        open_group(&mut app, "financials");
        assert_eq!(app.active_companies().len(), 2);

        app.toggle_selected_watch();
        assert_eq!(app.watchlist.len(), 1);
        app.toggle_selected_watch();
        assert!(app.watchlist.is_empty());
    }

    #[test]
    fn test_status_expires_on_tick() {
        let mut app = app();
        app.set_status("hello".to_string());
        assert!(app.status.is_some());
        for _ in 0..STATUS_TTL_TICKS {
            app.on_tick();
        }
        assert!(app.status.is_none());
    }
}
