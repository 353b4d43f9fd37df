//! Sidebar navigation tree over classified industry groups.
//!
//! At most one group is open at a time. Selecting the open group's header
//! closes it; selecting another header moves the open state there. When the
//! open group disappears from the classification (filtering emptied it), the
//! tree collapses back to headers-only on the next sync.

use crate::classify::Classification;
use crate::model::{Company, CompanyId, GroupKey};
use crate::tui::state::{ListNavigation, ListState};

/// One visible row of the flattened tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarRow {
    /// Group header with the number of companies it currently holds.
    Group {
        key: GroupKey,
        title: String,
        count: usize,
        is_open: bool,
    },
    /// Company entry under the open group.
    Company { group: GroupKey, company: Company },
}

impl SidebarRow {
    pub fn group_key(&self) -> &GroupKey {
        match self {
            Self::Group { key, .. } => key,
            Self::Company { group, .. } => group,
        }
    }
}

/// Outward intents the sidebar raises for the application shell to act on.
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarIntent {
    AddCompany(Company),
    RemoveCompany(CompanyId),
}

#[derive(Debug, Clone, Default)]
pub struct SidebarState {
    /// Key of the currently open group, if any.
    active_key: Option<GroupKey>,
    pub list: ListState,
    rows: Vec<SidebarRow>,
}

impl SidebarState {
    #[must_use]
    pub fn active_key(&self) -> Option<&GroupKey> {
        self.active_key.as_ref()
    }

    #[must_use]
    pub fn rows(&self) -> &[SidebarRow] {
        &self.rows
    }

    #[must_use]
    pub fn selected_row(&self) -> Option<&SidebarRow> {
        self.rows.get(self.list.selected)
    }

    /// Toggle a group: open it, or close it if it is already open.
    pub fn select_group(&mut self, key: &GroupKey) {
        if self.active_key.as_ref() == Some(key) {
            self.active_key = None;
        } else {
            self.active_key = Some(key.clone());
        }
    }

    pub fn close_active(&mut self) {
        self.active_key = None;
    }

    /// Rebuild the visible rows from the current classification.
    ///
    /// Collapses the tree when the open group is no longer present, then
    /// clamps the cursor to the new row count.
    pub fn sync(&mut self, classification: &Classification) {
        if let Some(key) = &self.active_key {
            if !classification.contains(key) {
                self.active_key = None;
            }
        }

        self.rows.clear();
        for (key, group) in classification.groups() {
            let is_open = self.active_key.as_ref() == Some(key);
            self.rows.push(SidebarRow::Group {
                key: key.clone(),
                title: group.title.clone(),
                count: group.companies.len(),
                is_open,
            });
            if is_open {
                for company in &group.companies {
                    self.rows.push(SidebarRow::Company {
                        group: key.clone(),
                        company: company.clone(),
                    });
                }
            }
        }

        self.list.clamp(self.rows.len());
    }

    /// Handle Enter on the selected row.
    ///
    /// On a group header this toggles the open group and keeps the cursor on
    /// that header. On a company row it raises an add intent.
    pub fn activate_selected(&mut self, classification: &Classification) -> Option<SidebarIntent> {
        match self.selected_row().cloned() {
            Some(SidebarRow::Group { key, .. }) => {
                self.select_group(&key);
                self.sync(classification);
                // keep the cursor on the toggled header
                if let Some(pos) = self.rows.iter().position(|row| {
                    matches!(row, SidebarRow::Group { key: k, .. } if *k == key)
                }) {
                    self.list.selected = pos;
                }
                None
            }
            Some(SidebarRow::Company { company, .. }) => {
                Some(SidebarIntent::AddCompany(company))
            }
            None => None,
        }
    }

    /// Raise a remove intent for the selected company row, if any.
    pub fn remove_selected(&self) -> Option<SidebarIntent> {
        match self.selected_row() {
            Some(SidebarRow::Company { company, .. }) => {
                Some(SidebarIntent::RemoveCompany(company.identity()))
            }
            _ => None,
        }
    }

    /// Jump the cursor to the next group header.
    pub fn next_group(&mut self) {
        let start = self.list.selected + 1;
        if let Some(pos) = self.rows[start.min(self.rows.len())..]
            .iter()
            .position(|row| matches!(row, SidebarRow::Group { .. }))
        {
            self.list.selected = start + pos;
        }
    }

    /// Jump the cursor to the previous group header.
    pub fn previous_group(&mut self) {
        if let Some(pos) = self.rows[..self.list.selected]
            .iter()
            .rposition(|row| matches!(row, SidebarRow::Group { .. }))
        {
            self.list.selected = pos;
        }
    }
}

impl ListNavigation for SidebarState {
    fn list_state(&mut self) -> &mut ListState {
        &mut self.list
    }

    fn list_len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classification;
    use crate::model::{IndustryCatalog, Listing};
    use crate::search::SearchResultSet;

    fn listing() -> Listing {
        serde_json::from_str(
            r#"[
                {"code": "BHP", "name": "BHP Group", "sector": "Materials"},
                {"code": "CBA", "name": "Commonwealth Bank", "sector": "Banks"},
                {"code": "WBC", "name": "Westpac", "sector": "Banks"}
            ]"#,
        )
        .unwrap()
    }

    fn classification() -> Classification {
        Classification::compute(
            &listing(),
            &IndustryCatalog::asx_default(),
            &SearchResultSet::inactive(),
        )
    }

    fn find_group(state: &SidebarState, key: &str) -> usize {
        state
            .rows()
            .iter()
            .position(|row| row.group_key().value() == key && matches!(row, SidebarRow::Group { .. }))
            .unwrap()
    }

    #[test]
    fn test_starts_collapsed() {
        let mut state = SidebarState::default();
        state.sync(&classification());
        assert!(state.active_key().is_none());
        assert!(state
            .rows()
            .iter()
            .all(|row| matches!(row, SidebarRow::Group { .. })));
    }

    #[test]
    fn test_open_then_toggle_closes() {
        let classification = classification();
        let mut state = SidebarState::default();
        state.sync(&classification);

        state.list.selected = find_group(&state, "financials");
        assert!(state.activate_selected(&classification).is_none());
        assert_eq!(state.active_key().unwrap().value(), "financials");
        let companies = state
            .rows()
            .iter()
            .filter(|row| matches!(row, SidebarRow::Company { .. }))
            .count();
        assert_eq!(companies, 2);

        // Enter again on the same header collapses
        assert!(state.activate_selected(&classification).is_none());
        assert!(state.active_key().is_none());
        assert!(state
            .rows()
            .iter()
            .all(|row| matches!(row, SidebarRow::Group { .. })));
    }

    #[test]
    fn test_at_most_one_open() {
        let classification = classification();
        let mut state = SidebarState::default();
        state.sync(&classification);

        state.list.selected = find_group(&state, "financials");
        state.activate_selected(&classification);
        state.list.selected = find_group(&state, "materials");
        state.activate_selected(&classification);

        assert_eq!(state.active_key().unwrap().value(), "materials");
        let open_headers = state
            .rows()
            .iter()
            .filter(|row| matches!(row, SidebarRow::Group { is_open: true, .. }))
            .count();
        assert_eq!(open_headers, 1);
    }

    #[test]
    fn test_auto_collapse_when_group_vanishes() {
        let classification = classification();
        let mut state = SidebarState::default();
        state.sync(&classification);
        state.list.selected = find_group(&state, "financials");
        state.activate_selected(&classification);

        // Re-classify with a search that matches only BHP: financials is gone.
        let narrowed = Classification::compute(
            &listing(),
            &IndustryCatalog::asx_default(),
            &SearchResultSet::from_iter([crate::model::CompanyId::from("BHP")]),
        );
        state.sync(&narrowed);

        assert!(state.active_key().is_none());
        assert_eq!(state.rows().len(), 1);
    }

    #[test]
    fn test_company_row_raises_add_intent() {
        let classification = classification();
        let mut state = SidebarState::default();
        state.sync(&classification);
        state.list.selected = find_group(&state, "financials");
        state.activate_selected(&classification);

        state.list.selected = find_group(&state, "financials") + 1;
        match state.activate_selected(&classification) {
            Some(SidebarIntent::AddCompany(company)) => assert_eq!(company.code, "CBA"),
            other => panic!("expected add intent, got {other:?}"),
        }
        match state.remove_selected() {
            Some(SidebarIntent::RemoveCompany(id)) => assert_eq!(id.value(), "CBA"),
            other => panic!("expected remove intent, got {other:?}"),
        }
    }

    #[test]
    fn test_group_jumps_skip_company_rows() {
        let classification = classification();
        let mut state = SidebarState::default();
        state.sync(&classification);
        let materials = find_group(&state, "materials");
        state.list.selected = materials;
        state.activate_selected(&classification);

        // materials is open, so its company row sits between the two headers
        state.next_group();
        assert_eq!(state.list.selected, find_group(&state, "financials"));

        state.previous_group();
        assert_eq!(state.list.selected, materials);
    }
}
