//! Reusable selection and input state for list-like panels.

use crate::tui::constants::PAGE_SIZE;

/// Cursor plus scroll offset for a vertical list.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    pub selected: usize,
    pub offset: usize,
}

impl ListState {
    pub fn reset(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    /// Clamp the cursor after the underlying collection shrank.
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.reset();
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Keep the cursor inside the visible window.
    pub fn scroll_to_selected(&mut self, visible_rows: usize) {
        if visible_rows == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + visible_rows {
            self.offset = self.selected + 1 - visible_rows;
        }
    }
}

/// Shared navigation behavior for anything with a `ListState` and a length.
pub trait ListNavigation {
    fn list_state(&mut self) -> &mut ListState;
    fn list_len(&self) -> usize;

    fn select_next(&mut self) {
        let len = self.list_len();
        let state = self.list_state();
        if len > 0 && state.selected + 1 < len {
            state.selected += 1;
        }
    }

    fn select_previous(&mut self) {
        let state = self.list_state();
        if state.selected > 0 {
            state.selected -= 1;
        }
    }

    fn select_first(&mut self) {
        self.list_state().selected = 0;
    }

    fn select_last(&mut self) {
        let len = self.list_len();
        if len > 0 {
            self.list_state().selected = len - 1;
        }
    }

    fn page_down(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        let state = self.list_state();
        state.selected = (state.selected + PAGE_SIZE).min(len - 1);
    }

    fn page_up(&mut self) {
        let state = self.list_state();
        state.selected = state.selected.saturating_sub(PAGE_SIZE);
    }
}

/// Incremental search input for the sidebar filter.
#[derive(Debug, Clone, Default)]
pub struct SearchBar {
    pub query: String,
    pub active: bool,
}

impl SearchBar {
    pub fn open(&mut self) {
        self.active = true;
    }

    /// Leave input mode, keeping the query applied.
    pub fn accept(&mut self) {
        self.active = false;
    }

    /// Leave input mode and drop the query.
    pub fn clear(&mut self) {
        self.active = false;
        self.query.clear();
    }

    pub fn push(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop(&mut self) {
        self.query.pop();
    }

    /// True once the query is long enough to filter on.
    pub fn has_valid_query(&self) -> bool {
        self.query.trim().chars().count() >= crate::search::MIN_QUERY_LEN
    }
}
