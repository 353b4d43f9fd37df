//! Terminal event pump and key dispatch.

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Position;
use tracing::warn;

use crate::tui::app::{App, Overlay, Panel};
use crate::tui::constants::TICK_MS;
use crate::tui::state::ListNavigation;
use crate::tui::theme;
use crate::watchlist::ExportFormat;

#[derive(Debug)]
pub enum Event {
    Tick,
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Reads terminal events on a background thread and interleaves ticks.
pub struct EventHandler {
    receiver: mpsc::Receiver<Event>,
    _handle: thread::JoinHandle<()>,
}

impl EventHandler {
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        let tick_rate = Duration::from_millis(TICK_MS);
        let handle = thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);
                match event::poll(timeout) {
                    Ok(true) => {
                        let forward = match event::read() {
                            Ok(CrosstermEvent::Key(key)) if key.kind == event::KeyEventKind::Press => {
                                Some(Event::Key(key))
                            }
                            Ok(CrosstermEvent::Mouse(mouse)) => Some(Event::Mouse(mouse)),
                            Ok(CrosstermEvent::Resize(w, h)) => Some(Event::Resize(w, h)),
                            Ok(_) => None,
                            Err(err) => {
                                warn!("event read failed: {err}");
                                None
                            }
                        };
                        if let Some(event) = forward {
                            if sender.send(event).is_err() {
                                break;
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(err) => {
                        warn!("event poll failed: {err}");
                    }
                }
                if last_tick.elapsed() >= tick_rate {
                    if sender.send(Event::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });
        Self {
            receiver,
            _handle: handle,
        }
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.receiver.recv()
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply one key press to the application state.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    if app.overlay == Overlay::Help {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.overlay = Overlay::None;
            }
            _ => {}
        }
        return;
    }

    if app.search.active {
        handle_search_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('/') => app.search.open(),
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        KeyCode::Tab => app.toggle_focus(),
        KeyCode::Char('t') => {
            let name = theme::cycle_theme();
            app.set_status(format!("Theme: {name}"));
        }
        KeyCode::Char('e') => app.export_watchlist(ExportFormat::Json),
        KeyCode::Char('E') => app.export_watchlist(ExportFormat::Csv),
        KeyCode::Esc if !app.search.query.is_empty() => {
            app.search.clear();
            app.apply_search();
        }
        _ => match app.focus {
            Panel::Sidebar => handle_sidebar_key(app, key),
            Panel::Table => handle_table_key(app, key),
        },
    }
}

/// Apply one mouse event to the application state.
///
/// Scroll moves the selection in the focused panel; a left click below the
/// header focuses the panel under the pointer. Any click dismisses the help
/// overlay.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.overlay == Overlay::Help {
        if matches!(mouse.kind, MouseEventKind::Down(_)) {
            app.overlay = Overlay::None;
        }
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollUp => match app.focus {
            Panel::Sidebar => app.sidebar.select_previous(),
            Panel::Table => app.select_previous(),
        },
        MouseEventKind::ScrollDown => match app.focus {
            Panel::Sidebar => app.sidebar.select_next(),
            Panel::Table => app.select_next(),
        },
        MouseEventKind::Down(MouseButton::Left) => {
            let body = app.sidebar_area;
            if mouse.row < body.y || mouse.row >= body.y + body.height {
                return;
            }
            if body.contains(Position::new(mouse.column, mouse.row)) {
                app.focus = Panel::Sidebar;
            } else {
                app.focus = Panel::Table;
            }
        }
        _ => {}
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.search.clear();
            app.apply_search();
        }
        KeyCode::Enter => app.search.accept(),
        KeyCode::Backspace => {
            app.search.pop();
            app.apply_search();
        }
        KeyCode::Char(c) => {
            app.search.push(c);
            app.apply_search();
        }
        _ => {}
    }
}

fn handle_sidebar_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.sidebar.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.sidebar.select_previous(),
        KeyCode::PageDown => app.sidebar.page_down(),
        KeyCode::PageUp => app.sidebar.page_up(),
        KeyCode::Home => app.sidebar.select_first(),
        KeyCode::End => app.sidebar.select_last(),
        KeyCode::Char('n') => app.sidebar.next_group(),
        KeyCode::Char('p') => app.sidebar.previous_group(),
        KeyCode::Enter | KeyCode::Right => {
            let classification = app.classification().clone();
            if let Some(intent) = app.sidebar.activate_selected(&classification) {
                app.handle_intent(intent);
            } else {
                app.after_sidebar_change();
            }
        }
        KeyCode::Left => {
            let classification = app.classification().clone();
            app.sidebar.close_active();
            app.sidebar.sync(&classification);
            app.after_sidebar_change();
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(intent) = app.sidebar.remove_selected() {
                app.handle_intent(intent);
            }
        }
        _ => {}
    }
}

fn handle_table_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::PageDown => app.page_down(),
        KeyCode::PageUp => app.page_up(),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),
        KeyCode::Enter | KeyCode::Char('w') => app.toggle_selected_watch(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IndustryCatalog, Listing};
    use std::path::PathBuf;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn app() -> App {
        let listing: Listing = serde_json::from_str(
            r#"[
                {"code": "BHP", "name": "BHP Group", "sector": "Materials"},
                {"code": "CBA", "name": "Commonwealth Bank", "sector": "Banks"}
            ]"#,
        )
        .unwrap();
        App::new(listing, IndustryCatalog::asx_default(), PathBuf::from("."))
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = self::app();
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_search_mode_captures_q() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('/')));
        assert!(app.search.active);
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert_eq!(app.search.query, "q");
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(app.search.query.is_empty());
        assert!(!app.search.active);
    }

    #[test]
    fn test_typed_query_filters_groups() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('/')));
        for c in "bhp".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        handle_key(&mut app, press(KeyCode::Enter));
        assert!(!app.search.active);
        assert_eq!(app.classification().groups().len(), 1);

        // Esc outside input mode clears the applied filter
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.classification().groups().len(), 2);
    }

    #[test]
    fn test_enter_opens_group_and_adds_company() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Enter));
        assert!(app.sidebar.active_key().is_some());
        handle_key(&mut app, press(KeyCode::Down));
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.watchlist.len(), 1);
        handle_key(&mut app, press(KeyCode::Char('d')));
        assert!(app.watchlist.is_empty());
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('?')));
        assert_eq!(app.overlay, Overlay::Help);
        handle_key(&mut app, press(KeyCode::Char('j')));
        assert_eq!(app.sidebar.list.selected, 0);
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn test_scroll_moves_focused_panel() {
        let mut app = app();
        assert_eq!(app.focus, Panel::Sidebar);
        handle_mouse(&mut app, mouse(MouseEventKind::ScrollDown, 5, 5));
        assert_eq!(app.sidebar.list.selected, 1);
        handle_mouse(&mut app, mouse(MouseEventKind::ScrollUp, 5, 5));
        assert_eq!(app.sidebar.list.selected, 0);
    }

    #[test]
    fn test_click_focuses_panel_under_pointer() {
        let mut app = app();
        app.sidebar_area = ratatui::layout::Rect::new(0, 1, 28, 20);
        app.focus = Panel::Sidebar;

        handle_mouse(
            &mut app,
            mouse(MouseEventKind::Down(MouseButton::Left), 50, 5),
        );
        assert_eq!(app.focus, Panel::Table);

        handle_mouse(
            &mut app,
            mouse(MouseEventKind::Down(MouseButton::Left), 5, 5),
        );
        assert_eq!(app.focus, Panel::Sidebar);

        // Clicks on the header row leave focus alone.
        app.focus = Panel::Table;
        handle_mouse(
            &mut app,
            mouse(MouseEventKind::Down(MouseButton::Left), 5, 0),
        );
        assert_eq!(app.focus, Panel::Table);
    }

    #[test]
    fn test_click_dismisses_help_overlay() {
        let mut app = app();
        app.overlay = Overlay::Help;
        handle_mouse(&mut app, mouse(MouseEventKind::ScrollDown, 5, 5));
        assert_eq!(app.overlay, Overlay::Help);
        assert_eq!(app.sidebar.list.selected, 0);
        handle_mouse(
            &mut app,
            mouse(MouseEventKind::Down(MouseButton::Left), 5, 5),
        );
        assert_eq!(app.overlay, Overlay::None);
    }
}
