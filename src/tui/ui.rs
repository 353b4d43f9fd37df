//! Terminal lifecycle, layout and top-level rendering.

use std::io;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tracing::info;

use crate::error::{Result, StockdeckError};
use crate::tui::app::{App, Overlay, Panel, StatusKind};
use crate::tui::constants::{MIN_HEIGHT, MIN_WIDTH};
use crate::tui::events::{handle_key, handle_mouse, Event, EventHandler};
use crate::tui::theme::{palette, Styles};
use crate::tui::views::render_company_table;
use crate::tui::widgets::GroupTree;

/// Run the dashboard until the user quits.
pub fn run_tui(mut app: App, mouse_enabled: bool) -> Result<()> {
    enable_raw_mode().map_err(|e| StockdeckError::Terminal(format!("terminal setup: {e}")))?;
    let mut stdout = io::stdout();
    if mouse_enabled {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
    } else {
        execute!(stdout, EnterAlternateScreen)
    }
    .map_err(|e| StockdeckError::Terminal(format!("terminal setup: {e}")))?;

    // Restore the terminal even if rendering panics.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        restore_terminal();
        original_hook(panic);
    }));

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| StockdeckError::Terminal(format!("terminal setup: {e}")))?;

    let result = event_loop(&mut terminal, &mut app);
    restore_terminal();
    info!("dashboard closed");
    result
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let events = EventHandler::new();
    loop {
        terminal
            .draw(|frame| render(frame, app))
            .map_err(|e| StockdeckError::Terminal(format!("render: {e}")))?;

        match events.next() {
            Ok(Event::Key(key)) => handle_key(app, key),
            Ok(Event::Mouse(mouse)) => handle_mouse(app, mouse),
            Ok(Event::Tick) => app.on_tick(),
            Ok(Event::Resize(..)) => {}
            Err(_) => break,
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(frame, area);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_header(frame, app, chunks[0]);

    let body = Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);
    app.sidebar_area = body[0];
    render_sidebar(frame, app, body[0]);
    render_company_table(frame, app, body[1]);

    render_status(frame, app, chunks[2]);
    render_footer(frame, app, chunks[3]);

    if app.overlay == Overlay::Help {
        render_help(frame, area);
    }
}

fn render_too_small(frame: &mut Frame, area: Rect) {
    let msg = Paragraph::new(format!(
        "Terminal too small ({}x{}), need at least {MIN_WIDTH}x{MIN_HEIGHT}",
        area.width, area.height
    ))
    .style(Style::default().fg(palette().warn))
    .alignment(Alignment::Center);
    frame.render_widget(msg, area);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" stockdeck ", Styles::title()),
        Span::styled(
            format!(
                "{} companies, {} groups",
                app.listing.len(),
                app.classification().groups().len()
            ),
            Styles::dim(),
        ),
    ];
    if app.search.active || !app.search.query.is_empty() {
        let cursor = if app.search.active { "▏" } else { "" };
        spans.push(Span::styled("  /", Styles::key()));
        spans.push(Span::styled(
            format!("{}{cursor}", app.search.query),
            Styles::text(),
        ));
        if !app.search.has_valid_query() && !app.search.query.is_empty() {
            spans.push(Span::styled(" (type 2+ chars)", Styles::dim()));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_sidebar(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Panel::Sidebar;
    let border_style = if focused {
        Styles::border(true)
    } else {
        Styles::border(false)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Industry Groups ");

    if app.classification().is_empty() {
        let hint = Paragraph::new("No companies match")
            .style(Styles::dim())
            .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let rows = app.sidebar.rows().to_vec();
    let tree = GroupTree::new(&rows).block(block);
    frame.render_stateful_widget(tree, area, &mut app.sidebar.list);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let line = match &app.status {
        Some(status) => {
            let style = match status.kind {
                StatusKind::Info => Style::default().fg(palette().ok),
                StatusKind::Error => Style::default().fg(palette().err),
            };
            Line::from(Span::styled(format!(" {}", status.text), style))
        }
        None => Line::from(Span::styled(
            format!(" watchlist: {}", app.watchlist.len()),
            Styles::dim(),
        )),
    };
    frame.render_widget(Paragraph::new(line).style(Styles::status()), area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints: &[(&str, &str)] = if app.search.active {
        &[("Enter", "apply"), ("Esc", "clear"), ("type", "filter")]
    } else {
        &[
            ("/", "search"),
            ("Enter", "open/add"),
            ("w", "watch"),
            ("e", "export"),
            ("?", "help"),
            ("q", "quit"),
        ]
    };
    let mut spans = Vec::new();
    for (key, desc) in hints {
        spans.push(Span::styled(format!(" {key}"), Styles::key()));
        spans.push(Span::styled(format!(":{desc}"), Styles::key_desc()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let width = 52.min(area.width.saturating_sub(4));
    let height = 18.min(area.height.saturating_sub(2));
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let lines = vec![
        help_line("/", "search companies"),
        help_line("Esc", "clear search / close overlay"),
        help_line("Tab", "switch panel"),
        help_line("j/k, arrows", "move selection"),
        help_line("n/p", "next/previous group"),
        help_line("Enter", "open group / add to watchlist"),
        help_line("Left", "close open group"),
        help_line("w", "toggle watch (table)"),
        help_line("d", "remove from watchlist"),
        help_line("e / E", "export watchlist json / csv"),
        help_line("t", "cycle theme"),
        help_line("q", "quit"),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border(true))
        .title(" Help ");
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn help_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {key:<12}"), Styles::key()),
        Span::styled(desc.to_string(), Styles::text()),
    ])
}
