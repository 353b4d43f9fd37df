//! Results table for the open industry group.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::model::Company;
use crate::tui::app::{App, Panel};
use crate::tui::theme::{palette, Styles};

/// Render the company table for the open group, or a hint when no group is
/// open.
pub fn render_company_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Panel::Table;
    let border_style = if focused {
        Styles::border(true)
    } else {
        Styles::border(false)
    };

    let title = match app.active_group_title() {
        Some(title) => format!(" {title} "),
        None => " Companies ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    let companies: Vec<Company> = app.active_companies().to_vec();
    if companies.is_empty() {
        let hint = Paragraph::new("Open an industry group to list its companies")
            .style(Styles::dim())
            .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let visible = area.height.saturating_sub(3) as usize;
    app.table.clamp(companies.len());
    app.table.scroll_to_selected(visible);

    let header = Row::new(vec![
        Cell::from(" "),
        Cell::from("Code"),
        Cell::from("Name"),
        Cell::from("Sector"),
        Cell::from("Exchange"),
        Cell::from("Mkt Cap"),
    ])
    .style(Styles::title());

    let selected = app.table.selected;
    let offset = app.table.offset;
    let rows: Vec<Row> = companies
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(idx, company)| {
            let watched = app.watchlist.contains(&company.identity());
            let mark = if watched { "★" } else { " " };
            let mark_style = Style::default().fg(palette().accent);
            let row = Row::new(vec![
                Cell::from(mark).style(mark_style),
                Cell::from(company.code.clone()),
                Cell::from(company.name.clone()),
                Cell::from(company.sector.clone()),
                Cell::from(company.exchange.clone().unwrap_or_default()),
                Cell::from(format_market_cap(company.market_cap)),
            ]);
            if idx == selected && focused {
                row.style(Styles::selected())
            } else {
                row.style(Styles::text())
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Length(6),
            Constraint::Min(20),
            Constraint::Length(22),
            Constraint::Length(8),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, area);
}

/// Human-readable market cap, e.g. 2_450_000_000 -> "2.45B".
fn format_market_cap(value: Option<u64>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    match value {
        v if v >= 1_000_000_000_000 => format!("{:.2}T", v as f64 / 1e12),
        v if v >= 1_000_000_000 => format!("{:.2}B", v as f64 / 1e9),
        v if v >= 1_000_000 => format!("{:.1}M", v as f64 / 1e6),
        v => v.to_string(),
    }
}
