//! Stateful tree widget for the sidebar.
//!
//! Renders flattened sidebar rows with expansion markers, per-group counts
//! and a scrollbar when the rows overflow the viewport.

use ratatui::prelude::*;
use ratatui::widgets::{Block, StatefulWidget, Widget};
use unicode_width::UnicodeWidthStr;

use crate::tui::sidebar::SidebarRow;
use crate::tui::state::ListState;
use crate::tui::theme::{palette, Styles};

pub struct GroupTree<'a> {
    rows: &'a [SidebarRow],
    block: Option<Block<'a>>,
}

impl<'a> GroupTree<'a> {
    #[must_use]
    pub fn new(rows: &'a [SidebarRow]) -> Self {
        Self { rows, block: None }
    }

    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn row_line(row: &SidebarRow) -> (String, Style) {
        match row {
            SidebarRow::Group {
                title,
                count,
                is_open,
                ..
            } => {
                let marker = if *is_open { "▾" } else { "▸" };
                (format!("{marker} {title} ({count})"), Styles::text())
            }
            SidebarRow::Company { company, .. } => (
                format!("    {} {}", company.code, company.name),
                Styles::dim(),
            ),
        }
    }
}

impl StatefulWidget for GroupTree<'_> {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };

        if inner.width < 2 || inner.height == 0 {
            return;
        }

        let visible = inner.height as usize;
        state.clamp(self.rows.len());
        state.scroll_to_selected(visible);

        let overflow = self.rows.len() > visible;
        let text_width = if overflow {
            inner.width.saturating_sub(1) as usize
        } else {
            inner.width as usize
        };

        for (line_idx, (row_idx, row)) in self
            .rows
            .iter()
            .enumerate()
            .skip(state.offset)
            .take(visible)
            .enumerate()
        {
            let y = inner.y + line_idx as u16;
            let (text, base_style) = Self::row_line(row);
            let style = if row_idx == state.selected {
                Styles::selected()
            } else {
                base_style
            };

            let line = truncate_to_width(&text, text_width);
            buf.set_stringn(inner.x, y, &line, text_width, style);

            if row_idx == state.selected {
                // fill the remainder of the selected row
                let used = line.width() as u16;
                for x in inner.x + used..inner.x + text_width as u16 {
                    buf[(x, y)].set_style(style);
                }
            }
        }

        if overflow {
            render_scrollbar(inner, buf, self.rows.len(), state.offset, visible);
        }
    }
}

fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let budget = width.saturating_sub(1);
    for c in text.chars() {
        let next = out.width() + unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if next > budget {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}

fn render_scrollbar(area: Rect, buf: &mut Buffer, total: usize, offset: usize, visible: usize) {
    let x = area.x + area.width - 1;
    let track = area.height as usize;
    let thumb = ((visible * track) / total).max(1);
    let max_offset = total - visible;
    let thumb_top = if max_offset == 0 {
        0
    } else {
        (offset * (track - thumb)) / max_offset
    };

    for row in 0..track {
        let cell = &mut buf[(x, area.y + row as u16)];
        if row >= thumb_top && row < thumb_top + thumb {
            cell.set_symbol("█").set_fg(palette().accent);
        } else {
            cell.set_symbol("│").set_fg(palette().border);
        }
    }
}
