//! Trailing rows: timestamp (when present), close, rolling mean, signal.

use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use trendsignal_core::{SignalView, TailRow};

use crate::app::{AppState, Outcome};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(" Latest rows ")
        .title_style(theme::muted());

    match &app.outcome {
        Some(Outcome::Success { view, .. }) => render_table(f, area, block, view),
        _ => {
            let para = Paragraph::new(Span::styled("No data yet.", theme::muted())).block(block);
            f.render_widget(para, area);
        }
    }
}

fn header_labels(has_timestamp: bool) -> Vec<&'static str> {
    let mut labels = Vec::with_capacity(4);
    if has_timestamp {
        labels.push("timestamp");
    }
    labels.extend(["close", "rolling_mean", "signal"]);
    labels
}

fn format_number(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        format!("{value:.4}")
    }
}

fn row_cells(row: &TailRow, has_timestamp: bool) -> Vec<Cell<'static>> {
    let mut cells = Vec::with_capacity(4);
    if has_timestamp {
        cells.push(Cell::from(row.timestamp.clone().unwrap_or_default()).style(theme::muted()));
    }
    cells.push(Cell::from(format_number(row.close)).style(theme::text()));
    cells.push(Cell::from(format_number(row.rolling_mean)).style(theme::warning()));
    cells.push(Cell::from(row.signal.to_string()).style(theme::signal(row.signal)));
    cells
}

fn render_table(f: &mut Frame, area: Rect, block: Block, view: &SignalView) {
    let labels = header_labels(view.has_timestamp);
    let header = Row::new(labels.iter().map(|l| Cell::from(*l))).style(theme::accent_bold());

    let rows = view
        .tail
        .iter()
        .map(|r| Row::new(row_cells(r, view.has_timestamp)));

    let widths: Vec<Constraint> = labels
        .iter()
        .map(|l| match *l {
            "timestamp" => Constraint::Length(20),
            "signal" => Constraint::Length(7),
            _ => Constraint::Length(14),
        })
        .collect();

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
