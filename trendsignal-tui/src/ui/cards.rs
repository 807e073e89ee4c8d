//! Four metric cards: rows processed, signal rate, latency, status.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Outcome};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (cell, (title, value, style)) in cells.iter().zip(card_values(app)) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::muted())
            .title(format!(" {title} "))
            .title_style(theme::muted());
        let para = Paragraph::new(Line::from(Span::styled(value, style))).block(block);
        f.render_widget(para, *cell);
    }
}

fn card_values(app: &AppState) -> [(&'static str, String, Style); 4] {
    match &app.outcome {
        Some(Outcome::Success { report, .. }) => [
            ("Rows processed", report.rows_processed.to_string(), theme::text()),
            ("Signal rate", format!("{:.4}", report.value), theme::accent_bold()),
            ("Latency", format!("{} ms", report.latency_ms), theme::text()),
            ("Status", "success".into(), theme::positive()),
        ],
        Some(Outcome::Failed { .. }) => [
            ("Rows processed", "-".into(), theme::muted()),
            ("Signal rate", "-".into(), theme::muted()),
            ("Latency", "-".into(), theme::muted()),
            ("Status", "error".into(), theme::negative()),
        ],
        None => [
            ("Rows processed", "-".into(), theme::muted()),
            ("Signal rate", "-".into(), theme::muted()),
            ("Latency", "-".into(), theme::muted()),
            ("Status", "idle".into(), theme::muted()),
        ],
    }
}
