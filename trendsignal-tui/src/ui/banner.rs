//! One-line outcome banner above the metric cards.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{AppState, Outcome};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let (text, style) = message(app);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style);
    let para = Paragraph::new(Line::from(Span::styled(text, style)))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

fn message(app: &AppState) -> (String, Style) {
    if app.busy {
        return ("Working...".into(), theme::neutral());
    }
    match &app.outcome {
        None => (
            "Choose an input file and press Enter to run (g writes a sample file)".into(),
            theme::accent(),
        ),
        Some(Outcome::Success { report, .. }) => (
            format!(
                "Run succeeded: {} rows, {} {:.4} ({})",
                report.rows_processed, report.metric, report.value, report.version
            ),
            theme::positive(),
        ),
        Some(Outcome::Failed { report }) => (
            format!("Run failed: {}", report.error_message),
            theme::negative(),
        ),
    }
}
