//! Sidebar: run parameters and the error history.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{AppState, ErrorRecord, Focus, VersionChoice, WINDOW_MAX};
use crate::theme;

/// Rows taken by the form block, borders included.
pub const HEIGHT: u16 = 13;

const SLIDER_WIDTH: usize = 20;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(" Parameters ")
        .title_style(theme::panel_title(true));

    let form = &app.form;
    let mut lines: Vec<Line> = Vec::new();

    let path = if form.path.is_empty() && app.focus != Focus::Path {
        "<none>".to_string()
    } else if app.focus == Focus::Path {
        format!("{}_", form.path)
    } else {
        form.path.clone()
    };
    push_field(&mut lines, app, Focus::Path, path);
    push_field(&mut lines, app, Focus::Seed, form.seed.to_string());
    push_field(&mut lines, app, Focus::Window, slider(form.window));
    push_field(&mut lines, app, Focus::Version, versions(form.version));

    lines.push(Line::from(Span::styled(
        "[Tab]next [Enter]run [g]sample [Esc]quit",
        theme::muted(),
    )));

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, area);
}

fn push_field(lines: &mut Vec<Line>, app: &AppState, field: Focus, value: String) {
    let focused = app.focus == field;
    let label_style = if focused {
        theme::accent().add_modifier(Modifier::REVERSED)
    } else {
        theme::muted()
    };
    let value_style = if focused { theme::accent() } else { theme::text() };

    lines.push(Line::from(Span::styled(field.label(), label_style)));
    lines.push(Line::from(Span::styled(format!("  {value}"), value_style)));
}

fn slider(window: usize) -> String {
    let filled = (window * SLIDER_WIDTH).div_ceil(WINDOW_MAX);
    let empty = SLIDER_WIDTH.saturating_sub(filled);
    format!("[{}{}] {window}", "=".repeat(filled), " ".repeat(empty))
}

fn versions(selected: VersionChoice) -> String {
    [VersionChoice::V1, VersionChoice::V2Beta]
        .iter()
        .map(|v| {
            if *v == selected {
                format!("({})", v.tag())
            } else {
                format!(" {} ", v.tag())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Most recent errors first.
pub fn render_errors(f: &mut Frame, area: Rect, app: &AppState) {
    let style = if app.error_history.is_empty() {
        theme::muted()
    } else {
        theme::negative()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(format!(" Errors ({}) ", app.error_history.len()))
        .title_style(style);

    if app.error_history.is_empty() {
        let para = Paragraph::new(Span::styled("No errors recorded.", theme::muted())).block(block);
        f.render_widget(para, area);
        return;
    }

    let lines: Vec<Line> = app.error_history.iter().flat_map(error_lines).collect();

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

/// Message line, then the context (usually the input path) when known.
fn error_lines(record: &ErrorRecord) -> Vec<Line<'_>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(record.timestamp.format("%H:%M:%S ").to_string(), theme::muted()),
        Span::styled(record.message.as_str(), theme::negative()),
    ])];
    if !record.context.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  in {}", record.context),
            theme::muted(),
        )));
    }
    lines
}
