//! Top-level layout: form sidebar, result area, status bar.
//!
//! ```text
//! +-- form ------+-- banner ------------------------------+
//! |              +-- cards --------------------------------+
//! +-- errors ----+-- chart --------------------------------+
//! |              +-- tail table ---------------------------+
//! +--------------+-----------------------------------------+
//! status bar
//! ```

pub mod banner;
pub mod cards;
pub mod chart;
pub mod form;
pub mod status_bar;
pub mod table;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use crate::app::AppState;
use crate::worker::TAIL_ROWS;

const SIDEBAR_WIDTH: u16 = 38;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(40)])
        .split(chunks[0]);

    draw_sidebar(f, columns[0], app);
    draw_results(f, columns[1], app);
    status_bar::render(f, chunks[1], app);
}

fn draw_sidebar(f: &mut Frame, area: Rect, app: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(form::HEIGHT), Constraint::Min(3)])
        .split(area);

    form::render(f, rows[0], app);
    form::render_errors(f, rows[1], app);
}

fn draw_results(f: &mut Frame, area: Rect, app: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(TAIL_ROWS as u16 + 3),
        ])
        .split(area);

    banner::render(f, rows[0], app);
    cards::render(f, rows[1], app);
    chart::render(f, rows[2], app);
    table::render(f, rows[3], app);
}
