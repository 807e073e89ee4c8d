//! Close vs rolling mean over the trailing rows.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use trendsignal_core::ChartPoint;

use crate::app::{AppState, Outcome};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(" Close vs rolling mean ")
        .title_style(theme::muted());

    match &app.outcome {
        Some(Outcome::Success { view, .. }) if !view.chart.is_empty() => {
            render_chart(f, area, block, &view.chart)
        }
        _ => {
            let para = Paragraph::new(Span::styled("No data yet.", theme::muted())).block(block);
            f.render_widget(para, area);
        }
    }
}

/// Finite y-range over both series, padded by 5%.
fn y_bounds(points: &[ChartPoint]) -> [f64; 2] {
    let (lo, hi) = points
        .iter()
        .flat_map(|p| [p.close, p.rolling_mean])
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return [0.0, 1.0];
    }
    let padding = ((hi - lo).abs() * 0.05).max(1e-9);
    [lo - padding, hi + padding]
}

fn render_chart(f: &mut Frame, area: Rect, block: Block, points: &[ChartPoint]) {
    let close: Vec<(f64, f64)> = points
        .iter()
        .filter(|p| p.close.is_finite())
        .map(|p| (p.index as f64, p.close))
        .collect();
    let mean: Vec<(f64, f64)> = points
        .iter()
        .filter(|p| p.rolling_mean.is_finite())
        .map(|p| (p.index as f64, p.rolling_mean))
        .collect();

    let x_min = points.first().map_or(0.0, |p| p.index as f64);
    let x_max = points.last().map_or(1.0, |p| p.index as f64).max(x_min + 1.0);
    let [y_min, y_max] = y_bounds(points);

    let datasets = vec![
        Dataset::default()
            .name("close")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::ACCENT))
            .graph_type(GraphType::Line)
            .data(&close),
        Dataset::default()
            .name("rolling_mean")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::WARNING))
            .graph_type(GraphType::Line)
            .data(&mean),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled("Row", theme::muted()))
                .style(theme::muted())
                .bounds([x_min, x_max])
                .labels(vec![
                    Span::styled(format!("{x_min:.0}"), theme::muted()),
                    Span::styled(format!("{x_max:.0}"), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.2}"), theme::muted()),
                    Span::styled(format!("{y_max:.2}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
