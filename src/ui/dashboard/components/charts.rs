//! Price and log-return charts
//!
//! Both charts share an x axis of series offsets so the change-point marker
//! lines up on each.

use super::super::state::DashboardState;
use super::super::utils::{date_labels, value_bounds};
use crate::backend::SeriesPoint;
use crate::reconciler::Marker;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::Line;
use ratatui::widgets::{
    Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph, Wrap,
};

pub fn render_charts(f: &mut Frame, area: Rect, state: &DashboardState) {
    let view = state.controller.view_model();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_series_chart(
        f,
        chunks[0],
        "PRICE",
        view.series,
        view.marker,
        Color::Cyan,
        |p| p.price,
    );
    render_series_chart(
        f,
        chunks[1],
        "LOG RETURNS",
        view.series,
        view.marker,
        Color::LightMagenta,
        |p| p.log_return,
    );
}

fn render_series_chart(
    f: &mut Frame,
    area: Rect,
    title: &str,
    series: &[SeriesPoint],
    marker: Option<Marker>,
    color: Color,
    value: impl Fn(&SeriesPoint) -> f64,
) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    if series.is_empty() {
        let empty = Paragraph::new(vec![Line::from("No data for the selected range")])
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block)
            .wrap(Wrap { trim: true });
        f.render_widget(empty, area);
        return;
    }

    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, value(p)))
        .collect();
    let y_bounds = value_bounds(points.iter().map(|(_, y)| *y));
    let x_max = (series.len().saturating_sub(1) as f64).max(1.0);

    let marker_points: Vec<(f64, f64)> = marker
        .map(|m| vec![(m.index as f64, y_bounds[0]), (m.index as f64, y_bounds[1])])
        .unwrap_or_default();

    let mut datasets = vec![
        Dataset::default()
            .name(title.to_lowercase())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color))
            .data(&points),
    ];
    if let Some(m) = marker {
        datasets.push(
            Dataset::default()
                .name(format!("change point {}", m.date))
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .data(&marker_points),
        );
    }

    let x_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, x_max])
        .labels(date_labels(series));
    let y_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds(y_bounds)
        .labels(vec![
            format!("{:.4}", y_bounds[0]),
            format!("{:.4}", y_bounds[1]),
        ]);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis);
    f.render_widget(chart, area);
}
