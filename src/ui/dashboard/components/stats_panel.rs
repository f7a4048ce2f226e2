//! Summary statistics and data status panel

use super::super::state::DashboardState;
use super::super::utils::status_color;
use crate::backend::{Moments, SummaryStats};
use crate::reconciler::SliceStatus;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

pub fn render_stats_panel(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_moments(f, chunks[0], state.controller.view_model().stats);
    render_data_status(f, chunks[1], state);
}

fn render_moments(f: &mut Frame, area: Rect, stats: Option<&SummaryStats>) {
    let mut lines = Vec::new();
    match stats {
        Some(stats) => {
            push_moments(&mut lines, "Before", &stats.before, Color::LightBlue);
            lines.push(Line::from(""));
            push_moments(&mut lines, "After", &stats.after, Color::LightGreen);
        }
        None => lines.push(Line::from(Span::styled(
            "No statistics yet",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let block = Block::default()
        .title("SUMMARY STATS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn push_moments(lines: &mut Vec<Line<'static>>, label: &str, moments: &Moments, color: Color) {
    lines.push(Line::from(Span::styled(
        label.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));
    for (name, value) in [
        ("Mean", moments.mean_display()),
        ("Std", moments.std_display()),
        ("Skewness", moments.skewness_display()),
        ("Kurtosis", moments.kurtosis_display()),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}: ", name), Style::default().fg(Color::Gray)),
            Span::styled(value, Style::default().fg(Color::White)),
        ]));
    }
}

fn render_data_status(f: &mut Frame, area: Rect, state: &DashboardState) {
    let data = state.controller.data();
    let view = state.controller.view_model();

    let change_point = match (view.marker, data.change_point()) {
        (Some(marker), _) => format!("{} (#{})", marker.date, marker.index),
        (None, Some(index)) => format!("#{} outside series", index),
        (None, None) => "none".to_string(),
    };

    let uptime = state.start_time.elapsed().as_secs();
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Backend: ", Style::default().fg(Color::Gray)),
            Span::styled(
                state.environment.backend_url(),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(vec![
            Span::styled("Range: ", Style::default().fg(Color::Gray)),
            Span::styled(
                state.controller.range().to_string(),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Points: ", Style::default().fg(Color::Gray)),
            Span::styled(
                data.series().len().to_string(),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Change point: ", Style::default().fg(Color::Gray)),
            Span::styled(change_point, Style::default().fg(Color::Red)),
        ]),
    ];

    lines.push(Line::from(vec![
        status_span("series", data.series_status()),
        Span::raw(" "),
        status_span("cp", data.change_point_status()),
        Span::raw(" "),
        status_span("stats", data.stats_status()),
    ]));

    lines.push(Line::from(vec![
        Span::styled("Uptime: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}m {}s", uptime / 60, uptime % 60),
            Style::default().fg(Color::LightGreen),
        ),
    ]));

    let block = Block::default()
        .title("DATA STATUS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn status_span(label: &str, status: SliceStatus) -> Span<'static> {
    Span::styled(
        format!("{}:{}", label, status),
        Style::default().fg(status_color(status)),
    )
}
