//! Start-up card shown while the first load runs

use crate::reconciler::SliceStatus;
use crate::ui::dashboard::DashboardState;
use crate::ui::dashboard::utils::status_color;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

const BANNER: &str = "r e g i m e · d a s h";
const CARD_WIDTH: u16 = 64;

pub fn render_splash(f: &mut Frame, state: &DashboardState) {
    let data = state.controller.data();
    let lines = vec![
        Line::from(Span::styled(
            BANNER,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "change-point regime dashboard",
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        labelled("Backend", state.environment.backend_url(), Color::Yellow),
        labelled("Range", state.controller.range().to_string(), Color::White),
        Line::from(""),
        Line::from(vec![
            slice_span("series", data.series_status()),
            Span::raw("  "),
            slice_span("change point", data.change_point_status()),
            Span::raw("  "),
            slice_span("stats", data.stats_status()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "any key to continue",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let height = lines.len() as u16 + 2;
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(f.area());
    let [card] = Layout::horizontal([Constraint::Length(CARD_WIDTH)])
        .flex(Flex::Center)
        .areas(row);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .padding(Padding::horizontal(1));

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        card,
    );
}

fn labelled(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

fn slice_span(label: &str, status: SliceStatus) -> Span<'static> {
    Span::styled(
        format!("{} {}", label, status),
        Style::default().fg(status_color(status)),
    )
}
