//! Dashboard footer component
//!
//! Renders key bindings, or the date prompt while a bound is being edited

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let (footer_text, footer_color) = match state.input() {
        Some(input) => (
            format!(
                "{} date (YYYY-MM-DD, empty = open): {}_ | [Enter] Apply | [Esc] Cancel",
                input.field, input.buffer
            ),
            Color::LightYellow,
        ),
        None => (
            "[S] Start | [E] End | [C] Clear range | [R] Refresh | [Q] Quit".to_string(),
            Color::Cyan,
        ),
    };

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(footer_color)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
