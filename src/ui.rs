use ratatui::{prelude::*, widgets::*};

use crate::display::{Badge, BadgeVariant};

/// Terminal style for a badge emphasis
pub fn badge_style(variant: BadgeVariant) -> Style {
    match variant {
        BadgeVariant::Default => Style::default().fg(Color::Black).bg(Color::Cyan),
        BadgeVariant::Secondary => Style::default().fg(Color::White).bg(Color::DarkGray),
        BadgeVariant::Destructive => Style::default().fg(Color::White).bg(Color::Red).bold(),
        BadgeVariant::Outline => Style::default().fg(Color::Gray),
        BadgeVariant::Accent => Style::default().fg(Color::Black).bg(Color::Magenta).bold(),
    }
}

/// Badge as a padded span; outline badges get brackets instead of a fill
pub fn badge_span(badge: &Badge) -> Span<'static> {
    let text = match badge.variant {
        BadgeVariant::Outline => format!("[{}]", badge.label),
        _ => format!(" {} ", badge.label),
    };
    Span::styled(text, badge_style(badge.variant))
}

/// Renders a button-like control
pub fn render_button(label: &str) -> Paragraph<'static> {
    Paragraph::new(format!("[ {} ]", label))
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
