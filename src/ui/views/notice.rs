use ratatui::{
    layout::{Alignment, Rect},
    style::Color,
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    styled_line,
    ui::{
        browser::{Notice, NoticeKind},
        views::titled_block,
    },
};

/// `width`×`height` rectangle centered in `area`, clamped to it.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn render_notice(frame: &mut Frame, area: Rect, notice: &Notice) {
    let color = match notice.kind {
        NoticeKind::Info => Color::Green,
        NoticeKind::Warning => Color::Yellow,
        NoticeKind::Error => Color::Red,
    };

    let popup = centered(area, 60, 7);
    let lines = vec![
        styled_line!(&notice.message; color),
        styled_line!(),
        styled_line!("Enter/Esc to close"; Color::DarkGray),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(titled_block(&notice.title, true).border_style(ratatui::style::Style::default().fg(color)));

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}
