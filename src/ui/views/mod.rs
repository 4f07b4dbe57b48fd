use ratatui::{
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};

pub mod browser;
pub mod notice;
pub mod preview;

pub use browser::render_browser;
pub use notice::render_notice;
pub use preview::HalfBlockImage;

pub const ACCENT: Color = Color::Rgb(200, 150, 0);

/// Bordered block with the accent title, dimmed unless `focused`.
pub fn titled_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused { ACCENT } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title)
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
}

#[macro_export]
macro_rules! styled_span {
    // Expression with color and bold (expr; Bold Color::X)
    ($expr:expr; Bold $color:expr) => {
        ratatui::text::Span::styled(
            format!("{}", $expr),
            ratatui::style::Style::default()
                .fg($color)
                .add_modifier(ratatui::style::Modifier::BOLD)
        )
    };

    // Expression with color (expr; Color::X)
    ($expr:expr; $color:expr) => {
        ratatui::text::Span::styled(
            format!("{}", $expr),
            ratatui::style::Style::default().fg($color)
        )
    };

    // Formatted text with color (text, args...; Color::X)
    ($text:literal, $($arg:expr),+; $color:expr) => {
        ratatui::text::Span::styled(
            format!($text, $($arg),+),
            ratatui::style::Style::default().fg($color)
        )
    };

    // Plain text literal
    ($text:literal) => {
        ratatui::text::Span::raw($text)
    };

    // Plain expression
    ($expr:expr) => {
        ratatui::text::Span::raw(format!("{}", $expr))
    };
}

#[macro_export]
macro_rules! styled_line {
    // Empty line
    () => {
        ratatui::text::Line::raw("")
    };

    // Span vector
    (VAR $vec:expr) => {
        ratatui::text::Line::from($vec)
    };

    // Span list
    (LIST [$($args:expr),+ $(,)?]) => {
        ratatui::text::Line::from(vec![$($args),+])
    };

    // Full styled line
    ($($args:tt)+) => {
        ratatui::text::Line::from($crate::styled_span!($($args)+))
    };
}
