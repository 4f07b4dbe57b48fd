use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::{
    styled_line, styled_span,
    ui::{
        browser::{Field, SkinBrowser},
        selector::Selector,
        views::{titled_block, HalfBlockImage, ACCENT},
    },
};

pub fn render_browser(frame: &mut Frame, area: Rect, browser: &SkinBrowser, focus: Field) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(38), Constraint::Min(0)])
        .split(area);

    let lists = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(35),
            Constraint::Percentage(20),
        ])
        .split(columns[0]);

    for (field, chunk) in [Field::Champion, Field::Skin, Field::Chroma].into_iter().zip(lists.iter()) {
        render_selector(frame, *chunk, browser.selector(field), field == focus);
    }

    render_preview(frame, columns[1], browser);
}

fn render_selector(frame: &mut Frame, area: Rect, selector: &Selector, focused: bool) {
    let title = format!("{} ({})", selector.label(), selector.options().len());
    let block = titled_block(&title, focused);

    if selector.is_empty() {
        let empty = Paragraph::new(styled_line!("  nothing to choose"; Color::DarkGray)).block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items = selector
        .options()
        .iter()
        .map(|option| {
            if selector.chosen() == Some(option.as_str()) {
                ListItem::new(styled_line!(LIST [
                    styled_span!(" ✔ "; ACCENT),
                    styled_span!(option; Bold Color::White),
                ]))
            } else {
                ListItem::new(format!("   {}", option))
            }
        })
        .collect::<Vec<_>>();

    let highlight = if focused {
        Style::default().bg(Color::White).fg(Color::Black)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    };

    let mut state = ListState::default();
    state.select(selector.highlighted_index());

    let list = List::new(items).block(block).highlight_style(highlight);
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_preview(frame: &mut Frame, area: Rect, browser: &SkinBrowser) {
    let title = if browser.is_preview_loading() {
        "Preview (loading…)"
    } else {
        "Preview"
    };
    let block = titled_block(title, false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let preview = browser.preview();
    match preview.image() {
        Some(image) => frame.render_widget(HalfBlockImage::new(image), inner),
        None if preview.overlay().is_none() => {
            let hint = Paragraph::new(styled_line!("Select a skin to preview its splash art."; Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(hint, middle_row(inner));
        }
        None => {}
    }

    if let Some(overlay) = preview.overlay() {
        let label = Paragraph::new(styled_line!(overlay; Bold Color::White))
            .style(Style::default().bg(Color::Black))
            .alignment(Alignment::Center);
        frame.render_widget(label, middle_row(inner));
    }
}

fn middle_row(area: Rect) -> Rect {
    Rect {
        y: area.y + area.height / 2,
        height: area.height.min(1),
        ..area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_row_of_empty_area_is_empty() {
        assert_eq!(middle_row(Rect::new(0, 0, 10, 0)).height, 0);
        assert_eq!(middle_row(Rect::new(4, 2, 10, 6)), Rect::new(4, 5, 10, 1));
    }
}
