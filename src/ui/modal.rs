use super::{blocks, centered_rect};
use crate::modal::{Modal, ModalOptions};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render(modal: &Modal, frame: &mut Frame) {
    let screen = frame.area();
    let width = usize::from(screen.width) * usize::from(modal.options.width_percent.min(100)) / 100;
    let inner_width = width.saturating_sub(2).max(1);
    let lines = blocks::lines(&modal.body, Some(inner_width));

    let area = modal_area(&modal.options, lines.len(), screen);
    frame.render_widget(Clear, area);

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((modal.scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(Line::from(format!(" {} ", modal.title)).style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ))
                .title_bottom(
                    Line::from(" ↑↓ scroll  Esc close ").style(Style::default().fg(Color::DarkGray)),
                ),
        )
        .style(Style::default().fg(Color::White));
    frame.render_widget(body, area);
}

/// Fixed-height when a max height is set, otherwise sized to the content
/// and capped by the screen.
fn modal_area(options: &ModalOptions, content_lines: usize, screen: Rect) -> Rect {
    let height = match options.max_height_percent {
        Some(percent) => Constraint::Percentage(percent.min(100)),
        None => {
            let wanted = u16::try_from(content_lines).unwrap_or(u16::MAX).saturating_add(2);
            Constraint::Length(wanted.min(screen.height))
        }
    };
    centered_rect(options.width_percent.min(100), height, screen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tall_modal_uses_percentage() {
        let screen = Rect::new(0, 0, 100, 50);
        let area = modal_area(&ModalOptions::tall(), 3, screen);
        assert_eq!(area.width, 90);
        assert_eq!(area.height, 45);
    }

    #[test]
    fn test_default_modal_fits_content() {
        let screen = Rect::new(0, 0, 100, 50);
        let area = modal_area(&ModalOptions::default(), 5, screen);
        assert_eq!(area.height, 7);

        let area = modal_area(&ModalOptions::default(), 500, screen);
        assert_eq!(area.height, 50);
    }
}
