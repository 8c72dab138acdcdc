mod background;
mod blocks;
mod help;
mod modal;
mod pages;

use crate::app::App;
use crate::router::{Page, Route};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    if let Some(animator) = &app.background {
        background::render(animator.raster(), frame, area);
    }

    let page = app.current_page();
    let bar_height = match page {
        Some(p) if p.is_searchable() || p.is_filterable() => 3,
        _ => 0,
    };

    // Layout: nav(3) + narrowing bar(0|3) + body(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(bar_height),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    render_nav(app, frame, chunks[0]);

    match app.router.visible_section() {
        Some(Page::Home) => pages::render_home(app, frame, chunks[2]),
        Some(Page::Bio) => pages::render_document(app, Page::Bio, frame, chunks[2]),
        Some(p) => {
            if bar_height > 0 {
                pages::render_narrowing_bar(app, p, frame, chunks[1]);
            }
            pages::render_cards(app, p, frame, chunks[2]);
        }
        None => {
            let id = match app.route() {
                Route::Unknown(id) => id.as_str(),
                Route::Page(_) => "",
            };
            pages::render_unknown(id, frame, chunks[2]);
        }
    }

    render_status(app, frame, chunks[3]);

    if let Some(current) = app.presenter.current() {
        modal::render(current, frame);
    }

    // Help sits above everything else
    if app.show_help {
        help::render(frame);
    }
}

fn render_nav(app: &App, frame: &mut Frame, area: Rect) {
    let active = app.router.active_control();
    let titles: Vec<Line> = app
        .router
        .controls()
        .iter()
        .enumerate()
        .map(|(i, control)| {
            let style = if control.active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(
                format!(" {} {} ", i + 1, nav_title(control.target)),
                style,
            ))
        })
        .collect();

    let selected = active.and_then(|page| Page::ALL.iter().position(|p| *p == page));
    let highlight = if selected.is_some() {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default()
    };

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Portfolio "),
        )
        .select(selected.unwrap_or(0))
        .padding("", "")
        .highlight_style(highlight)
        .divider(Span::styled("│", Style::default().fg(Color::DarkGray)));
    frame.render_widget(tabs, area);
}

/// Short form of a page label that keeps all tabs on one line.
fn nav_title(page: Page) -> &'static str {
    match page {
        Page::Episodes => "Mondays",
        Page::Tools => "Tools",
        other => other.label(),
    }
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled(" 1-8", key),
        Span::raw(" Pages  "),
        Span::styled("↑↓", key),
        Span::raw(" Select  "),
        Span::styled("Enter", key),
        Span::raw(" Detail  "),
    ];
    match app.current_page() {
        Some(p) if p.is_searchable() => {
            spans.push(Span::styled("/", key));
            spans.push(Span::raw("Search  "));
        }
        _ => {}
    }
    match app.current_page() {
        Some(Page::Episodes) => {
            spans.push(Span::styled("t", key));
            spans.push(Span::raw(" Theme  "));
        }
        Some(Page::Awards) => {
            spans.push(Span::styled("c", key));
            spans.push(Span::raw(" Category  "));
        }
        _ => {}
    }
    spans.extend([
        Span::styled("?", key),
        Span::raw(" Help  "),
        Span::styled("q", key),
        Span::raw(" Quit  "),
        Span::styled(app.status_msg.as_str(), Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// A rectangle centered in `area`, `percent_x` wide and `height` tall.
pub(crate) fn centered_rect(percent_x: u16, height: Constraint, area: Rect) -> Rect {
    let [row] = Layout::vertical([height]).flex(Flex::Center).areas(area);
    let [cell] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;
    use crate::modal::ModalOverlay;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn draw(app: &App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn text(buffer: &Buffer) -> String {
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_nav_and_cards() {
        let mut app = App::new(fixtures::sample(), ModalOverlay::default());
        app.navigate_to("awards");

        let screen = text(&draw(&app));
        assert!(screen.contains("Mondays"));
        assert!(screen.contains("Awards: 3 shown"));
        assert!(screen.contains("Best Poster"));
        assert!(screen.contains("Early Career Grant"));
    }

    #[test]
    fn test_renders_modal_over_page() {
        let mut app = App::new(fixtures::sample(), ModalOverlay::default());
        app.navigate_to("episodes");
        app.show_detail(Page::Episodes, 1).unwrap();

        let screen = text(&draw(&app));
        assert!(screen.contains("Episode 2: Skin Flora"));
    }

    #[test]
    fn test_search_bar_while_editing() {
        let mut app = App::new(fixtures::sample(), ModalOverlay::default());
        app.navigate_to("episodes");
        app.begin_search();
        app.search_input = "gut".to_string();
        app.apply_search_input();

        let screen = text(&draw(&app));
        assert!(screen.contains("Search (Enter/Esc to finish): gut"));
        assert!(!screen.contains("cancel"));
    }

    #[test]
    fn test_unknown_route_renders_placeholder() {
        let mut app = App::new(fixtures::sample(), ModalOverlay::default());
        app.navigate_to("contact");

        let screen = text(&draw(&app));
        assert!(screen.contains("contact"));
        assert!(!screen.contains("Best Poster"));
    }

    #[test]
    fn test_centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(50, Constraint::Length(10), area);
        assert_eq!(rect.width, 50);
        assert_eq!(rect.height, 10);
        assert_eq!(rect.x, 25);
        assert_eq!(rect.y, 15);
    }
}
