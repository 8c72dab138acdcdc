use super::blocks::{self, truncate_str};
use crate::app::{App, InputMode};
use crate::filter::Narrowing;
use crate::router::Page;
use crate::view_model::Card;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

fn page_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", title))
}

pub fn render_home(app: &App, frame: &mut Frame, area: Rect) {
    let bio = &app.catalog.bio;
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Portfolio Explorer",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if !bio.summary.is_empty() {
        lines.push(Line::from(bio.summary.as_str()));
        lines.push(Line::from(""));
    }
    if !bio.specializations.is_empty() {
        lines.push(Line::from(Span::styled(
            bio.specializations.join(" • "),
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(""));
    }
    for (name, count) in app.catalog.counts() {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>14} ", name), Style::default().fg(Color::DarkGray)),
            Span::styled(count.to_string(), Style::default().fg(Color::White)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press 1-8 or Tab to explore, ? for help",
        Style::default().fg(Color::DarkGray),
    )));

    let home = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(page_block(Page::Home.label()));
    frame.render_widget(home, area);
}

/// A single scrollable document, for pages made of one card.
pub fn render_document(app: &App, page: Page, frame: &mut Frame, area: Rect) {
    let mut lines = Vec::new();
    for card in app.cards(page) {
        lines.push(Line::from(Span::styled(
            card.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        lines.extend(blocks::lines(&card.blocks, None));
    }

    let document = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.doc_scroll, 0))
        .block(page_block(page.label()));
    frame.render_widget(document, area);
}

pub fn render_cards(app: &App, page: Page, frame: &mut Frame, area: Rect) {
    let cards = app.cards(page);
    let title = page.label();

    if cards.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            " Nothing matches. Esc clears the filter.",
            Style::default().fg(Color::DarkGray),
        )))
        .block(page_block(title));
        frame.render_widget(empty, area);
        return;
    }

    // Borders plus the highlight symbol
    let width = usize::from(area.width.saturating_sub(4)).max(1);
    let items: Vec<ListItem> = cards.iter().map(|card| card_item(card, width)).collect();

    let position = format!(" {} of {} ", app.selected(page) + 1, cards.len());
    let list = List::new(items)
        .block(page_block(title).title_bottom(Line::from(position).alignment(Alignment::Right)))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    state.select(Some(app.selected(page)));
    frame.render_stateful_widget(list, area, &mut state);
}

fn card_item(card: &Card, width: usize) -> ListItem<'static> {
    let mut lines = Vec::new();
    if let Some(kicker) = &card.kicker {
        lines.push(Line::from(Span::styled(
            truncate_str(kicker, width),
            Style::default().fg(Color::Magenta),
        )));
    }
    lines.push(Line::from(Span::styled(
        truncate_str(&card.title, width),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    lines.extend(blocks::lines(&card.blocks, Some(width)));
    lines.push(Line::from(""));
    ListItem::new(Text::from(lines))
}

pub fn render_narrowing_bar(app: &App, page: Page, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let (label, value) = if editing {
        (" Search (Enter/Esc to finish): ".to_string(), app.search_input.clone())
    } else {
        match app.narrowing(page) {
            Narrowing::All => (format!(" Showing all{}", hint(page)), String::new()),
            Narrowing::Dimension(value) => {
                (format!(" {}: ", dimension_name(page)), format!("{}  (Esc to clear)", value))
            }
            Narrowing::Search(query) => (" Search: ".to_string(), format!("{}  (Esc to clear)", query)),
        }
    };

    let bar = Paragraph::new(format!("{}{}", label, value))
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(" Filter "),
        );
    frame.render_widget(bar, area);

    if editing {
        let offset = label.width() + app.search_input.width();
        let cursor_x = area.x + 1 + u16::try_from(offset).unwrap_or(u16::MAX);
        frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn dimension_name(page: Page) -> &'static str {
    match page {
        Page::Awards => "Category",
        _ => "Theme",
    }
}

fn hint(page: Page) -> &'static str {
    match page {
        Page::Episodes => "  (/ search, t theme)",
        Page::Awards => "  (c category)",
        Page::Publications => "  (/ search)",
        _ => "",
    }
}

pub fn render_unknown(id: &str, frame: &mut Frame, area: Rect) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("There is no page called \"{}\".", id),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(Span::styled(
            "Pick one from the bar above.",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(page_block("Not found"));
    frame.render_widget(text, area);
}
