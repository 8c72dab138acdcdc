use super::centered_rect;
use ratatui::{
    Frame,
    layout::Constraint,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Global",
        &[
            ("?", "Toggle this help"),
            ("q", "Quit application"),
            ("1-8", "Jump to a page"),
            ("Tab/S-Tab", "Next / previous page"),
            ("Esc", "Close overlay / clear filter"),
        ],
    ),
    (
        "Pages",
        &[
            ("↑/k ↓/j", "Select card (scroll on Bio)"),
            ("g/G", "First / last card"),
            ("Enter", "Open card details"),
            ("/", "Search episodes or publications"),
            ("t", "Cycle episode theme"),
            ("c", "Cycle award category"),
            ("o", "Open the card's link in a browser"),
            ("y", "Copy the card's link to clipboard"),
        ],
    ),
    (
        "Details",
        &[
            ("↑/↓", "Scroll content"),
            ("PgUp/PgDn", "Scroll page up/down"),
            ("Esc/q", "Close"),
        ],
    ),
];

pub fn render(frame: &mut Frame) {
    let area = centered_rect(70, Constraint::Percentage(80), frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let mut help_text = vec![Line::from("")];
    for (title, keys) in SECTIONS {
        help_text.push(Line::from(Span::styled(
            format!("  {}", title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        for (key, action) in *keys {
            help_text.push(Line::from(vec![
                Span::styled(format!("    {:<12}", key), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ]));
        }
        help_text.push(Line::from(""));
    }

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help: Keybindings ")
                .title_bottom(Line::from(" Press ? or Esc to close ").style(Style::default().fg(Color::DarkGray))),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}
