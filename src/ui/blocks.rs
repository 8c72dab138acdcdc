use crate::view_model::Block;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Lay out content blocks as styled lines.
///
/// With a `width`, prose is word-wrapped to it so the lines can go into
/// widgets that do not wrap (list items). Without one the caller is
/// expected to wrap, e.g. a `Paragraph` with `Wrap`.
pub fn lines(blocks: &[Block], width: Option<usize>) -> Vec<Line<'static>> {
    let mut out = Vec::new();
    for block in blocks {
        match block {
            Block::Heading(text) => out.push(Line::from(Span::styled(
                text.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))),
            Block::Subheading(text) => {
                out.push(Line::from(""));
                out.push(Line::from(Span::styled(
                    text.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )));
            }
            Block::Text(text) => push_prose(&mut out, text, width, Style::default()),
            Block::Emphasis(text) => push_prose(
                &mut out,
                text,
                width,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
            Block::Quote(text) => push_prose(
                &mut out,
                &format!("“{}”", text),
                width,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::ITALIC),
            ),
            Block::Field { label, value } => out.push(Line::from(vec![
                Span::styled(format!("{}: ", label), Style::default().fg(Color::DarkGray)),
                Span::styled(value.clone(), Style::default().fg(Color::White)),
            ])),
            Block::Tags { label, items } => {
                let mut spans = vec![Span::styled(
                    format!("{}: ", label),
                    Style::default().fg(Color::DarkGray),
                )];
                for item in items {
                    spans.push(Span::styled(
                        format!("[{}]", item),
                        Style::default().fg(Color::Yellow),
                    ));
                    spans.push(Span::raw(" "));
                }
                out.push(Line::from(spans));
            }
            Block::Bullets(items) => {
                for item in items {
                    out.push(Line::from(vec![
                        Span::styled("  • ", Style::default().fg(Color::Cyan)),
                        Span::raw(item.clone()),
                    ]));
                }
            }
            Block::Link { label, url } => out.push(Line::from(vec![
                Span::styled(format!("{} ↗ ", label), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    url.clone(),
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ])),
            Block::Rule => out.push(Line::from(Span::styled(
                "─".repeat(width.unwrap_or(40)),
                Style::default().fg(Color::DarkGray),
            ))),
        }
    }
    out
}

fn push_prose(out: &mut Vec<Line<'static>>, text: &str, width: Option<usize>, style: Style) {
    match width {
        Some(width) => out.extend(
            wrap(text, width)
                .into_iter()
                .map(|line| Line::from(Span::styled(line, style))),
        ),
        None => out.push(Line::from(Span::styled(text.to_string(), style))),
    }
}

/// Greedy word wrap by display width. Words wider than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    textwrap::wrap(
        text,
        textwrap::Options::new(width.max(1)).wrap_algorithm(textwrap::WrapAlgorithm::FirstFit),
    )
    .into_iter()
    .map(|line| line.into_owned())
    .collect()
}

/// Truncate a string to `max_width` columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        result.push(ch);
        used += w;
    }
    result.push('…');
    result
}
